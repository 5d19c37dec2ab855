//! Request and response models
//!
//! The DTO layer is where presentation happens: display percentages are
//! converted to fractions on the way in, summary rate fields are converted
//! back to percentages on the way out, and breakdown segments get 1-based
//! indexes and human-readable descriptions. Everything the engine or the
//! ledger touches stays in exact fractional `Decimal`s.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ledger::reports::CumulativeEarning;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::breakdown::{CommissionResult, Segment};
use types::commission::CommissionStructure;
use types::earning::Earning;
use types::employee::Employee;
use types::ids::EmployeeId;
use types::placement::Placement;

// ── Requests ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub commission_structure: CommissionStructure,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub commission_structure: Option<CommissionStructure>,
}

/// Placement submission; `fee_percentage` arrives as a display percentage
/// (25 means 25% of the starting salary)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlacementRequest {
    pub candidate_name: String,
    pub client_name: String,
    pub starting_salary: Decimal,
    pub fee_percentage: Decimal,
    pub employee_id: EmployeeId,
    pub placement_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub fee_amount: Decimal,
}

// ── Responses ───────────────────────────────────────────────────────

/// One breakdown segment, annotated for display
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownEntry {
    pub segment: usize,
    pub from_cumulative_fees: Decimal,
    pub to_cumulative_fees: Decimal,
    pub fee_amount: Decimal,
    pub rate: Decimal,
    pub commission: Decimal,
    pub description: String,
}

impl BreakdownEntry {
    pub fn from_segments(segments: &[Segment]) -> Vec<BreakdownEntry> {
        segments
            .iter()
            .enumerate()
            .map(|(index, segment)| BreakdownEntry {
                segment: index + 1,
                from_cumulative_fees: segment.from_cumulative_fees,
                to_cumulative_fees: segment.to_cumulative_fees,
                fee_amount: segment.fee_amount,
                rate: segment.rate,
                commission: segment.commission,
                description: describe_segment(segment),
            })
            .collect()
    }
}

/// Full calculation outcome; all rates are fractions
#[derive(Debug, Clone, Serialize)]
pub struct CommissionResultDto {
    pub total_commission: Decimal,
    pub breakdown: Vec<BreakdownEntry>,
    pub cumulative_fees_before: Decimal,
    pub cumulative_fees_after: Decimal,
    pub cumulative_commission_before: Decimal,
    pub cumulative_commission_after: Decimal,
    pub new_rate: Decimal,
}

impl From<&CommissionResult> for CommissionResultDto {
    fn from(result: &CommissionResult) -> Self {
        Self {
            total_commission: result.total_commission,
            breakdown: BreakdownEntry::from_segments(&result.breakdown),
            cumulative_fees_before: result.cumulative_fees_before,
            cumulative_fees_after: result.cumulative_fees_after,
            cumulative_commission_before: result.cumulative_commission_before,
            cumulative_commission_after: result.cumulative_commission_after,
            new_rate: result.new_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementDto {
    pub id: String,
    pub candidate_name: String,
    pub client_name: String,
    pub starting_salary: Decimal,
    pub fee_percentage: Decimal,
    pub fee_amount: Decimal,
    pub commission_amount: Decimal,
    pub commission_rate_used: Decimal,
    pub commission_breakdown: Vec<BreakdownEntry>,
    pub placement_date: DateTime<Utc>,
    pub placement_year: i32,
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

impl PlacementDto {
    pub fn new(placement: &Placement, employee_name: Option<String>) -> Self {
        Self {
            id: placement.placement_id.to_string(),
            candidate_name: placement.candidate_name.clone(),
            client_name: placement.client_name.clone(),
            starting_salary: placement.starting_salary,
            fee_percentage: placement.fee_percentage,
            fee_amount: placement.fee_amount(),
            commission_amount: placement.commission_amount,
            commission_rate_used: placement.commission_rate_used,
            commission_breakdown: BreakdownEntry::from_segments(&placement.commission_breakdown),
            placement_date: placement.placement_date,
            placement_year: placement.placement_year,
            employee_id: placement.employee_id.to_string(),
            employee_name,
        }
    }
}

/// Employee totals around one recorded placement; `new_rate` is a display
/// percentage, matching the summary fields the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeTotalsDto {
    pub id: String,
    pub name: String,
    pub cumulative_fees_before: Decimal,
    pub cumulative_fees_after: Decimal,
    pub cumulative_commission_before: Decimal,
    pub cumulative_commission_after: Decimal,
    pub new_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordPlacementResponse {
    pub placement: PlacementDto,
    pub commission_result: CommissionResultDto,
    pub employee: EmployeeTotalsDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewEmployeeDto {
    pub id: String,
    pub name: String,
    pub cumulative_fees: Decimal,
    pub cumulative_commission: Decimal,
    /// Display percentage
    pub current_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub employee: PreviewEmployeeDto,
    pub commission_result: CommissionResultDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentRateResponse {
    pub employee_id: String,
    /// Marginal rate as a fraction
    pub current_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub reset_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub total_placements: usize,
    pub total_employees: usize,
    pub total_fees: Decimal,
    pub total_commissions: Decimal,
    pub recent_placements: Vec<PlacementDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EarningsResponse {
    pub employee: Employee,
    pub earnings: Vec<Earning>,
    pub cumulative_earnings: Vec<CumulativeEarning>,
    pub total_earned: Decimal,
    /// Display percentage
    pub current_commission_rate: Decimal,
    pub placements: Vec<PlacementDto>,
}

// ── Presentation helpers ────────────────────────────────────────────

/// Fraction → display percentage (0.15 → 15)
pub fn to_percent(rate: Decimal) -> Decimal {
    rate * Decimal::ONE_HUNDRED
}

/// Display percentage → fraction (25 → 0.25)
pub fn from_percent(rate: Decimal) -> Decimal {
    rate / Decimal::ONE_HUNDRED
}

fn describe_segment(segment: &Segment) -> String {
    match segment.reached_threshold {
        Some(threshold) => format!(
            "{} at {} (reaches {} threshold)",
            format_money(segment.fee_amount),
            format_percent(segment.rate),
            format_money_whole(threshold),
        ),
        None => format!(
            "{} at {}",
            format_money(segment.fee_amount),
            format_percent(segment.rate),
        ),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_money(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    match s.split_once('.') {
        Some((int_part, frac_part)) => format!("${}.{}", group_thousands(int_part), frac_part),
        None => format!("${}", group_thousands(&s)),
    }
}

fn format_money_whole(amount: Decimal) -> String {
    let s = format!("{:.0}", amount.round_dp(0));
    format!("${}", group_thousands(&s))
}

fn format_percent(rate: Decimal) -> String {
    format!("{:.1}%", to_percent(rate).round_dp(1))
}

// ── Date parsing ────────────────────────────────────────────────────

/// Parse the placement-date formats clients actually send
///
/// Accepts ISO datetimes with or without fractional seconds, a space in
/// place of `T`, or a bare date; a trailing `Z` is stripped first. Any
/// unparseable value falls back to the current time with a warning rather
/// than failing the request.
pub fn parse_placement_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(input) = raw.filter(|s| !s.is_empty()) else {
        return Utc::now();
    };

    let trimmed = input.strip_suffix('Z').unwrap_or(input);

    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Utc.from_utc_datetime(&dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Utc.from_utc_datetime(&dt);
        }
    }

    tracing::warn!(date = %input, "could not parse placement date, using current time");
    Utc::now()
}
