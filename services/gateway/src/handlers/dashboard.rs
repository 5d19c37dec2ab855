use crate::error::AppError;
use crate::models::{self, DashboardResponse, EarningsResponse, PlacementDto};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use types::ids::EmployeeId;
use uuid::Uuid;

pub async fn summary(State(state): State<AppState>) -> Json<DashboardResponse> {
    let summary = state.ledger.dashboard_summary();
    Json(DashboardResponse {
        total_placements: summary.total_placements,
        total_employees: summary.total_employees,
        total_fees: summary.total_fees,
        total_commissions: summary.total_commissions,
        recent_placements: summary
            .recent_placements
            .into_iter()
            .map(|joined| {
                let name = joined.employee_name.or_else(|| Some("Unknown".to_string()));
                PlacementDto::new(&joined.placement, name)
            })
            .collect(),
    })
}

pub async fn employee_earnings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EarningsResponse>, AppError> {
    let history = state.ledger.earnings_history(EmployeeId::from_uuid(id))?;
    Ok(Json(EarningsResponse {
        placements: history
            .placements
            .iter()
            .map(|placement| PlacementDto::new(placement, None))
            .collect(),
        employee: history.employee,
        earnings: history.earnings,
        cumulative_earnings: history.cumulative_earnings,
        total_earned: history.total_earned,
        current_commission_rate: models::to_percent(history.current_rate),
    }))
}
