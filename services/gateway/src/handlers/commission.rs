use crate::error::AppError;
use crate::models::{
    self, CommissionResultDto, CurrentRateResponse, PreviewEmployeeDto, PreviewRequest,
    PreviewResponse, ResetResponse,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use types::ids::EmployeeId;
use uuid::Uuid;

/// Preview a calculation without saving anything
pub async fn preview_commission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let employee_id = EmployeeId::from_uuid(id);
    let (employee, result) = state
        .ledger
        .preview_commission(employee_id, payload.fee_amount)?;
    let current_rate = state.ledger.current_rate(employee_id)?;

    Ok(Json(PreviewResponse {
        employee: PreviewEmployeeDto {
            id: employee.employee_id.to_string(),
            name: employee.name,
            cumulative_fees: employee.state.cumulative_fees,
            cumulative_commission: employee.state.cumulative_commission,
            current_rate: models::to_percent(current_rate),
        },
        commission_result: CommissionResultDto::from(&result),
    }))
}

/// Marginal rate currently in effect, independent of any mutation
pub async fn current_rate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CurrentRateResponse>, AppError> {
    let employee_id = EmployeeId::from_uuid(id);
    let rate = state.ledger.current_rate(employee_id)?;
    Ok(Json(CurrentRateResponse {
        employee_id: employee_id.to_string(),
        current_rate: rate,
    }))
}

/// Zero every employee's YTD cumulative fees and commission
pub async fn reset_ytd(State(state): State<AppState>) -> Json<ResetResponse> {
    let reset_count = state.ledger.reset_ytd();
    Json(ResetResponse {
        message: format!("Successfully reset YTD totals for {} employees", reset_count),
        reset_count,
        timestamp: Utc::now(),
    })
}
