use crate::error::AppError;
use crate::models::{
    self, CommissionResultDto, CreatePlacementRequest, EmployeeTotalsDto, PlacementDto,
    RecordPlacementResponse,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ledger::NewPlacement;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use types::ids::PlacementId;
use uuid::Uuid;

pub async fn list_placements(State(state): State<AppState>) -> Json<Vec<PlacementDto>> {
    let placements = state
        .ledger
        .list_placements_with_employees()
        .into_iter()
        .map(|joined| PlacementDto::new(&joined.placement, joined.employee_name))
        .collect();
    Json(placements)
}

pub async fn create_placement(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlacementRequest>,
) -> Result<(StatusCode, Json<RecordPlacementResponse>), AppError> {
    if payload.starting_salary < Decimal::ZERO {
        return Err(AppError::BadRequest("Negative starting salary".into()));
    }
    if payload.fee_percentage < Decimal::ZERO {
        return Err(AppError::BadRequest("Negative fee percentage".into()));
    }

    let placement_date = models::parse_placement_date(payload.placement_date.as_deref());

    let recorded = state.ledger.record_placement(NewPlacement {
        candidate_name: payload.candidate_name,
        client_name: payload.client_name,
        starting_salary: payload.starting_salary,
        // Display percentage → fraction, once, at the boundary
        fee_percentage: models::from_percent(payload.fee_percentage),
        placement_date,
        employee_id: payload.employee_id,
    })?;

    let response = RecordPlacementResponse {
        placement: PlacementDto::new(&recorded.placement, None),
        commission_result: CommissionResultDto::from(&recorded.result),
        employee: EmployeeTotalsDto {
            id: recorded.employee.employee_id.to_string(),
            name: recorded.employee.name.clone(),
            cumulative_fees_before: recorded.result.cumulative_fees_before,
            cumulative_fees_after: recorded.result.cumulative_fees_after,
            cumulative_commission_before: recorded.result.cumulative_commission_before,
            cumulative_commission_after: recorded.result.cumulative_commission_after,
            new_rate: models::to_percent(recorded.result.new_rate),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn delete_placement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.ledger.delete_placement(PlacementId::from_uuid(id))?;
    Ok(Json(json!({ "message": "Placement deleted" })))
}
