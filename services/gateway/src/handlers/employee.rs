use crate::error::AppError;
use crate::models::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ledger::{EmployeeUpdate, NewEmployee};
use serde_json::{json, Value};
use types::employee::Employee;
use types::ids::EmployeeId;
use uuid::Uuid;

pub async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.ledger.list_employees())
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, AppError> {
    let employee = state.ledger.employee(EmployeeId::from_uuid(id))?;
    Ok(Json(employee))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = state.ledger.create_employee(NewEmployee {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        commission_structure: payload.commission_structure,
    })?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    let employee = state.ledger.update_employee(
        EmployeeId::from_uuid(id),
        EmployeeUpdate {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            commission_structure: payload.commission_structure,
        },
    )?;
    Ok(Json(employee))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.ledger.delete_employee(EmployeeId::from_uuid(id))?;
    Ok(Json(json!({ "message": "Employee deleted" })))
}
