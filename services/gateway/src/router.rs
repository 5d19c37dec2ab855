use crate::handlers::{commission, dashboard, employee, placement};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/employees",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route("/employees/reset-ytd", post(commission::reset_ytd))
        .route(
            "/employees/{id}",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
        .route(
            "/employees/{id}/calculate-commission",
            post(commission::preview_commission),
        )
        .route("/employees/{id}/current-rate", get(commission::current_rate))
        .route("/employees/{id}/earnings", get(dashboard::employee_earnings))
        .route(
            "/placements",
            get(placement::list_placements).post(placement::create_placement),
        )
        .route("/placements/{id}", delete(placement::delete_placement))
        .route("/dashboard/summary", get(dashboard::summary));

    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Commission Tracker API" }))
}
