use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

/// `GET /health` with the number of records in the index.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        records: state.shortener().records(),
    })
}
