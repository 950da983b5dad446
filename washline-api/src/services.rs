use axum::{extract::State, routing::get, Json, Router};

use washline_catalog::Service;
use washline_store::ServiceStore;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/services", get(list_services))
}

/// GET /v1/services
/// The catalog is public: clients browse it before logging an order
async fn list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.store.list_services().await)
}
