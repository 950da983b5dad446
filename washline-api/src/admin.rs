use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use washline_order::{Order, OrderStatus, OrderUpdate, Report, StatusCategory};
use washline_store::{OrderStore, ReportStore};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub target: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub filter: Option<StatusCategory>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/admin/orders", get(list_orders))
        .route("/v1/admin/orders/{id}", get(get_order))
        .route("/v1/admin/orders/{id}/status", post(update_status))
        .route("/v1/admin/orders/{id}/reports", get(list_reports))
        .layer(axum::middleware::from_fn_with_state(
            state,
            crate::middleware::auth::admin_auth,
        ))
}

/// GET /v1/admin/orders?filter=pending|active|completed
async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.store.list(params.filter).await?;
    Ok(Json(orders))
}

/// GET /v1/admin/orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.store.get(id).await?))
}

/// POST /v1/admin/orders/{id}/status
///
/// Covers the whole pipeline: accept, reject, every forward step and the
/// final handover. Re-sending the current status with notes attached is the
/// notes-only update. Surfaces 409 for an invalid transition and 402 when a
/// cash order hasn't been paid yet.
///
/// `client-confirmed` is the client's acknowledgement and only enters
/// through the client confirm route, never from here.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, AppError> {
    if req.target == OrderStatus::ClientConfirmed {
        return Err(AppError::Authorization(
            "client-confirmed can only be set by the client".to_string(),
        ));
    }
    let update = OrderUpdate::Status { target: req.target, notes: req.notes };
    let order = state.store.update(id, update).await?;
    Ok(Json(order))
}

/// GET /v1/admin/orders/{id}/reports
async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Report>>, AppError> {
    // Surface 404 for unknown ids rather than an empty list
    state.store.get(id).await?;
    Ok(Json(state.store.list_for_order(id).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use washline_catalog::{default_services, ClothQuantity};
    use washline_order::{place, ClientDetails, PaymentMethod};
    use washline_store::{MemoryStore, ServiceStore};

    use crate::state::AuthConfig;

    async fn test_state() -> AppState {
        let store = Arc::new(MemoryStore::new());
        store.seed(default_services()).await;
        AppState {
            store,
            auth: AuthConfig { secret: "test-secret".to_string(), expiration: 3600 },
        }
    }

    #[tokio::test]
    async fn test_admin_cannot_set_client_confirmed() {
        let state = test_state().await;

        let req = UpdateStatusRequest { target: OrderStatus::ClientConfirmed, notes: None };
        let err = update_status(State(state), Path(Uuid::new_v4()), Json(req)).await.unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_admin_walks_pipeline_targets() {
        let state = test_state().await;
        let service = state.store.get_service("normal_wash").await.unwrap();
        let client = ClientDetails {
            client_id: "client-1".to_string(),
            client_name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            delivery_address: "12 MG Road".to_string(),
        };
        let clothes = ClothQuantity { shirt: 1, ..Default::default() };
        let order = place(&service, client, clothes, PaymentMethod::Upi, chrono::Utc::now()).unwrap();
        let order = state.store.create(order).await.unwrap();

        let req = UpdateStatusRequest { target: OrderStatus::Accepted, notes: None };
        let Json(updated) =
            update_status(State(state), Path(order.id), Json(req)).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Accepted);
    }
}
