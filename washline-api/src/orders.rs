use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Extension, Json, Router,
};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use uuid::Uuid;

use washline_catalog::ClothQuantity;
use washline_order::{
    place, ClientDetails, Order, OrderError, OrderStatus, OrderUpdate, PaymentMethod,
    StatusCategory,
};
use washline_store::{OrderStore, ReportStore, ServiceStore};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub service_id: String,
    pub clothes: ClothQuantity,
    pub phone: String,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub filter: Option<StatusCategory>,
}

#[derive(Debug, Deserialize)]
pub struct FileReportRequest {
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_id: Uuid,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/orders", post(create_order).get(list_orders))
        .route("/v1/orders/feed", get(order_feed))
        .route("/v1/orders/{id}", get(get_order))
        .route("/v1/orders/{id}/pay", post(pay_order))
        .route("/v1/orders/{id}/confirm", post(confirm_order))
        .route("/v1/orders/{id}/report", post(file_report))
        .layer(axum::middleware::from_fn_with_state(
            state,
            crate::middleware::auth::client_auth,
        ))
}

/// Fetch an order and check it belongs to the caller. Other clients' ids
/// read as not-found rather than forbidden, so ids don't leak.
async fn owned_order(state: &AppState, claims: &Claims, id: Uuid) -> Result<Order, AppError> {
    let order = state.store.get(id).await?;
    if order.client_id != claims.sub {
        return Err(AppError::Order(OrderError::NotFound(id)));
    }
    Ok(order)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/orders
async fn create_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let service = state
        .store
        .get_service(&req.service_id)
        .await
        .ok_or_else(|| AppError::Validation(format!("unknown service: {}", req.service_id)))?;

    let client = ClientDetails {
        client_id: claims.sub,
        client_name: claims.name,
        phone: req.phone,
        delivery_address: req.delivery_address,
    };
    let order = place(&service, client, req.clothes, req.payment_method, chrono::Utc::now())?;
    let order = state.store.create(order).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /v1/orders?filter=pending|active|completed
async fn list_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.store.list_for_client(&claims.sub, params.filter).await?;
    Ok(Json(orders))
}

/// GET /v1/orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(owned_order(&state, &claims, id).await?))
}

/// POST /v1/orders/{id}/pay
async fn pay_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    owned_order(&state, &claims, id).await?;
    let order = state.store.update(id, OrderUpdate::Payment).await?;
    Ok(Json(order))
}

/// POST /v1/orders/{id}/confirm
/// The client acknowledges the delivery in progress; the admin still
/// finalizes to delivered afterwards
async fn confirm_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    owned_order(&state, &claims, id).await?;
    let update = OrderUpdate::Status { target: OrderStatus::ClientConfirmed, notes: None };
    let order = state.store.update(id, update).await?;
    Ok(Json(order))
}

/// POST /v1/orders/{id}/report
async fn file_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<FileReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    owned_order(&state, &claims, id).await?;
    let report_id = state.store.file(id, &claims.sub, req.reason).await?;
    Ok((StatusCode::CREATED, Json(ReportResponse { report_id })))
}

/// GET /v1/orders/feed
/// SSE stream of the caller's order set, pushed after every committed
/// mutation anywhere in the collection
async fn order_feed(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.store.subscribe();
    let client_id = claims.sub;

    let stream = BroadcastStream::new(rx).filter_map(move |msg| {
        let client_id = client_id.clone();
        futures_util::future::ready(match msg {
            Ok(orders) => {
                let mine: Vec<Order> =
                    orders.into_iter().filter(|o| o.client_id == client_id).collect();
                Event::default()
                    .event("orders")
                    .json_data(&mine)
                    .ok()
                    .map(Ok::<Event, Infallible>)
            }
            // Lagged subscribers catch up on the next snapshot
            Err(BroadcastStreamRecvError::Lagged(_)) => None,
        })
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
