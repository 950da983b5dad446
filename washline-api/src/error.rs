use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use washline_order::OrderError;

#[derive(Debug)]
pub enum AppError {
    Authentication(String),
    Authorization(String),
    Validation(String),
    Order(OrderError),
    Internal(String),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        Self::Order(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Order(err) => {
                let status = match &err {
                    OrderError::EmptyOrder | OrderError::InvalidCatalogEntry(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    OrderError::InvalidTransition { .. } => StatusCode::CONFLICT,
                    OrderError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
                    OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                };
                (status, err.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("internal server error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
