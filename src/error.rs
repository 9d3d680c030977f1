use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::ApiError;
use crate::models::UnknownPlan;
use crate::services::SessionError;

/// Errors a request handler can end with
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    InvalidPlan(#[from] UnknownPlan),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::Session(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidPlan(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Session(e) => tracing::warn!(%e, "Rejected request"),
            AppError::InvalidPlan(e) => tracing::warn!(%e, "Rejected plan selection"),
            e => tracing::error!(%e, "Request failed"),
        }
        let body = match self {
            AppError::Api(_) => "Billing service unavailable".to_string(),
            e => e.to_string(),
        };
        (status, body).into_response()
    }
}
