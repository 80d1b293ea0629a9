use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::dashboards::d400_superstore::ErrorResponse;
use thiserror::Error;

use crate::dashboards::d400_superstore::SelectionError;

/// Handler error rendered as `{"error": ...}`.
///
/// Selection errors are 400, extractor rejections keep their own status,
/// anything else is 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Query string or body that could not be parsed
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Selection(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Selection(e) => tracing::warn!("D400 Dashboard: Rejected selection: {}", e),
            ApiError::Rejected { message, .. } => {
                tracing::warn!("D400 Dashboard: Bad request: {}", message)
            }
            ApiError::Internal(e) => tracing::error!("D400 Dashboard: {:#}", e),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
