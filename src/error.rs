//! Service error taxonomy and its wire shape
//!
//! Every error leaves the API as
//! `{"error_message": <code>, "error_details": <payload>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::validation::Violation;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed with {} violation(s)", .0.len())]
    ValidationFailed(Vec<Violation>),

    /// Carries the resource name, e.g. "Opportunity"
    #[error("the requested {0} was not found")]
    NotFound(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Single-violation validation failure
    pub fn violation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationFailed(vec![Violation::new(field, message)])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        match self {
            Self::ValidationFailed(violations) => ErrorResponse {
                error_message: "not_valid".to_string(),
                error_details: json!(violations),
            },
            Self::NotFound(resource) => ErrorResponse {
                error_message: "not_found".to_string(),
                error_details: json!({
                    "description": format!("The requested {} was not found.", resource),
                }),
            },
            Self::Unauthorized(reason) => ErrorResponse {
                error_message: "unauthorized".to_string(),
                error_details: json!({ "description": reason }),
            },
            // Storage details stay in the logs
            Self::Database(_) => ErrorResponse {
                error_message: "internal_error".to_string(),
                error_details: json!({ "description": "An unexpected error occurred." }),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_message: String,
    pub error_details: serde_json::Value,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            error!(error = %e, "Database error while handling request");
        }

        (self.status(), Json(self.to_response_body())).into_response()
    }
}
