//! axum handlers, one module per resource
//!
//! Handlers only extract, call the service and pick a view. Every failure is
//! a [`ServiceError`], so every error body has the same shape.

pub mod agent;
pub mod event;
pub mod faq;
pub mod initiative;
pub mod opportunity;
pub mod organization;
pub mod phase;
pub mod space;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::repositories::SoftDeleteEntity;
use crate::validation::{messages, Payload};

/// JSON object body whose rejection uses the service error shape
pub struct JsonPayload(pub Payload);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Payload>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Unreadable request body");
                ServiceError::violation("body", messages::NOT_JSON_OBJECT)
            })?;

        Ok(Self(payload))
    }
}

/// Path id of a resource. Anything that is not a UUID cannot name a record.
pub fn parse_id<E: SoftDeleteEntity>(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::NotFound(E::RESOURCE))
}

pub async fn health() -> &'static str {
    "ok"
}
