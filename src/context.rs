//! Caller context threaded through every service and repository call
//!
//! The caller identifies the agents it acts as with the `X-Agent-Id` header
//! (one or more comma-separated UUIDs, or the header repeated). A request
//! without the header is anonymous: it can read every visible record and
//! owns nothing.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::error::ServiceError;

pub const AGENT_HEADER: &str = "x-agent-id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    agent_ids: Vec<Uuid>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_agents<I: IntoIterator<Item = Uuid>>(agents: I) -> Self {
        let mut agent_ids: Vec<Uuid> = Vec::new();
        for agent in agents {
            if !agent_ids.contains(&agent) {
                agent_ids.push(agent);
            }
        }
        Self { agent_ids }
    }

    pub fn agent_ids(&self) -> &[Uuid] {
        &self.agent_ids
    }

    pub fn is_anonymous(&self) -> bool {
        self.agent_ids.is_empty()
    }

    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ServiceError> {
        let mut agents = Vec::new();

        for value in headers.get_all(AGENT_HEADER) {
            let raw = value.to_str().map_err(|_| {
                ServiceError::Unauthorized("Agent header is not valid text".to_string())
            })?;

            for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let agent = Uuid::parse_str(part).map_err(|_| {
                    ServiceError::Unauthorized(format!("'{}' is not a valid agent id", part))
                })?;
                agents.push(agent);
            }
        }

        Ok(Self::for_agents(agents))
    }
}

impl<S> FromRequestParts<S> for CallerContext
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
