//! Request DTOs and response views
//!
//! Every resource has a DTO (validated payload, one [`Field`] per key) and
//! two explicit views: `list` for collections and `item` for a single record.
//!
//! [`Field`]: crate::validation::Field

pub mod agent;
pub mod event;
pub mod faq;
pub mod initiative;
pub mod opportunity;
pub mod organization;
pub mod phase;
pub mod space;

use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelBehavior, ActiveModelTrait, DatabaseConnection,
};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::config::ListLimits;
use crate::context::CallerContext;
use crate::error::ServiceError;
use crate::repositories::SoftDeleteEntity;
use crate::validation::{Field, Payload, ValidationMode};

/// Validated payload of one resource and how it lands in its table
pub trait ResourceDto: Sized + Send {
    type Entity: SoftDeleteEntity;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;

    fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> impl Future<Output = Result<Self, ServiceError>> + Send;

    /// Only keys present in the payload touch the record
    fn merge(self, active: &mut Self::ActiveModel);

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<Self::ActiveModel, ServiceError>;

    /// Parent reference of resources that nest
    fn parent(&self) -> Option<&Field<Uuid>> {
        None
    }
}

/// Reference to another record, rendered as `{"id": "<uuid>"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: Uuid,
}

impl IdRef {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    pub fn from_option(id: Option<Uuid>) -> Option<Self> {
        id.map(Self::new)
    }
}

/// ATOM timestamp format, e.g. `2024-09-06T10:00:00+00:00`
pub const ATOM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

pub fn atom<S: Serializer>(value: &DateTimeWithTimeZone, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.format(ATOM_FORMAT).to_string())
}

pub fn atom_opt<S: Serializer>(
    value: &Option<DateTimeWithTimeZone>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => atom(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// `?limit=` on list endpoints. Kept as text so a bad value is reported as
/// a violation instead of a bare extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn resolve(&self, limits: &ListLimits) -> Result<u64, ServiceError> {
        let Some(raw) = self.limit.as_deref() else {
            return Ok(limits.default);
        };

        match raw.trim().parse::<u64>() {
            Ok(limit) if (1..=limits.max).contains(&limit) => Ok(limit),
            _ => Err(ServiceError::violation(
                "limit",
                format!("This value should be between 1 and {}.", limits.max),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    #[derive(Serialize)]
    struct Stamped {
        #[serde(serialize_with = "atom")]
        at: DateTimeWithTimeZone,
        #[serde(serialize_with = "atom_opt")]
        maybe: Option<DateTimeWithTimeZone>,
    }

    #[test]
    fn test_atom_timestamps() {
        let at = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 9, 6, 10, 0, 0)
            .unwrap();

        let rendered = serde_json::to_value(Stamped { at, maybe: None }).unwrap();
        assert_eq!(rendered, json!({ "at": "2024-09-06T10:00:00-03:00", "maybe": null }));
    }

    #[test]
    fn test_list_limit_resolution() {
        let limits = ListLimits { default: 50, max: 100 };

        assert_eq!(ListQuery::default().resolve(&limits).unwrap(), 50);
        assert_eq!(ListQuery { limit: Some("100".into()) }.resolve(&limits).unwrap(), 100);

        for bad in ["0", "101", "-1", "ten"] {
            let err = ListQuery { limit: Some(bad.into()) }.resolve(&limits).unwrap_err();
            match err {
                ServiceError::ValidationFailed(v) => assert_eq!(v[0].field, "limit"),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }
}
