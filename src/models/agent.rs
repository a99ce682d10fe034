use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{atom, atom_opt, ResourceDto};
use crate::context::CallerContext;
use crate::entities::agents;
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentDto {
    pub id: Field<Uuid>,
    pub name: Field<String>,
    pub short_bio: Field<String>,
    pub long_bio: Field<String>,
    pub culture: Field<bool>,
    pub extra_fields: Field<Value>,
}

impl ResourceDto for AgentDto {
    type Entity = agents::Entity;
    type ActiveModel = agents::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<agents::Entity>("id").await?,
            name: v.string("name", Presence::Required, 2, 100),
            short_bio: v.string("shortBio", Presence::Optional, 0, 100),
            long_bio: v.text("longBio", Presence::Optional),
            culture: v.boolean("culture", Presence::NotNull),
            extra_fields: v.json_object("extraFields"),
        };

        v.finish(dto)
    }

    fn merge(self, active: &mut agents::ActiveModel) {
        self.name.merge_required(&mut active.name);
        self.short_bio.merge_into(&mut active.short_bio);
        self.long_bio.merge_into(&mut active.long_bio);
        self.culture.merge_required(&mut active.culture);
        self.extra_fields.merge_into(&mut active.extra_fields);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<agents::ActiveModel, ServiceError> {
        Ok(agents::ActiveModel {
            id: Set(self.id.required("id")?),
            name: Set(self.name.required("name")?),
            short_bio: Set(self.short_bio.into_option()),
            long_bio: Set(self.long_bio.into_option()),
            culture: Set(self.culture.into_option().unwrap_or(false)),
            extra_fields: Set(self.extra_fields.into_option()),
            created_at: Set(created_at),
            updated_at: Set(None),
            deleted_at: Set(None),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentListView {
    pub id: Uuid,
    pub name: String,
    pub short_bio: Option<String>,
    pub culture: bool,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<&agents::Model> for AgentListView {
    fn from(agent: &agents::Model) -> Self {
        Self {
            id: agent.id,
            name: agent.name.clone(),
            short_bio: agent.short_bio.clone(),
            culture: agent.culture,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
            deleted_at: agent.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentItemView {
    pub id: Uuid,
    pub name: String,
    pub short_bio: Option<String>,
    pub long_bio: Option<String>,
    pub culture: bool,
    pub extra_fields: Option<Value>,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<agents::Model> for AgentItemView {
    fn from(agent: agents::Model) -> Self {
        Self {
            id: agent.id,
            name: agent.name,
            short_bio: agent.short_bio,
            long_bio: agent.long_bio,
            culture: agent.culture,
            extra_fields: agent.extra_fields,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
            deleted_at: agent.deleted_at,
        }
    }
}
