use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{atom, atom_opt, IdRef, ResourceDto};
use crate::context::CallerContext;
use crate::entities::{agents, events, initiatives, spaces};
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDto {
    pub id: Field<Uuid>,
    pub name: Field<String>,
    pub parent: Field<Uuid>,
    pub space: Field<Uuid>,
    pub initiative: Field<Uuid>,
    pub created_by: Field<Uuid>,
    pub extra_fields: Field<Value>,
}

impl ResourceDto for EventDto {
    type Entity = events::Entity;
    type ActiveModel = events::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<events::Entity>("id").await?,
            name: v.string("name", Presence::Required, 2, 100),
            parent: v.reference::<events::Entity>("parent", Presence::Optional).await?,
            space: v.reference::<spaces::Entity>("space", Presence::Optional).await?,
            initiative: v.reference::<initiatives::Entity>("initiative", Presence::Optional).await?,
            created_by: v.reference::<agents::Entity>("createdBy", Presence::Required).await?,
            extra_fields: v.json_object("extraFields"),
        };

        v.finish(dto)
    }

    fn merge(self, active: &mut events::ActiveModel) {
        self.name.merge_required(&mut active.name);
        self.parent.merge_into(&mut active.parent_id);
        self.space.merge_into(&mut active.space_id);
        self.initiative.merge_into(&mut active.initiative_id);
        self.created_by.merge_required(&mut active.created_by_id);
        self.extra_fields.merge_into(&mut active.extra_fields);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<events::ActiveModel, ServiceError> {
        Ok(events::ActiveModel {
            id: Set(self.id.required("id")?),
            name: Set(self.name.required("name")?),
            parent_id: Set(self.parent.into_option()),
            space_id: Set(self.space.into_option()),
            initiative_id: Set(self.initiative.into_option()),
            created_by_id: Set(self.created_by.required("createdBy")?),
            extra_fields: Set(self.extra_fields.into_option()),
            created_at: Set(created_at),
            updated_at: Set(None),
            deleted_at: Set(None),
        })
    }

    fn parent(&self) -> Option<&Field<Uuid>> {
        Some(&self.parent)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListView {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<IdRef>,
    pub space: Option<IdRef>,
    pub initiative: Option<IdRef>,
    pub created_by: IdRef,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<&events::Model> for EventListView {
    fn from(event: &events::Model) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            parent: IdRef::from_option(event.parent_id),
            space: IdRef::from_option(event.space_id),
            initiative: IdRef::from_option(event.initiative_id),
            created_by: IdRef::new(event.created_by_id),
            created_at: event.created_at,
            updated_at: event.updated_at,
            deleted_at: event.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItemView {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<IdRef>,
    pub space: Option<IdRef>,
    pub initiative: Option<IdRef>,
    pub created_by: IdRef,
    pub extra_fields: Option<Value>,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<events::Model> for EventItemView {
    fn from(event: events::Model) -> Self {
        Self {
            id: event.id,
            name: event.name,
            parent: IdRef::from_option(event.parent_id),
            space: IdRef::from_option(event.space_id),
            initiative: IdRef::from_option(event.initiative_id),
            created_by: IdRef::new(event.created_by_id),
            extra_fields: event.extra_fields,
            created_at: event.created_at,
            updated_at: event.updated_at,
            deleted_at: event.deleted_at,
        }
    }
}
