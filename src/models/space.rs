use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{atom, atom_opt, IdRef, ResourceDto};
use crate::context::CallerContext;
use crate::entities::{agents, spaces};
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceDto {
    pub id: Field<Uuid>,
    pub name: Field<String>,
    pub parent: Field<Uuid>,
    pub created_by: Field<Uuid>,
    pub extra_fields: Field<Value>,
}

impl ResourceDto for SpaceDto {
    type Entity = spaces::Entity;
    type ActiveModel = spaces::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<spaces::Entity>("id").await?,
            name: v.string("name", Presence::Required, 2, 100),
            parent: v.reference::<spaces::Entity>("parent", Presence::Optional).await?,
            created_by: v.reference::<agents::Entity>("createdBy", Presence::Required).await?,
            extra_fields: v.json_object("extraFields"),
        };

        v.finish(dto)
    }

    fn merge(self, active: &mut spaces::ActiveModel) {
        self.name.merge_required(&mut active.name);
        self.parent.merge_into(&mut active.parent_id);
        self.created_by.merge_required(&mut active.created_by_id);
        self.extra_fields.merge_into(&mut active.extra_fields);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<spaces::ActiveModel, ServiceError> {
        Ok(spaces::ActiveModel {
            id: Set(self.id.required("id")?),
            name: Set(self.name.required("name")?),
            parent_id: Set(self.parent.into_option()),
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
pub struct SpaceListView {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<IdRef>,
    pub created_by: IdRef,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<&spaces::Model> for SpaceListView {
    fn from(space: &spaces::Model) -> Self {
        Self {
            id: space.id,
            name: space.name.clone(),
            parent: IdRef::from_option(space.parent_id),
            created_by: IdRef::new(space.created_by_id),
            created_at: space.created_at,
            updated_at: space.updated_at,
            deleted_at: space.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceItemView {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<IdRef>,
    pub created_by: IdRef,
    pub extra_fields: Option<Value>,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<spaces::Model> for SpaceItemView {
    fn from(space: spaces::Model) -> Self {
        Self {
            id: space.id,
            name: space.name,
            parent: IdRef::from_option(space.parent_id),
            created_by: IdRef::new(space.created_by_id),
            extra_fields: space.extra_fields,
            created_at: space.created_at,
            updated_at: space.updated_at,
            deleted_at: space.deleted_at,
        }
    }
}
