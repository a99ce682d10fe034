use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{atom, atom_opt, IdRef, ResourceDto};
use crate::context::CallerContext;
use crate::entities::{agents, organizations};
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationDto {
    pub id: Field<Uuid>,
    pub name: Field<String>,
    pub description: Field<String>,
    pub owner: Field<Uuid>,
    pub created_by: Field<Uuid>,
    pub extra_fields: Field<Value>,
}

impl ResourceDto for OrganizationDto {
    type Entity = organizations::Entity;
    type ActiveModel = organizations::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<organizations::Entity>("id").await?,
            name: v.string("name", Presence::Required, 2, 100),
            description: v.text("description", Presence::Optional),
            owner: v.reference::<agents::Entity>("owner", Presence::Required).await?,
            created_by: v.reference::<agents::Entity>("createdBy", Presence::Required).await?,
            extra_fields: v.json_object("extraFields"),
        };

        v.finish(dto)
    }

    fn merge(self, active: &mut organizations::ActiveModel) {
        self.name.merge_required(&mut active.name);
        self.description.merge_into(&mut active.description);
        self.owner.merge_required(&mut active.owner_id);
        self.created_by.merge_required(&mut active.created_by_id);
        self.extra_fields.merge_into(&mut active.extra_fields);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<organizations::ActiveModel, ServiceError> {
        Ok(organizations::ActiveModel {
            id: Set(self.id.required("id")?),
            name: Set(self.name.required("name")?),
            description: Set(self.description.into_option()),
            owner_id: Set(self.owner.required("owner")?),
            created_by_id: Set(self.created_by.required("createdBy")?),
            extra_fields: Set(self.extra_fields.into_option()),
            created_at: Set(created_at),
            updated_at: Set(None),
            deleted_at: Set(None),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationListView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner: IdRef,
    pub created_by: IdRef,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<&organizations::Model> for OrganizationListView {
    fn from(organization: &organizations::Model) -> Self {
        Self {
            id: organization.id,
            name: organization.name.clone(),
            description: organization.description.clone(),
            owner: IdRef::new(organization.owner_id),
            created_by: IdRef::new(organization.created_by_id),
            created_at: organization.created_at,
            updated_at: organization.updated_at,
            deleted_at: organization.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationItemView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner: IdRef,
    pub created_by: IdRef,
    pub extra_fields: Option<Value>,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<organizations::Model> for OrganizationItemView {
    fn from(organization: organizations::Model) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            description: organization.description,
            owner: IdRef::new(organization.owner_id),
            created_by: IdRef::new(organization.created_by_id),
            extra_fields: organization.extra_fields,
            created_at: organization.created_at,
            updated_at: organization.updated_at,
            deleted_at: organization.deleted_at,
        }
    }
}
