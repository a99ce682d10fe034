use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{atom, atom_opt, IdRef, ResourceDto};
use crate::context::CallerContext;
use crate::entities::{agents, opportunities, phases};
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseDto {
    pub id: Field<Uuid>,
    pub name: Field<String>,
    pub description: Field<String>,
    pub start_date: Field<DateTimeWithTimeZone>,
    pub end_date: Field<DateTimeWithTimeZone>,
    pub status: Field<bool>,
    pub sequence: Field<i32>,
    pub created_by: Field<Uuid>,
    pub opportunity: Field<Uuid>,
    pub extra_fields: Field<Value>,
}

impl ResourceDto for PhaseDto {
    type Entity = phases::Entity;
    type ActiveModel = phases::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<phases::Entity>("id").await?,
            name: v.string("name", Presence::Required, 1, 100),
            description: v.text("description", Presence::Optional),
            start_date: v.datetime("startDate", Presence::Optional),
            end_date: v.datetime("endDate", Presence::Optional),
            status: v.boolean("status", Presence::NotNull),
            sequence: v.integer("sequence", Presence::Optional),
            created_by: v.reference::<agents::Entity>("createdBy", Presence::Required).await?,
            opportunity: v
                .reference::<opportunities::Entity>("opportunity", Presence::Required)
                .await?,
            extra_fields: v.json_object("extraFields"),
        };

        v.finish(dto)
    }

    fn merge(self, active: &mut phases::ActiveModel) {
        self.name.merge_required(&mut active.name);
        self.description.merge_into(&mut active.description);
        self.start_date.merge_into(&mut active.start_date);
        self.end_date.merge_into(&mut active.end_date);
        self.status.merge_required(&mut active.status);
        self.sequence.merge_into(&mut active.sequence);
        self.created_by.merge_required(&mut active.created_by_id);
        self.opportunity.merge_required(&mut active.opportunity_id);
        self.extra_fields.merge_into(&mut active.extra_fields);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<phases::ActiveModel, ServiceError> {
        Ok(phases::ActiveModel {
            id: Set(self.id.required("id")?),
            name: Set(self.name.required("name")?),
            description: Set(self.description.into_option()),
            start_date: Set(self.start_date.into_option()),
            end_date: Set(self.end_date.into_option()),
            status: Set(self.status.into_option().unwrap_or(false)),
            sequence: Set(self.sequence.into_option()),
            created_by_id: Set(self.created_by.required("createdBy")?),
            opportunity_id: Set(self.opportunity.required("opportunity")?),
            extra_fields: Set(self.extra_fields.into_option()),
            created_at: Set(created_at),
            updated_at: Set(None),
            deleted_at: Set(None),
        })
    }
}

/// Short form embedded in an opportunity item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&phases::Model> for PhaseSummary {
    fn from(phase: &phases::Model) -> Self {
        Self {
            id: phase.id,
            name: phase.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseListView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "atom_opt")]
    pub start_date: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub end_date: Option<DateTimeWithTimeZone>,
    pub status: bool,
    pub sequence: Option<i32>,
    pub created_by: IdRef,
    pub opportunity: IdRef,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<&phases::Model> for PhaseListView {
    fn from(phase: &phases::Model) -> Self {
        Self {
            id: phase.id,
            name: phase.name.clone(),
            description: phase.description.clone(),
            start_date: phase.start_date,
            end_date: phase.end_date,
            status: phase.status,
            sequence: phase.sequence,
            created_by: IdRef::new(phase.created_by_id),
            opportunity: IdRef::new(phase.opportunity_id),
            created_at: phase.created_at,
            updated_at: phase.updated_at,
            deleted_at: phase.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseItemView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "atom_opt")]
    pub start_date: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub end_date: Option<DateTimeWithTimeZone>,
    pub status: bool,
    pub sequence: Option<i32>,
    pub created_by: IdRef,
    pub opportunity: IdRef,
    pub extra_fields: Option<Value>,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<phases::Model> for PhaseItemView {
    fn from(phase: phases::Model) -> Self {
        Self {
            id: phase.id,
            name: phase.name,
            description: phase.description,
            start_date: phase.start_date,
            end_date: phase.end_date,
            status: phase.status,
            sequence: phase.sequence,
            created_by: IdRef::new(phase.created_by_id),
            opportunity: IdRef::new(phase.opportunity_id),
            extra_fields: phase.extra_fields,
            created_at: phase.created_at,
            updated_at: phase.updated_at,
            deleted_at: phase.deleted_at,
        }
    }
}
