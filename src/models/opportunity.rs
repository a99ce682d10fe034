use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::phase::PhaseSummary;
use super::{atom, atom_opt, IdRef, ResourceDto};
use crate::context::CallerContext;
use crate::entities::{agents, events, initiatives, opportunities, phases, spaces};
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityDto {
    pub id: Field<Uuid>,
    pub name: Field<String>,
    pub parent: Field<Uuid>,
    pub space: Field<Uuid>,
    pub initiative: Field<Uuid>,
    pub event: Field<Uuid>,
    pub created_by: Field<Uuid>,
    pub extra_fields: Field<Value>,
}

impl ResourceDto for OpportunityDto {
    type Entity = opportunities::Entity;
    type ActiveModel = opportunities::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<opportunities::Entity>("id").await?,
            name: v.string("name", Presence::Required, 2, 100),
            parent: v
                .reference::<opportunities::Entity>("parent", Presence::Optional)
                .await?,
            space: v.reference::<spaces::Entity>("space", Presence::Optional).await?,
            initiative: v
                .reference::<initiatives::Entity>("initiative", Presence::Optional)
                .await?,
            event: v.reference::<events::Entity>("event", Presence::Optional).await?,
            created_by: v.reference::<agents::Entity>("createdBy", Presence::Required).await?,
            extra_fields: v.json_object("extraFields"),
        };

        v.finish(dto)
    }

    /// Overwrite only the keys the payload carried
    fn merge(self, active: &mut opportunities::ActiveModel) {
        self.name.merge_required(&mut active.name);
        self.parent.merge_into(&mut active.parent_id);
        self.space.merge_into(&mut active.space_id);
        self.initiative.merge_into(&mut active.initiative_id);
        self.event.merge_into(&mut active.event_id);
        self.created_by.merge_required(&mut active.created_by_id);
        self.extra_fields.merge_into(&mut active.extra_fields);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<opportunities::ActiveModel, ServiceError> {
        Ok(opportunities::ActiveModel {
            id: Set(self.id.required("id")?),
            name: Set(self.name.required("name")?),
            parent_id: Set(self.parent.into_option()),
            space_id: Set(self.space.into_option()),
            initiative_id: Set(self.initiative.into_option()),
            event_id: Set(self.event.into_option()),
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

/// An opportunity with what its item view needs: the ordered phases and,
/// one level up, the parent opportunity when it is still visible.
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityDetail {
    pub opportunity: opportunities::Model,
    pub phases: Vec<phases::Model>,
    pub parent: Option<Box<OpportunityDetail>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityListView {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<IdRef>,
    pub space: Option<IdRef>,
    pub initiative: Option<IdRef>,
    pub event: Option<IdRef>,
    pub created_by: IdRef,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<&opportunities::Model> for OpportunityListView {
    fn from(opportunity: &opportunities::Model) -> Self {
        Self {
            id: opportunity.id,
            name: opportunity.name.clone(),
            parent: IdRef::from_option(opportunity.parent_id),
            space: IdRef::from_option(opportunity.space_id),
            initiative: IdRef::from_option(opportunity.initiative_id),
            event: IdRef::from_option(opportunity.event_id),
            created_by: IdRef::new(opportunity.created_by_id),
            created_at: opportunity.created_at,
            updated_at: opportunity.updated_at,
            deleted_at: opportunity.deleted_at,
        }
    }
}

/// Parent of an opportunity item: the nested item one level deep, a bare
/// reference beyond that
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParentRef {
    Reference(IdRef),
    Detailed(Box<OpportunityItemView>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityItemView {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<ParentRef>,
    pub space: Option<IdRef>,
    pub initiative: Option<IdRef>,
    pub event: Option<IdRef>,
    pub created_by: IdRef,
    pub extra_fields: Option<Value>,
    pub phases: Vec<PhaseSummary>,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<OpportunityDetail> for OpportunityItemView {
    fn from(detail: OpportunityDetail) -> Self {
        let OpportunityDetail {
            opportunity,
            phases,
            parent,
        } = detail;

        let parent = match parent {
            Some(parent) => Some(ParentRef::Detailed(Box::new((*parent).into()))),
            None => opportunity.parent_id.map(|id| ParentRef::Reference(IdRef::new(id))),
        };

        Self {
            id: opportunity.id,
            name: opportunity.name,
            parent,
            space: IdRef::from_option(opportunity.space_id),
            initiative: IdRef::from_option(opportunity.initiative_id),
            event: IdRef::from_option(opportunity.event_id),
            created_by: IdRef::new(opportunity.created_by_id),
            extra_fields: opportunity.extra_fields,
            phases: phases.iter().map(PhaseSummary::from).collect(),
            created_at: opportunity.created_at,
            updated_at: opportunity.updated_at,
            deleted_at: opportunity.deleted_at,
        }
    }
}
