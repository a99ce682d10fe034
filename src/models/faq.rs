use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, Set};
use serde::Serialize;
use uuid::Uuid;

use super::{atom, atom_opt, ResourceDto};
use crate::context::CallerContext;
use crate::entities::faqs;
use crate::error::ServiceError;
use crate::validation::{Field, FieldValidator, Payload, Presence, ValidationMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaqDto {
    pub id: Field<Uuid>,
    pub question: Field<String>,
    pub answer: Field<String>,
    pub active: Field<bool>,
}

impl ResourceDto for FaqDto {
    type Entity = faqs::Entity;
    type ActiveModel = faqs::ActiveModel;

    async fn validate(
        db: &DatabaseConnection,
        ctx: &CallerContext,
        payload: &Payload,
        mode: ValidationMode,
    ) -> Result<Self, ServiceError> {
        let mut v = FieldValidator::new(db, ctx, payload, mode);

        let dto = Self {
            id: v.identity::<faqs::Entity>("id").await?,
            question: v.string("question", Presence::Required, 2, 255),
            answer: v.string("answer", Presence::Required, 2, usize::MAX),
            active: v.boolean("active", Presence::NotNull),
        };

        v.finish(dto)
    }

    fn merge(self, active: &mut faqs::ActiveModel) {
        self.question.merge_required(&mut active.question);
        self.answer.merge_required(&mut active.answer);
        self.active.merge_required(&mut active.active);
    }

    fn into_new_model(
        self,
        created_at: DateTimeWithTimeZone,
    ) -> Result<faqs::ActiveModel, ServiceError> {
        Ok(faqs::ActiveModel {
            id: Set(self.id.required("id")?),
            question: Set(self.question.required("question")?),
            answer: Set(self.answer.required("answer")?),
            // New questions are published unless stated otherwise
            active: Set(self.active.into_option().unwrap_or(true)),
            created_at: Set(created_at),
            updated_at: Set(None),
            deleted_at: Set(None),
        })
    }
}

/// Faqs are small enough that both views carry every field
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqView {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub active: bool,
    #[serde(serialize_with = "atom")]
    pub created_at: DateTimeWithTimeZone,
    #[serde(serialize_with = "atom_opt")]
    pub updated_at: Option<DateTimeWithTimeZone>,
    #[serde(serialize_with = "atom_opt")]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

pub type FaqListView = FaqView;
pub type FaqItemView = FaqView;

impl From<&faqs::Model> for FaqView {
    fn from(faq: &faqs::Model) -> Self {
        faq.clone().into()
    }
}

impl From<faqs::Model> for FaqView {
    fn from(faq: faqs::Model) -> Self {
        Self {
            id: faq.id,
            question: faq.question,
            answer: faq.answer,
            active: faq.active,
            created_at: faq.created_at,
            updated_at: faq.updated_at,
            deleted_at: faq.deleted_at,
        }
    }
}
