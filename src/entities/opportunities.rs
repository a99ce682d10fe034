//! SeaORM Entity for opportunities
//!
//! Calls for applications published by an agent. Phases hang off an
//! opportunity through `phases.opportunity_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "opportunities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Between 2 and 100 characters
    pub name: String,
    /// Weak link to another opportunity, never cascades
    pub parent_id: Option<Uuid>,
    pub space_id: Option<Uuid>,
    pub initiative_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub created_by_id: Uuid,
    /// Free-form JSON object (type, period, tags, ...)
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub extra_fields: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    const RESOURCE: &'static str = "Opportunity";

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }

    fn owner_columns() -> Vec<Column> {
        vec![Column::CreatedById]
    }

    fn parent_column() -> Option<Column> {
        Some(Column::ParentId)
    }
}
