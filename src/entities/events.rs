//! SeaORM Entity for events

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub space_id: Option<Uuid>,
    pub initiative_id: Option<Uuid>,
    pub created_by_id: Uuid,
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
    const RESOURCE: &'static str = "Event";

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
