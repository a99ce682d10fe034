//! SeaORM Entity for agents
//!
//! An agent is the public profile a caller acts as; it owns itself.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "agents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub short_bio: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub long_bio: Option<String>,
    pub culture: bool,
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
    const RESOURCE: &'static str = "Agent";

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
        vec![Column::Id]
    }
}
