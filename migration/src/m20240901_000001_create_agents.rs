//! Agents are the public profiles callers act as. Every other table points
//! back here through `created_by_id`.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(uuid(Agents::Id).primary_key())
                    .col(string_len(Agents::Name, 100))
                    .col(string_len_null(Agents::ShortBio, 100))
                    .col(text_null(Agents::LongBio))
                    .col(boolean(Agents::Culture).default(false))
                    .col(json_binary_null(Agents::ExtraFields))
                    .col(timestamp_with_time_zone(Agents::CreatedAt))
                    .col(timestamp_with_time_zone_null(Agents::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Agents::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_agents_created_at")
                    .table(Agents::Table)
                    .col(Agents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Agents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Agents {
    Table,
    Id,
    Name,
    ShortBio,
    LongBio,
    Culture,
    ExtraFields,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
