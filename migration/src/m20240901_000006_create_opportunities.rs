//! Opportunities (calls for applications). `parent_id` is a weak
//! self-reference: dropping a parent nulls the link, it never cascades.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Opportunities::Table)
                    .if_not_exists()
                    .col(uuid(Opportunities::Id).primary_key())
                    .col(string_len(Opportunities::Name, 100))
                    .col(uuid_null(Opportunities::ParentId))
                    .col(uuid_null(Opportunities::SpaceId))
                    .col(uuid_null(Opportunities::InitiativeId))
                    .col(uuid_null(Opportunities::EventId))
                    .col(uuid(Opportunities::CreatedById))
                    .col(json_binary_null(Opportunities::ExtraFields))
                    .col(timestamp_with_time_zone(Opportunities::CreatedAt))
                    .col(timestamp_with_time_zone_null(Opportunities::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Opportunities::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_parent")
                            .from(Opportunities::Table, Opportunities::ParentId)
                            .to(Opportunities::Table, Opportunities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_space")
                            .from(Opportunities::Table, Opportunities::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_initiative")
                            .from(Opportunities::Table, Opportunities::InitiativeId)
                            .to(Initiatives::Table, Initiatives::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_event")
                            .from(Opportunities::Table, Opportunities::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_created_by")
                            .from(Opportunities::Table, Opportunities::CreatedById)
                            .to(Agents::Table, Agents::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_opportunities_created_by")
                    .table(Opportunities::Table)
                    .col(Opportunities::CreatedById)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_opportunities_created_at")
                    .table(Opportunities::Table)
                    .col(Opportunities::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Opportunities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Opportunities {
    Table,
    Id,
    Name,
    ParentId,
    SpaceId,
    InitiativeId,
    EventId,
    CreatedById,
    ExtraFields,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Spaces {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Initiatives {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Agents {
    Table,
    Id,
}
