use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Initiatives::Table)
                    .if_not_exists()
                    .col(uuid(Initiatives::Id).primary_key())
                    .col(string_len(Initiatives::Name, 100))
                    .col(uuid_null(Initiatives::ParentId))
                    .col(uuid_null(Initiatives::SpaceId))
                    .col(uuid(Initiatives::CreatedById))
                    .col(json_binary_null(Initiatives::ExtraFields))
                    .col(timestamp_with_time_zone(Initiatives::CreatedAt))
                    .col(timestamp_with_time_zone_null(Initiatives::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Initiatives::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_initiatives_parent")
                            .from(Initiatives::Table, Initiatives::ParentId)
                            .to(Initiatives::Table, Initiatives::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_initiatives_space")
                            .from(Initiatives::Table, Initiatives::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_initiatives_created_by")
                            .from(Initiatives::Table, Initiatives::CreatedById)
                            .to(Agents::Table, Agents::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_initiatives_created_at")
                    .table(Initiatives::Table)
                    .col(Initiatives::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Initiatives::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Initiatives {
    Table,
    Id,
    Name,
    ParentId,
    SpaceId,
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
enum Agents {
    Table,
    Id,
}
