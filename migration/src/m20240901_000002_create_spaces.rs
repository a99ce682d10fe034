use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Spaces::Table)
                    .if_not_exists()
                    .col(uuid(Spaces::Id).primary_key())
                    .col(string_len(Spaces::Name, 100))
                    .col(uuid_null(Spaces::ParentId))
                    .col(uuid(Spaces::CreatedById))
                    .col(json_binary_null(Spaces::ExtraFields))
                    .col(timestamp_with_time_zone(Spaces::CreatedAt))
                    .col(timestamp_with_time_zone_null(Spaces::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Spaces::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_spaces_parent")
                            .from(Spaces::Table, Spaces::ParentId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_spaces_created_by")
                            .from(Spaces::Table, Spaces::CreatedById)
                            .to(Agents::Table, Agents::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_spaces_created_at")
                    .table(Spaces::Table)
                    .col(Spaces::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Spaces::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Spaces {
    Table,
    Id,
    Name,
    ParentId,
    CreatedById,
    ExtraFields,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Agents {
    Table,
    Id,
}
