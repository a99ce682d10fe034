use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phases::Table)
                    .if_not_exists()
                    .col(uuid(Phases::Id).primary_key())
                    .col(string_len(Phases::Name, 100))
                    .col(text_null(Phases::Description))
                    .col(timestamp_with_time_zone_null(Phases::StartDate))
                    .col(timestamp_with_time_zone_null(Phases::EndDate))
                    .col(boolean(Phases::Status).default(false))
                    .col(integer_null(Phases::Sequence))
                    .col(uuid(Phases::CreatedById))
                    .col(uuid(Phases::OpportunityId))
                    .col(json_binary_null(Phases::ExtraFields))
                    .col(timestamp_with_time_zone(Phases::CreatedAt))
                    .col(timestamp_with_time_zone_null(Phases::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Phases::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phases_created_by")
                            .from(Phases::Table, Phases::CreatedById)
                            .to(Agents::Table, Agents::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phases_opportunity")
                            .from(Phases::Table, Phases::OpportunityId)
                            .to(Opportunities::Table, Opportunities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Phases are always read through their opportunity
        manager
            .create_index(
                Index::create()
                    .name("idx_phases_opportunity")
                    .table(Phases::Table)
                    .col(Phases::OpportunityId)
                    .col(Phases::Sequence)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Phases::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Phases {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    EndDate,
    Status,
    Sequence,
    CreatedById,
    OpportunityId,
    ExtraFields,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Opportunities {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Agents {
    Table,
    Id,
}
