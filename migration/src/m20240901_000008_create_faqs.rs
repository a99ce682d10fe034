use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Faqs::Table)
                    .if_not_exists()
                    .col(uuid(Faqs::Id).primary_key())
                    .col(string_len(Faqs::Question, 255))
                    .col(text(Faqs::Answer))
                    .col(boolean(Faqs::Active).default(true))
                    .col(timestamp_with_time_zone(Faqs::CreatedAt))
                    .col(timestamp_with_time_zone_null(Faqs::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Faqs::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Faqs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Faqs {
    Table,
    Id,
    Question,
    Answer,
    Active,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
