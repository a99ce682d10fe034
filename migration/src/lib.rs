pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_agents;
mod m20240901_000002_create_spaces;
mod m20240901_000003_create_initiatives;
mod m20240901_000004_create_events;
mod m20240901_000005_create_organizations;
mod m20240901_000006_create_opportunities;
mod m20240901_000007_create_phases;
mod m20240901_000008_create_faqs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_agents::Migration),
            Box::new(m20240901_000002_create_spaces::Migration),
            Box::new(m20240901_000003_create_initiatives::Migration),
            Box::new(m20240901_000004_create_events::Migration),
            Box::new(m20240901_000005_create_organizations::Migration),
            Box::new(m20240901_000006_create_opportunities::Migration),
            Box::new(m20240901_000007_create_phases::Migration),
            Box::new(m20240901_000008_create_faqs::Migration),
        ]
    }
}
