//! Migrator registering table migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_bike;
mod m20240101_000002_create_bill;
mod m20240101_000003_create_service;
mod m20240101_000004_create_bill_entry;
mod m20240101_000005_create_booking;
mod m20240101_000006_create_admin;
mod m20240101_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_bike::Migration),
            Box::new(m20240101_000002_create_bill::Migration),
            Box::new(m20240101_000003_create_service::Migration),
            Box::new(m20240101_000004_create_bill_entry::Migration),
            Box::new(m20240101_000005_create_booking::Migration),
            Box::new(m20240101_000006_create_admin::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000007_add_indexes::Migration),
        ]
    }
}
