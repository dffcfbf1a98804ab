//! Create `bike` table, the root of the service/bill aggregate.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bike::Table)
                    .if_not_exists()
                    .col(uuid(Bike::Id).primary_key())
                    .col(string_len(Bike::BikeNo, 32).unique_key().not_null())
                    .col(string_len(Bike::Owner, 128).not_null())
                    .col(string_len(Bike::ContactNo, 10).not_null())
                    .col(date(Bike::DateOfReg).not_null())
                    .col(timestamp_with_time_zone(Bike::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Bike::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bike::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bike { Table, Id, BikeNo, Owner, ContactNo, DateOfReg, CreatedAt, UpdatedAt }
