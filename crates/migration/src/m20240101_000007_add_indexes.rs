//! Lookup indexes for the parent back-references.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_service_bike_position")
                    .table(Service::Table)
                    .col(Service::BikeId)
                    .col(Service::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_service_bill")
                    .table(Service::Table)
                    .col(Service::BillId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bill_entry_bill_position")
                    .table(BillEntry::Table)
                    .col(BillEntry::BillId)
                    .col(BillEntry::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_bill_entry_bill_position").table(BillEntry::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_bill").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_bike_position").table(Service::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Service { Table, BikeId, BillId, Position }

#[derive(DeriveIden)]
enum BillEntry { Table, BillId, Position }
