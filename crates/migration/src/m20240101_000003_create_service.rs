//! Create `service` table with FK to `bike` (owner) and optional FK to `bill`.
//!
//! `position` keeps the order of services within their bike.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::BikeId).not_null())
                    .col(string_len(Service::ServiceName, 128).not_null())
                    .col(timestamp_with_time_zone(Service::DateOfService).not_null())
                    .col(ColumnDef::new(Service::BillId).uuid().null())
                    .col(integer(Service::Position).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_bike")
                            .from(Service::Table, Service::BikeId)
                            .to(Bike::Table, Bike::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_bill")
                            .from(Service::Table, Service::BillId)
                            .to(Bill::Table, Bill::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service { Table, Id, BikeId, ServiceName, DateOfService, BillId, Position, CreatedAt }

#[derive(DeriveIden)]
enum Bike { Table, Id }

#[derive(DeriveIden)]
enum Bill { Table, Id }
