use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bill::Table)
                    .if_not_exists()
                    .col(uuid(Bill::Id).primary_key())
                    .col(timestamp_with_time_zone(Bill::BillDate).not_null())
                    .col(double(Bill::TotalAmount).not_null())
                    .col(timestamp_with_time_zone(Bill::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bill::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bill { Table, Id, BillDate, TotalAmount, CreatedAt }
