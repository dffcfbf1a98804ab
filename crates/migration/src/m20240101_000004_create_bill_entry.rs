use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BillEntry::Table)
                    .if_not_exists()
                    .col(uuid(BillEntry::Id).primary_key())
                    .col(uuid(BillEntry::BillId).not_null())
                    .col(string_len(BillEntry::Description, 256).not_null())
                    .col(double(BillEntry::Amount).not_null())
                    .col(double(BillEntry::Quantity).not_null())
                    .col(integer(BillEntry::Position).not_null())
                    .col(timestamp_with_time_zone(BillEntry::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_entry_bill")
                            .from(BillEntry::Table, BillEntry::BillId)
                            .to(Bill::Table, Bill::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BillEntry::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BillEntry { Table, Id, BillId, Description, Amount, Quantity, Position, CreatedAt }

#[derive(DeriveIden)]
enum Bill { Table, Id }
