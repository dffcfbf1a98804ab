use super::setup_test_db;
use crate::{bike, bill, service_record};
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

/// Dropping a transaction without commit must discard every write in it
#[tokio::test]
async fn test_uncommitted_transaction_rolls_back() -> Result<()> {
    let db = setup_test_db().await?;
    let b = bike::create(&db, "KA05ZZ9999", "Asha", "9876543210", NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()).await?;

    {
        let txn = db.begin().await?;
        let new_bill = bill::create(&txn, None, 120.0).await?;
        service_record::create(&txn, b.id, "Puncture", None, Some(new_bill.id)).await?;
        // dropped without commit
    }

    assert_eq!(bill::Entity::find().count(&db).await?, 0);
    assert_eq!(service_record::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_committed_transaction_is_visible() -> Result<()> {
    let db = setup_test_db().await?;
    let b = bike::create(&db, "KA05ZZ0001", "Asha", "9876543210", NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()).await?;

    let txn = db.begin().await?;
    let new_bill = bill::create(&txn, None, 120.0).await?;
    let s = service_record::create(&txn, b.id, "Puncture", None, Some(new_bill.id)).await?;
    txn.commit().await?;

    let found = service_record::Entity::find_by_id(s.id).one(&db).await?.unwrap();
    assert_eq!(found.bill_id, Some(new_bill.id));
    Ok(())
}
