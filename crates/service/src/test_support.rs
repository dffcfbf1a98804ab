#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::bike_service::NewBike;

/// Every test gets its own migrated in-memory database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// A valid registration payload.
pub fn asha() -> NewBike {
    NewBike {
        bike_no: Some("KA01AB1234".into()),
        owner: Some("Asha".into()),
        contact_no: Some("9876543210".into()),
        date_of_reg: Some("2024-01-01".into()),
    }
}
