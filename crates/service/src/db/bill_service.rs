use models::{bike, bill, bill_entry};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::bike_service::find_bike;
use super::required;
use super::service_record_service::find_service_of_bike;
use crate::errors::ServiceError;
use crate::views::{BillDetail, BillView};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillEntry {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub quantity: Option<f64>,
}

/// Walk bike → service (within that bike) → bill; any missing hop is not-found.
async fn resolve_bill<C: ConnectionTrait>(
    db: &C,
    bike_id: Uuid,
    service_id: Uuid,
) -> Result<(bike::Model, bill::Model), ServiceError> {
    let owner = find_bike(db, bike_id).await?;
    let service = find_service_of_bike(db, bike_id, service_id).await?;
    let bill_id = service.bill_id.ok_or_else(|| ServiceError::not_found("Bill"))?;
    let found = bill::Entity::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Bill"))?;
    Ok((owner, found))
}

/// The service's bill with its entries, labelled with the bike's owner and number.
pub async fn get_bill_view(db: &DatabaseConnection, bike_id: Uuid, service_id: Uuid) -> Result<BillView, ServiceError> {
    let (owner, found) = resolve_bill(db, bike_id, service_id).await?;
    let entries = bill_entry::list_for_bills(db, vec![found.id]).await?;
    Ok(BillView { detail: BillDetail::new(found, entries), owner: owner.owner, bike_no: owner.bike_no })
}

/// Append a line item to the service's bill. The bill's `totalAmount` is left as is.
#[instrument(skip(db, input))]
pub async fn add_bill_entry(
    db: &DatabaseConnection,
    bike_id: Uuid,
    service_id: Uuid,
    input: NewBillEntry,
) -> Result<bill_entry::Model, ServiceError> {
    let description = required(input.description.as_deref(), "description")?.to_string();
    let amount = input.amount.ok_or_else(|| ServiceError::required("amount"))?;
    let quantity = input.quantity.ok_or_else(|| ServiceError::required("quantity"))?;
    bill_entry::validate_amount(amount)?;
    bill_entry::validate_quantity(quantity)?;

    let txn = db.begin().await?;
    let (_, found) = resolve_bill(&txn, bike_id, service_id).await?;
    let entry = bill_entry::create(&txn, found.id, &description, amount, quantity).await?;
    txn.commit().await?;

    info!(event = "bill_entry_added", bill_id = %found.id, entry_id = %entry.id);
    Ok(entry)
}
