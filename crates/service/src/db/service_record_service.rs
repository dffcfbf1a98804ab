use models::{bill, bill_entry, service_record};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::bike_service::{bike_detail, find_bike};
use super::{optional_timestamp, required};
use crate::errors::ServiceError;
use crate::views::BikeDetail;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub bill_date: Option<String>,
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub service_name: Option<String>,
    pub date_of_service: Option<String>,
    pub bill: Option<NewBill>,
}

/// A service of the given bike, or not-found when it belongs elsewhere.
pub async fn find_service_of_bike<C: ConnectionTrait>(
    db: &C,
    bike_id: Uuid,
    service_id: Uuid,
) -> Result<service_record::Model, ServiceError> {
    service_record::Entity::find_by_id(service_id)
        .filter(service_record::Column::BikeId.eq(bike_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service"))
}

/// Record a service visit (and its bill, when given) at the end of the bike's list.
#[instrument(skip(db, input))]
pub async fn add_service(
    db: &DatabaseConnection,
    bike_id: Uuid,
    input: NewService,
) -> Result<service_record::Model, ServiceError> {
    let service_name = service_record::validate_service_name(required(input.service_name.as_deref(), "serviceName")?)?;
    let date_of_service = optional_timestamp(input.date_of_service.as_deref(), "dateOfService")?;
    let new_bill = match input.bill {
        Some(b) => {
            let total = b.total_amount.ok_or_else(|| ServiceError::required("bill.totalAmount"))?;
            let total = bill::validate_total_amount(total)?;
            Some((optional_timestamp(b.bill_date.as_deref(), "billDate")?, total))
        }
        None => None,
    };

    let txn = db.begin().await?;
    find_bike(&txn, bike_id).await?;
    let bill_id = match new_bill {
        Some((bill_date, total)) => Some(bill::create(&txn, bill_date, total).await?.id),
        None => None,
    };
    let created = service_record::create(&txn, bike_id, &service_name, date_of_service, bill_id).await?;
    txn.commit().await?;

    info!(event = "service_added", bike_id = %bike_id, service_id = %created.id, bill_id = ?bill_id);
    Ok(created)
}

/// Remove a service with its bill and the bill's entries; returns the bike's remaining tree.
#[instrument(skip(db))]
pub async fn delete_service(db: &DatabaseConnection, bike_id: Uuid, service_id: Uuid) -> Result<BikeDetail, ServiceError> {
    let txn = db.begin().await?;
    find_bike(&txn, bike_id).await?;
    let service = find_service_of_bike(&txn, bike_id, service_id).await?;
    if let Some(bill_id) = service.bill_id {
        bill_entry::Entity::delete_many()
            .filter(bill_entry::Column::BillId.eq(bill_id))
            .exec(&txn)
            .await?;
    }
    service_record::Entity::delete_by_id(service.id).exec(&txn).await?;
    if let Some(bill_id) = service.bill_id {
        bill::Entity::delete_by_id(bill_id).exec(&txn).await?;
    }
    txn.commit().await?;
    info!(event = "service_deleted", bike_id = %bike_id, service_id = %service_id, bill_id = ?service.bill_id);

    bike_detail(db, bike_id).await
}
