use std::collections::HashMap;

use models::{bike, bill, bill_entry, dates, errors::ModelError, service_record};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::required;
use crate::errors::ServiceError;
use crate::views::{self, BikeDetail, BikeView};

const DUPLICATE_BIKE_NO: &str = "bikeNo already registered";

/// Registration payload. Every field is required; they are optional here so
/// that a missing key reports which field is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBike {
    pub bike_no: Option<String>,
    pub owner: Option<String>,
    pub contact_no: Option<String>,
    pub date_of_reg: Option<String>,
}

/// Partial update; absent keys keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikePatch {
    pub bike_no: Option<String>,
    pub owner: Option<String>,
    pub contact_no: Option<String>,
    pub date_of_reg: Option<String>,
}

/// Look up a bike or fail with not-found.
pub async fn find_bike<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bike::Model, ServiceError> {
    bike::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("Bike"))
}

async fn bike_no_taken<C: ConnectionTrait>(db: &C, bike_no: &str, except: Option<Uuid>) -> Result<bool, ServiceError> {
    let mut query = bike::Entity::find().filter(bike::Column::BikeNo.eq(bike_no));
    if let Some(id) = except {
        query = query.filter(bike::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

/// Register a bike.
#[instrument(skip(db, input), fields(bike_no = ?input.bike_no))]
pub async fn create_bike(db: &DatabaseConnection, input: NewBike) -> Result<BikeView, ServiceError> {
    let bike_no = bike::validate_bike_no(required(input.bike_no.as_deref(), "bikeNo")?)?;
    let owner = bike::validate_owner(required(input.owner.as_deref(), "owner")?)?;
    let contact_no = bike::validate_contact_no(required(input.contact_no.as_deref(), "contactNo")?)?;
    let date_of_reg = bike::parse_date_of_reg(required(input.date_of_reg.as_deref(), "dateOfReg")?)?;

    if bike_no_taken(db, &bike_no, None).await? {
        return Err(ServiceError::Conflict(DUPLICATE_BIKE_NO.into()));
    }
    let created = bike::create(db, &bike_no, &owner, &contact_no, date_of_reg).await?;
    info!(event = "bike_created", bike_id = %created.id, bike_no = %created.bike_no);
    Ok(BikeView::new(created, Vec::new()))
}

/// All bikes, oldest registration record first. An empty shop is an empty list.
pub async fn list_bikes(db: &DatabaseConnection) -> Result<Vec<BikeView>, ServiceError> {
    let bikes = bike::Entity::find()
        .order_by_asc(bike::Column::CreatedAt)
        .order_by_asc(bike::Column::BikeNo)
        .all(db)
        .await?;
    let ids: Vec<Uuid> = bikes.iter().map(|b| b.id).collect();
    let mut by_bike: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    if !ids.is_empty() {
        let services = service_record::Entity::find()
            .filter(service_record::Column::BikeId.is_in(ids))
            .order_by_asc(service_record::Column::BikeId)
            .order_by_asc(service_record::Column::Position)
            .order_by_asc(service_record::Column::CreatedAt)
            .all(db)
            .await?;
        for s in services {
            by_bike.entry(s.bike_id).or_default().push(s.id);
        }
    }
    Ok(bikes
        .into_iter()
        .map(|b| {
            let services = by_bike.remove(&b.id).unwrap_or_default();
            BikeView::new(b, services)
        })
        .collect())
}

pub async fn get_bike(db: &DatabaseConnection, id: Uuid) -> Result<BikeView, ServiceError> {
    let found = find_bike(db, id).await?;
    let services = service_record::list_for_bike(db, id).await?;
    Ok(BikeView::new(found, services.into_iter().map(|s| s.id).collect()))
}

/// Merge the supplied fields into the stored bike.
#[instrument(skip(db, patch))]
pub async fn update_bike(db: &DatabaseConnection, id: Uuid, patch: BikePatch) -> Result<BikeView, ServiceError> {
    let current = find_bike(db, id).await?;
    let mut am: bike::ActiveModel = current.into();

    if let Some(raw) = patch.bike_no.as_deref() {
        let bike_no = bike::validate_bike_no(raw)?;
        if bike_no_taken(db, &bike_no, Some(id)).await? {
            return Err(ServiceError::Conflict(DUPLICATE_BIKE_NO.into()));
        }
        am.bike_no = Set(bike_no);
    }
    if let Some(raw) = patch.owner.as_deref() {
        am.owner = Set(bike::validate_owner(raw)?);
    }
    if let Some(raw) = patch.contact_no.as_deref() {
        am.contact_no = Set(bike::validate_contact_no(raw)?);
    }
    if let Some(raw) = patch.date_of_reg.as_deref() {
        am.date_of_reg = Set(bike::parse_date_of_reg(raw)?);
    }
    am.updated_at = Set(dates::now());

    let updated = am.update(db).await.map_err(|e| ModelError::from_db(e, DUPLICATE_BIKE_NO))?;
    info!(event = "bike_updated", bike_id = %updated.id);
    let services = service_record::list_for_bike(db, id).await?;
    Ok(BikeView::new(updated, services.into_iter().map(|s| s.id).collect()))
}

/// Remove a bike together with its services, their bills and the bills' entries.
#[instrument(skip(db))]
pub async fn delete_bike(db: &DatabaseConnection, id: Uuid) -> Result<BikeView, ServiceError> {
    let txn = db.begin().await?;
    let found = find_bike(&txn, id).await?;
    let services = service_record::list_for_bike(&txn, id).await?;
    let service_ids: Vec<Uuid> = services.iter().map(|s| s.id).collect();
    let bill_ids: Vec<Uuid> = services.iter().filter_map(|s| s.bill_id).collect();

    if !bill_ids.is_empty() {
        bill_entry::Entity::delete_many()
            .filter(bill_entry::Column::BillId.is_in(bill_ids.clone()))
            .exec(&txn)
            .await?;
    }
    service_record::Entity::delete_many()
        .filter(service_record::Column::BikeId.eq(id))
        .exec(&txn)
        .await?;
    if !bill_ids.is_empty() {
        bill::Entity::delete_many().filter(bill::Column::Id.is_in(bill_ids.clone())).exec(&txn).await?;
    }
    bike::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(event = "bike_deleted", bike_id = %id, services = service_ids.len(), bills = bill_ids.len());
    Ok(BikeView::new(found, service_ids))
}

/// The bike with every service, bill and entry it owns.
pub async fn bike_detail<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<BikeDetail, ServiceError> {
    let found = find_bike(db, id).await?;
    let services = service_record::list_for_bike(db, id).await?;
    let bill_ids: Vec<Uuid> = services.iter().filter_map(|s| s.bill_id).collect();
    let bills = if bill_ids.is_empty() {
        Vec::new()
    } else {
        bill::Entity::find().filter(bill::Column::Id.is_in(bill_ids.clone())).all(db).await?
    };
    let entries = bill_entry::list_for_bills(db, bill_ids).await?;
    Ok(views::assemble_detail(found, services, bills, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::service_record_service::{add_service, NewBill, NewService};
    use crate::test_support::{asha, get_db};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn create_then_get_returns_same_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_bike(&db, asha()).await?;
        let found = get_bike(&db, created.bike.id).await?;
        assert_eq!(found.bike, created.bike);
        assert!(found.services.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_bike_no_is_a_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_bike(&db, asha()).await?;
        let again = create_bike(&db, NewBike { owner: Some("Ravi".into()), ..asha() }).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
        assert_eq!(bike::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payloads_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let short_contact = create_bike(&db, NewBike { contact_no: Some("12345".into()), ..asha() }).await;
        assert!(matches!(short_contact, Err(ServiceError::Validation(_))));
        let missing_owner = create_bike(&db, NewBike { owner: None, ..asha() }).await;
        match missing_owner {
            Err(ServiceError::Validation(msg)) => assert!(msg.contains("owner")),
            other => panic!("unexpected: {other:?}"),
        }
        let bad_date = create_bike(&db, NewBike { date_of_reg: Some("someday".into()), ..asha() }).await;
        assert!(matches!(bad_date, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_is_empty_then_ordered() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(list_bikes(&db).await?.is_empty());
        let first = create_bike(&db, asha()).await?;
        let second = create_bike(&db, NewBike { bike_no: Some("KA02CD5678".into()), ..asha() }).await?;
        let svc = add_service(&db, first.bike.id, NewService { service_name: Some("Wash".into()), ..Default::default() }).await?;

        let all = list_bikes(&db).await?;
        let ids: Vec<Uuid> = all.iter().map(|b| b.bike.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.bike.id) && ids.contains(&second.bike.id));
        let listed_first = all.iter().find(|b| b.bike.id == first.bike.id).unwrap();
        assert_eq!(listed_first.services, vec![svc.id]);
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_bike(&db, asha()).await?;
        let updated = update_bike(
            &db,
            created.bike.id,
            BikePatch { owner: Some("Asha K".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.bike.owner, "Asha K");
        assert_eq!(updated.bike.bike_no, "KA01AB1234");
        assert_eq!(updated.bike.contact_no, "9876543210");

        let bad = update_bike(&db, created.bike.id, BikePatch { contact_no: Some("abc".into()), ..Default::default() }).await;
        assert!(matches!(bad, Err(ServiceError::Validation(_))));

        let other = create_bike(&db, NewBike { bike_no: Some("KA02CD5678".into()), ..asha() }).await?;
        let clash = update_bike(&db, other.bike.id, BikePatch { bike_no: Some("KA01AB1234".into()), ..Default::default() }).await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));

        // keeping its own number is not a clash
        let same = update_bike(&db, created.bike.id, BikePatch { bike_no: Some("KA01AB1234".into()), ..Default::default() }).await?;
        assert_eq!(same.bike.bike_no, "KA01AB1234");

        let missing = update_bike(&db, Uuid::new_v4(), BikePatch::default()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_whole_aggregate() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_bike(&db, asha()).await?;
        let keep = create_bike(&db, NewBike { bike_no: Some("KA02CD5678".into()), ..asha() }).await?;
        for target in [created.bike.id, keep.bike.id] {
            let svc = add_service(
                &db,
                target,
                NewService {
                    service_name: Some("Oil Change".into()),
                    bill: Some(NewBill { total_amount: Some(500.0), ..Default::default() }),
                    ..Default::default()
                },
            )
            .await?;
            bill_entry::create(&db, svc.bill_id.unwrap(), "Oil", 500.0, 1.0).await?;
        }

        let deleted = delete_bike(&db, created.bike.id).await?;
        assert_eq!(deleted.services.len(), 1);
        assert!(matches!(get_bike(&db, created.bike.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(service_record::Entity::find().count(&db).await?, 1);
        assert_eq!(bill::Entity::find().count(&db).await?, 1);
        assert_eq!(bill_entry::Entity::find().count(&db).await?, 1);

        assert!(matches!(delete_bike(&db, created.bike.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn detail_of_bike_without_services_is_empty() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_bike(&db, asha()).await?;
        let detail = bike_detail(&db, created.bike.id).await?;
        assert!(detail.services.is_empty());
        assert!(matches!(bike_detail(&db, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
