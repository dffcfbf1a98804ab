//! Response shapes assembled from several tables.

use std::collections::HashMap;

use models::{bike, bill, bill_entry, service_record};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

/// A bike as listed: its own fields plus the ordered ids of its services.
#[derive(Debug, Clone, Serialize)]
pub struct BikeView {
    #[serde(flatten)]
    pub bike: bike::Model,
    pub services: Vec<Uuid>,
}

impl BikeView {
    pub fn new(bike: bike::Model, services: Vec<Uuid>) -> Self { Self { bike, services } }
}

/// Bike with its whole service → bill → entries tree.
#[derive(Debug, Clone, Serialize)]
pub struct BikeDetail {
    #[serde(flatten)]
    pub bike: bike::Model,
    pub services: Vec<ServiceDetail>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    pub id: Uuid,
    pub bike_id: Uuid,
    pub service_name: String,
    pub date_of_service: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub bill: Option<BillDetail>,
}

/// A bill with its entries in insertion order.
///
/// `entries_total` is recomputed on every read and may differ from the
/// stored `total_amount`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDetail {
    #[serde(flatten)]
    pub bill: bill::Model,
    pub entries: Vec<bill_entry::Model>,
    pub entries_total: f64,
}

impl BillDetail {
    pub fn new(bill: bill::Model, entries: Vec<bill_entry::Model>) -> Self {
        let entries_total = bill_entry::entries_total(&entries);
        Self { bill, entries, entries_total }
    }
}

/// Bill fields merged with the owning bike's `owner` and `bikeNo`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillView {
    #[serde(flatten)]
    pub detail: BillDetail,
    pub owner: String,
    pub bike_no: String,
}

/// Stitch services, bills and entries (each already in list order) into a tree.
pub fn assemble_detail(
    bike: bike::Model,
    services: Vec<service_record::Model>,
    bills: Vec<bill::Model>,
    entries: Vec<bill_entry::Model>,
) -> BikeDetail {
    let mut entries_by_bill: HashMap<Uuid, Vec<bill_entry::Model>> = HashMap::new();
    for entry in entries {
        entries_by_bill.entry(entry.bill_id).or_default().push(entry);
    }
    let mut bills_by_id: HashMap<Uuid, bill::Model> = bills.into_iter().map(|b| (b.id, b)).collect();

    let services = services
        .into_iter()
        .map(|s| {
            let bill = s
                .bill_id
                .and_then(|id| bills_by_id.remove(&id))
                .map(|b| {
                    let entries = entries_by_bill.remove(&b.id).unwrap_or_default();
                    BillDetail::new(b, entries)
                });
            ServiceDetail {
                id: s.id,
                bike_id: s.bike_id,
                service_name: s.service_name,
                date_of_service: s.date_of_service,
                created_at: s.created_at,
                bill,
            }
        })
        .collect();
    BikeDetail { bike, services }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::dates;

    fn bike() -> bike::Model {
        bike::Model {
            id: Uuid::new_v4(),
            bike_no: "KA01AB1234".into(),
            owner: "Asha".into(),
            contact_no: "9876543210".into(),
            date_of_reg: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_at: dates::now(),
            updated_at: dates::now(),
        }
    }

    #[test]
    fn bike_view_serializes_flat_with_service_ids() {
        let sid = Uuid::new_v4();
        let json = serde_json::to_value(BikeView::new(bike(), vec![sid])).unwrap();
        assert_eq!(json["bikeNo"], "KA01AB1234");
        assert_eq!(json["contactNo"], "9876543210");
        assert_eq!(json["dateOfReg"], "2024-01-01");
        assert_eq!(json["services"][0], sid.to_string());
    }

    #[test]
    fn detail_attaches_bills_and_entries_to_their_services() {
        let b = bike();
        let bill = bill::Model { id: Uuid::new_v4(), bill_date: dates::now(), total_amount: 500.0, created_at: dates::now() };
        let with_bill = service_record::Model {
            id: Uuid::new_v4(),
            bike_id: b.id,
            service_name: "Oil Change".into(),
            date_of_service: dates::now(),
            bill_id: Some(bill.id),
            position: 0,
            created_at: dates::now(),
        };
        let without_bill = service_record::Model {
            id: Uuid::new_v4(),
            service_name: "Wash".into(),
            bill_id: None,
            position: 1,
            ..with_bill.clone()
        };
        let entry = bill_entry::Model {
            id: Uuid::new_v4(),
            bill_id: bill.id,
            description: "Oil".into(),
            amount: 450.0,
            quantity: 1.0,
            position: 0,
            created_at: dates::now(),
        };

        let detail = assemble_detail(b, vec![with_bill, without_bill], vec![bill], vec![entry]);
        assert_eq!(detail.services.len(), 2);
        let first = detail.services[0].bill.as_ref().unwrap();
        assert_eq!(first.entries.len(), 1);
        assert_eq!(first.entries_total, 450.0);
        assert_eq!(first.bill.total_amount, 500.0);
        assert!(detail.services[1].bill.is_none());

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["services"][0]["bill"]["totalAmount"], 500.0);
        assert_eq!(json["services"][0]["bill"]["entriesTotal"], 450.0);
        assert!(json["services"][1]["bill"].is_null());
    }
}
