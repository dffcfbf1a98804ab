//! OpenAPI document. The `*Doc` types mirror the JSON shapes of requests and
//! of the `data` field of successful envelopes.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body of every failed request.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelopeDoc { pub success: bool, pub message: String }

#[derive(Serialize, ToSchema)]
pub struct AdminCredentialsDoc { pub name: String, pub password: String }

#[derive(Serialize, ToSchema)]
pub struct AdminDoc { pub id: Uuid, pub name: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBikeDoc {
    pub bike_no: String,
    pub owner: String,
    /// Exactly ten digits.
    pub contact_no: String,
    /// `YYYY-MM-DD`
    pub date_of_reg: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BikePatchDoc {
    pub bike_no: Option<String>,
    pub owner: Option<String>,
    pub contact_no: Option<String>,
    pub date_of_reg: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BikeDoc {
    pub id: Uuid,
    pub bike_no: String,
    pub owner: String,
    pub contact_no: String,
    pub date_of_reg: String,
    pub created_at: String,
    pub updated_at: String,
    pub services: Vec<Uuid>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBillDoc {
    pub bill_date: Option<String>,
    pub total_amount: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceDoc {
    pub service_name: String,
    /// `YYYY-MM-DD` or RFC 3339; defaults to now.
    pub date_of_service: Option<String>,
    pub bill: Option<NewBillDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: Uuid,
    pub bike_id: Uuid,
    pub service_name: String,
    pub date_of_service: String,
    pub bill: Option<Uuid>,
    pub created_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct NewBillEntryDoc { pub description: String, pub amount: f64, pub quantity: f64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillEntryDoc {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub quantity: f64,
    pub created_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillDetailDoc {
    pub id: Uuid,
    pub bill_date: String,
    pub total_amount: f64,
    pub created_at: String,
    pub entries: Vec<BillEntryDoc>,
    /// Sum of amount × quantity, computed on read.
    pub entries_total: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailDoc {
    pub id: Uuid,
    pub bike_id: Uuid,
    pub service_name: String,
    pub date_of_service: String,
    pub created_at: String,
    pub bill: Option<BillDetailDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BikeDetailDoc {
    pub id: Uuid,
    pub bike_no: String,
    pub owner: String,
    pub contact_no: String,
    pub date_of_reg: String,
    pub created_at: String,
    pub updated_at: String,
    pub services: Vec<ServiceDetailDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillViewDoc {
    pub id: Uuid,
    pub bill_date: String,
    pub total_amount: f64,
    pub created_at: String,
    pub entries: Vec<BillEntryDoc>,
    pub entries_total: f64,
    pub owner: String,
    pub bike_no: String,
}

#[derive(Serialize, ToSchema)]
pub struct NewBookingDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub bike: Option<String>,
    pub service: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDoc {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub bike: Option<String>,
    pub service: Option<String>,
    pub created_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::bookings::book_service,
        crate::routes::auth::admin_signup,
        crate::routes::auth::admin_login,
        crate::routes::bikes::add_bike,
        crate::routes::bikes::list_bikes,
        crate::routes::bikes::get_bike,
        crate::routes::bikes::update_bike,
        crate::routes::bikes::delete_bike,
        crate::routes::bikes::bike_detail,
        crate::routes::services::add_service,
        crate::routes::services::delete_service,
        crate::routes::bills::get_bill,
        crate::routes::bills::add_bill_entry,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorEnvelopeDoc,
            AdminCredentialsDoc,
            AdminDoc,
            NewBikeDoc,
            BikePatchDoc,
            BikeDoc,
            NewBillDoc,
            NewServiceDoc,
            ServiceDoc,
            NewBillEntryDoc,
            BillEntryDoc,
            BillDetailDoc,
            ServiceDetailDoc,
            BikeDetailDoc,
            BillViewDoc,
            NewBookingDoc,
            BookingDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "bikes"),
        (name = "services"),
        (name = "bills"),
        (name = "bookings")
    )
)]
pub struct ApiDoc;
