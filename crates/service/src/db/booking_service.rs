use models::booking;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::info;

use crate::errors::ServiceError;

/// Public booking form. Every field is free text and may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBooking {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub bike: Option<String>,
    pub service: Option<String>,
}

/// Store a booking exactly as submitted.
pub async fn create_booking(db: &DatabaseConnection, input: NewBooking) -> Result<booking::Model, ServiceError> {
    let created = booking::create(db, input.name, input.email, input.contact, input.bike, input.service).await?;
    info!(event = "booking_created", booking_id = %created.id);
    Ok(created)
}
