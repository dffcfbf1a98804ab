use axum::{extract::State, http::StatusCode, Json};
use common::types::ApiResponse;
use models::booking;
use service::db::booking_service::{self, NewBooking};

use super::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::AppJson;

#[utoipa::path(post, path = "/bookService", tag = "bookings", request_body = crate::openapi::NewBookingDoc, responses((status = 201, description = "Created", body = crate::openapi::BookingDoc), (status = 400, description = "Bad Request")))]
pub async fn book_service(
    State(state): State<ServerState>,
    AppJson(input): AppJson<NewBooking>,
) -> Result<(StatusCode, Json<ApiResponse<booking::Model>>), JsonApiError> {
    let created = booking_service::create_booking(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}
