use axum::{extract::State, http::StatusCode, Json};
use common::types::ApiResponse;
use models::bill_entry;
use service::db::bill_service::{self, NewBillEntry};
use service::views::BillView;
use uuid::Uuid;

use super::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{AppJson, AppPath};

#[utoipa::path(get, path = "/adminPanel/bikes/{id}/{service_id}/bill", tag = "bills", params(("id" = Uuid, Path, description = "Bike id"), ("service_id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "OK", body = crate::openapi::BillViewDoc), (status = 404, description = "Bike, service or bill not found")))]
pub async fn get_bill(
    State(state): State<ServerState>,
    AppPath((bike_id, service_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<BillView>>, JsonApiError> {
    Ok(Json(ApiResponse::ok(bill_service::get_bill_view(&state.db, bike_id, service_id).await?)))
}

#[utoipa::path(post, path = "/adminPanel/bikes/{id}/{service_id}/bill/entry", tag = "bills", params(("id" = Uuid, Path, description = "Bike id"), ("service_id" = Uuid, Path, description = "Service id")), request_body = crate::openapi::NewBillEntryDoc, responses((status = 201, description = "Created", body = crate::openapi::BillEntryDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Bike, service or bill not found")))]
pub async fn add_bill_entry(
    State(state): State<ServerState>,
    AppPath((bike_id, service_id)): AppPath<(Uuid, Uuid)>,
    AppJson(input): AppJson<NewBillEntry>,
) -> Result<(StatusCode, Json<ApiResponse<bill_entry::Model>>), JsonApiError> {
    let entry = bill_service::add_bill_entry(&state.db, bike_id, service_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(entry))))
}
