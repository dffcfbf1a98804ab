use axum::{extract::State, http::StatusCode, Json};
use common::types::ApiResponse;
use service::db::bike_service::{self, BikePatch, NewBike};
use service::views::{BikeDetail, BikeView};
use uuid::Uuid;

use super::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{AppJson, AppPath};

#[utoipa::path(post, path = "/addBike", tag = "bikes", request_body = crate::openapi::NewBikeDoc, responses((status = 201, description = "Created", body = crate::openapi::BikeDoc), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn add_bike(
    State(state): State<ServerState>,
    AppJson(input): AppJson<NewBike>,
) -> Result<(StatusCode, Json<ApiResponse<BikeView>>), JsonApiError> {
    let created = bike_service::create_bike(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

#[utoipa::path(get, path = "/adminPanel", tag = "bikes", responses((status = 200, description = "OK", body = [crate::openapi::BikeDoc])))]
pub async fn list_bikes(State(state): State<ServerState>) -> Result<Json<ApiResponse<Vec<BikeView>>>, JsonApiError> {
    let bikes = bike_service::list_bikes(&state.db).await?;
    Ok(Json(ApiResponse::ok(bikes)))
}

#[utoipa::path(get, path = "/adminPanel/{id}", tag = "bikes", params(("id" = Uuid, Path, description = "Bike id")), responses((status = 200, description = "OK", body = crate::openapi::BikeDoc), (status = 404, description = "Not Found")))]
pub async fn get_bike(
    State(state): State<ServerState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BikeView>>, JsonApiError> {
    Ok(Json(ApiResponse::ok(bike_service::get_bike(&state.db, id).await?)))
}

#[utoipa::path(put, path = "/adminPanel/{id}", tag = "bikes", params(("id" = Uuid, Path, description = "Bike id")), request_body = crate::openapi::BikePatchDoc, responses((status = 200, description = "OK", body = crate::openapi::BikeDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict")))]
pub async fn update_bike(
    State(state): State<ServerState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(patch): AppJson<BikePatch>,
) -> Result<Json<ApiResponse<BikeView>>, JsonApiError> {
    let updated = bike_service::update_bike(&state.db, id, patch).await?;
    Ok(Json(ApiResponse::ok_with_message(updated, "Bike updated")))
}

#[utoipa::path(delete, path = "/adminPanel/{id}", tag = "bikes", params(("id" = Uuid, Path, description = "Bike id")), responses((status = 200, description = "Deleted", body = crate::openapi::BikeDoc), (status = 404, description = "Not Found")))]
pub async fn delete_bike(
    State(state): State<ServerState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BikeView>>, JsonApiError> {
    let deleted = bike_service::delete_bike(&state.db, id).await?;
    Ok(Json(ApiResponse::ok_with_message(deleted, "Bike deleted")))
}

#[utoipa::path(get, path = "/adminPanel/bikes/{id}", tag = "bikes", params(("id" = Uuid, Path, description = "Bike id")), responses((status = 200, description = "OK", body = crate::openapi::BikeDetailDoc), (status = 404, description = "Not Found")))]
pub async fn bike_detail(
    State(state): State<ServerState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BikeDetail>>, JsonApiError> {
    Ok(Json(ApiResponse::ok(bike_service::bike_detail(&state.db, id).await?)))
}
