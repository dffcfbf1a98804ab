use axum::{extract::State, http::StatusCode, Json};
use common::types::ApiResponse;
use models::service_record;
use service::db::service_record_service::{self, NewService};
use service::views::BikeDetail;
use uuid::Uuid;

use super::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{AppJson, AppPath};

#[utoipa::path(post, path = "/adminPanel/bikes/{id}/addService", tag = "services", params(("id" = Uuid, Path, description = "Bike id")), request_body = crate::openapi::NewServiceDoc, responses((status = 201, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Bike not found")))]
pub async fn add_service(
    State(state): State<ServerState>,
    AppPath(bike_id): AppPath<Uuid>,
    AppJson(input): AppJson<NewService>,
) -> Result<(StatusCode, Json<ApiResponse<service_record::Model>>), JsonApiError> {
    let created = service_record_service::add_service(&state.db, bike_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

#[utoipa::path(delete, path = "/adminPanel/{id}/{service_id}/deleteService", tag = "services", params(("id" = Uuid, Path, description = "Bike id"), ("service_id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Deleted; remaining bike tree", body = crate::openapi::BikeDetailDoc), (status = 404, description = "Bike or service not found")))]
pub async fn delete_service(
    State(state): State<ServerState>,
    AppPath((bike_id, service_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<BikeDetail>>, JsonApiError> {
    let bike = service_record_service::delete_service(&state.db, bike_id, service_id).await?;
    Ok(Json(ApiResponse::ok_with_message(bike, "Service deleted successfully")))
}
