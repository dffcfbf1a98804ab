pub mod auth;
pub mod bikes;
pub mod bills;
pub mod bookings;
pub mod services;

use std::any::Any;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::rate_limit;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found() -> JsonApiError {
    JsonApiError::not_found("route not found")
}

/// Every 5xx leaves a trace with the request line, whatever produced it.
async fn log_server_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let resp = next.run(req).await;
    if resp.status().is_server_error() {
        error!(%method, %uri, status = %resp.status(), "server error response");
    }
    resp
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    JsonApiError::internal(format!("handler panicked: {detail}")).into_response()
}

/// Build the full application router: public intake, admin auth and the admin panel.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (health, docs, booking form)
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/bookService", post(bookings::book_service));

    // Admin identity; login attempts are rate limited per caller
    let admin_auth = Router::new()
        .route("/adminSignup", post(auth::admin_signup))
        .route(
            "/adminLogin",
            post(auth::admin_login)
                .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::limit_login)),
        );

    // Bike directory and its service/bill tree
    let panel = Router::new()
        .route("/addBike", post(bikes::add_bike))
        .route("/adminPanel", get(bikes::list_bikes))
        .route(
            "/adminPanel/:id",
            get(bikes::get_bike).put(bikes::update_bike).delete(bikes::delete_bike),
        )
        .route("/adminPanel/:id/:service_id/deleteService", delete(services::delete_service))
        .route("/adminPanel/bikes/:id", get(bikes::bike_detail))
        .route("/adminPanel/bikes/:id/addService", post(services::add_service))
        .route("/adminPanel/bikes/:id/:service_id/bill", get(bills::get_bill))
        .route("/adminPanel/bikes/:id/:service_id/bill/entry", post(bills::add_bill_entry));

    public
        .merge(admin_auth)
        .merge(panel)
        .fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(log_server_errors))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
