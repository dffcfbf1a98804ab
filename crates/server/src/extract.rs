//! Extractors whose rejections use the JSON error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::JsonApiError;

/// `axum::Json` with a 400 envelope for malformed bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with a 400 envelope for ids that are not UUIDs.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct AppPath<T>(pub T);
