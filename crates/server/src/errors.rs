use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiResponse;
use once_cell::sync::OnceCell;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use tracing::{error, warn};

static EXPOSE_INTERNAL_DETAIL: OnceCell<bool> = OnceCell::new();

/// Let 500 responses carry the underlying error text. Set once at startup.
pub fn expose_internal_detail(enabled: bool) {
    let _ = EXPOSE_INTERNAL_DETAIL.set(enabled);
}

fn internal_detail_exposed() -> bool {
    EXPOSE_INTERNAL_DETAIL.get().copied().unwrap_or(false)
}

/// Error rendered as the `{success: false, message}` envelope.
///
/// `title` is what the client sees; `detail` is only shown for 5xx when
/// internal detail is exposed.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, msg, None) }

    pub fn not_found(msg: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, msg, None) }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            error!(status = %self.status, detail = ?self.detail, "request failed");
            match (&self.detail, internal_detail_exposed()) {
                (Some(detail), true) => format!("{}: {}", self.title, detail),
                _ => self.title,
            }
        } else {
            self.title
        };
        (self.status, Json(ApiResponse::failure(message))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg, None),
            ServiceError::Db(msg) => Self::internal(msg),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => Self::bad_request(msg),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, e.to_string(), None),
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, e.to_string(), None),
            AuthError::HashError(_) | AuthError::Repository(_) => {
                let code = e.code();
                Self::internal(format!("auth error {code}: {e}"))
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected path parameters");
        Self::bad_request(format!("invalid id: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("owner is required".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("Bike"), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("bikeNo already registered".into()), StatusCode::CONFLICT),
            (ServiceError::Db("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn internal_detail_is_hidden_by_default() {
        let resp = JsonApiError::from(ServiceError::Db("password=hunter2".into())).into_response();
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn failed_login_reads_no_user_found() {
        let resp = JsonApiError::from(AuthError::Unauthorized).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["message"], "no user found");
    }
}
