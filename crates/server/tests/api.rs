use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use configs::{CorsConfig, RateLimitConfig};
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::{routes, startup, ServerState};

async fn test_app(login_max_attempts: u32) -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState::new(db, &RateLimitConfig { login_max_attempts, login_window_secs: 60, ..Default::default() });
    let cors = startup::build_cors(&CorsConfig::default())?;
    Ok(routes::build_router(state, cors))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

fn asha() -> Value {
    json!({"bikeNo": "KA01AB1234", "owner": "Asha", "contactNo": "9876543210", "dateOfReg": "2024-01-01"})
}

#[tokio::test]
async fn shop_scenario_end_to_end() -> anyhow::Result<()> {
    let app = test_app(5).await?;

    let (status, created) = send(&app, Method::POST, "/addBike", Some(asha())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let bike_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/adminPanel/{bike_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (status, svc) = send(
        &app,
        Method::POST,
        &format!("/adminPanel/bikes/{bike_id}/addService"),
        Some(json!({"serviceName": "Oil Change", "bill": {"totalAmount": 500}})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = svc["data"]["id"].as_str().unwrap().to_string();
    assert!(svc["data"]["bill"].is_string());

    let (status, entry) = send(
        &app,
        Method::POST,
        &format!("/adminPanel/bikes/{bike_id}/{service_id}/bill/entry"),
        Some(json!({"description": "Oil", "amount": 500, "quantity": 1})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["data"]["description"], "Oil");

    let (status, bill) = send(&app, Method::GET, &format!("/adminPanel/bikes/{bike_id}/{service_id}/bill"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let data = &bill["data"];
    assert_eq!(data["owner"], "Asha");
    assert_eq!(data["bikeNo"], "KA01AB1234");
    assert_eq!(data["totalAmount"], 500.0);
    assert_eq!(data["entriesTotal"], 500.0);
    assert_eq!(data["entries"].as_array().unwrap().len(), 1);

    let (status, detail) = send(&app, Method::GET, &format!("/adminPanel/bikes/{bike_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["services"][0]["serviceName"], "Oil Change");
    assert_eq!(detail["data"]["services"][0]["bill"]["entries"][0]["description"], "Oil");

    let (status, listed) = send(&app, Method::GET, "/adminPanel", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"][0]["services"][0], service_id.as_str());
    Ok(())
}

#[tokio::test]
async fn bike_validation_and_conflicts() -> anyhow::Result<()> {
    let app = test_app(5).await?;

    let (status, listed) = send(&app, Method::GET, "/adminPanel", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"], json!([]));

    let mut bad = asha();
    bad["contactNo"] = json!("12345");
    let (status, body) = send(&app, Method::POST, "/addBike", Some(bad)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::POST, "/addBike", Some(asha())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, "/addBike", Some(asha())).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "bikeNo already registered");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/addBike")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/adminPanel/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/adminPanel/{missing}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Bike not found");

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_bike() -> anyhow::Result<()> {
    let app = test_app(5).await?;
    let (_, created) = send(&app, Method::POST, "/addBike", Some(asha())).await?;
    let bike_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/adminPanel/{bike_id}"),
        Some(json!({"owner": "Asha K", "services": ["ignored"], "id": "ignored"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["owner"], "Asha K");
    assert_eq!(updated["data"]["bikeNo"], "KA01AB1234");

    send(
        &app,
        Method::POST,
        &format!("/adminPanel/bikes/{bike_id}/addService"),
        Some(json!({"serviceName": "Wash"})),
    )
    .await?;

    let (status, _) = send(&app, Method::DELETE, &format!("/adminPanel/{bike_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/adminPanel/bikes/{bike_id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn service_deletion_and_missing_hops() -> anyhow::Result<()> {
    let app = test_app(5).await?;
    let (_, created) = send(&app, Method::POST, "/addBike", Some(asha())).await?;
    let bike_id = created["data"]["id"].as_str().unwrap().to_string();

    let missing_bike = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/adminPanel/bikes/{missing_bike}/addService"),
        Some(json!({"serviceName": "Wash"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, svc) = send(
        &app,
        Method::POST,
        &format!("/adminPanel/bikes/{bike_id}/addService"),
        Some(json!({"serviceName": "Oil Change", "dateOfService": "2024-02-01", "bill": {"totalAmount": 500}})),
    )
    .await?;
    let service_id = svc["data"]["id"].as_str().unwrap().to_string();

    let unknown = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/adminPanel/bikes/{bike_id}/{unknown}/bill"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Service not found");

    let (status, body) = send(&app, Method::DELETE, &format!("/adminPanel/{bike_id}/{service_id}/deleteService"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Service deleted successfully");
    assert_eq!(body["data"]["services"], json!([]));

    let (status, _) = send(&app, Method::GET, &format!("/adminPanel/bikes/{bike_id}/{service_id}/bill"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &format!("/adminPanel/{bike_id}/{service_id}/deleteService"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn admin_signup_login_and_rate_limit() -> anyhow::Result<()> {
    let app = test_app(3).await?;

    let creds = json!({"name": "workshop", "password": "s3cret-pass"});
    let (status, signed_up) = send(&app, Method::POST, "/adminSignup", Some(creds.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(signed_up["data"]["name"], "workshop");
    assert!(signed_up["data"].get("password").is_none());
    assert!(signed_up["data"].get("passwordHash").is_none());

    let (status, _) = send(&app, Method::POST, "/adminSignup", Some(creds.clone())).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, logged_in) = send(&app, Method::POST, "/adminLogin", Some(creds.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["data"]["id"], signed_up["data"]["id"]);

    let (status, body) = send(&app, Method::POST, "/adminLogin", Some(json!({"name": "workshop", "password": "guess"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "no user found");

    let (status, _) = send(&app, Method::POST, "/adminLogin", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::POST, "/adminLogin", Some(creds)).await?;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn rotating_forwarded_for_does_not_reset_login_budget() -> anyhow::Result<()> {
    let app = test_app(2).await?;
    let peer: SocketAddr = "198.51.100.4:5000".parse()?;
    let mut statuses = Vec::new();
    for i in 0..10 {
        let mut req = Request::builder()
            .method(Method::POST)
            .uri("/adminLogin")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", format!("10.9.9.{i}"))
            .body(Body::from(json!({"name": "ghost", "password": "guess"}).to_string()))?;
        req.extensions_mut().insert(ConnectInfo(peer));
        statuses.push(app.clone().oneshot(req).await?.status());
    }
    assert_eq!(statuses[..2], [StatusCode::UNAUTHORIZED, StatusCode::UNAUTHORIZED]);
    assert!(statuses[2..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
    Ok(())
}

#[tokio::test]
async fn booking_health_and_docs() -> anyhow::Result<()> {
    let app = test_app(5).await?;

    let (status, booked) = send(
        &app,
        Method::POST,
        "/bookService",
        Some(json!({"name": "Ravi", "bike": "Pulsar", "service": "General", "extra": 1})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booked["data"]["name"], "Ravi");
    assert!(booked["data"]["email"].is_null());
    assert!(booked["data"].get("extra").is_none());

    let (status, health) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({"status": "ok"}));

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/addBike"].is_object());
    Ok(())
}

#[tokio::test]
async fn cors_allows_only_listed_origins() -> anyhow::Result<()> {
    let app = test_app(5).await?;
    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/addBike")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
    };

    let resp = app.clone().oneshot(preflight("http://localhost:5173")?).await?;
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).and_then(|v| v.to_str().ok()),
        Some("true")
    );

    let resp = app.clone().oneshot(preflight("http://evil.example")?).await?;
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}
