use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use service_cell::router::service_routes;
use shared_utils::test_utils::TestConfig;

fn create_test_app(store_url: &str) -> Router {
    let config = TestConfig::default().with_store_url(store_url).to_app_config();
    service_routes(Arc::new(config))
}

fn checkup_service() -> Value {
    json!({
        "id": "7f8d2f10-1111-4a5b-9c3d-000000000001",
        "name": "Checkup",
        "price": 30.0,
        "slots": ["09:00", "10:00"]
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn lists_services_with_full_slot_templates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([checkup_service()])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(Request::builder().uri("/service").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Checkup");
    assert_eq!(body[0]["slots"], json!(["09:00", "10:00"]));
}

#[tokio::test]
async fn name_projection_returns_names_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("select", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "Checkup" }])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/service?projection=name")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!([{ "name": "Checkup" }]));
}

#[tokio::test]
async fn availability_subtracts_booked_slots_for_the_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([checkup_service()])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("date", "eq.2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "7f8d2f10-1111-4a5b-9c3d-000000000002",
            "treatment": "Checkup",
            "date": "2024-01-01",
            "slot": "09:00",
            "patient": "a@x.com",
            "paid": false
        }])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/available?date=2024-01-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Checkup");
    assert_eq!(body[0]["slots"], json!(["10:00"]));
}

#[tokio::test]
async fn availability_ignores_bookings_of_other_treatments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([checkup_service()])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("date", "eq.2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "treatment": "Cleaning",
            "slot": "09:00"
        }])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/available?date=2024-01-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["slots"], json!(["09:00", "10:00"]));
}

#[tokio::test]
async fn missing_date_returns_unfiltered_templates() {
    let mock_server = MockServer::start().await;

    // Only the services collection is mocked: the no-date path must not
    // query bookings at all.
    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([checkup_service()])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(Request::builder().uri("/available").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["slots"], json!(["09:00", "10:00"]));
}

#[tokio::test]
async fn store_failure_surfaces_as_database_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(Request::builder().uri("/service").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "DATABASE");
}
