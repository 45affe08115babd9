use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

const SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

fn create_test_app(store_url: &str) -> Router {
    let config = TestConfig::default().with_store_url(store_url).to_app_config();
    doctor_routes(Arc::new(config))
}

fn bearer(user: &TestUser) -> String {
    format!("Bearer {}", JwtTestUtils::create_test_token(user, SECRET, None))
}

fn doctor_json(id: Uuid) -> Value {
    json!({
        "id": id,
        "name": "Dr. Strange",
        "email": "strange@x.com",
        "specialty": "Dentistry"
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn lists_doctors_publicly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor_json(Uuid::new_v4())])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(Request::builder().uri("/doctor").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["specialty"], "Dentistry");
}

#[tokio::test]
async fn admin_can_register_a_doctor() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("boss@x.com");
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.boss@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([admin.to_record()])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([doctor_json(doctor_id)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/doctor")
                .header("Authorization", bearer(&admin))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "name": "Dr. Strange",
                        "email": "strange@x.com",
                        "specialty": "Dentistry"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], json!(doctor_id));
}

#[tokio::test]
async fn non_admin_cannot_register_a_doctor() {
    let mock_server = MockServer::start().await;
    let patient = TestUser::patient("a@x.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([patient.to_record()])))
        .mount(&mock_server)
        .await;

    // The registry must never be reached.
    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/doctor")
                .header("Authorization", bearer(&patient))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "name": "Dr. Strange",
                        "email": "strange@x.com",
                        "specialty": "Dentistry"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn registration_without_credential_is_rejected() {
    let app = create_test_app("http://unused");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/doctor")
                .header("content-type", "application/json")
                .body(Body::from(json!({}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn removes_a_doctor_by_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.strange@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor_json(Uuid::new_v4())])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/doctor/strange@x.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "removed": 1 }));
}
