//! Handler tests for the nurse endpoints.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::EMPLOYEE_ID_LEN;
use crate::inbound::http::test_utils::{memory_state, test_app};

fn nurse_body(email: &str, ward_id: i64) -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "email": email,
        "wardId": ward_id
    })
}

async fn seeded_app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let app = test::init_service(test_app(memory_state())).await;
    let request = test::TestRequest::post()
        .uri("/api/wards")
        .set_json(json!({ "name": "Ward 6", "color": "Green" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::CREATED
    );
    app
}

async fn call(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn create_nurse_returns_enriched_view() {
    let app = seeded_app().await;

    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["full_name"], "Ann Lee");
    assert_eq!(body["ward_name"], "Ward 6");
    assert_eq!(body["ward_id"], 1);
    assert_eq!(
        body["employee_id"].as_str().map(str::len),
        Some(EMPLOYEE_ID_LEN)
    );
    assert_eq!(body["modified_at"], "2025-03-28T09:30:00-05:00");
}

#[rstest]
#[actix_web::test]
async fn get_nurse_matches_list_entry() {
    let app = seeded_app().await;
    call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    let (_, listed) = call(&app, test::TestRequest::get().uri("/api/nurses")).await;
    let (status, fetched) = call(&app, test::TestRequest::get().uri("/api/nurses/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0], fetched);
}

#[rstest]
#[case(json!({ "lastName": "Lee", "email": "a@x.com", "wardId": 1 }), "firstName", "missing_field")]
#[case(json!({ "firstName": "Ann", "email": "a@x.com", "wardId": 1 }), "lastName", "missing_field")]
#[case(json!({ "firstName": "Ann", "lastName": "Lee", "wardId": 1 }), "email", "missing_field")]
#[case(json!({ "firstName": "Ann", "lastName": "Lee", "email": "a@x.com" }), "wardId", "missing_field")]
#[case(json!({ "firstName": " ", "lastName": "Lee", "email": "a@x.com", "wardId": 1 }), "firstName", "empty")]
#[case(json!({ "firstName": "Ann", "lastName": "Lee", "email": "a@x", "wardId": 1 }), "email", "invalid_email")]
#[case(json!({ "firstName": "Ann", "lastName": "Lee", "email": "a@x.com", "wardId": 0 }), "wardId", "invalid_id")]
#[actix_web::test]
async fn create_nurse_rejects_invalid_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = seeded_app().await;

    let (status, body) = call(
        &app,
        test::TestRequest::post().uri("/api/nurses").set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn unknown_ward_is_a_validation_error() {
    let app = seeded_app().await;

    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 9999)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "unknown_ward");
    assert_eq!(body["details"]["value"], 9999);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_conflicts() {
    let app = seeded_app().await;
    call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn update_keeping_own_email_succeeds() {
    let app = seeded_app().await;
    let (_, created) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    let (status, body) = call(
        &app,
        test::TestRequest::put().uri("/api/nurses/1").set_json(json!({
            "firstName": "Annie",
            "lastName": "Lee",
            "email": "ann.lee@x.com",
            "wardId": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Annie Lee");
    assert_eq!(body["employee_id"], created["employee_id"]);
}

#[rstest]
#[case("ann.lee@x.com", true)]
#[case("ANN.LEE@x.com", false)]
#[case("bea.ng@x.com", false)]
#[case("not-an-email", false)]
#[actix_web::test]
async fn check_email_reports_existing_addresses(#[case] email: &str, #[case] exists: bool) {
    let app = seeded_app().await;
    call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    let (status, body) = call(
        &app,
        test::TestRequest::get().uri(&format!("/api/nurses/check-email?email={email}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], exists);
}

#[rstest]
#[actix_web::test]
async fn check_email_requires_the_parameter() {
    let app = seeded_app().await;

    let (status, body) = call(&app, test::TestRequest::get().uri("/api/nurses/check-email")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn delete_nurse_returns_removed_record() {
    let app = seeded_app().await;
    call(
        &app,
        test::TestRequest::post()
            .uri("/api/nurses")
            .set_json(nurse_body("ann.lee@x.com", 1)),
    )
    .await;

    let (status, body) = call(&app, test::TestRequest::delete().uri("/api/nurses/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Nurse deleted successfully");
    assert_eq!(body["nurse"]["email"], "ann.lee@x.com");

    let (status, _) = call(&app, test::TestRequest::delete().uri("/api/nurses/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
