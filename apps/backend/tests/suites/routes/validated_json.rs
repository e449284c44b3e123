use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use item_service::extractors::ValidatedJson;
use item_service::AppError;
use serde::Deserialize;
use serde_json::json;

use crate::support::{build_test_state, build_test_state_without_db, create_test_app};

#[derive(Debug, Deserialize)]
struct EchoBody {
    id: String,
    value: Option<i32>,
}

async fn echo(body: ValidatedJson<EchoBody>) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    Ok(HttpResponse::Ok().json(json!({"id": body.id, "value": body.value})))
}

fn raw_post(uri: &str, body: &'static str) -> actix_http::Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request()
}

#[actix_web::test]
async fn valid_body_is_extracted() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_routes(|cfg| {
            cfg.route("/_test/echo", web::post().to(echo));
        })
        .build()
        .await;

    let resp = test::call_service(&app, raw_post("/_test/echo", r#"{"id":"p1","value":7}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn malformed_item_body_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, raw_post("/api/data", r#"{"id": "a1", "name": "#)).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn wrong_field_types_are_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(
        &app,
        raw_post("/api/data", r#"{"id": "a1", "value": "five"}"#),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("wrong types"),
    )
    .await;

    let resp = test::call_service(&app, raw_post("/api/data", r#""a1""#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[actix_web::test]
async fn oversized_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .with_body_limit(32)
        .build()
        .await;

    let resp = test::call_service(
        &app,
        raw_post(
            "/api/data",
            r#"{"id": "a1", "name": "a name long enough to pass the limit"}"#,
        ),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "PAYLOAD_TOO_LARGE",
        StatusCode::PAYLOAD_TOO_LARGE,
        None,
    )
    .await;
    Ok(())
}
