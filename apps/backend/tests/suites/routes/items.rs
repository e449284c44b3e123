use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_item_id;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::common::read_json;
use crate::support::{build_test_state, build_test_state_without_db, create_test_app};

fn post(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/data")
        .set_json(body)
        .to_request()
}

fn get(uri: &str) -> actix_http::Request {
    test::TestRequest::get().uri(uri).to_request()
}

fn delete(uri: &str) -> actix_http::Request {
    test::TestRequest::delete().uri(uri).to_request()
}

#[actix_web::test]
async fn create_then_get_returns_stored_fields() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, post(json!({"id": "a1", "name": "widget", "value": 5}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        read_json(resp).await,
        json!({"message": "created", "item": {"id": "a1", "name": "widget"}})
    );

    let resp = test::call_service(&app, get("/api/data/a1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["id"], "a1");
    assert_eq!(body["name"], "widget");
    assert_eq!(body["value"], 5);
    assert!(body.get("description").is_none());
    let created_at = body["created_at"].as_str().expect("created_at is a string");
    OffsetDateTime::parse(created_at, &Rfc3339)?;
    Ok(())
}

#[actix_web::test]
async fn description_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let id = unique_item_id();

    let resp = test::call_service(
        &app,
        post(json!({"id": id, "name": "gadget", "value": -3, "description": "spare part"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(test::call_service(&app, get(&format!("/api/data/{id}"))).await).await;
    assert_eq!(body["name"], "gadget");
    assert_eq!(body["value"], -3);
    assert_eq!(body["description"], "spare part");
    Ok(())
}

#[actix_web::test]
async fn omitted_name_and_value_are_stored_as_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let id = unique_item_id();

    let resp = test::call_service(&app, post(json!({"id": id}))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(test::call_service(&app, get(&format!("/api/data/{id}"))).await).await;
    assert_eq!(body["name"], "");
    assert_eq!(body["value"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn duplicate_create_conflicts_and_keeps_first() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let id = unique_item_id();

    let first = test::call_service(&app, post(json!({"id": id, "name": "first", "value": 1}))).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = test::call_service(&app, post(json!({"id": id, "name": "second", "value": 2}))).await;
    assert_problem_details_from_service_response(second, "ITEM_EXISTS", StatusCode::CONFLICT, None)
        .await;

    let body = read_json(test::call_service(&app, get(&format!("/api/data/{id}"))).await).await;
    assert_eq!(body["name"], "first");
    assert_eq!(body["value"], 1);
    Ok(())
}

#[actix_web::test]
async fn concurrent_duplicate_creates_admit_exactly_one() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let id = unique_item_id();

    let (a, b) = futures_util::future::join(
        test::call_service(&app, post(json!({"id": id, "name": "a"}))),
        test::call_service(&app, post(json!({"id": id, "name": "b"}))),
    )
    .await;

    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let list = read_json(test::call_service(&app, get("/api/data")).await).await;
    assert_eq!(list["count"], 1);
    assert_eq!(list["items"][0]["id"], id.as_str());
    Ok(())
}

#[actix_web::test]
async fn delete_then_get_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let id = unique_item_id();
    let uri = format!("/api/data/{id}");

    test::call_service(&app, post(json!({"id": id, "name": "doomed"}))).await;

    let resp = test::call_service(&app, delete(&uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, json!({"message": "deleted", "id": id}));

    let resp = test::call_service(&app, get(&uri)).await;
    assert_problem_details_from_service_response(resp, "ITEM_NOT_FOUND", StatusCode::NOT_FOUND, Some(id.as_str()))
        .await;
    Ok(())
}

#[actix_web::test]
async fn delete_missing_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, delete("/api/data/never-existed")).await;
    assert_problem_details_from_service_response(resp, "ITEM_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
    Ok(())
}

#[actix_web::test]
async fn list_counts_live_items_in_creation_order() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let empty = read_json(test::call_service(&app, get("/api/data")).await).await;
    assert_eq!(empty, json!({"count": 0, "items": []}));

    for (id, value) in [("b", 2), ("a", 1), ("c", 3)] {
        let resp = test::call_service(&app, post(json!({"id": id, "name": id, "value": value}))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    test::call_service(&app, delete("/api/data/c")).await;

    let body = read_json(test::call_service(&app, get("/api/data")).await).await;
    assert_eq!(body["count"], 2);
    let items = body["items"].as_array().expect("items is an array");
    assert_eq!(items.len(), 2);

    let keys: Vec<(OffsetDateTime, String)> = items
        .iter()
        .map(|item| {
            let ts = OffsetDateTime::parse(item["created_at"].as_str().unwrap(), &Rfc3339).unwrap();
            (ts, item["id"].as_str().unwrap().to_string())
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    for item in items {
        assert!(item.get("description").is_none());
        assert_eq!(item["name"], item["id"]);
    }
    Ok(())
}

#[actix_web::test]
async fn create_without_id_is_rejected_and_creates_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, post(json!({"name": "nameless"}))).await;
    assert_problem_details_from_service_response(
        resp,
        "MISSING_ITEM_ID",
        StatusCode::BAD_REQUEST,
        Some("id required"),
    )
    .await;

    let resp = test::call_service(&app, post(json!({"id": "", "name": "blank"}))).await;
    assert_problem_details_from_service_response(resp, "MISSING_ITEM_ID", StatusCode::BAD_REQUEST, None)
        .await;

    let body = read_json(test::call_service(&app, get("/api/data")).await).await;
    assert_eq!(body["count"], 0);
    Ok(())
}

#[actix_web::test]
async fn data_routes_without_database_are_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, get("/api/data")).await;
    assert_problem_details_from_service_response(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
    .await;

    let resp = test::call_service(&app, post(json!({"id": "x"}))).await;
    assert_problem_details_from_service_response(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
    .await;
    Ok(())
}
