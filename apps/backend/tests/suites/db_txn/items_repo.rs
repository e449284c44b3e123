use item_service::entities::items as item_rows;
use item_service::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use item_service::repos::items::{self, NewItem};
use sea_orm::{ActiveValue::Set, EntityTrait};
use time::macros::datetime;
use time::OffsetDateTime;

use crate::support::build_test_state;

fn new_item(id: &str, name: &str, value: Option<i32>) -> NewItem {
    NewItem {
        id: id.to_string(),
        name: name.to_string(),
        value,
        description: None,
    }
}

#[actix_web::test]
async fn create_stamps_server_side_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("database configured");

    let before = time::OffsetDateTime::now_utc();
    let item = items::create_item(db, new_item("r1", "widget", Some(5)), "host-a").await?;

    assert_eq!(item.created_by, "host-a");
    assert!(item.created_at >= before);

    let stored = items::require_item(db, "r1").await?;
    assert_eq!(stored.name, "widget");
    assert_eq!(stored.value, Some(5));
    assert_eq!(stored.created_by, "host-a");
    Ok(())
}

#[actix_web::test]
async fn duplicate_id_is_item_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("database configured");

    items::create_item(db, new_item("dup", "first", None), "host-a").await?;
    let err = items::create_item(db, new_item("dup", "second", None), "host-b")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(ConflictKind::ItemExists, _)));
    assert_eq!(items::require_item(db, "dup").await?.name, "first");
    Ok(())
}

#[actix_web::test]
async fn empty_id_is_validation_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("database configured");

    let err = items::create_item(db, new_item("", "blank", None), "host-a")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(items::list_items(db).await?.is_empty());
    Ok(())
}

#[actix_web::test]
async fn delete_reports_missing_rows() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("database configured");

    items::create_item(db, new_item("gone", "x", None), "host-a").await?;
    items::delete_item(db, "gone").await?;

    let err = items::delete_item(db, "gone").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Item, _)));
    assert!(items::find_item(db, "gone").await?.is_none());
    Ok(())
}

#[actix_web::test]
async fn list_orders_by_created_at_then_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("database configured");

    for id in ["m", "z", "a"] {
        items::create_item(db, new_item(id, id, None), "host-a").await?;
    }

    let listed = items::list_items(db).await?;
    assert_eq!(listed.len(), 3);
    for pair in listed.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert!(
            (prev.created_at, &prev.id) <= (next.created_at, &next.id),
            "{} should not sort after {}",
            prev.id,
            next.id
        );
    }
    Ok(())
}

async fn insert_at(
    db: &sea_orm::DatabaseConnection,
    id: &str,
    created_at: OffsetDateTime,
) -> Result<(), sea_orm::DbErr> {
    let row = item_rows::ActiveModel {
        id: Set(id.to_string()),
        name: Set(id.to_string()),
        value: Set(None),
        description: Set(None),
        created_at: Set(created_at),
        created_by: Set("host-a".to_string()),
    };
    item_rows::Entity::insert(row)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

#[actix_web::test]
async fn list_orders_fractional_seconds_chronologically() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("database configured");

    insert_at(db, "later", datetime!(2024-05-01 12:30:00.51 UTC)).await?;
    insert_at(db, "early", datetime!(2024-05-01 12:30:00.5 UTC)).await?;
    insert_at(db, "whole", datetime!(2024-05-01 12:30:00 UTC)).await?;
    insert_at(db, "next-b", datetime!(2024-05-01 12:30:01 UTC)).await?;
    insert_at(db, "next-a", datetime!(2024-05-01 12:30:01 UTC)).await?;

    let ids: Vec<String> = items::list_items(db)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, ["whole", "early", "later", "next-a", "next-b"]);
    Ok(())
}
