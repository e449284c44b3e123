//! Item repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::items_sea as items_adapter;
use crate::adapters::items_sea::ItemCreate;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Item domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub value: Option<i32>,
    pub description: Option<String>,
    pub created_at: time::OffsetDateTime,
    pub created_by: String,
}

/// Fields a caller supplies when creating an item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub id: String,
    pub name: String,
    pub value: Option<i32>,
    pub description: Option<String>,
}

pub async fn create_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    item: NewItem,
    created_by: &str,
) -> Result<Item, DomainError> {
    if item.id.is_empty() {
        return Err(DomainError::validation("Item id must not be empty"));
    }
    let dto = ItemCreate::new(item.id, item.name, created_by)
        .with_value(item.value)
        .with_description(item.description);
    let row = items_adapter::insert_item(conn, dto).await?;
    Ok(Item::from(row))
}

pub async fn find_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<Item>, DomainError> {
    let row = items_adapter::find_item_by_id(conn, id).await?;
    Ok(row.map(Item::from))
}

/// Like [`find_item`], but a missing row is an error.
pub async fn require_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Item, DomainError> {
    find_item(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Item, format!("Item '{id}' not found"))
    })
}

pub async fn list_items<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Item>, DomainError> {
    let rows = items_adapter::list_items(conn).await?;
    Ok(rows.into_iter().map(Item::from).collect())
}

/// Delete by id; a missing row is `NotFound`.
pub async fn delete_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), DomainError> {
    let removed = items_adapter::delete_item(conn, id).await?;
    if removed == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Item,
            format!("Item '{id}' not found"),
        ));
    }
    Ok(())
}

impl From<crate::entities::items::Model> for Item {
    fn from(model: crate::entities::items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            value: model.value,
            description: model.description,
            created_at: model.created_at,
            created_by: model.created_by,
        }
    }
}
