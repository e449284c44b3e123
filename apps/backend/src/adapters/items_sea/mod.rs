//! SeaORM adapter for the items table.

use sea_orm::{ConnectionTrait, DbBackend, EntityTrait, QueryOrder, Set};

use crate::entities::items;

pub mod dto;

pub use dto::ItemCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Insert a row stamped with the current UTC time.
///
/// A duplicate id surfaces as the backend's unique-constraint error.
pub async fn insert_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ItemCreate,
) -> Result<items::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = items::ActiveModel {
        id: Set(dto.id.clone()),
        name: Set(dto.name.clone()),
        value: Set(dto.value),
        description: Set(dto.description.clone()),
        created_at: Set(now),
        created_by: Set(dto.created_by.clone()),
    };

    items::Entity::insert(active)
        .exec_without_returning(conn)
        .await?;

    Ok(items::Model {
        id: dto.id,
        name: dto.name,
        value: dto.value,
        description: dto.description,
        created_at: now,
        created_by: dto.created_by,
    })
}

pub async fn find_item_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<items::Model>, sea_orm::DbErr> {
    items::Entity::find_by_id(id.to_string()).one(conn).await
}

/// All rows ordered by creation time, ties broken by id.
pub async fn list_items<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<items::Model>, sea_orm::DbErr> {
    let mut rows = items::Entity::find()
        .order_by_asc(items::Column::CreatedAt)
        .order_by_asc(items::Column::Id)
        .all(conn)
        .await?;

    // SQLite stores timestamps as RFC 3339 text with variable fractional
    // digits, so its ORDER BY is lexical rather than chronological.
    if conn.get_database_backend() == DbBackend::Sqlite {
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }
    Ok(rows)
}

/// Returns the number of rows removed.
pub async fn delete_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = items::Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(res.rows_affected)
}
