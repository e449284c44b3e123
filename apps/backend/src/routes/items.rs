use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::repos::items::{self, Item, NewItem};
use crate::state::app_state::AppState;

/// Body of `POST /api/data`.
///
/// Every field is optional at the JSON level so a missing `id` can be
/// reported as `MISSING_ITEM_ID` rather than a parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateItemRequest {
    fn into_new_item(self) -> Result<NewItem, AppError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::invalid(ErrorCode::MissingItemId, "id required"))?;

        Ok(NewItem {
            id,
            name: self.name.unwrap_or_default(),
            value: self.value,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize)]
struct ItemSummary {
    id: String,
    name: String,
    value: Option<i32>,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct ItemListResponse {
    count: usize,
    items: Vec<ItemSummary>,
}

#[derive(Debug, Serialize)]
struct ItemDetail {
    id: String,
    name: String,
    value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct CreatedItem {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    message: &'static str,
    item: CreatedItem,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    message: &'static str,
    id: String,
}

fn iso8601(ts: OffsetDateTime) -> Result<String, AppError> {
    ts.format(&Rfc3339)
        .map_err(|e| AppError::internal(format!("failed to format timestamp: {e}")))
}

impl TryFrom<Item> for ItemSummary {
    type Error = AppError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: iso8601(item.created_at)?,
            id: item.id,
            name: item.name,
            value: item.value,
        })
    }
}

impl TryFrom<Item> for ItemDetail {
    type Error = AppError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: iso8601(item.created_at)?,
            id: item.id,
            name: item.name,
            value: item.value,
            description: item.description,
        })
    }
}

async fn list_items(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let rows = items::list_items(db).await?;

    let items = rows
        .into_iter()
        .map(ItemSummary::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(ItemListResponse {
        count: items.len(),
        items,
    }))
}

async fn create_item(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let new_item = body.into_inner().into_new_item()?;
    let created_by = app_state.instance.hostname.clone();

    let item = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            items::create_item(txn, new_item, &created_by)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    info!(item_id = %item.id, "Item created");

    Ok(HttpResponse::Ok().json(CreatedResponse {
        message: "created",
        item: CreatedItem {
            id: item.id,
            name: item.name,
        },
    }))
}

async fn get_item(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let db = require_db(&app_state)?;
    let item = items::require_item(db, &id).await?;

    Ok(HttpResponse::Ok().json(ItemDetail::try_from(item)?))
}

async fn delete_item(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let target = id.clone();

    with_txn(&app_state, move |txn| {
        Box::pin(async move { items::delete_item(txn, &target).await.map_err(AppError::from) })
    })
    .await?;

    info!(item_id = %id, "Item deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse {
        message: "deleted",
        id,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_items))
            .route(web::post().to(create_item)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_item))
            .route(web::delete().to(delete_item)),
    );
}
