use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::app_state::AppState;

pub const BANNER_MESSAGE: &str = "Item service running on GKE";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct BannerResponse {
    message: &'static str,
    hostname: String,
    pod: String,
    zone: String,
    zone_source: &'static str,
}

/// Liveness only; never touches the database.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

async fn root(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let zone = app_state.zone.resolve().await;

    Ok(HttpResponse::Ok().json(BannerResponse {
        message: BANNER_MESSAGE,
        hostname: app_state.instance.hostname.clone(),
        pod: app_state.instance.pod().to_string(),
        zone: zone.as_str().to_string(),
        zone_source: zone.source(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
