use actix_web::web;

pub mod health;
pub mod items;

/// Register every route. Shared by `main.rs` and the test app builder.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Service banner and liveness: /, /health
    cfg.configure(health::configure_routes);

    // Item CRUD: /api/data/**
    cfg.service(web::scope("/api/data").configure(items::configure_routes));
}
