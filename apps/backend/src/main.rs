use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use item_service::bin_support::config_app::Config;
use item_service::bin_support::startup;
use item_service::extractors::JsonBodyLimit;
use item_service::infra::state::build_state;
use item_service::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use item_service::secrets::GcpSecretManager;
use item_service::{routes, telemetry};
use tracing::{error, info};

fn exit_with(msg: &str, err: impl std::fmt::Display) -> ! {
    error!(error = %err, "{msg}");
    eprintln!("❌ {msg}: {err}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let cfg = Config::from_env().unwrap_or_else(|e| exit_with("Invalid configuration", e));

    let secrets = match GcpSecretManager::from_env().await {
        Ok(client) => client,
        Err(e) => exit_with("Failed to create secret client", e),
    };

    let db_target = match startup::resolve_db_target(&cfg, &secrets).await {
        Ok(target) => target,
        Err(e) => exit_with("Failed to resolve database configuration", e),
    };

    let app_state = match build_state()
        .with_db(db_target)
        .with_zone(Arc::new(startup::build_zone_resolver(&cfg)))
        .with_instance(startup::instance_info(&cfg))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => exit_with("Failed to build application state", e),
    };

    info!(host = %cfg.host, port = cfg.port, "Starting item-service");

    let data = web::Data::new(app_state);
    let body_limit = JsonBodyLimit(cfg.max_json_payload_size);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(body_limit)
            .configure(routes::configure)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
