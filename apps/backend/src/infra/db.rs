use std::process;
use std::time::Duration;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, Schema, SqlxPostgresConnector, SqlxSqliteConnector,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, trace};

use crate::config::db::{DbTarget, PoolSettings};
use crate::entities::items;
use crate::error::AppError;

fn engine(target: &DbTarget) -> &'static str {
    match target {
        DbTarget::Postgres(_) => "postgresql",
        DbTarget::SqliteMemory => "sqlite",
    }
}

/// Build the connection pool for `target`. Does not touch the schema.
pub async fn connect_db(
    target: &DbTarget,
    pool_cfg: &PoolSettings,
) -> Result<DatabaseConnection, AppError> {
    match target {
        DbTarget::Postgres(cfg) => {
            info!(
                "pool=connecting engine=postgres host={} port={} db={} min={} max={} acquire_timeout_ms={}",
                cfg.host, cfg.port, cfg.name, pool_cfg.pool_min, pool_cfg.pool_max, pool_cfg.acquire_timeout_ms
            );

            let sqlx_pool = PgPoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .test_before_acquire(pool_cfg.test_before_acquire)
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        sqlx::query("SET timezone = 'UTC';")
                            .execute(&mut *conn)
                            .await?;
                        trace!("db=postgres hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&cfg.url())
                .await
                .map_err(|e| AppError::db(format!("failed to connect to Postgres: {e}")))?;

            info!(
                "pool=create engine=postgres min={} max={} acquire_timeout_ms={}",
                pool_cfg.pool_min, pool_cfg.pool_max, pool_cfg.acquire_timeout_ms
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
        DbTarget::SqliteMemory => {
            // Every connection to :memory: is its own database, so the pool
            // holds exactly one connection for the life of the process.
            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
                .map_err(|e| AppError::db(format!("failed to open SQLite: {e}")))?;

            info!(
                "pool=create engine=sqlite path=sqlite::memory: min=1 max=1 acquire_timeout_ms={}",
                pool_cfg.acquire_timeout_ms
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
    }
}

/// Create the `items` table if it does not exist yet.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), AppError> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let mut create = schema.create_table_from_entity(items::Entity);
    create.if_not_exists();

    conn.execute(backend.build(&create)).await?;
    info!("schema=ensured table=items");
    Ok(())
}

/// Single entrypoint used by state building: connect, then ensure schema.
pub async fn bootstrap_db(
    target: &DbTarget,
    pool_cfg: &PoolSettings,
) -> Result<DatabaseConnection, AppError> {
    info!(
        "bootstrap=start engine={} pid={}",
        engine(target),
        process::id()
    );

    let conn = connect_db(target, pool_cfg).await?;
    ensure_schema(&conn).await?;

    info!("bootstrap=ready");
    Ok(conn)
}
