//! Backend entry-point: loads settings, prepares the todo store and serves the
//! REST endpoints, health probes and (in debug builds) OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use todo_backend::config::AppSettings;
use todo_backend::inbound::http::health::HealthState;
use todo_backend::outbound::persistence::{DbPool, PoolConfig, ensure_todos_table};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(database_url) = settings.database_url() {
        let pool_config = PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size().map_err(std::io::Error::other)?);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        ensure_todos_table(&pool)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "todo server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
