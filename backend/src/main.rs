//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wardroom::example_data::{SeedPorts, seed_example_roster};
use wardroom::inbound::http::health::HealthState;
use wardroom::outbound::persistence::{DbPool, run_pending_migrations};
use wardroom::settings::AppSettings;

use server::{ServerConfig, build_ports, create_server};

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
        AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let display_offset = settings.display_offset().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, display_offset);
    if let Some(pool_config) = settings.pool_config().map_err(std::io::Error::other)? {
        if settings.run_migrations() {
            run_pending_migrations(pool_config.database_url())
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let ports = build_ports(&config);
    if settings.seed_example_data() {
        seed_example_roster(SeedPorts {
            wards_query: ports.wards_query.as_ref(),
            wards_command: ports.wards_command.as_ref(),
            nurses_query: ports.nurses_query.as_ref(),
            nurses_command: ports.nurses_command.as_ref(),
        })
        .await
        .map_err(std::io::Error::other)?;
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config, ports)?.await
}
