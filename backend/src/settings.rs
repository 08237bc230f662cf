//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `WARDROOM_*` environment variables, and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DISPLAY_OFFSET: &str = "-05:00";

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid display offset {value:?}; expected a value such as -05:00")]
    DisplayOffset { value: String },
    #[error("db_max_connections must be at least 1")]
    MaxConnections,
}

/// Runtime settings for the ward and nurse service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WARDROOM")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Civil offset used to render timestamps, e.g. `-05:00`.
    pub display_utc_offset: Option<String>,
    /// Apply embedded migrations before serving; on unless set to false.
    pub run_migrations: Option<bool>,
    /// Create the sample roster on startup; off unless set to true.
    pub seed_example_data: Option<bool>,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:5000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parse the display offset, falling back to `-05:00`.
    pub fn display_offset(&self) -> Result<FixedOffset, SettingsError> {
        let value = self
            .display_utc_offset
            .as_deref()
            .unwrap_or(DEFAULT_DISPLAY_OFFSET);
        value
            .trim()
            .parse::<FixedOffset>()
            .map_err(|_| SettingsError::DisplayOffset {
                value: value.to_owned(),
            })
    }

    /// Whether embedded migrations run before serving (default true).
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Whether the sample roster is seeded at startup (default false).
    #[must_use]
    pub fn seed_example_data(&self) -> bool {
        self.seed_example_data.unwrap_or(false)
    }

    /// Pool configuration when a database URL is present.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };
        let mut config = PoolConfig::new(url);
        if let Some(max) = self.db_max_connections {
            if max == 0 {
                return Err(SettingsError::MaxConnections);
            }
            config = config.with_max_size(max);
        }
        Ok(Some(config))
    }
}
