//! bb8 pool of `diesel-async` PostgreSQL connections shared by the ward and
//! nurse repositories.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::info;

/// Pool construction or checkout failure.
///
/// Repositories surface both variants as a connection error, which the
/// services report as `service_unavailable`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("database pool could not be built: {message}")]
    Build { message: String },
    #[error("no database connection available: {message}")]
    Checkout { message: String },
}

impl PoolError {
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }
}

/// Connection settings for [`DbPool`].
///
/// # Examples
/// ```
/// use wardroom::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://ward_admin:s3cret@db:5432/wardroom")
///     .with_max_size(4);
/// assert_eq!(config.max_size(), 4);
/// assert_eq!(config.redacted_url(), "postgres://ward_admin:***@db:5432/wardroom");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Connections opened at most when `WARDROOM_DB_MAX_CONNECTIONS` is unset.
    pub const DEFAULT_MAX_SIZE: u32 = 10;

    const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Settings for `database_url` with one idle connection kept warm.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
            min_idle: Some(1),
            connection_timeout: Self::DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a request waits for a free connection before failing.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// The URL with any password replaced by `***`, safe to log.
    pub fn redacted_url(&self) -> String {
        let url = self.database_url.as_str();
        let Some((scheme, rest)) = url.split_once("://") else {
            return url.to_owned();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return url.to_owned();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
            None => url.to_owned(),
        }
    }
}

/// Shared handle to the connection pool; cloning is cheap.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening the `min_idle` connections eagerly.
    ///
    /// # Errors
    /// [`PoolError::Build`] when the initial connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        info!(
            database = %config.redacted_url(),
            max_connections = config.max_size,
            "database pool ready"
        );
        Ok(Self { inner })
    }

    /// Borrow a connection for one repository call.
    ///
    /// # Errors
    /// [`PoolError::Checkout`] when none frees up within the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_keep_one_idle_connection() {
        let config = PoolConfig::new("postgres://localhost/wardroom");

        assert_eq!(config.max_size(), PoolConfig::DEFAULT_MAX_SIZE);
        assert_eq!(config.min_idle, Some(1));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case("postgres://admin:pw@db/wardroom", "postgres://admin:***@db/wardroom")]
    #[case("postgres://admin:p@ss@db/wardroom", "postgres://admin:***@db/wardroom")]
    #[case("postgres://admin@db/wardroom", "postgres://admin@db/wardroom")]
    #[case("postgres://localhost/wardroom", "postgres://localhost/wardroom")]
    #[case("not a url", "not a url")]
    fn redacted_url_hides_only_the_password(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(PoolConfig::new(url).redacted_url(), expected);
    }
}
