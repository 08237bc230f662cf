//! Driving port for ward reads.

use async_trait::async_trait;

use crate::domain::{Error, Ward, WardId, WardSummary};

/// Read-side ward operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardsQuery: Send + Sync {
    /// All wards with their `has_nurses` flag.
    async fn list_wards(&self) -> Result<Vec<WardSummary>, Error>;

    /// One ward, or a `not_found` error.
    async fn get_ward(&self, id: WardId) -> Result<Ward, Error>;
}
