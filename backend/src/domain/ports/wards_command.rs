//! Driving port for ward mutations.

use async_trait::async_trait;

use crate::domain::{Error, Ward, WardDraft, WardId};

/// Write-side ward operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardsCommand: Send + Sync {
    /// Create a ward and return the stored record.
    async fn create_ward(&self, draft: WardDraft) -> Result<Ward, Error>;

    /// Update a ward's name and colour.
    async fn update_ward(&self, id: WardId, draft: WardDraft) -> Result<Ward, Error>;

    /// Delete a ward that no nurse references, returning the deleted record.
    async fn delete_ward(&self, id: WardId) -> Result<Ward, Error>;
}
