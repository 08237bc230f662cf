//! Driving port for nurse mutations.

use async_trait::async_trait;

use crate::domain::{Error, NurseDraft, NurseId, NurseView};

/// Write-side nurse operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NursesCommand: Send + Sync {
    /// Create a nurse with a freshly issued employee id.
    async fn create_nurse(&self, draft: NurseDraft) -> Result<NurseView, Error>;

    /// Update a nurse's names, email, and ward.
    async fn update_nurse(&self, id: NurseId, draft: NurseDraft) -> Result<NurseView, Error>;

    /// Delete a nurse, returning the deleted record.
    async fn delete_nurse(&self, id: NurseId) -> Result<NurseView, Error>;
}
