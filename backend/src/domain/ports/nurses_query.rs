//! Driving port for nurse reads.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, NurseId, NurseView};

/// Read-side nurse operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NursesQuery: Send + Sync {
    /// All nurses with derived names.
    async fn list_nurses(&self) -> Result<Vec<NurseView>, Error>;

    /// One nurse, or a `not_found` error.
    async fn get_nurse(&self, id: NurseId) -> Result<NurseView, Error>;

    /// Advisory pre-flight check for email availability.
    ///
    /// The answer may be stale by the time a write lands; writes enforce
    /// uniqueness independently.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, Error>;
}
