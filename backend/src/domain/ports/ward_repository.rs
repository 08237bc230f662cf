//! Driven port for ward persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ConsistencyViolation, Ward, WardDraft, WardId, WardSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ward repository adapters.
    pub enum WardRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ward repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ward repository query failed: {message}",
        /// No ward has the requested identifier.
        NotFound { ward_id: i32 } => "ward {ward_id} not found",
        /// The mutation was refused by a consistency rule.
        Violation { violation: ConsistencyViolation } => "ward mutation refused: {violation}",
    }
}

impl From<ConsistencyViolation> for WardRepositoryError {
    fn from(violation: ConsistencyViolation) -> Self {
        Self::Violation { violation }
    }
}

/// Storage for ward records.
///
/// Each mutating method runs as one atomic unit: the consistency checks and
/// the write either both take effect or neither does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardRepository: Send + Sync {
    /// All wards ordered by id, each flagged with whether nurses reference it.
    async fn list_with_nurse_flags(&self) -> Result<Vec<WardSummary>, WardRepositoryError>;

    /// Fetch a ward by identifier.
    async fn find_by_id(&self, id: WardId) -> Result<Option<Ward>, WardRepositoryError>;

    /// Insert a ward stamped with `now` for both timestamps.
    async fn insert(
        &self,
        draft: &WardDraft,
        now: DateTime<Utc>,
    ) -> Result<Ward, WardRepositoryError>;

    /// Replace the name and colour of an existing ward and set `modified_at`.
    async fn update(
        &self,
        id: WardId,
        draft: &WardDraft,
        now: DateTime<Utc>,
    ) -> Result<Ward, WardRepositoryError>;

    /// Remove a ward provided no nurse references it, returning the removed row.
    ///
    /// Fails with [`ConsistencyViolation::WardHasNurses`] otherwise.
    async fn delete_unreferenced(&self, id: WardId) -> Result<Ward, WardRepositoryError>;
}
