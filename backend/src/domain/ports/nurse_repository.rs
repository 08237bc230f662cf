//! Driven port for nurse persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    ConsistencyViolation, EmailAddress, EmployeeId, NurseDraft, NurseId, NurseView,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by nurse repository adapters.
    pub enum NurseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "nurse repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "nurse repository query failed: {message}",
        /// No nurse has the requested identifier.
        NotFound { nurse_id: i32 } => "nurse {nurse_id} not found",
        /// The mutation was refused by a consistency rule.
        Violation { violation: ConsistencyViolation } => "nurse mutation refused: {violation}",
    }
}

impl From<ConsistencyViolation> for NurseRepositoryError {
    fn from(violation: ConsistencyViolation) -> Self {
        Self::Violation { violation }
    }
}

/// Storage for nurse records, joined with their ward on read.
///
/// Writes check ward existence and email ownership inside the same
/// transaction as the insert or update. A unique or foreign-key failure raised
/// by the store at commit time is reported as the matching
/// [`ConsistencyViolation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NurseRepository: Send + Sync {
    /// All nurses ordered by id with their ward names.
    async fn list_with_wards(&self) -> Result<Vec<NurseView>, NurseRepositoryError>;

    /// Fetch one nurse with its ward name.
    async fn find_by_id(&self, id: NurseId) -> Result<Option<NurseView>, NurseRepositoryError>;

    /// Whether any nurse currently uses `email`.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, NurseRepositoryError>;

    /// Insert a nurse, recording `employee_id` as issued.
    async fn insert(
        &self,
        draft: &NurseDraft,
        employee_id: &EmployeeId,
        now: DateTime<Utc>,
    ) -> Result<NurseView, NurseRepositoryError>;

    /// Replace the mutable fields of an existing nurse and set `modified_at`.
    async fn update(
        &self,
        id: NurseId,
        draft: &NurseDraft,
        now: DateTime<Utc>,
    ) -> Result<NurseView, NurseRepositoryError>;

    /// Remove a nurse, returning the removed row as last seen.
    async fn delete(&self, id: NurseId) -> Result<NurseView, NurseRepositoryError>;
}
