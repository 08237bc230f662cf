//! Nurse domain service.
//!
//! Implements the nurse driving ports over a [`NurseRepository`]. Creation
//! issues the employee id here so that it is generated exactly once per
//! request; the repository records it and rejects a collision rather than
//! retrying.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{NurseRepository, NurseRepositoryError, NursesCommand, NursesQuery};
use crate::domain::{EmailAddress, EmployeeId, Error, NurseDraft, NurseId, NurseView};

fn map_repository_error(error: NurseRepositoryError) -> Error {
    match error {
        NurseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("nurse repository unavailable: {message}"))
        }
        NurseRepositoryError::Query { message } => {
            Error::internal(format!("nurse repository error: {message}"))
        }
        NurseRepositoryError::NotFound { .. } => Error::not_found("Nurse not found"),
        NurseRepositoryError::Violation { violation } => Error::from(violation),
    }
}

/// Nurse service implementing [`NursesQuery`] and [`NursesCommand`].
#[derive(Clone)]
pub struct NurseService<R> {
    nurse_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> NurseService<R> {
    /// Create a nurse service over the given repository and clock.
    pub fn new(nurse_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { nurse_repo, clock }
    }
}

#[async_trait]
impl<R> NursesQuery for NurseService<R>
where
    R: NurseRepository,
{
    async fn list_nurses(&self) -> Result<Vec<NurseView>, Error> {
        self.nurse_repo
            .list_with_wards()
            .await
            .map_err(map_repository_error)
    }

    async fn get_nurse(&self, id: NurseId) -> Result<NurseView, Error> {
        self.nurse_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Nurse not found"))
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, Error> {
        self.nurse_repo
            .email_exists(email)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> NursesCommand for NurseService<R>
where
    R: NurseRepository,
{
    async fn create_nurse(&self, draft: NurseDraft) -> Result<NurseView, Error> {
        let employee_id = EmployeeId::generate();
        let view = self
            .nurse_repo
            .insert(&draft, &employee_id, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(
            nurse_id = %view.nurse.id,
            ward_id = %view.nurse.ward_id,
            "nurse created"
        );
        Ok(view)
    }

    async fn update_nurse(&self, id: NurseId, draft: NurseDraft) -> Result<NurseView, Error> {
        let view = self
            .nurse_repo
            .update(id, &draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(
            nurse_id = %view.nurse.id,
            ward_id = %view.nurse.ward_id,
            "nurse updated"
        );
        Ok(view)
    }

    async fn delete_nurse(&self, id: NurseId) -> Result<NurseView, Error> {
        let view = self
            .nurse_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(nurse_id = %view.nurse.id, "nurse deleted");
        Ok(view)
    }
}

#[cfg(test)]
#[path = "nurse_service_tests.rs"]
mod tests;
