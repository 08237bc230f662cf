//! Ward domain service.
//!
//! Implements the ward driving ports over a [`WardRepository`]. Timestamps
//! come from the injected clock so tests can pin them.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{WardRepository, WardRepositoryError, WardsCommand, WardsQuery};
use crate::domain::{Error, Ward, WardDraft, WardId, WardSummary};

fn map_repository_error(error: WardRepositoryError) -> Error {
    match error {
        WardRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ward repository unavailable: {message}"))
        }
        WardRepositoryError::Query { message } => {
            Error::internal(format!("ward repository error: {message}"))
        }
        WardRepositoryError::NotFound { .. } => Error::not_found("Ward not found"),
        WardRepositoryError::Violation { violation } => Error::from(violation),
    }
}

/// Ward service implementing [`WardsQuery`] and [`WardsCommand`].
#[derive(Clone)]
pub struct WardService<R> {
    ward_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> WardService<R> {
    /// Create a ward service over the given repository and clock.
    pub fn new(ward_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { ward_repo, clock }
    }
}

#[async_trait]
impl<R> WardsQuery for WardService<R>
where
    R: WardRepository,
{
    async fn list_wards(&self) -> Result<Vec<WardSummary>, Error> {
        self.ward_repo
            .list_with_nurse_flags()
            .await
            .map_err(map_repository_error)
    }

    async fn get_ward(&self, id: WardId) -> Result<Ward, Error> {
        self.ward_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Ward not found"))
    }
}

#[async_trait]
impl<R> WardsCommand for WardService<R>
where
    R: WardRepository,
{
    async fn create_ward(&self, draft: WardDraft) -> Result<Ward, Error> {
        let ward = self
            .ward_repo
            .insert(&draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(ward_id = %ward.id, "ward created");
        Ok(ward)
    }

    async fn update_ward(&self, id: WardId, draft: WardDraft) -> Result<Ward, Error> {
        let ward = self
            .ward_repo
            .update(id, &draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(ward_id = %ward.id, "ward updated");
        Ok(ward)
    }

    async fn delete_ward(&self, id: WardId) -> Result<Ward, Error> {
        let ward = self
            .ward_repo
            .delete_unreferenced(id)
            .await
            .map_err(map_repository_error)?;
        info!(ward_id = %ward.id, "ward deleted");
        Ok(ward)
    }
}

#[cfg(test)]
#[path = "ward_service_tests.rs"]
mod tests;
