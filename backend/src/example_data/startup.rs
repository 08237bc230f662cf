//! Startup seeding orchestration.
//!
//! The roster is written through the domain services so every record passes
//! the same validation and consistency rules as API traffic.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{NursesCommand, NursesQuery, WardsCommand, WardsQuery};
use crate::domain::{
    EmailAddress, Error, NurseDraft, NurseValidationError, PersonName, WardDraft, WardName,
    WardValidationError,
};

use super::roster::{NURSES, WARDS};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    #[error("sample ward is invalid: {0}")]
    Ward(#[from] WardValidationError),
    #[error("sample nurse is invalid: {0}")]
    Nurse(#[from] NurseValidationError),
    #[error("sample nurse references missing ward index {index}")]
    MissingWard { index: usize },
    #[error("example data seeding error: {0}")]
    Seeding(#[from] Error),
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Missing roster records were written; counts cover this run only.
    Applied { wards: usize, nurses: usize },
    /// The full roster is already present, so nothing was written.
    AlreadyPopulated,
    /// Wards outside the roster exist; the store holds real data.
    ForeignData,
}

/// Ports used to write the sample roster.
pub struct SeedPorts<'a> {
    pub wards_query: &'a dyn WardsQuery,
    pub wards_command: &'a dyn WardsCommand,
    pub nurses_query: &'a dyn NursesQuery,
    pub nurses_command: &'a dyn NursesCommand,
}

/// Create whichever sample wards and nurses are missing.
///
/// Roster wards are matched by name and nurses by email, so a run that
/// failed part-way is completed on the next start rather than left half
/// seeded. Nothing is written when any ward outside the roster exists.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use wardroom::domain::{NurseService, WardService};
/// use wardroom::example_data::{SeedPorts, seed_example_roster};
/// use wardroom::outbound::memory::InMemoryStaffStore;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryStaffStore::new());
/// let wards = WardService::new(store.clone(), Arc::new(DefaultClock));
/// let nurses = NurseService::new(store, Arc::new(DefaultClock));
/// seed_example_roster(SeedPorts {
///     wards_query: &wards,
///     wards_command: &wards,
///     nurses_query: &nurses,
///     nurses_command: &nurses,
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_roster(ports: SeedPorts<'_>) -> Result<SeedOutcome, StartupSeedingError> {
    let existing = ports.wards_query.list_wards().await?;
    let foreign = existing
        .iter()
        .any(|summary| !WARDS.iter().any(|ward| summary.ward.name.as_ref() == ward.name));
    if foreign {
        info!(reason = "non-sample wards present", "example data seeding skipped");
        return Ok(SeedOutcome::ForeignData);
    }

    let mut ward_ids = Vec::with_capacity(WARDS.len());
    let mut wards_created = 0;
    for ward in &WARDS {
        let name = WardName::new(ward.name)?;
        let present = existing
            .iter()
            .find(|summary| summary.ward.name == name)
            .map(|summary| summary.ward.id);
        let id = match present {
            Some(id) => id,
            None => {
                let draft = WardDraft {
                    name,
                    color: ward.color,
                };
                wards_created += 1;
                ports.wards_command.create_ward(draft).await?.id
            }
        };
        ward_ids.push(id);
    }

    let mut nurses_created = 0;
    for nurse in &NURSES {
        let email = EmailAddress::new(nurse.email)?;
        if ports.nurses_query.email_exists(&email).await? {
            continue;
        }
        let ward_id = ward_ids
            .get(nurse.ward)
            .copied()
            .ok_or(StartupSeedingError::MissingWard { index: nurse.ward })?;
        let draft = NurseDraft {
            first_name: PersonName::new(nurse.first_name)?,
            last_name: PersonName::new(nurse.last_name)?,
            email,
            ward_id,
        };
        ports.nurses_command.create_nurse(draft).await?;
        nurses_created += 1;
    }

    if wards_created == 0 && nurses_created == 0 {
        info!(reason = "roster present", "example data seeding skipped");
        return Ok(SeedOutcome::AlreadyPopulated);
    }
    info!(
        wards = wards_created,
        nurses = nurses_created,
        "example data seeding applied"
    );
    Ok(SeedOutcome::Applied {
        wards: wards_created,
        nurses: nurses_created,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockNursesCommand;
    use crate::domain::{NurseService, WardColor, WardService};
    use crate::outbound::memory::InMemoryStaffStore;
    use crate::test_support::fixture_clock;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn seeds_once_then_skips() {
        let store = Arc::new(InMemoryStaffStore::new());
        let wards = WardService::new(store.clone(), fixture_clock());
        let nurses = NurseService::new(store, fixture_clock());
        let ports = || SeedPorts {
            wards_query: &wards,
            wards_command: &wards,
            nurses_query: &nurses,
            nurses_command: &nurses,
        };

        let first = seed_example_roster(ports()).await.expect("seeding");
        let second = seed_example_roster(ports()).await.expect("seeding");

        assert_eq!(first, SeedOutcome::Applied { wards: 5, nurses: 20 });
        assert_eq!(second, SeedOutcome::AlreadyPopulated);
        let listed = wards.list_wards().await.expect("wards");
        assert!(listed.iter().all(|summary| summary.has_nurses));
        let staff = nurses.list_nurses().await.expect("nurses");
        assert_eq!(staff.len(), 20);
        assert_eq!(staff[0].ward_name(), "Ward 1");
        assert_eq!(staff[4].ward_name(), "Ward 5");
    }

    #[rstest]
    #[tokio::test]
    async fn interrupted_seed_is_completed_on_next_run() {
        let store = Arc::new(InMemoryStaffStore::new());
        let wards = WardService::new(store.clone(), fixture_clock());
        let nurses = NurseService::new(store, fixture_clock());
        let mut failing = MockNursesCommand::new();
        failing
            .expect_create_nurse()
            .times(1)
            .returning(|_| Err(Error::service_unavailable("database unavailable")));

        let interrupted = seed_example_roster(SeedPorts {
            wards_query: &wards,
            wards_command: &wards,
            nurses_query: &nurses,
            nurses_command: &failing,
        })
        .await;
        assert!(matches!(interrupted, Err(StartupSeedingError::Seeding(_))));
        assert_eq!(wards.list_wards().await.expect("wards").len(), 5);

        let resumed = seed_example_roster(SeedPorts {
            wards_query: &wards,
            wards_command: &wards,
            nurses_query: &nurses,
            nurses_command: &nurses,
        })
        .await
        .expect("seeding");

        assert_eq!(resumed, SeedOutcome::Applied { wards: 0, nurses: 20 });
        assert_eq!(wards.list_wards().await.expect("wards").len(), 5);
        assert_eq!(nurses.list_nurses().await.expect("nurses").len(), 20);
    }

    #[rstest]
    #[tokio::test]
    async fn real_wards_are_left_alone() {
        let store = Arc::new(InMemoryStaffStore::new());
        let wards = WardService::new(store.clone(), fixture_clock());
        let nurses = NurseService::new(store, fixture_clock());
        wards
            .create_ward(WardDraft {
                name: WardName::new("Cardiology").expect("name"),
                color: WardColor::Blue,
            })
            .await
            .expect("create ward");

        let outcome = seed_example_roster(SeedPorts {
            wards_query: &wards,
            wards_command: &wards,
            nurses_query: &nurses,
            nurses_command: &nurses,
        })
        .await
        .expect("seeding");

        assert_eq!(outcome, SeedOutcome::ForeignData);
        assert_eq!(wards.list_wards().await.expect("wards").len(), 1);
        assert!(nurses.list_nurses().await.expect("nurses").is_empty());
    }
}
