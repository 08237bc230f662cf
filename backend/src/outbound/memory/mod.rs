//! In-process staff store implementing both repository ports.
//!
//! All state sits behind one mutex and every operation holds it for its whole
//! duration, so each call is atomic and serialised with every other call. The
//! same consistency rules as the database adapter run under that lock.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::consistency::{
    ensure_email_available, ensure_no_dependents, ensure_ward_exists,
};
use crate::domain::ports::{
    NurseRepository, NurseRepositoryError, WardRepository, WardRepositoryError,
};
use crate::domain::{
    ConsistencyViolation, EmailAddress, EmployeeId, Nurse, NurseDraft, NurseId, NurseView, Ward,
    WardDraft, WardId, WardSummary,
};

#[derive(Debug, Default)]
struct StaffState {
    wards: BTreeMap<WardId, Ward>,
    nurses: BTreeMap<NurseId, Nurse>,
    issued_employee_ids: HashSet<EmployeeId>,
    last_ward_id: i32,
    last_nurse_id: i32,
}

impl StaffState {
    fn next_ward_id(&mut self) -> Option<WardId> {
        let next = self.last_ward_id.checked_add(1)?;
        let id = WardId::new(next).ok()?;
        self.last_ward_id = next;
        Some(id)
    }

    fn next_nurse_id(&mut self) -> Option<NurseId> {
        let next = self.last_nurse_id.checked_add(1)?;
        let id = NurseId::new(next).ok()?;
        self.last_nurse_id = next;
        Some(id)
    }

    fn view(&self, nurse: Nurse) -> NurseView {
        let ward_name = self
            .wards
            .get(&nurse.ward_id)
            .map(|ward| ward.name.as_ref().to_owned());
        NurseView { nurse, ward_name }
    }

    fn email_owner(&self, email: &EmailAddress) -> Option<NurseId> {
        self.nurses
            .values()
            .find(|nurse| &nurse.email == email)
            .map(|nurse| nurse.id)
    }

    fn dependents_of(&self, ward_id: WardId) -> i64 {
        let count = self
            .nurses
            .values()
            .filter(|nurse| nurse.ward_id == ward_id)
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn check_nurse_write(
        &self,
        draft: &NurseDraft,
        updating: Option<NurseId>,
    ) -> Result<(), ConsistencyViolation> {
        ensure_ward_exists(draft.ward_id, self.wards.contains_key(&draft.ward_id))?;
        ensure_email_available(&draft.email, self.email_owner(&draft.email), updating)
    }
}

/// Shared in-memory store; clones observe the same state.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use wardroom::outbound::memory::InMemoryStaffStore;
///
/// let store = Arc::new(InMemoryStaffStore::new());
/// let for_wards = Arc::clone(&store);
/// let for_nurses = store;
/// # let _ = (for_wards, for_nurses);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStaffStore {
    state: Arc<Mutex<StaffState>>,
}

impl InMemoryStaffStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StaffState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WardRepository for InMemoryStaffStore {
    async fn list_with_nurse_flags(&self) -> Result<Vec<WardSummary>, WardRepositoryError> {
        let state = self.lock();
        let referenced: HashSet<WardId> = state.nurses.values().map(|n| n.ward_id).collect();
        Ok(state
            .wards
            .values()
            .map(|ward| WardSummary {
                has_nurses: referenced.contains(&ward.id),
                ward: ward.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: WardId) -> Result<Option<Ward>, WardRepositoryError> {
        Ok(self.lock().wards.get(&id).cloned())
    }

    async fn insert(
        &self,
        draft: &WardDraft,
        now: DateTime<Utc>,
    ) -> Result<Ward, WardRepositoryError> {
        let mut state = self.lock();
        let id = state
            .next_ward_id()
            .ok_or_else(|| WardRepositoryError::query("ward id sequence exhausted"))?;
        let ward = Ward {
            id,
            name: draft.name.clone(),
            color: draft.color,
            created_at: now,
            modified_at: now,
        };
        state.wards.insert(id, ward.clone());
        Ok(ward)
    }

    async fn update(
        &self,
        id: WardId,
        draft: &WardDraft,
        now: DateTime<Utc>,
    ) -> Result<Ward, WardRepositoryError> {
        let mut state = self.lock();
        let ward = state
            .wards
            .get_mut(&id)
            .ok_or_else(|| WardRepositoryError::not_found(id.as_i32()))?;
        ward.name = draft.name.clone();
        ward.color = draft.color;
        ward.modified_at = now;
        Ok(ward.clone())
    }

    async fn delete_unreferenced(&self, id: WardId) -> Result<Ward, WardRepositoryError> {
        let mut state = self.lock();
        if !state.wards.contains_key(&id) {
            return Err(WardRepositoryError::not_found(id.as_i32()));
        }
        ensure_no_dependents(id, state.dependents_of(id))?;
        state
            .wards
            .remove(&id)
            .ok_or_else(|| WardRepositoryError::not_found(id.as_i32()))
    }
}

#[async_trait]
impl NurseRepository for InMemoryStaffStore {
    async fn list_with_wards(&self) -> Result<Vec<NurseView>, NurseRepositoryError> {
        let state = self.lock();
        Ok(state
            .nurses
            .values()
            .map(|nurse| state.view(nurse.clone()))
            .collect())
    }

    async fn find_by_id(&self, id: NurseId) -> Result<Option<NurseView>, NurseRepositoryError> {
        let state = self.lock();
        Ok(state.nurses.get(&id).map(|nurse| state.view(nurse.clone())))
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, NurseRepositoryError> {
        Ok(self.lock().email_owner(email).is_some())
    }

    async fn insert(
        &self,
        draft: &NurseDraft,
        employee_id: &EmployeeId,
        now: DateTime<Utc>,
    ) -> Result<NurseView, NurseRepositoryError> {
        let mut state = self.lock();
        state.check_nurse_write(draft, None)?;
        if state.issued_employee_ids.contains(employee_id) {
            return Err(ConsistencyViolation::DuplicateEmployeeId {
                employee_id: employee_id.as_ref().to_owned(),
            }
            .into());
        }
        let id = state
            .next_nurse_id()
            .ok_or_else(|| NurseRepositoryError::query("nurse id sequence exhausted"))?;
        let nurse = Nurse {
            id,
            employee_id: employee_id.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            ward_id: draft.ward_id,
            created_at: now,
            modified_at: now,
        };
        state.issued_employee_ids.insert(employee_id.clone());
        state.nurses.insert(id, nurse.clone());
        Ok(state.view(nurse))
    }

    async fn update(
        &self,
        id: NurseId,
        draft: &NurseDraft,
        now: DateTime<Utc>,
    ) -> Result<NurseView, NurseRepositoryError> {
        let mut state = self.lock();
        if !state.nurses.contains_key(&id) {
            return Err(NurseRepositoryError::not_found(id.as_i32()));
        }
        state.check_nurse_write(draft, Some(id))?;
        let nurse = state
            .nurses
            .get_mut(&id)
            .ok_or_else(|| NurseRepositoryError::not_found(id.as_i32()))?;
        nurse.first_name = draft.first_name.clone();
        nurse.last_name = draft.last_name.clone();
        nurse.email = draft.email.clone();
        nurse.ward_id = draft.ward_id;
        nurse.modified_at = now;
        let updated = nurse.clone();
        Ok(state.view(updated))
    }

    async fn delete(&self, id: NurseId) -> Result<NurseView, NurseRepositoryError> {
        let mut state = self.lock();
        let nurse = state
            .nurses
            .remove(&id)
            .ok_or_else(|| NurseRepositoryError::not_found(id.as_i32()))?;
        Ok(state.view(nurse))
    }
}

#[cfg(test)]
mod tests;
