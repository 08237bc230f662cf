//! Shared fixtures for unit tests inside the crate.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    EmailAddress, EmployeeId, Nurse, NurseDraft, NurseId, NurseView, PersonName, Ward, WardColor,
    WardDraft, WardId, WardName,
};

/// Instant returned by [`fixture_clock`].
pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 28, 14, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock pinned to [`fixture_timestamp`].
pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn ward_id(id: i32) -> WardId {
    WardId::new(id).expect("valid ward id")
}

pub(crate) fn nurse_id(id: i32) -> NurseId {
    NurseId::new(id).expect("valid nurse id")
}

pub(crate) fn ward_draft(name: &str, color: WardColor) -> WardDraft {
    WardDraft {
        name: WardName::new(name).expect("valid ward name"),
        color,
    }
}

pub(crate) fn ward(id: i32, name: &str, color: WardColor) -> Ward {
    let draft = ward_draft(name, color);
    Ward {
        id: ward_id(id),
        name: draft.name,
        color: draft.color,
        created_at: fixture_timestamp(),
        modified_at: fixture_timestamp(),
    }
}

pub(crate) fn nurse_draft(first: &str, last: &str, email: &str, ward: i32) -> NurseDraft {
    NurseDraft {
        first_name: PersonName::new(first).expect("valid first name"),
        last_name: PersonName::new(last).expect("valid last name"),
        email: EmailAddress::new(email).expect("valid email"),
        ward_id: ward_id(ward),
    }
}

pub(crate) fn nurse_view(id: i32, draft: &NurseDraft, ward_name: Option<&str>) -> NurseView {
    NurseView {
        nurse: Nurse {
            id: nurse_id(id),
            employee_id: EmployeeId::new("V1StGXR8_Z").expect("valid employee id"),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            ward_id: draft.ward_id,
            created_at: fixture_timestamp(),
            modified_at: fixture_timestamp(),
        },
        ward_name: ward_name.map(str::to_owned),
    }
}
