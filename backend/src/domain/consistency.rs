//! Cross-record rules applied inside every mutating transaction.
//!
//! The functions here are pure: adapters gather the facts (does the ward
//! exist, how many nurses reference it, who owns an email) under their own
//! transaction and ask these rules whether the write may proceed. Adapters
//! also use [`classify_constraint`] to turn store-level constraint failures
//! raised at commit time into the same violations.

use serde_json::json;

use super::{EmailAddress, EmployeeId, Error, NurseId, WardId};

/// Unique constraint on `nurses.email`.
pub const NURSE_EMAIL_CONSTRAINT: &str = "nurses_email_key";
/// Unique constraint on `nurses.employee_id`.
pub const NURSE_EMPLOYEE_ID_CONSTRAINT: &str = "nurses_employee_id_key";
/// Foreign key from `nurses.ward_id` to `wards.id`.
pub const NURSE_WARD_FK_CONSTRAINT: &str = "nurses_ward_id_fkey";
/// Primary key of the issued employee id ledger.
pub const ISSUED_EMPLOYEE_ID_CONSTRAINT: &str = "issued_employee_ids_pkey";

/// Message returned when a ward still has nurses assigned.
pub const WARD_HAS_NURSES_MESSAGE: &str = "Cannot delete ward: Nurses are still assigned to it.";

/// A mutation that would break referential integrity or uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyViolation {
    /// The nurse references a ward that does not exist.
    #[error("ward {ward_id} does not exist")]
    UnknownWard { ward_id: i32 },
    /// The ward cannot be removed while nurses reference it.
    #[error("ward {ward_id} still has {count} nurse(s) assigned")]
    WardHasNurses { ward_id: i32, count: i64 },
    /// Another nurse already uses this email.
    #[error("email {email} is already in use")]
    DuplicateEmail { email: String },
    /// The generated employee id collided with one already issued.
    #[error("employee id {employee_id} has already been issued")]
    DuplicateEmployeeId { employee_id: String },
}

/// Foreign-key check for nurse create and update.
///
/// `exists` is the adapter's answer to "is there a ward with this id", read
/// under the same transaction as the write.
pub fn ensure_ward_exists(ward_id: WardId, exists: bool) -> Result<(), ConsistencyViolation> {
    if exists {
        Ok(())
    } else {
        Err(ConsistencyViolation::UnknownWard {
            ward_id: ward_id.as_i32(),
        })
    }
}

/// Delete guard: refuse while any nurse references the ward.
///
/// # Examples
/// ```
/// use wardroom::domain::WardId;
/// use wardroom::domain::consistency::{ConsistencyViolation, ensure_no_dependents};
///
/// let ward = WardId::new(6).expect("ward id");
/// assert!(ensure_no_dependents(ward, 0).is_ok());
/// assert_eq!(
///     ensure_no_dependents(ward, 2),
///     Err(ConsistencyViolation::WardHasNurses { ward_id: 6, count: 2 })
/// );
/// ```
pub fn ensure_no_dependents(ward_id: WardId, count: i64) -> Result<(), ConsistencyViolation> {
    if count > 0 {
        return Err(ConsistencyViolation::WardHasNurses {
            ward_id: ward_id.as_i32(),
            count,
        });
    }
    Ok(())
}

/// Email uniqueness check.
///
/// `owner` is the nurse currently holding `email`, if any. When updating,
/// `updating` names the nurse being changed; an email owned by that same
/// nurse does not conflict.
pub fn ensure_email_available(
    email: &EmailAddress,
    owner: Option<NurseId>,
    updating: Option<NurseId>,
) -> Result<(), ConsistencyViolation> {
    match owner {
        Some(owner) if Some(owner) != updating => Err(ConsistencyViolation::DuplicateEmail {
            email: email.as_ref().to_owned(),
        }),
        _ => Ok(()),
    }
}

/// Map a store constraint name to the violation it represents.
///
/// Returns `None` for constraints these rules do not own; adapters treat
/// those as unexpected query failures.
pub fn classify_constraint(
    constraint: &str,
    draft_email: Option<&EmailAddress>,
    ward_id: Option<WardId>,
    employee_id: Option<&EmployeeId>,
) -> Option<ConsistencyViolation> {
    match constraint {
        NURSE_EMAIL_CONSTRAINT => {
            draft_email.map(|email| ConsistencyViolation::DuplicateEmail {
                email: email.as_ref().to_owned(),
            })
        }
        NURSE_WARD_FK_CONSTRAINT => ward_id.map(|ward_id| ConsistencyViolation::UnknownWard {
            ward_id: ward_id.as_i32(),
        }),
        NURSE_EMPLOYEE_ID_CONSTRAINT | ISSUED_EMPLOYEE_ID_CONSTRAINT => {
            employee_id.map(|employee_id| ConsistencyViolation::DuplicateEmployeeId {
                employee_id: employee_id.as_ref().to_owned(),
            })
        }
        _ => None,
    }
}

impl From<ConsistencyViolation> for Error {
    fn from(violation: ConsistencyViolation) -> Self {
        match violation {
            ConsistencyViolation::UnknownWard { ward_id } => {
                Error::invalid_request(format!("Ward {ward_id} does not exist")).with_details(
                    json!({ "field": "wardId", "code": "unknown_ward", "value": ward_id }),
                )
            }
            ConsistencyViolation::WardHasNurses { ward_id, count } => {
                Error::dependents_exist(WARD_HAS_NURSES_MESSAGE)
                    .with_details(json!({ "wardId": ward_id, "nurseCount": count }))
            }
            ConsistencyViolation::DuplicateEmail { email } => {
                Error::conflict("Email is already in use by another nurse").with_details(
                    json!({ "field": "email", "code": "duplicate_email", "value": email }),
                )
            }
            ConsistencyViolation::DuplicateEmployeeId { employee_id } => {
                Error::internal(format!("employee id collision: {employee_id}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ward() -> WardId {
        WardId::new(6).expect("ward id")
    }

    #[fixture]
    fn email() -> EmailAddress {
        EmailAddress::new("ann.lee@x.com").expect("email")
    }

    fn nurse(id: i32) -> NurseId {
        NurseId::new(id).expect("nurse id")
    }

    #[rstest]
    fn missing_ward_is_rejected(ward: WardId) {
        assert_eq!(
            ensure_ward_exists(ward, false),
            Err(ConsistencyViolation::UnknownWard { ward_id: 6 })
        );
        assert!(ensure_ward_exists(ward, true).is_ok());
    }

    #[rstest]
    #[case(0, true)]
    #[case(1, false)]
    #[case(20, false)]
    fn delete_guard_depends_on_count(ward: WardId, #[case] count: i64, #[case] allowed: bool) {
        assert_eq!(ensure_no_dependents(ward, count).is_ok(), allowed);
    }

    #[rstest]
    fn unused_email_is_available(email: EmailAddress) {
        assert!(ensure_email_available(&email, None, None).is_ok());
        assert!(ensure_email_available(&email, None, Some(nurse(3))).is_ok());
    }

    #[rstest]
    fn email_owned_by_another_nurse_conflicts(email: EmailAddress) {
        let expected = Err(ConsistencyViolation::DuplicateEmail {
            email: "ann.lee@x.com".to_owned(),
        });
        assert_eq!(ensure_email_available(&email, Some(nurse(1)), None), expected);
        assert_eq!(
            ensure_email_available(&email, Some(nurse(1)), Some(nurse(2))),
            expected
        );
    }

    #[rstest]
    fn own_email_does_not_conflict_on_update(email: EmailAddress) {
        assert!(ensure_email_available(&email, Some(nurse(4)), Some(nurse(4))).is_ok());
    }

    #[rstest]
    fn constraint_names_map_to_violations(ward: WardId, email: EmailAddress) {
        let employee_id = EmployeeId::generate();
        assert_eq!(
            classify_constraint(NURSE_EMAIL_CONSTRAINT, Some(&email), Some(ward), None),
            Some(ConsistencyViolation::DuplicateEmail {
                email: email.as_ref().to_owned()
            })
        );
        assert_eq!(
            classify_constraint(NURSE_WARD_FK_CONSTRAINT, Some(&email), Some(ward), None),
            Some(ConsistencyViolation::UnknownWard { ward_id: 6 })
        );
        assert!(matches!(
            classify_constraint(ISSUED_EMPLOYEE_ID_CONSTRAINT, None, None, Some(&employee_id)),
            Some(ConsistencyViolation::DuplicateEmployeeId { .. })
        ));
        assert_eq!(
            classify_constraint("wards_color_check", Some(&email), Some(ward), None),
            None
        );
    }

    #[rstest]
    #[case(ConsistencyViolation::UnknownWard { ward_id: 9999 }, ErrorCode::InvalidRequest)]
    #[case(ConsistencyViolation::WardHasNurses { ward_id: 6, count: 1 }, ErrorCode::DependentsExist)]
    #[case(ConsistencyViolation::DuplicateEmail { email: "a@b.co".to_owned() }, ErrorCode::Conflict)]
    #[case(
        ConsistencyViolation::DuplicateEmployeeId { employee_id: "abcdefghij".to_owned() },
        ErrorCode::InternalError
    )]
    fn violations_map_to_error_codes(
        #[case] violation: ConsistencyViolation,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(violation).code(), expected);
    }

    #[rstest]
    fn unknown_ward_error_names_the_field() {
        let error = Error::from(ConsistencyViolation::UnknownWard { ward_id: 9999 });
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "wardId");
        assert_eq!(details["code"], "unknown_ward");
        assert_eq!(details["value"], 9999);
    }
}
