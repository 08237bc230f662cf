//! Diesel and pool error mapping shared by the staff repositories.
//!
//! Unique and foreign-key failures are classified by constraint name so a
//! duplicate email that slips past the in-transaction check (two concurrent
//! creates) is reported exactly like the check itself would have reported it.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::consistency::classify_constraint;
use crate::domain::{ConsistencyViolation, EmailAddress, EmployeeId, WardId};

use super::pool::PoolError;

/// Error type threaded through transaction closures.
#[derive(Debug)]
pub(super) enum TxError {
    Diesel(DieselError),
    Violation(ConsistencyViolation),
    /// The row addressed by the operation does not exist.
    Missing,
    /// A stored row failed domain validation.
    InvalidRow(String),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<ConsistencyViolation> for TxError {
    fn from(violation: ConsistencyViolation) -> Self {
        Self::Violation(violation)
    }
}

/// Values written by the failed statement, used to describe a violation.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct WriteContext<'a> {
    pub email: Option<&'a EmailAddress>,
    pub ward_id: Option<WardId>,
    pub employee_id: Option<&'a EmployeeId>,
}

/// Store failure reduced to the categories every repository port exposes.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum StoreFailure {
    Connection(String),
    Query(String),
    Violation(ConsistencyViolation),
}

/// Extract a readable message from a pool error.
pub(super) fn pool_failure(error: PoolError) -> StoreFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreFailure::Connection(message)
        }
    }
}

/// Classify a Diesel error, logging the raw failure at debug level.
pub(super) fn diesel_failure(error: DieselError, context: WriteContext<'_>) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
            info,
        ) => {
            let violation = info.constraint_name().and_then(|name| {
                classify_constraint(name, context.email, context.ward_id, context.employee_id)
            });
            match violation {
                Some(violation) => StoreFailure::Violation(violation),
                None => {
                    warn!(
                        ?kind,
                        constraint = info.constraint_name(),
                        "unrecognised constraint violation"
                    );
                    StoreFailure::Query(info.message().to_owned())
                }
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreFailure::Connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => StoreFailure::Query(info.message().to_owned()),
        DieselError::BrokenTransactionManager => {
            StoreFailure::Connection("transaction manager is broken".to_owned())
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        other => StoreFailure::Query(other.to_string()),
    }
}
