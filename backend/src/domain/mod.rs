//! Domain primitives, rules, and services.
//!
//! Purpose: define the ward and nurse records, the rules that keep them
//! consistent, and the services that drive them through the repository
//! ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Ward`], [`Nurse`], and their validated value types.
//! - [`consistency`]: referential-integrity and uniqueness rules.
//! - [`ports`]: driven repository ports and driving command/query ports.
//! - [`WardService`] and [`NurseService`]: port implementations.

pub mod consistency;
pub mod error;
pub mod nurse;
pub mod nurse_service;
pub mod ports;
pub mod trace_id;
pub mod ward;
pub mod ward_service;

pub use self::consistency::ConsistencyViolation;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::nurse::{
    EMPLOYEE_ID_LEN, EmailAddress, EmployeeId, Nurse, NurseDraft, NurseId, NurseValidationError,
    NurseView, PersonName, UNKNOWN_WARD_NAME,
};
pub use self::nurse_service::NurseService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::ward::{
    TEXT_FIELD_MAX, Ward, WardColor, WardDraft, WardId, WardName, WardSummary,
    WardValidationError,
};
pub use self::ward_service::WardService;
