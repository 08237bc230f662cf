//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending JSON field so a client can highlight it:
//! `{ "field": "email", "code": "invalid_email", "value": "ann@" }`.

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, NurseId, NurseValidationError, WardId, WardValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    Empty,
    TooLong,
    InvalidColor,
    InvalidEmail,
    InvalidEmployeeId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::Empty => "empty",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidColor => "invalid_color",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidEmployeeId => "invalid_employee_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: FieldName,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<serde_json::Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "code": code.as_str(),
            "value": value.into(),
        }))
    }
}

/// JSON extractor configuration that reports body errors as `invalid_request`.
///
/// Without it Actix answers malformed bodies with a plain-text 400 that
/// lacks the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}"))
            .with_details(json!({ "code": "invalid_json" }))
            .into()
    })
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required body field, reporting `missing_field` when absent.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn invalid_id_error(field: FieldName, value: impl Into<serde_json::Value>) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

fn positive_i32(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

/// Parse a `{id}` path segment naming a ward.
pub(crate) fn parse_ward_path_id(raw: &str) -> Result<WardId, Error> {
    positive_i32(raw)
        .and_then(|id| WardId::new(id).ok())
        .ok_or_else(|| invalid_id_error(FieldName::new("id"), raw))
}

/// Parse a `{id}` path segment naming a nurse.
pub(crate) fn parse_nurse_path_id(raw: &str) -> Result<NurseId, Error> {
    positive_i32(raw)
        .and_then(|id| NurseId::new(id).ok())
        .ok_or_else(|| invalid_id_error(FieldName::new("id"), raw))
}

/// Convert a JSON integer naming a ward into a [`WardId`].
pub(crate) fn parse_ward_ref(value: i64, field: FieldName) -> Result<WardId, Error> {
    i32::try_from(value)
        .ok()
        .and_then(|id| WardId::new(id).ok())
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn ward_field_error(
    error: &WardValidationError,
    field: FieldName,
    value: &str,
) -> Error {
    let builder = ValidationError::new(field, error.to_string());
    match error {
        WardValidationError::InvalidId => builder.with_value(ErrorCode::InvalidId, value),
        WardValidationError::EmptyName => builder.with_code(ErrorCode::Empty),
        WardValidationError::NameTooLong { .. } => builder.with_code(ErrorCode::TooLong),
        WardValidationError::UnknownColor { .. } => {
            builder.with_value(ErrorCode::InvalidColor, value)
        }
    }
}

pub(crate) fn nurse_field_error(
    error: &NurseValidationError,
    field: FieldName,
    value: &str,
) -> Error {
    let builder = ValidationError::new(field, error.to_string());
    match error {
        NurseValidationError::InvalidId => builder.with_value(ErrorCode::InvalidId, value),
        NurseValidationError::InvalidEmployeeId => {
            builder.with_value(ErrorCode::InvalidEmployeeId, value)
        }
        NurseValidationError::EmptyName | NurseValidationError::EmptyEmail => {
            builder.with_code(ErrorCode::Empty)
        }
        NurseValidationError::NameTooLong { .. } | NurseValidationError::EmailTooLong { .. } => {
            builder.with_code(ErrorCode::TooLong)
        }
        NurseValidationError::InvalidEmail => builder.with_value(ErrorCode::InvalidEmail, value),
    }
}
