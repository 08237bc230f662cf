//! Nurse data model.
//!
//! Nurses reference exactly one ward. The value types here enforce field-level
//! rules; cross-record rules (ward existence, email uniqueness) live in
//! [`crate::domain::consistency`].

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::ward::{TEXT_FIELD_MAX, WardId};

/// Label returned for a nurse whose ward can no longer be resolved.
pub const UNKNOWN_WARD_NAME: &str = "Unknown";

/// Length of a generated employee identifier.
pub const EMPLOYEE_ID_LEN: usize = 10;

/// Validation errors returned by nurse constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NurseValidationError {
    #[error("nurse id must be a positive integer")]
    InvalidId,
    #[error("employee id must be {EMPLOYEE_ID_LEN} URL-safe characters")]
    InvalidEmployeeId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("email must look like name@example.com")]
    InvalidEmail,
}

/// Store-assigned nurse identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NurseId(i32);

impl NurseId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i32) -> Result<Self, NurseValidationError> {
        if id <= 0 {
            return Err(NurseValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the database.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NurseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque staff token issued once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Issue a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(nanoid::nanoid!(EMPLOYEE_ID_LEN))
    }

    /// Wrap a previously issued identifier, checking its shape.
    pub fn new(value: impl Into<String>) -> Result<Self, NurseValidationError> {
        let value = value.into();
        let well_formed = value.chars().count() == EMPLOYEE_ID_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(NurseValidationError::InvalidEmployeeId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty first or last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    pub fn new(name: impl Into<String>) -> Result<Self, NurseValidationError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NurseValidationError::EmptyName);
        }
        if trimmed.chars().count() > TEXT_FIELD_MAX {
            return Err(NurseValidationError::NameTooLong {
                max: TEXT_FIELD_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dotted domain with non-empty labels.
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address compared verbatim; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use wardroom::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("ann.lee@x.com").is_ok());
    /// assert!(EmailAddress::new("ann.lee@localhost").is_err());
    /// assert!(EmailAddress::new("ann lee@x.com").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, NurseValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(NurseValidationError::EmptyEmail);
        }
        if email.chars().count() > TEXT_FIELD_MAX {
            return Err(NurseValidationError::EmailTooLong {
                max: TEXT_FIELD_MAX,
            });
        }
        if !email_regex().is_match(&email) {
            return Err(NurseValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated nurse fields supplied by create and update requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseDraft {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub ward_id: WardId,
}

/// Persisted nurse record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nurse {
    pub id: NurseId,
    pub employee_id: EmployeeId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub ward_id: WardId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Nurse {
    /// First and last name joined by a single space.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use wardroom::domain::{
    ///     EmailAddress, EmployeeId, Nurse, NurseId, PersonName, WardId,
    /// };
    ///
    /// let now = Utc::now();
    /// let nurse = Nurse {
    ///     id: NurseId::new(1).expect("id"),
    ///     employee_id: EmployeeId::generate(),
    ///     first_name: PersonName::new("Ann").expect("first"),
    ///     last_name: PersonName::new("Lee").expect("last"),
    ///     email: EmailAddress::new("ann.lee@x.com").expect("email"),
    ///     ward_id: WardId::new(6).expect("ward"),
    ///     created_at: now,
    ///     modified_at: now,
    /// };
    /// assert_eq!(nurse.full_name(), "Ann Lee");
    /// ```
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Nurse joined with the name of its ward at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseView {
    pub nurse: Nurse,
    /// `None` when the referenced ward could not be resolved.
    pub ward_name: Option<String>,
}

impl NurseView {
    /// Ward label, falling back to [`UNKNOWN_WARD_NAME`].
    #[must_use]
    pub fn ward_name(&self) -> &str {
        self.ward_name.as_deref().unwrap_or(UNKNOWN_WARD_NAME)
    }
}
