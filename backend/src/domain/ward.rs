//! Ward data model.
//!
//! A ward is the leaf entity of the roster: it references nothing and is
//! referenced by zero or more nurses. Values are validated on construction so
//! the services and adapters only ever handle well-formed wards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Maximum length of free-text columns, matching the `VARCHAR(255)` schema.
pub const TEXT_FIELD_MAX: usize = 255;

/// Validation errors returned by ward constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WardValidationError {
    /// Identifier was zero or negative.
    #[error("ward id must be a positive integer")]
    InvalidId,
    /// Name was blank once trimmed.
    #[error("ward name must not be empty")]
    EmptyName,
    /// Name exceeded the column width.
    #[error("ward name must be at most {max} characters")]
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Colour outside the fixed palette.
    #[error("ward color must be one of Red, Green, Blue, Yellow")]
    UnknownColor {
        /// Rejected input.
        value: String,
    },
}

/// Store-assigned ward identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WardId(i32);

impl WardId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i32) -> Result<Self, WardValidationError> {
        if id <= 0 {
            return Err(WardValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the database.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for WardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, trimmed ward name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardName(String);

impl WardName {
    /// Validate and construct a [`WardName`].
    ///
    /// # Examples
    /// ```
    /// use wardroom::domain::WardName;
    ///
    /// let name = WardName::new("  Ward 6 ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Ward 6");
    /// assert!(WardName::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, WardValidationError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WardValidationError::EmptyName);
        }
        if trimmed.chars().count() > TEXT_FIELD_MAX {
            return Err(WardValidationError::NameTooLong {
                max: TEXT_FIELD_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for WardName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display colour of a ward, restricted to a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WardColor {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Yellow.
    Yellow,
}

impl WardColor {
    /// Every permitted colour in declaration order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Yellow];

    /// Canonical spelling, as persisted and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for WardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WardColor {
    type Err = WardValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == value)
            .ok_or_else(|| WardValidationError::UnknownColor {
                value: value.to_owned(),
            })
    }
}

/// Validated ward fields supplied by create and update requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardDraft {
    /// Ward name.
    pub name: WardName,
    /// Ward colour.
    pub color: WardColor,
}

/// Persisted ward record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ward {
    /// Store-assigned identifier.
    pub id: WardId,
    /// Ward name.
    pub name: WardName,
    /// Ward colour.
    pub color: WardColor,
    /// Set once on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation.
    pub modified_at: DateTime<Utc>,
}

/// Ward annotated with whether any nurse currently references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardSummary {
    /// The ward record.
    pub ward: Ward,
    /// True iff at least one nurse has `ward_id == ward.id`.
    pub has_nurses: bool,
}
