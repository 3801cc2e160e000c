//! Account identity value types.
//!
//! Both are parsed once at registration and stored normalized, so lookups
//! by username or email compare exact strings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("username pattern is valid"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Lowercase handle of 3 to 20 characters from `[a-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 20;

    /// Trims and lowercases `raw` before checking it.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        let len = value.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ValidationError::out_of_range(
                "username",
                Self::MIN_LEN as i32,
                Self::MAX_LEN as i32,
                i32::try_from(len).unwrap_or(i32::MAX),
            ));
        }

        if !USERNAME_PATTERN.is_match(&value) {
            return Err(ValidationError::invalid_format(
                "username",
                "only letters, digits and underscores are allowed",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address with a plausible `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Trims `raw` before checking it. Case is preserved.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !EMAIL_PATTERN.is_match(value) {
            return Err(ValidationError::invalid_format(
                "email",
                "expected an address like name@example.com",
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
