//! Diagnostic breadcrumbs locating a value inside a larger structure.

use crate::errors::AppError;
use crate::problems;
use serde::Serialize;
use std::fmt;

/// Path used when the caller does not supply one.
pub const DEFAULT_DATA_PATH: &str = "value";

/// Human-readable location of a value, e.g. `value.items[3].name`.
///
/// Only used in error payloads; it never affects pass/fail decisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DataPath(Box<str>);

impl DataPath {
    /// The default root path.
    #[must_use]
    pub fn root() -> Self {
        Self(DEFAULT_DATA_PATH.into())
    }

    /// Parse a data path from user input.
    ///
    /// The value is trimmed; empty values are rejected.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, AppError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::new(&problems::UNSUPPORTED_VALUE)
                .with_public("dataPath", "path")
                .with_public("expected", "non-empty string")
                .with_logs_only("inputLength", raw.len()));
        }
        Ok(Self(trimmed.into()))
    }

    /// Extend the path with a named field.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0).into_boxed_str())
    }

    /// Extend the path with a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0).into_boxed_str())
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DataPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for DataPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
