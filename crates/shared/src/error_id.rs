//! Correlation identifiers for error occurrences.

use crate::errors::AppError;
use crate::problems;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Identifier correlating an error occurrence across logs and responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorId(Box<str>);

impl ErrorId {
    /// Parse an identifier from user input.
    ///
    /// The value is trimmed; empty values are rejected.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, AppError> {
        let raw = value.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::new(&problems::UNSUPPORTED_VALUE)
                .with_public("dataPath", "errorId")
                .with_public("expected", "non-empty string")
                .with_logs_only("inputLength", raw.len()));
        }
        Ok(Self(Box::<str>::from(trimmed)))
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string().into_boxed_str())
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
