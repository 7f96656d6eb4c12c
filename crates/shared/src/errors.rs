//! Structured error types and helpers.

use crate::error_id::ErrorId;
use crate::problems;
use crate::redaction::LogsOnly;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Per-occurrence payload attached to errors.
pub type ErrorMetadata = BTreeMap<String, Value>;

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Expected failures (validation, user input).
    Expected,
    /// Invariant violations (misconfigured protocols, bugs in callers).
    Invariant,
    /// Unexpected failures that did not originate in this library.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Invariant => formatter.write_str("invariant"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Stable error code: the defining module plus an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCode {
    defined_by: &'static str,
    code: &'static str,
}

impl ErrorCode {
    /// Create a new error code.
    pub const fn new(defined_by: &'static str, code: &'static str) -> Self {
        Self { defined_by, code }
    }

    /// Returns the module that defines this error category.
    #[must_use]
    pub const fn defined_by(&self) -> &'static str {
        self.defined_by
    }

    /// Returns the code identifier.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.defined_by, self.code)
    }
}

/// A category of failure.
///
/// Problem types are declared as `static` items. The description is a
/// `&'static str`, so every occurrence of the same problem carries identical
/// text; per-occurrence data goes into [`AppError`] extras.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ProblemType {
    code: ErrorCode,
    kind: ErrorKind,
    description: &'static str,
}

impl ProblemType {
    /// Declare a problem type.
    pub const fn new(
        defined_by: &'static str,
        code: &'static str,
        kind: ErrorKind,
        description: &'static str,
    ) -> Self {
        Self {
            code: ErrorCode::new(defined_by, code),
            kind,
            description,
        }
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Origin classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Fixed human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }
}

/// Extra data attached to a single error occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemExtra {
    public: ErrorMetadata,
    logs_only: LogsOnly<ErrorMetadata>,
}

impl ProblemExtra {
    /// Fields that are safe to show to the caller.
    #[must_use]
    pub const fn public(&self) -> &ErrorMetadata {
        &self.public
    }

    /// Fields reserved for internal diagnostics.
    #[must_use]
    pub const fn logs_only(&self) -> &LogsOnly<ErrorMetadata> {
        &self.logs_only
    }
}

/// Structured error produced by validators and pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    problem: &'static ProblemType,
    error_id: Option<ErrorId>,
    extra: ProblemExtra,
}

impl AppError {
    /// Create an error for the given problem type with an empty payload.
    #[must_use]
    pub fn new(problem: &'static ProblemType) -> Self {
        Self {
            problem,
            error_id: None,
            extra: ProblemExtra::default(),
        }
    }

    /// Attach a public extra field.
    #[must_use]
    pub fn with_public(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.public.insert(key.into(), value.into());
        self
    }

    /// Attach a logs-only extra field.
    #[must_use]
    pub fn with_logs_only(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra
            .logs_only
            .expose_mut()
            .insert(key.into(), value.into());
        self
    }

    /// Attach a correlation identifier.
    #[must_use]
    pub fn with_error_id(mut self, error_id: ErrorId) -> Self {
        self.error_id = Some(error_id);
        self
    }

    /// Attach a freshly generated correlation identifier.
    #[must_use]
    pub fn with_generated_error_id(self) -> Self {
        self.with_error_id(ErrorId::generate())
    }

    /// The problem type this error is an occurrence of.
    #[must_use]
    pub const fn problem(&self) -> &'static ProblemType {
        self.problem
    }

    /// Returns true if this error is an occurrence of `problem`.
    #[must_use]
    pub fn is(&self, problem: &ProblemType) -> bool {
        self.problem == problem
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.problem.code
    }

    /// Origin classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.problem.kind
    }

    /// Module that defines this error category.
    #[must_use]
    pub const fn defined_by(&self) -> &'static str {
        self.problem.code.defined_by
    }

    /// Fixed human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.problem.description
    }

    /// Optional correlation identifier.
    #[must_use]
    pub const fn error_id(&self) -> Option<&ErrorId> {
        self.error_id.as_ref()
    }

    /// Per-occurrence payload.
    #[must_use]
    pub const fn extra(&self) -> &ProblemExtra {
        &self.extra
    }

    /// Shortcut for a single public extra field.
    #[must_use]
    pub fn public_field(&self, key: &str) -> Option<&Value> {
        self.extra.public.get(key)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.problem.code, self.problem.description)
    }
}

impl std::error::Error for AppError {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicView<'a> {
    defined_by: &'static str,
    code: &'static str,
    kind: ErrorKind,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_id: Option<&'a ErrorId>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: &'a ErrorMetadata,
}

/// Serializes the public view only; logs-only extras never leave through serde.
impl Serialize for AppError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PublicView {
            defined_by: self.defined_by(),
            code: self.problem.code.code,
            kind: self.problem.kind,
            description: self.problem.description,
            error_id: self.error_id.as_ref(),
            extra: &self.extra.public,
        }
        .serialize(serializer)
    }
}

/// Normalized wrapper for errors that are not [`AppError`]s.
#[derive(Debug)]
pub enum UnexpectedError {
    /// Unexpected error message.
    Message(String),
    /// Unexpected error payload.
    Error(Box<dyn std::error::Error + Send + Sync>),
}

impl UnexpectedError {
    /// Wrap an unexpected message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap an unexpected error value.
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Error(Box::new(error))
    }
}

impl fmt::Display for UnexpectedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => formatter.write_str(message),
            Self::Error(error) => write!(formatter, "{error}"),
        }
    }
}

/// Normalize a foreign error into a structured [`AppError`].
///
/// The foreign message and its source chain are diagnostics, so they land in
/// the logs-only payload.
pub fn normalize_unexpected_error(error: UnexpectedError) -> AppError {
    let normalized = AppError::new(&problems::UNEXPECTED);
    match error {
        UnexpectedError::Message(message) => normalized.with_logs_only("message", message),
        UnexpectedError::Error(error) => {
            let causes = source_chain(&*error);
            let normalized = normalized.with_logs_only("message", error.to_string());
            if causes.is_empty() {
                normalized
            } else {
                normalized.with_logs_only("causes", causes)
            }
        },
    }
}

fn source_chain(error: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = error.source();

    while let Some(candidate) = current {
        causes.push(candidate.to_string());
        current = candidate.source();
    }

    causes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::REDACTED;
    use serde_json::json;
    use std::io;

    #[test]
    fn app_error_exposes_problem_fields() {
        let error = AppError::new(&problems::UNSUPPORTED_TYPE).with_public("expected", "object");

        assert_eq!(error.kind(), ErrorKind::Expected);
        assert_eq!(error.defined_by(), "safely-typed");
        assert_eq!(error.code().code(), "unsupported_type");
        assert!(error.is(&problems::UNSUPPORTED_TYPE));
        assert!(!error.is(&problems::MISSING_CAPABILITY));
        assert_eq!(error.public_field("expected"), Some(&json!("object")));
    }

    #[test]
    fn description_is_identical_across_occurrences() {
        let first = AppError::new(&problems::VALUE_OUT_OF_RANGE).with_public("value", 1);
        let second = AppError::new(&problems::VALUE_OUT_OF_RANGE).with_public("value", 99);

        assert_eq!(first.description(), second.description());
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn serialization_omits_logs_only_extras() -> Result<(), serde_json::Error> {
        let error = AppError::new(&problems::UNSUPPORTED_VALUE)
            .with_public("dataPath", "value.name")
            .with_logs_only("rawInput", "hunter2");
        let encoded = serde_json::to_value(&error)?;

        assert_eq!(encoded["definedBy"], json!("safely-typed"));
        assert_eq!(encoded["code"], json!("unsupported_value"));
        assert_eq!(encoded["kind"], json!("expected"));
        assert_eq!(encoded["extra"]["dataPath"], json!("value.name"));
        assert!(!encoded.to_string().contains("hunter2"));
        Ok(())
    }

    #[test]
    fn debug_output_redacts_logs_only_extras() {
        let error = AppError::new(&problems::UNSUPPORTED_VALUE).with_logs_only("rawInput", "hunter2");
        let debug = format!("{error:?}");

        assert!(debug.contains(REDACTED));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn normalize_unexpected_error_keeps_message_logs_only() {
        let normalized = normalize_unexpected_error(UnexpectedError::message("boom"));
        assert_eq!(normalized.kind(), ErrorKind::Unexpected);
        assert!(normalized.extra().public().is_empty());
        assert_eq!(
            normalized.extra().logs_only().expose().get("message"),
            Some(&json!("boom"))
        );

        let io_error = io::Error::other("disk on fire");
        let normalized = normalize_unexpected_error(UnexpectedError::error(io_error));
        assert!(normalized.is(&problems::UNEXPECTED));
        assert_eq!(
            normalized.extra().logs_only().expose().get("message"),
            Some(&json!("disk on fire"))
        );
    }

    #[test]
    fn error_id_is_optional_and_attachable() -> Result<(), AppError> {
        let error = AppError::new(&problems::UNSUPPORTED_TYPE);
        assert!(error.error_id().is_none());

        let error = error.with_error_id(ErrorId::parse("req-42")?);
        assert_eq!(error.error_id().map(ErrorId::as_str), Some("req-42"));
        Ok(())
    }
}
