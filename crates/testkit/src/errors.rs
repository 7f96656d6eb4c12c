//! Error fixtures built from the problem catalogue.

use safely_typed_shared::{AppError, ProblemType, UnexpectedError, problems};

/// Every problem type defined by `safely-typed-shared`.
pub fn shared_catalogue() -> Vec<&'static ProblemType> {
    vec![
        &problems::UNSUPPORTED_TYPE,
        &problems::MISSING_CAPABILITY,
        &problems::VALUE_OUT_OF_RANGE,
        &problems::UNSUPPORTED_VALUE,
        &problems::INVALID_PROTOCOL,
        &problems::UNEXPECTED,
    ]
}

/// An `UNSUPPORTED_TYPE` fixture for a null value at the root path.
pub fn unsupported_type_error() -> AppError {
    AppError::new(&problems::UNSUPPORTED_TYPE)
        .with_public("dataPath", "value")
        .with_public("expected", "object")
        .with_public("actual", "null")
}

/// A `MISSING_CAPABILITY` fixture listing `missing`.
pub fn missing_capability_error(protocol: &str, missing: &[&str]) -> AppError {
    AppError::new(&problems::MISSING_CAPABILITY)
        .with_public("dataPath", "value")
        .with_public("protocol", protocol)
        .with_public("missingMethods", missing.to_vec())
}

/// An `UNSUPPORTED_VALUE` fixture carrying a logs-only secret.
pub fn error_with_logs_only_secret() -> AppError {
    AppError::new(&problems::UNSUPPORTED_VALUE)
        .with_public("dataPath", "value.email")
        .with_logs_only("rawInput", "ada@example.com")
}

/// A foreign error whose source chain ends in an I/O failure.
pub fn io_failure() -> UnexpectedError {
    UnexpectedError::error(RequestFailed {
        cause: std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
    })
}

#[derive(Debug)]
struct RequestFailed {
    cause: std::io::Error,
}

impl std::fmt::Display for RequestFailed {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("request failed")
    }
}

impl std::error::Error for RequestFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
