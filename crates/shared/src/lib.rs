//! # safely-typed-shared
//!
//! Shared result and error types for the safely-typed workspace.
//!
//! This crate provides foundational types used by every other crate:
//!
//! - [`AppErrorOr`] result alias and [`AppErrorOrExt`] helpers
//! - [`AppError`] structured errors and the [`problems`] catalogue
//! - [`LogsOnly`] redaction for internal diagnostics
//! - [`DataPath`] breadcrumbs and [`ErrorId`] correlation identifiers
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Fixed descriptions** - Per-occurrence data lives in error extras only
//! 3. **Serde-compatible** - Errors serialize their public view

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod data_path;
pub mod error_id;
pub mod errors;
pub mod problems;
pub mod redaction;
pub mod result;

pub use data_path::{DEFAULT_DATA_PATH, DataPath};
pub use error_id::ErrorId;
pub use errors::{
    AppError, ErrorCode, ErrorKind, ErrorMetadata, ProblemExtra, ProblemType, UnexpectedError,
    normalize_unexpected_error,
};
pub use redaction::{LogsOnly, REDACTED, is_secret_key, redact_if_secret};
pub use result::{AppErrorOr, AppErrorOrExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
