//! Problem types defined by the config crate.

use safely_typed_shared::{ErrorKind, ProblemType};

/// Module name used by every problem type in this crate.
pub const DEFINED_BY: &str = "safely-typed-config";

/// The config document is not valid JSON for the schema.
pub static INVALID_JSON: ProblemType = ProblemType::new(
    DEFINED_BY,
    "invalid_json",
    ErrorKind::Expected,
    "report config is not valid JSON",
);

/// The config document is not valid TOML for the schema.
pub static INVALID_TOML: ProblemType = ProblemType::new(
    DEFINED_BY,
    "invalid_toml",
    ErrorKind::Expected,
    "report config is not valid TOML",
);

/// The config declares a version this crate does not support.
pub static UNSUPPORTED_VERSION: ProblemType = ProblemType::new(
    DEFINED_BY,
    "unsupported_version",
    ErrorKind::Expected,
    "report config version is not supported",
);

/// A redact key is empty after trimming.
pub static INVALID_REDACT_KEY: ProblemType = ProblemType::new(
    DEFINED_BY,
    "invalid_redact_key",
    ErrorKind::Expected,
    "report config redact keys must be non-empty",
);

/// An environment override has an invalid value.
pub static INVALID_ENV: ProblemType = ProblemType::new(
    DEFINED_BY,
    "invalid_env",
    ErrorKind::Expected,
    "report config environment override is invalid",
);

/// The config file could not be read.
pub static UNREADABLE_FILE: ProblemType = ProblemType::new(
    DEFINED_BY,
    "unreadable_file",
    ErrorKind::Expected,
    "report config file could not be read",
);
