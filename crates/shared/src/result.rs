//! Result helpers for structured error handling.

use crate::data_path::DataPath;
use crate::errors::AppError;
use serde_json::Value;

/// Either a validated value or the structured error explaining why not.
pub type AppErrorOr<T> = Result<T, AppError>;

/// Extension helpers for [`AppErrorOr`].
pub trait AppErrorOrExt<T> {
    /// Attach a public extra field when the result is an error.
    fn with_public_extra(self, key: &str, value: impl Into<Value>) -> AppErrorOr<T>;

    /// Attach a logs-only extra field when the result is an error.
    fn with_logs_only_extra(self, key: &str, value: impl Into<Value>) -> AppErrorOr<T>;

    /// Record the data path of the failing value when the result is an error.
    fn at_path(self, path: &DataPath) -> AppErrorOr<T>;

    /// Fold into a boolean: `true` iff the result is a value.
    fn is_valid(&self) -> bool;
}

impl<T> AppErrorOrExt<T> for AppErrorOr<T> {
    fn with_public_extra(self, key: &str, value: impl Into<Value>) -> Self {
        self.map_err(|error| error.with_public(key, value))
    }

    fn with_logs_only_extra(self, key: &str, value: impl Into<Value>) -> Self {
        self.map_err(|error| error.with_logs_only(key, value))
    }

    fn at_path(self, path: &DataPath) -> Self {
        self.map_err(|error| error.with_public("dataPath", path.as_str()))
    }

    fn is_valid(&self) -> bool {
        self.is_ok()
    }
}
