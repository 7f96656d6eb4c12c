//! Catalogue of problem types defined by the library.
//!
//! Downstream crates declare their own `static` [`ProblemType`] items the same
//! way, with their own `defined_by` module name.

use crate::errors::{ErrorKind, ProblemType};

/// Module name used by every problem type in this catalogue.
pub const DEFINED_BY: &str = "safely-typed";

/// The input's runtime type is not what the validator expected.
pub static UNSUPPORTED_TYPE: ProblemType = ProblemType::new(
    DEFINED_BY,
    "unsupported_type",
    ErrorKind::Expected,
    "input has an unsupported type",
);

/// The input is object-like but lacks one or more required callable members.
pub static MISSING_CAPABILITY: ProblemType = ProblemType::new(
    DEFINED_BY,
    "missing_capability",
    ErrorKind::Expected,
    "input does not implement the required protocol",
);

/// The input has the right shape but a value outside the accepted range.
pub static VALUE_OUT_OF_RANGE: ProblemType = ProblemType::new(
    DEFINED_BY,
    "value_out_of_range",
    ErrorKind::Expected,
    "input value is out of range",
);

/// The input has the right shape but an unacceptable value.
pub static UNSUPPORTED_VALUE: ProblemType = ProblemType::new(
    DEFINED_BY,
    "unsupported_value",
    ErrorKind::Expected,
    "input has an unsupported value",
);

/// A protocol definition is misconfigured (for example, lists no methods).
pub static INVALID_PROTOCOL: ProblemType = ProblemType::new(
    DEFINED_BY,
    "invalid_protocol",
    ErrorKind::Invariant,
    "protocol definition is invalid",
);

/// A foreign error was normalized into the structured error type.
pub static UNEXPECTED: ProblemType = ProblemType::new(
    DEFINED_BY,
    "unexpected",
    ErrorKind::Unexpected,
    "an unexpected error occurred",
);
