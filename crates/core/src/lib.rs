//! # safely-typed-core
//!
//! Runtime validation for untrusted input.
//!
//! - [`validate`] / [`must_be`] fail-fast pipelines
//! - [`is_type`] / [`guarantee`] adapters folding validators into predicates
//!   and guarantees
//! - [`validate_implements_protocol`] duck-typing checks over [`Unknown`]
//!   records and any [`Introspect`] implementor
//! - leaf validators, [`Branded`] nominal types, and [`render_problem`] /
//!   [`log_problem`] for reporting failures

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod branded;
pub mod guards;
pub mod options;
pub mod pipeline;
pub mod protocol;
pub mod protocols;
pub mod report;
pub mod unknown;
pub mod validators;

pub use branded::{Brand, Branded, make_branded, must_be_branded};
pub use guards::{DataValidator, TypeValidator, guarantee, guarantee_with, is_data, is_type};
pub use options::ValidatorOptions;
pub use pipeline::{
    DefaultHandler, GuaranteePipeline, Outcome, ValidationPipeline, must_be, must_be_with, raise,
    validate,
};
pub use protocol::{
    ProtocolDefinition, implements_protocol, validate_implements_protocol,
    validate_introspectable,
};
pub use protocols::{
    ENTITY_PROTOCOL, HAS_PROTOCOL, VALUE_PROTOCOL, is_entity, is_has, is_value, must_be_entity,
    must_be_has, must_be_value, validate_entity, validate_has, validate_value,
};
pub use report::{log_problem, log_problem_with, render_problem};
pub use unknown::{Getter, Introspect, Member, MemberKind, Method, ObjectLike, Record, Unknown};
pub use validators::{
    number_in_range, validate_array, validate_array_of, validate_boolean,
    validate_non_empty_string, validate_number, validate_object, validate_record,
    validate_string,
};

/// Returns the core crate version.
#[must_use]
pub const fn core_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
