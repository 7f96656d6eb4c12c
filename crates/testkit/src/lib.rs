//! # safely-typed-testkit
//!
//! Test doubles, sample records, and fixtures.
//! This crate depends on `core` and `shared`.

pub mod errors;
pub mod fixtures;
pub mod logs;
pub mod objects;
pub mod steps;

pub use fixtures::read_fixture;
pub use logs::{capture_json_logs, capture_logs};
pub use steps::CountingStep;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use safely_typed_core::{HAS_PROTOCOL, implements_protocol, is_entity, is_value};
    use safely_typed_shared::shared_crate_version;

    #[test]
    fn testkit_crate_compiles() {
        assert!(!testkit_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn sample_objects_match_their_protocols() {
        assert!(is_entity(&objects::entity()));
        assert!(is_entity(&objects::inherited_entity()));
        assert!(is_value(&objects::value_object()));
        assert!(implements_protocol(&HAS_PROTOCOL, &objects::has_container(&["a"])));
        assert!(!implements_protocol(&HAS_PROTOCOL, &objects::getter_only_has()));
    }

    #[test]
    fn counting_step_counts_calls() {
        let step = CountingStep::failing(errors::unsupported_type_error());
        assert!(step.run(1).is_err());
        assert!(step.clone().run(2).is_err());
        assert_eq!(step.calls(), 2);
    }

    #[test]
    fn fixtures_are_readable() -> std::io::Result<()> {
        let raw = read_fixture("config/report-config.valid.toml")?;
        assert!(raw.contains("sessionCookie"));
        Ok(())
    }

    #[test]
    fn captured_logs_contain_events() {
        let output = capture_logs(|| tracing::info!(target: "testkit", "hello"));
        assert!(output.contains("hello"));
    }

    #[test]
    fn json_capture_applies_the_filter() {
        let events = capture_json_logs("kept=info", || {
            tracing::info!(target: "kept", answer = 42, "hello");
            tracing::info!(target: "dropped", "ignored");
        });
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["target"], "kept");
        assert_eq!(events[0]["fields"]["answer"], 42);
    }
}
