//! Built-in protocols.

use crate::guards::{guarantee, is_type};
use crate::options::ValidatorOptions;
use crate::protocol::{ProtocolDefinition, validate_implements_protocol};
use crate::unknown::{ObjectLike, Unknown};
use safely_typed_shared::AppErrorOr;

/// Objects with identity: `implementsEntity` marker plus `valueOf`.
pub const ENTITY_PROTOCOL: ProtocolDefinition<'static> =
    ProtocolDefinition::new("Entity", &["implementsEntity", "valueOf"]);

/// Objects compared by value: `implementsValue` marker plus `valueOf`.
pub const VALUE_PROTOCOL: ProtocolDefinition<'static> =
    ProtocolDefinition::new("Value", &["implementsValue", "valueOf"]);

/// Containers answering membership queries through `has`.
pub const HAS_PROTOCOL: ProtocolDefinition<'static> = ProtocolDefinition::new("Has", &["has"]);

/// Validate against [`ENTITY_PROTOCOL`].
pub fn validate_entity<'i>(
    input: &'i Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<ObjectLike<'i>> {
    validate_implements_protocol(&ENTITY_PROTOCOL, input, options)
}

/// `true` iff `input` implements [`ENTITY_PROTOCOL`].
pub fn is_entity(input: &Unknown) -> bool {
    is_type(&validate_entity, input, &ValidatorOptions::new())
}

/// Return `input` as an entity or unwind with the failure.
pub fn must_be_entity<'i>(input: &'i Unknown, options: &ValidatorOptions) -> ObjectLike<'i> {
    guarantee(&validate_entity, input, options)
}

/// Validate against [`VALUE_PROTOCOL`].
pub fn validate_value<'i>(
    input: &'i Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<ObjectLike<'i>> {
    validate_implements_protocol(&VALUE_PROTOCOL, input, options)
}

/// `true` iff `input` implements [`VALUE_PROTOCOL`].
pub fn is_value(input: &Unknown) -> bool {
    is_type(&validate_value, input, &ValidatorOptions::new())
}

/// Return `input` as a value object or unwind with the failure.
pub fn must_be_value<'i>(input: &'i Unknown, options: &ValidatorOptions) -> ObjectLike<'i> {
    guarantee(&validate_value, input, options)
}

/// Validate against [`HAS_PROTOCOL`].
pub fn validate_has<'i>(
    input: &'i Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<ObjectLike<'i>> {
    validate_implements_protocol(&HAS_PROTOCOL, input, options)
}

/// `true` iff `input` implements [`HAS_PROTOCOL`].
pub fn is_has(input: &Unknown) -> bool {
    is_type(&validate_has, input, &ValidatorOptions::new())
}

/// Return `input` as a `has` container or unwind with the failure.
pub fn must_be_has<'i>(input: &'i Unknown, options: &ValidatorOptions) -> ObjectLike<'i> {
    guarantee(&validate_has, input, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unknown::Record;
    use safely_typed_shared::problems;
    use serde_json::json;

    fn entity() -> Unknown {
        Unknown::from(
            Record::new()
                .with_method("implementsEntity", |_| Unknown::Bool(true))
                .with_method("valueOf", |_| Unknown::from("user-1")),
        )
    }

    #[test]
    fn entity_guard_accepts_full_implementors() {
        assert!(is_entity(&entity()));
        assert!(!is_value(&entity()));
        assert!(!is_has(&entity()));
    }

    #[test]
    fn null_is_an_unsupported_type() -> Result<(), Box<dyn std::error::Error>> {
        let Err(error) = validate_has(&Unknown::Null, &ValidatorOptions::new()) else {
            return Err("null is not an object".into());
        };
        assert!(error.is(&problems::UNSUPPORTED_TYPE));
        assert_eq!(error.public_field("actual"), Some(&json!("null")));
        Ok(())
    }

    #[test]
    fn must_be_returns_the_same_record() -> Result<(), Box<dyn std::error::Error>> {
        let input = entity();
        let object = must_be_entity(&input, &ValidatorOptions::new());
        let (Some(record), Unknown::Record(original)) = (object.as_record(), &input) else {
            return Err("entity should stay a record".into());
        };
        assert!(std::sync::Arc::ptr_eq(record, original));
        Ok(())
    }
}
