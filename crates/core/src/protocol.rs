//! Duck-typing checks against named sets of callable members.

use crate::options::ValidatorOptions;
use crate::pipeline::validate;
use crate::unknown::{Introspect, MemberKind, ObjectLike, Unknown};
use crate::validators::validate_object;
use safely_typed_shared::{AppError, AppErrorOr, AppErrorOrExt, problems};

/// Named, ordered list of members an object must expose as callables.
///
/// ```
/// use safely_typed_core::ProtocolDefinition;
///
/// const CLOSABLE: ProtocolDefinition<'static> = ProtocolDefinition::new("Closable", &["close"]);
/// assert_eq!(CLOSABLE.methods(), ["close"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolDefinition<'a> {
    name: &'a str,
    methods: &'a [&'a str],
}

impl<'a> ProtocolDefinition<'a> {
    /// Define a protocol.
    ///
    /// # Panics
    ///
    /// Panics when `methods` is empty; in a `const` item this is a compile
    /// error.
    #[must_use]
    pub const fn new(name: &'a str, methods: &'a [&'a str]) -> Self {
        assert!(
            !methods.is_empty(),
            "a protocol must require at least one method"
        );
        Self { name, methods }
    }

    /// Define a protocol from runtime data.
    pub fn try_new(name: &'a str, methods: &'a [&'a str]) -> AppErrorOr<Self> {
        if methods.is_empty() {
            return Err(AppError::new(&problems::INVALID_PROTOCOL)
                .with_public("protocol", name)
                .with_public("reason", "no methods"));
        }
        Ok(Self { name, methods })
    }

    /// Protocol name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Required member names, in declaration order.
    #[must_use]
    pub const fn methods(&self) -> &'a [&'a str] {
        self.methods
    }

    /// Required members that `target` lacks or exposes as non-callables.
    pub fn missing_from<T: Introspect + ?Sized>(&self, target: &T) -> Vec<&'a str> {
        self.methods
            .iter()
            .copied()
            .filter(|name| target.member_kind(name) != Some(MemberKind::Callable))
            .collect()
    }
}

/// Check that `input` is an object exposing every member of `protocol` as a
/// callable.
///
/// Non-objects fail with `UNSUPPORTED_TYPE`. Objects missing members fail
/// with `MISSING_CAPABILITY`, listing every missing name in declaration order
/// under `missingMethods`.
pub fn validate_implements_protocol<'i>(
    protocol: &ProtocolDefinition<'_>,
    input: &'i Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<ObjectLike<'i>> {
    validate(validate_object(input, options))
        .next(|object| validate_introspectable(protocol, object, options))
        .value()
}

/// Run the member check against any [`Introspect`] implementor.
pub fn validate_introspectable<T: Introspect>(
    protocol: &ProtocolDefinition<'_>,
    target: T,
    options: &ValidatorOptions,
) -> AppErrorOr<T> {
    let missing = protocol.missing_from(&target);
    if missing.is_empty() {
        return Ok(target);
    }
    Err(AppError::new(&problems::MISSING_CAPABILITY)
        .with_public("dataPath", options.data_path().as_str())
        .with_public("protocol", protocol.name())
        .with_public("missingMethods", missing))
}

/// `true` iff `input` implements `protocol`.
pub fn implements_protocol(protocol: &ProtocolDefinition<'_>, input: &Unknown) -> bool {
    validate_implements_protocol(protocol, input, &ValidatorOptions::new()).is_valid()
}
