//! Nominal wrappers that can only be produced by a validator.

use crate::guards::TypeValidator;
use crate::options::ValidatorOptions;
use crate::pipeline::{must_be, validate};
use safely_typed_shared::{AppErrorOr, AppErrorOrExt};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker naming a nominal type.
///
/// ```
/// use safely_typed_core::{
///     Brand, Branded, Unknown, ValidatorOptions, make_branded, validate_non_empty_string,
/// };
///
/// struct UserName;
/// impl Brand for UserName {
///     const NAME: &'static str = "UserName";
/// }
///
/// let raw = Unknown::from("ada");
/// let name: Branded<&str, UserName> =
///     make_branded(&raw, &validate_non_empty_string, &ValidatorOptions::new())?;
/// assert_eq!(*name, "ada");
/// # Ok::<(), safely_typed_shared::AppError>(())
/// ```
pub trait Brand {
    /// Brand name reported in errors.
    const NAME: &'static str;
}

/// A `T` that passed the validator associated with brand `B`.
pub struct Branded<T, B: Brand> {
    value: T,
    brand: PhantomData<fn() -> B>,
}

impl<T, B: Brand> Branded<T, B> {
    const fn new(value: T) -> Self {
        Self {
            value,
            brand: PhantomData,
        }
    }

    /// Brand name.
    #[must_use]
    pub const fn brand_name() -> &'static str {
        B::NAME
    }

    /// Borrow the inner value.
    pub const fn as_ref(&self) -> &T {
        &self.value
    }

    /// Consume and return the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, B: Brand> std::ops::Deref for Branded<T, B> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: Clone, B: Brand> Clone for Branded<T, B> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: Copy, B: Brand> Copy for Branded<T, B> {}

impl<T: PartialEq, B: Brand> PartialEq for Branded<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, B: Brand> Eq for Branded<T, B> {}

impl<T: Hash, B: Brand> Hash for Branded<T, B> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug, B: Brand> fmt::Debug for Branded<T, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple(B::NAME)
            .field(&self.value)
            .finish()
    }
}

/// Validate `input` and brand the result. Failures carry the brand name.
pub fn make_branded<I, T, B, V>(
    input: I,
    validator: &V,
    options: &ValidatorOptions,
) -> AppErrorOr<Branded<T, B>>
where
    B: Brand,
    V: TypeValidator<I, T> + ?Sized,
{
    validate(validator.validate(input, options))
        .next(|value| Ok(Branded::new(value)))
        .value()
        .with_public_extra("brand", B::NAME)
}

/// Validate and brand `input`, unwinding on failure.
pub fn must_be_branded<I, T, B, V>(
    input: I,
    validator: &V,
    options: &ValidatorOptions,
) -> Branded<T, B>
where
    B: Brand,
    V: TypeValidator<I, T> + ?Sized,
{
    must_be(make_branded(input, validator, options)).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unknown::Unknown;
    use crate::validators::number_in_range;
    use safely_typed_shared::{AppError, problems};
    use serde_json::json;
    use std::panic::catch_unwind;

    struct Percent;

    impl Brand for Percent {
        const NAME: &'static str = "Percent";
    }

    #[test]
    fn branded_values_deref_to_inner() -> Result<(), AppError> {
        let percent: Branded<f64, Percent> = make_branded(
            &Unknown::from(42),
            &number_in_range(0.0, 100.0),
            &ValidatorOptions::new(),
        )?;
        assert!((*percent - 42.0).abs() < f64::EPSILON);
        assert_eq!(format!("{percent:?}"), "Percent(42.0)");
        assert_eq!(Branded::<f64, Percent>::brand_name(), "Percent");
        assert!((percent.into_inner() - 42.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn failures_name_the_brand() -> Result<(), Box<dyn std::error::Error>> {
        let result: AppErrorOr<Branded<f64, Percent>> = make_branded(
            &Unknown::from(140),
            &number_in_range(0.0, 100.0),
            &ValidatorOptions::new(),
        );
        let Err(error) = result else {
            return Err("140 is not a percent".into());
        };
        assert!(error.is(&problems::VALUE_OUT_OF_RANGE));
        assert_eq!(error.public_field("brand"), Some(&json!("Percent")));
        Ok(())
    }

    #[test]
    fn must_be_branded_unwinds() {
        let caught = catch_unwind(|| {
            let _: Branded<f64, Percent> = must_be_branded(
                &Unknown::Null,
                &number_in_range(0.0, 1.0),
                &ValidatorOptions::new(),
            );
        });
        assert!(caught.is_err());
    }
}
