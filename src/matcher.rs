//! The matcher protocol: test a value, describe self, explain a mismatch.
//!
//! This module defines the capability set every predicate in the library
//! implements ([`Matcher`]), plus two refinements:
//!
//! - [`DiagnosingMatcher`] computes the match result and the mismatch text
//!   in a single pass, for matchers whose diagnosis depends on state
//!   gathered while matching.
//! - [`TypeSafe`] lifts a typed matcher into a matcher over dynamic
//!   [`Value`]s, rejecting null and wrong-kind input before the typed
//!   predicate ever runs.

use crate::description::{DescribeValue, Description, SelfDescribing};
use serde_json::Value;
use std::marker::PhantomData;

/// A predicate over values of type `T` that can also describe itself and
/// explain why a specific value failed to match.
///
/// Matchers are immutable after construction: evaluation never mutates the
/// matcher, only the [`Description`] supplied by the caller, so a matcher
/// may be evaluated any number of times against any number of values.
pub trait Matcher<T: DescribeValue + ?Sized>: SelfDescribing {
    /// Evaluate this matcher against `actual`.
    fn matches(&self, actual: &T) -> bool;

    /// Describe why `actual` did not match.
    ///
    /// The default renders `was ` followed by the canonical rendering of the
    /// value; matchers with richer diagnostics override it.
    fn describe_mismatch(&self, actual: &T, mismatch: &mut Description) {
        mismatch.append_text("was ").append_value(actual);
    }
}

/// A matcher that computes match result and mismatch description together.
///
/// Use this when the mismatch text depends on intermediate state gathered
/// while matching, or when computing the match result is expensive enough
/// that running it twice (once for `matches`, once for `describe_mismatch`)
/// would be wasteful. The plain [`Matcher::matches`] entry point on such
/// types is a convenience that discards the description.
pub trait DiagnosingMatcher<T: DescribeValue + ?Sized>: SelfDescribing {
    /// Evaluate against `actual`, appending the mismatch description to
    /// `mismatch` when the result is `false`.
    fn matches_and_describe(&self, actual: &T, mismatch: &mut Description) -> bool;
}

/// A typed view that can be extracted from a dynamic [`Value`].
///
/// This is what [`TypeSafe`] uses to decide whether a value may be handed
/// to its typed inner matcher at all.
pub trait FromValue: Sized + DescribeValue {
    /// The JSON kind name used in wrong-kind mismatch text.
    fn kind() -> &'static str;

    /// Extract the typed view, or `None` when the value has the wrong kind.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn kind() -> &'static str {
        "string"
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for i64 {
    fn kind() -> &'static str {
        "integer"
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for f64 {
    fn kind() -> &'static str {
        "number"
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    fn kind() -> &'static str {
        "boolean"
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// A matcher over dynamic [`Value`]s that filters null and wrong-kind input
/// before delegating to a typed inner matcher.
///
/// For null or wrong-kind input the inner matcher is never invoked: the
/// match fails and the mismatch reports the nullness or the actual kind
/// instead of delegating.
///
/// # Example
///
/// ```rust
/// use semblance::{starts_with, type_safe, Description, Matcher};
/// use serde_json::json;
///
/// let matcher = type_safe::<String, _>(starts_with("goo"));
/// assert!(matcher.matches(&json!("good")));
/// assert!(!matcher.matches(&json!(null)));
///
/// let mut mismatch = Description::new();
/// matcher.describe_mismatch(&json!(7), &mut mismatch);
/// assert_eq!(mismatch.as_str(), "was a number (<7>)");
/// ```
pub struct TypeSafe<T, M> {
    inner: M,
    _value: PhantomData<fn() -> T>,
}

/// Lift a typed matcher into a [`Matcher`] over dynamic [`Value`]s.
pub fn type_safe<T, M>(inner: M) -> TypeSafe<T, M>
where
    T: FromValue,
    M: Matcher<T>,
{
    TypeSafe {
        inner,
        _value: PhantomData,
    }
}

impl<T, M> SelfDescribing for TypeSafe<T, M>
where
    T: FromValue,
    M: Matcher<T>,
{
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl<T, M> Matcher<Value> for TypeSafe<T, M>
where
    T: FromValue,
    M: Matcher<T>,
{
    fn matches(&self, actual: &Value) -> bool {
        match T::from_value(actual) {
            Some(typed) => self.inner.matches(&typed),
            None => false,
        }
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        if actual.is_null() {
            mismatch.append_text("was null");
            return;
        }
        match T::from_value(actual) {
            Some(typed) => self.inner.describe_mismatch(&typed, mismatch),
            None => {
                mismatch
                    .append_text("was a ")
                    .append_text(kind_of(actual))
                    .append_text(" (")
                    .append_value(actual)
                    .append_text(")");
            }
        }
    }
}

/// JSON kind name of a value, for wrong-kind mismatch text.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{ends_with, starts_with};
    use serde_json::json;

    fn mismatch_of<T, M>(matcher: &M, actual: &T) -> String
    where
        T: DescribeValue + ?Sized,
        M: Matcher<T>,
    {
        let mut mismatch = Description::new();
        matcher.describe_mismatch(actual, &mut mismatch);
        mismatch.into_string()
    }

    #[test]
    fn test_default_mismatch_renders_the_value() {
        let matcher = starts_with("goo");
        assert_eq!(mismatch_of(&matcher, "mood"), "was \"mood\"");
    }

    #[test]
    fn test_type_safe_delegates_for_matching_kind() {
        let matcher = type_safe::<String, _>(starts_with("goo"));
        assert!(matcher.matches(&json!("good")));
        assert!(!matcher.matches(&json!("mood")));
        assert_eq!(mismatch_of(&matcher, &json!("mood")), "was \"mood\"");
    }

    #[test]
    fn test_type_safe_rejects_null_without_invoking_inner() {
        let matcher = type_safe::<String, _>(starts_with("goo"));
        assert!(!matcher.matches(&json!(null)));
        assert_eq!(mismatch_of(&matcher, &json!(null)), "was null");
    }

    #[test]
    fn test_type_safe_reports_wrong_kind() {
        let matcher = type_safe::<String, _>(ends_with("ood"));
        assert!(!matcher.matches(&json!(7)));
        assert_eq!(mismatch_of(&matcher, &json!(7)), "was a number (<7>)");
        assert_eq!(mismatch_of(&matcher, &json!(true)), "was a boolean (<true>)");
    }

    #[test]
    fn test_type_safe_describes_as_the_inner_matcher() {
        let matcher = type_safe::<String, _>(starts_with("goo"));
        let mut description = Description::new();
        matcher.describe_to(&mut description);
        assert_eq!(description.as_str(), "a string starting with \"goo\"");
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(i64::from_value(&json!(3)), Some(3));
        assert_eq!(i64::from_value(&json!("3")), None);
        assert_eq!(f64::from_value(&json!(1.5)), Some(1.5));
        assert_eq!(bool::from_value(&json!(false)), Some(false));
        assert_eq!(String::from_value(&json!("x")), Some("x".to_string()));
    }
}
