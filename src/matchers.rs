//! Leaf matchers: equality plus the small text predicates the combinators
//! and the structural matcher build on.
//!
//! The broad predicate catalog lives outside this crate; what's here is the
//! equality matcher the structural comparison is built from and the handful
//! of string matchers needed to compose useful conjunctions. Text matchers
//! are implemented once over [`Borrow<str>`] so the same matcher applies to
//! `str`, `String`, and `&str` values, and lifts into dynamic values via
//! [`type_safe`](crate::type_safe).

use crate::description::{DescribeValue, Description, SelfDescribing};
use crate::matcher::Matcher;
use regex::Regex;
use std::borrow::Borrow;

/// Matches values equal to a captured expected value.
///
/// Describes itself as the canonical rendering of the expected value, so a
/// conjunction of equalities reads `("good" and "bad")`.
#[derive(Debug)]
pub struct EqualTo<T> {
    expected: T,
}

/// Create a matcher for values equal to `expected`.
///
/// # Example
///
/// ```rust
/// use semblance::{equal_to, Matcher};
///
/// assert!(equal_to(2).matches(&2));
/// assert!(!equal_to(2).matches(&3));
/// ```
pub fn equal_to<T>(expected: T) -> EqualTo<T> {
    EqualTo { expected }
}

impl<T: DescribeValue> SelfDescribing for EqualTo<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_value(&self.expected);
    }
}

impl<T: PartialEq + DescribeValue> Matcher<T> for EqualTo<T> {
    fn matches(&self, actual: &T) -> bool {
        self.expected == *actual
    }
}

// Lets `equal_to("good")` sit next to text matchers in an `AllOf<str>`.
impl<'a> Matcher<str> for EqualTo<&'a str> {
    fn matches(&self, actual: &str) -> bool {
        self.expected == actual
    }
}

/// Matches character sequences that start with a prefix.
pub struct StartsWith {
    prefix: String,
}

/// Create a matcher for strings starting with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> StartsWith {
    StartsWith {
        prefix: prefix.into(),
    }
}

impl SelfDescribing for StartsWith {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a string starting with ")
            .append_value(self.prefix.as_str());
    }
}

impl<S> Matcher<S> for StartsWith
where
    S: Borrow<str> + DescribeValue + ?Sized,
{
    fn matches(&self, actual: &S) -> bool {
        actual.borrow().starts_with(&self.prefix)
    }
}

/// Matches character sequences that end with a suffix.
pub struct EndsWith {
    suffix: String,
}

/// Create a matcher for strings ending with `suffix`.
pub fn ends_with(suffix: impl Into<String>) -> EndsWith {
    EndsWith {
        suffix: suffix.into(),
    }
}

impl SelfDescribing for EndsWith {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a string ending with ")
            .append_value(self.suffix.as_str());
    }
}

impl<S> Matcher<S> for EndsWith
where
    S: Borrow<str> + DescribeValue + ?Sized,
{
    fn matches(&self, actual: &S) -> bool {
        actual.borrow().ends_with(&self.suffix)
    }
}

/// Matches character sequences containing a substring.
pub struct ContainsString {
    substring: String,
}

/// Create a matcher for strings containing `substring`.
pub fn contains_string(substring: impl Into<String>) -> ContainsString {
    ContainsString {
        substring: substring.into(),
    }
}

impl SelfDescribing for ContainsString {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a string containing ")
            .append_value(self.substring.as_str());
    }
}

impl<S> Matcher<S> for ContainsString
where
    S: Borrow<str> + DescribeValue + ?Sized,
{
    fn matches(&self, actual: &S) -> bool {
        actual.borrow().contains(&self.substring)
    }
}

/// Matches character sequences against a compiled regular expression.
pub struct MatchesRegex {
    regex: Regex,
}

/// Create a matcher for strings matching `regex`.
///
/// # Example
///
/// ```rust
/// use regex::Regex;
/// use semblance::{matches_regex, Matcher};
///
/// let matcher = matches_regex(Regex::new(r"^\d+ items$").unwrap());
/// assert!(matcher.matches("42 items"));
/// ```
pub fn matches_regex(regex: Regex) -> MatchesRegex {
    MatchesRegex { regex }
}

impl SelfDescribing for MatchesRegex {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a string matching the pattern ")
            .append_value(self.regex.as_str());
    }
}

impl<S> Matcher<S> for MatchesRegex
where
    S: Borrow<str> + DescribeValue + ?Sized,
{
    fn matches(&self, actual: &S) -> bool {
        self.regex.is_match(actual.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description_of<S: SelfDescribing>(item: &S) -> String {
        let mut description = Description::new();
        item.describe_to(&mut description);
        description.into_string()
    }

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
    fn test_equal_to_compares_with_partial_eq() {
        assert!(equal_to(1i64).matches(&1));
        assert!(!equal_to(1i64).matches(&2));
        assert!(equal_to("same".to_string()).matches(&"same".to_string()));
    }

    #[test]
    fn test_equal_to_describes_the_expected_value() {
        assert_eq!(description_of(&equal_to("same")), "\"same\"");
        assert_eq!(description_of(&equal_to(1i64)), "<1>");
    }

    #[test]
    fn test_equal_to_mismatch_renders_the_actual_value() {
        assert_eq!(mismatch_of(&equal_to(1i64), &2), "was <2>");
    }

    #[test]
    fn test_equal_to_str_matches_unsized_strings() {
        let matcher = equal_to("good");
        assert!(Matcher::<str>::matches(&matcher, "good"));
        assert!(!Matcher::<str>::matches(&matcher, "bad"));
    }

    #[test]
    fn test_starts_with() {
        let matcher = starts_with("goo");
        assert!(matcher.matches("good"));
        assert!(!matcher.matches("mood"));
        assert_eq!(description_of(&matcher), "a string starting with \"goo\"");
        assert_eq!(mismatch_of(&matcher, "mood"), "was \"mood\"");
    }

    #[test]
    fn test_ends_with() {
        let matcher = ends_with("ood");
        assert!(matcher.matches("good"));
        assert!(!matcher.matches("goon"));
        assert_eq!(description_of(&matcher), "a string ending with \"ood\"");
    }

    #[test]
    fn test_contains_string() {
        let matcher = contains_string("text");
        assert!(matcher.matches("the text!"));
        assert!(!matcher.matches("the test!"));
        assert_eq!(description_of(&matcher), "a string containing \"text\"");
    }

    #[test]
    fn test_matches_regex() {
        let matcher = matches_regex(Regex::new(r"^npm (install|i)$").unwrap());
        assert!(matcher.matches("npm install"));
        assert!(matcher.matches("npm i"));
        assert!(!matcher.matches("npm run"));
        assert_eq!(
            description_of(&matcher),
            "a string matching the pattern \"^npm (install|i)$\""
        );
    }

    #[test]
    fn test_text_matchers_apply_to_owned_strings() {
        let owned = "good".to_string();
        assert!(starts_with("goo").matches(&owned));
        assert!(ends_with("ood").matches(&owned));
    }
}
