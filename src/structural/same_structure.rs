//! The structural property matcher: "same property values as".

use crate::description::{Description, SelfDescribing};
use crate::matcher::{DiagnosingMatcher, Matcher};
use crate::matchers::{equal_to, EqualTo};
use crate::structural::properties::{properties_of, Inspect, PropertyDef, PropertyError};
use serde_json::Value;
use std::collections::BTreeSet;

/// A diagnosing matcher that compares an actual value's properties
/// field-by-field against a snapshot of a reference value.
///
/// Construction runs the introspector once against the reference and reads
/// each surviving property's current value; the reference is never re-read.
/// Evaluation checks, in order: type compatibility (the actual type must
/// expose every reference property name), absence of extra properties, and
/// per-property equality in declaration order, stopping at the first
/// failing property.
///
/// The matcher is immutable after construction and may be reused against
/// any number of actual values; evaluation only writes to the description
/// the caller passes in.
#[derive(Debug)]
pub struct SameStructureAs {
    type_name: &'static str,
    property_names: BTreeSet<&'static str>,
    property_matchers: Vec<PropertyMatcher>,
    ignored: Vec<String>,
}

/// Create a matcher comparing all property values against `reference`,
/// skipping `ignored` names on both sides of the comparison.
///
/// # Example
///
/// ```rust
/// use semblance::{properties, same_structure_as, Description, DiagnosingMatcher};
///
/// struct Job {
///     title: String,
///     level: i64,
/// }
///
/// properties! {
///     Job {
///         title => |job| &job.title,
///         level => |job| job.level,
///     }
/// }
///
/// let reference = Job { title: "engineer".into(), level: 3 };
/// let matcher = same_structure_as(&reference, &[]);
///
/// let actual = Job { title: "manager".into(), level: 3 };
/// let mut mismatch = Description::new();
/// assert!(!matcher.matches_and_describe(&actual, &mut mismatch));
/// assert_eq!(mismatch.as_str(), "title was \"manager\"");
/// ```
///
/// # Panics
///
/// Panics when the reference cannot be introspected (duplicate property
/// names, or an accessor failure); use [`SameStructureAs::try_new`] to
/// handle that as a `Result`.
pub fn same_structure_as(reference: &dyn Inspect, ignored: &[&str]) -> SameStructureAs {
    match SameStructureAs::try_new(reference, ignored) {
        Ok(matcher) => matcher,
        Err(err) => panic!("could not build structural matcher: {err}"),
    }
}

impl SameStructureAs {
    /// Fallible form of [`same_structure_as`].
    pub fn try_new(reference: &dyn Inspect, ignored: &[&str]) -> Result<Self, PropertyError> {
        let ignored: Vec<String> = ignored.iter().map(|name| (*name).to_owned()).collect();
        let defs = properties_of(reference, &ignored)?;
        let mut property_matchers = Vec::with_capacity(defs.len());
        for def in &defs {
            property_matchers.push(PropertyMatcher::capture(def, reference)?);
        }
        Ok(Self {
            type_name: reference.type_name(),
            property_names: defs.iter().map(|def| def.name).collect(),
            property_matchers,
            ignored,
        })
    }

    fn is_compatible(
        &self,
        actual: &dyn Inspect,
        actual_names: &BTreeSet<&'static str>,
        mismatch: &mut Description,
    ) -> bool {
        if self.property_names.is_subset(actual_names) {
            return true;
        }
        mismatch
            .append_text("is incompatible type: ")
            .append_text(actual.type_name());
        false
    }

    fn has_no_extra_properties(
        &self,
        actual_names: &BTreeSet<&'static str>,
        mismatch: &mut Description,
    ) -> bool {
        let extra: Vec<&str> = actual_names
            .difference(&self.property_names)
            .copied()
            .collect();
        if extra.is_empty() {
            return true;
        }
        mismatch
            .append_text("has extra properties called [")
            .append_text(&extra.join(", "))
            .append_text("]");
        false
    }

    fn has_matching_values(
        &self,
        actual: &dyn Inspect,
        actual_defs: &[PropertyDef],
        mismatch: &mut Description,
    ) -> bool {
        for property_matcher in &self.property_matchers {
            if !property_matcher.matches_and_describe(actual, actual_defs, mismatch) {
                return false;
            }
        }
        true
    }
}

impl SelfDescribing for SameStructureAs {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("same property values as ")
            .append_text(self.type_name)
            .append_list(" [", ", ", "]", self.property_matchers.iter());
        if !self.ignored.is_empty() {
            description.append_text(" ignoring ").append_value_list(
                "[",
                ", ",
                "]",
                self.ignored.iter().map(String::as_str),
            );
        }
    }
}

impl DiagnosingMatcher<dyn Inspect> for SameStructureAs {
    /// # Panics
    ///
    /// Panics when the actual value's table cannot be applied (duplicate
    /// names, foreign-target accessor, or a render failure); an accessor
    /// that fails is a fatal error, never a mismatch.
    fn matches_and_describe(&self, actual: &dyn Inspect, mismatch: &mut Description) -> bool {
        let actual_defs = match properties_of(actual, &self.ignored) {
            Ok(defs) => defs,
            Err(err) => panic!("could not inspect actual value: {err}"),
        };
        let actual_names: BTreeSet<&'static str> =
            actual_defs.iter().map(|def| def.name).collect();

        self.is_compatible(actual, &actual_names, mismatch)
            && self.has_no_extra_properties(&actual_names, mismatch)
            && self.has_matching_values(actual, &actual_defs, mismatch)
    }
}

impl Matcher<dyn Inspect> for SameStructureAs {
    fn matches(&self, actual: &dyn Inspect) -> bool {
        self.matches_and_describe(actual, &mut Description::new())
    }

    fn describe_mismatch(&self, actual: &dyn Inspect, mismatch: &mut Description) {
        self.matches_and_describe(actual, mismatch);
    }
}

/// Equality on a single named property, diagnosed as `<name> was <value>`.
///
/// The expected value is captured from the reference at construction; the
/// actual value is read through the actual type's own accessor, looked up
/// by name.
#[derive(Debug)]
struct PropertyMatcher {
    name: &'static str,
    matcher: EqualTo<Value>,
}

impl PropertyMatcher {
    fn capture(def: &PropertyDef, reference: &dyn Inspect) -> Result<Self, PropertyError> {
        let expected = (def.read)(reference)?;
        Ok(Self {
            name: def.name,
            matcher: equal_to(expected),
        })
    }

    fn matches_and_describe(
        &self,
        actual: &dyn Inspect,
        actual_defs: &[PropertyDef],
        mismatch: &mut Description,
    ) -> bool {
        let def = match actual_defs.iter().find(|def| def.name == self.name) {
            Some(def) => def,
            // Unreachable after the compatibility check; a bad lookup here
            // means a malformed table, which is fatal.
            None => panic!(
                "{}",
                PropertyError::NoSuchProperty {
                    type_name: actual.type_name(),
                    property: self.name,
                }
            ),
        };
        let value = match (def.read)(actual) {
            Ok(value) => value,
            Err(err) => panic!(
                "could not read property '{}' of {}: {err}",
                self.name,
                actual.type_name()
            ),
        };
        if self.matcher.matches(&value) {
            return true;
        }
        mismatch.append_text(self.name).append_text(" ");
        self.matcher.describe_mismatch(&value, mismatch);
        false
    }
}

impl SelfDescribing for PropertyMatcher {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text(self.name)
            .append_text(": ")
            .append_description_of(&self.matcher);
    }
}
