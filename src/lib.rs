//! # semblance
//!
//! A library of composable, self-describing matchers.
//!
//! A [`Matcher`] is a predicate over values that can also describe itself
//! and explain why a specific value failed to match. Matchers compose:
//! [`all_of`] joins any matchers into a conjunction with first-failure
//! reporting, and [`same_structure_as`] compares every declared property of
//! an actual value against a snapshot of a reference value, pinpointing the
//! first differing property.
//!
//! ## Composing matchers
//!
//! ```rust
//! use semblance::{ends_with, starts_with, AllOf, Description, Matcher, SelfDescribing};
//!
//! let matcher: AllOf<str> = semblance::all_of![starts_with("goo"), ends_with("ood")];
//! assert!(matcher.matches("good"));
//! assert!(!matcher.matches("mood"));
//!
//! let mut description = Description::new();
//! matcher.describe_to(&mut description);
//! assert_eq!(
//!     description.as_str(),
//!     "(a string starting with \"goo\" and a string ending with \"ood\")"
//! );
//! ```
//!
//! ## Structural comparison
//!
//! Declare a property table next to a type, then match whole values:
//!
//! ```rust
//! use semblance::{properties, same_structure_as, Description, DiagnosingMatcher, Matcher};
//!
//! struct Job {
//!     title: String,
//!     level: i64,
//! }
//!
//! properties! {
//!     Job {
//!         title => |job| &job.title,
//!         level => |job| job.level,
//!     }
//! }
//!
//! let reference = Job { title: "engineer".into(), level: 3 };
//! let matcher = same_structure_as(&reference, &[]);
//!
//! assert!(matcher.matches(&Job { title: "engineer".into(), level: 3 }));
//!
//! let mut mismatch = Description::new();
//! matcher.matches_and_describe(&Job { title: "manager".into(), level: 3 }, &mut mismatch);
//! assert_eq!(mismatch.as_str(), "title was \"manager\"");
//! ```
//!
//! ## Dynamic values
//!
//! Typed matchers lift into matchers over `serde_json::Value` with
//! [`type_safe`], which filters null and wrong-kind input before the typed
//! predicate runs:
//!
//! ```rust
//! use semblance::{starts_with, type_safe, Matcher};
//! use serde_json::json;
//!
//! let matcher = type_safe::<String, _>(starts_with("goo"));
//! assert!(matcher.matches(&json!("good")));
//! assert!(!matcher.matches(&json!(null)));
//! ```

pub mod combinators;
pub mod description;
pub mod matcher;
pub mod matchers;
pub mod structural;

// Core protocol
pub use description::{DescribeValue, Description, SelfDescribing};
pub use matcher::{type_safe, DiagnosingMatcher, FromValue, Matcher, TypeSafe};

// Combinators
pub use combinators::{all_of, AllOf};

// Leaf matchers
pub use matchers::{
    contains_string, ends_with, equal_to, matches_regex, starts_with, ContainsString, EndsWith,
    EqualTo, MatchesRegex, StartsWith,
};

// Structural comparison
pub use structural::{
    properties_of, read_property_value, same_structure_as, to_property_value, Inspect, PropertyDef,
    PropertyError, ReadProperty, SameStructureAs,
};
