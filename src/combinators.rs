//! Combinators that compose matchers into new matchers.
//!
//! The conjunction combinator treats its sub-matchers as an ordered list:
//! evaluation short-circuits at the first failure, and the mismatch report
//! is attributed to exactly that sub-matcher.

use crate::description::{DescribeValue, Description, SelfDescribing};
use crate::matcher::Matcher;

/// Matches only when every sub-matcher matches.
///
/// Sub-matchers are evaluated in construction order and evaluation stops at
/// the first failure; later sub-matchers are never invoked for that value.
/// An empty conjunction trivially matches everything.
///
/// # Example
///
/// ```rust
/// use semblance::{ends_with, starts_with, AllOf, Matcher};
///
/// let matcher: AllOf<str> = semblance::all_of![starts_with("goo"), ends_with("ood")];
/// assert!(matcher.matches("good"));
/// assert!(!matcher.matches("mood"));
/// ```
pub struct AllOf<T: DescribeValue + ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

/// Compose an ordered list of matchers into their conjunction.
///
/// The [`all_of!`](macro@crate::all_of) macro boxes the arguments for you.
pub fn all_of<T: DescribeValue + ?Sized>(matchers: Vec<Box<dyn Matcher<T>>>) -> AllOf<T> {
    AllOf { matchers }
}

/// Compose matchers into an [`AllOf`] without writing the boxing by hand.
///
/// # Example
///
/// ```rust
/// use semblance::{equal_to, starts_with, AllOf, Matcher};
///
/// let matcher: AllOf<str> = semblance::all_of![equal_to("good"), starts_with("goo")];
/// assert!(matcher.matches("good"));
/// ```
#[macro_export]
macro_rules! all_of {
    ($($matcher:expr),+ $(,)?) => {
        $crate::all_of(::std::vec![
            $(::std::boxed::Box::new($matcher) as ::std::boxed::Box<dyn $crate::Matcher<_>>),+
        ])
    };
}

impl<T: DescribeValue + ?Sized> AllOf<T> {
    /// Re-evaluate in order and return the first failing sub-matcher.
    fn first_failing(&self, actual: &T) -> Option<&dyn Matcher<T>> {
        self.matchers
            .iter()
            .find(|matcher| !matcher.matches(actual))
            .map(|matcher| matcher.as_ref())
    }
}

impl<T: DescribeValue + ?Sized> SelfDescribing for AllOf<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " and ", ")", self.matchers.iter());
    }
}

impl<T: DescribeValue + ?Sized> Matcher<T> for AllOf<T> {
    fn matches(&self, actual: &T) -> bool {
        self.matchers.iter().all(|matcher| matcher.matches(actual))
    }

    fn describe_mismatch(&self, actual: &T, mismatch: &mut Description) {
        if let Some(failing) = self.first_failing(actual) {
            failing.describe_mismatch(actual, mismatch);
        }
    }
}
