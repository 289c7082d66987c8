//! Property introspection: compile-time accessor tables standing in for
//! runtime reflection.
//!
//! A type opts into structural matching by implementing [`Inspect`]: a
//! display name plus an ordered table of named, zero-argument accessors that
//! render each property into a dynamic [`Value`]. The [`properties!`](macro@crate::properties)
//! macro writes the impl from `name => |value| accessor` pairs, so the table
//! is declared once, next to the type, and stays in declaration order.

use crate::description::{DescribeValue, Description};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::collections::HashSet;

/// A zero-argument property accessor.
///
/// Applied to a `&dyn Inspect`, it downcasts to the declaring type and
/// renders the property's current value.
pub type ReadProperty = fn(&dyn Inspect) -> Result<Value, PropertyError>;

/// A type whose named properties can be enumerated and read at runtime.
///
/// Implement this with the [`properties!`](macro@crate::properties) macro rather
/// than by hand; a hand-written table that pairs a name with an accessor for
/// a different type fails at evaluation time with
/// [`PropertyError::ForeignTarget`].
pub trait Inspect: Any {
    /// Display name of the concrete type, used in descriptions and
    /// mismatch reports.
    fn type_name(&self) -> &'static str;

    /// The declared property table, in declaration order.
    ///
    /// The order must be stable across repeated calls within one process;
    /// tables built by the macro are.
    fn properties(&self) -> Vec<PropertyDef>;

    /// Upcast used by accessors to recover the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// One entry of a property table: a name and its read accessor.
#[derive(Clone, Copy, Debug)]
pub struct PropertyDef {
    /// The property name; acts as a set key within one type.
    pub name: &'static str,
    /// Reads the property's current value from a target of the declaring
    /// type.
    pub read: ReadProperty,
}

/// Errors raised while building or applying property accessor tables.
///
/// These are never reported as a mismatch: construction errors surface when
/// a matcher is built, and accessor failures at evaluation time are fatal.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// A type declared two properties with the same name.
    #[error("type {type_name} declares more than one property named '{property}'")]
    DuplicateProperty {
        type_name: &'static str,
        property: &'static str,
    },

    /// An accessor ran but its value could not be rendered.
    #[error("could not render property '{property}' of {type_name}: {source}")]
    Read {
        property: &'static str,
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An accessor was applied to a value of a different concrete type.
    #[error("accessor for '{property}' expects a {expected}, was applied to a {actual}")]
    ForeignTarget {
        property: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// A property name was looked up on a type that does not declare it.
    #[error("type {type_name} has no property named '{property}'")]
    NoSuchProperty {
        type_name: &'static str,
        property: &'static str,
    },
}

// Lets the default `was <value>` mismatch apply to inspectable values.
impl DescribeValue for dyn Inspect {
    fn describe_value_to(&self, description: &mut Description) {
        description
            .append_text("<")
            .append_text(self.type_name())
            .append_text(">");
    }
}

/// Enumerate `value`'s properties, excluding `ignored` names.
///
/// Enumeration order is the table's declaration order. A table that
/// declares the same surviving name twice is rejected with
/// [`PropertyError::DuplicateProperty`].
pub fn properties_of(
    value: &dyn Inspect,
    ignored: &[String],
) -> Result<Vec<PropertyDef>, PropertyError> {
    let mut seen = HashSet::new();
    let mut surviving = Vec::new();
    for def in value.properties() {
        if ignored.iter().any(|name| name.as_str() == def.name) {
            continue;
        }
        if !seen.insert(def.name) {
            return Err(PropertyError::DuplicateProperty {
                type_name: value.type_name(),
                property: def.name,
            });
        }
        surviving.push(def);
    }
    Ok(surviving)
}

/// Render an accessor's result into a dynamic [`Value`].
///
/// Used by the accessors the [`properties!`](macro@crate::properties) macro
/// generates; a value that cannot be rendered is an accessor failure, not a
/// mismatch.
pub fn to_property_value<T: Serialize>(
    property: &'static str,
    type_name: &'static str,
    value: T,
) -> Result<Value, PropertyError> {
    serde_json::to_value(value).map_err(|source| PropertyError::Read {
        property,
        type_name,
        source,
    })
}

/// Apply a macro-declared accessor to a typed target.
///
/// Pins the accessor's parameter type to `&T` so closures written without an
/// explicit parameter annotation (the documented accessor form) type-check.
#[doc(hidden)]
pub fn read_property_value<'a, T: 'a, R, F: FnOnce(&'a T) -> R>(accessor: F, target: &'a T) -> R {
    accessor(target)
}

/// Implement [`Inspect`] for a concrete type from `name => accessor` pairs.
///
/// Each accessor is a closure from `&TheType` to any [`serde::Serialize`]
/// value; returning a reference to a field is enough. Property order in the
/// table is the order written here. An optional `as "Name"` clause overrides
/// the displayed type name (useful for path-qualified types).
///
/// # Example
///
/// ```rust
/// use semblance::{properties, same_structure_as, Matcher};
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
/// let actual = Job { title: "engineer".into(), level: 3 };
/// assert!(same_structure_as(&reference, &[]).matches(&actual));
/// ```
#[macro_export]
macro_rules! properties {
    ($ty:ty { $($name:ident => $read:expr),+ $(,)? }) => {
        $crate::properties!(@impl $ty, stringify!($ty), $($name => $read),+);
    };
    ($ty:ty as $display:literal { $($name:ident => $read:expr),+ $(,)? }) => {
        $crate::properties!(@impl $ty, $display, $($name => $read),+);
    };
    (@impl $ty:ty, $display:expr, $($name:ident => $read:expr),+) => {
        impl $crate::Inspect for $ty {
            fn type_name(&self) -> &'static str {
                $display
            }

            fn properties(&self) -> ::std::vec::Vec<$crate::PropertyDef> {
                ::std::vec![
                    $(
                        $crate::PropertyDef {
                            name: stringify!($name),
                            read: |target: &dyn $crate::Inspect| {
                                let typed = match target.as_any().downcast_ref::<$ty>() {
                                    ::std::option::Option::Some(typed) => typed,
                                    ::std::option::Option::None => {
                                        return ::std::result::Result::Err(
                                            $crate::PropertyError::ForeignTarget {
                                                property: stringify!($name),
                                                expected: $display,
                                                actual: target.type_name(),
                                            },
                                        );
                                    }
                                };
                                $crate::to_property_value(
                                    stringify!($name),
                                    $display,
                                    $crate::read_property_value::<$ty, _, _>($read, typed),
                                )
                            },
                        }
                    ),+
                ]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Sample {
        label: String,
        count: i64,
    }

    properties! {
        Sample {
            label => |sample| &sample.label,
            count => |sample| sample.count,
        }
    }

    struct Renamed {
        value: i64,
    }

    properties! {
        Renamed as "Widget" {
            value => |renamed| renamed.value,
        }
    }

    struct Twinned {
        left: i64,
        right: i64,
    }

    properties! {
        Twinned {
            twin => |twinned| twinned.left,
            twin => |twinned| twinned.right,
        }
    }

    fn names(defs: &[PropertyDef]) -> Vec<&'static str> {
        defs.iter().map(|def| def.name).collect()
    }

    #[test]
    fn test_enumeration_follows_declaration_order() {
        let sample = Sample {
            label: "a".into(),
            count: 1,
        };
        let defs = properties_of(&sample, &[]).unwrap();
        assert_eq!(names(&defs), vec!["label", "count"]);
    }

    #[test]
    fn test_enumeration_is_stable_across_calls() {
        let sample = Sample {
            label: "a".into(),
            count: 1,
        };
        let first = names(&properties_of(&sample, &[]).unwrap());
        let second = names(&properties_of(&sample, &[]).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_accessors_render_current_values() {
        let sample = Sample {
            label: "a".into(),
            count: 7,
        };
        let defs = properties_of(&sample, &[]).unwrap();
        assert_eq!((defs[0].read)(&sample).unwrap(), json!("a"));
        assert_eq!((defs[1].read)(&sample).unwrap(), json!(7));
    }

    #[test]
    fn test_ignored_names_are_excluded() {
        let sample = Sample {
            label: "a".into(),
            count: 1,
        };
        let defs = properties_of(&sample, &["label".to_string()]).unwrap();
        assert_eq!(names(&defs), vec!["count"]);
    }

    #[test]
    fn test_ignoring_unknown_names_is_accepted() {
        let sample = Sample {
            label: "a".into(),
            count: 1,
        };
        let defs = properties_of(&sample, &["no_such".to_string()]).unwrap();
        assert_eq!(names(&defs), vec!["label", "count"]);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let twinned = Twinned { left: 1, right: 2 };
        let err = properties_of(&twinned, &[]).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::DuplicateProperty {
                type_name: "Twinned",
                property: "twin",
            }
        ));
    }

    #[test]
    fn test_ignoring_a_duplicate_name_removes_the_conflict() {
        let twinned = Twinned { left: 1, right: 2 };
        let defs = properties_of(&twinned, &["twin".to_string()]).unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn test_accessor_applied_to_foreign_type_fails() {
        let sample = Sample {
            label: "a".into(),
            count: 1,
        };
        let renamed = Renamed { value: 1 };
        let defs = properties_of(&sample, &[]).unwrap();
        let err = (defs[0].read)(&renamed).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::ForeignTarget {
                property: "label",
                expected: "Sample",
                actual: "Widget",
            }
        ));
    }

    #[test]
    fn test_display_name_override() {
        let renamed = Renamed { value: 1 };
        assert_eq!(renamed.type_name(), "Widget");
    }

    #[test]
    fn test_inspectable_values_render_as_their_type_name() {
        let sample = Sample {
            label: "a".into(),
            count: 1,
        };
        let mut description = Description::new();
        description.append_value(&sample as &dyn Inspect);
        assert_eq!(description.as_str(), "<Sample>");
    }
}
