//! Structural comparison: property introspection and the
//! "same property values as" matcher.
//!
//! A value opts into structural matching by declaring a property table with
//! the [`properties!`](macro@crate::properties) macro. [`same_structure_as`]
//! then snapshots a reference value's properties and matches any value
//! whose properties carry the same values, with no extras, reporting the
//! first difference precisely.

mod properties;
mod same_structure;

pub use properties::{
    properties_of, read_property_value, to_property_value, Inspect, PropertyDef, PropertyError,
    ReadProperty,
};
pub use same_structure::{same_structure_as, SameStructureAs};
