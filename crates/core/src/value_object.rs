//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two value
/// objects with the same attribute values are equal, and "modifying" one
/// means constructing a new one. `Money` and a delivery address are value
/// objects; an `Order` is not (it has identity).
///
/// The bounds are the minimum a value should carry: cheap to copy around,
/// comparable by value, debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
