//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A product's price or the active sort configuration are
//! value objects, while the product itself is an entity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(9.5), Price(9.5));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
