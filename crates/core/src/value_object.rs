//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Price bounds,
/// price ranges, coupons and device capabilities are value objects; to
/// "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceBounds { min_price: u64, max_price: u64 }
///
/// impl ValueObject for PriceBounds {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
