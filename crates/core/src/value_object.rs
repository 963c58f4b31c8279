//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own; two instances with the same
/// attribute values are interchangeable. Report rows and batch snapshots are
/// value objects, the `Product` that owns the live ledger is not.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct StockSnapshot {
///     stock_level: u64,
///     sales: u64,
/// }
///
/// impl ValueObject for StockSnapshot {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
