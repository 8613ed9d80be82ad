//! Shared primitive types used across the reports.

/// Primary key of `production.product`.
pub type ProductId = i64;

/// Product model identifier. Nullable in the source schema.
pub type ProductModelId = i64;

/// Inventory location identifier.
pub type LocationId = i64;
