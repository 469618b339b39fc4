//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single line item asking for more units than the catalog holds.
///
/// Shortages are reported per item so the caller can show exactly which
/// lines block the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortage {
    pub product_id: ProductId,
    pub name: String,
    pub requested: i64,
    pub available: i64,
}

impl core::fmt::Display for StockShortage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} (requested {}, available {})",
            self.name, self.requested, self.available
        )
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An invoice draft was committed without a resolvable customer.
    #[error("no customer selected")]
    NoCustomer,

    /// An invoice draft was committed without any line items.
    #[error("invoice has no line items")]
    EmptyItems,

    /// One or more line items exceed the available stock.
    #[error("insufficient stock: {}", format_shortages(.0))]
    InsufficientStock(Vec<StockShortage>),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

fn format_shortages(shortages: &[StockShortage]) -> String {
    shortages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_lists_every_shortage() {
        let err = DomainError::InsufficientStock(vec![
            StockShortage {
                product_id: ProductId::new(),
                name: "Phone case".to_string(),
                requested: 3,
                available: 1,
            },
            StockShortage {
                product_id: ProductId::new(),
                name: "Charger".to_string(),
                requested: 2,
                available: 0,
            },
        ]);

        let msg = err.to_string();
        assert!(msg.contains("Phone case (requested 3, available 1)"));
        assert!(msg.contains("Charger (requested 2, available 0)"));
    }
}
