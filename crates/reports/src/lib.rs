//! Derived read-only views over the invoice book: per-customer debt and
//! dashboard statistics.
//!
//! Nothing in this crate mutates engine state; every function is a pure fold
//! over the collections it is handed. Dependents typically recompute on each
//! store change notification.

pub mod debt;
pub mod stats;

pub use debt::{DebtRecord, aggregate_debt};
pub use stats::{DailySales, Stats, daily_sales};
