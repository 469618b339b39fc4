//! Invoice Engine and Installment Ledger.
//!
//! The financial core: invoice totals, installment schedule generation,
//! atomic invoice commit (with its stock side effect), and per-installment
//! payment state.

pub mod engine;
pub mod invoice;
pub mod ledger;
pub mod schedule;

pub use engine::InvoiceEngine;
pub use invoice::{Invoice, InvoiceDraft, InvoiceType, LineItem, Totals, compute_totals};
pub use ledger::StatusFilter;
pub use schedule::{Installment, InstallmentStatus, generate_schedule};
