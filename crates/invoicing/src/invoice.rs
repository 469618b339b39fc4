use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dukkan_core::{CustomerId, InvoiceId, LineItemId, ProductId};

use crate::schedule::Installment;

/// How the sale is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    /// Fully paid at creation; `paid_amount` is forced to `final_amount`.
    Cash,
    /// Partially or fully unpaid, tracked as a single outstanding balance.
    Credit,
    /// Outstanding balance split into a fixed monthly schedule.
    Installment,
}

/// An invoice line: a snapshot of product name and price at sale time.
///
/// `product_id` links back to the catalog for stock accounting but the
/// snapshot stands on its own — later product edits or deletions do not
/// touch it. `buy_price` is carried for profit reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<i64>,
}

impl LineItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity
    }
}

/// Derived financial fields of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub total_amount: i64,
    pub final_amount: i64,
    pub paid_amount: i64,
    pub remaining_amount: i64,
}

/// Compute an invoice's financial fields from its draft inputs.
///
/// - `total_amount = Σ price * quantity`
/// - `final_amount = max(0, total_amount - discount)`
/// - cash sales force `paid_amount = final_amount`
/// - `remaining_amount = final_amount - paid_amount`, deliberately unclamped:
///   an overpayment yields a negative remainder (a credit carried on the
///   invoice) rather than being silently zeroed.
///
/// Pure function; callers re-invoke it on every draft change so the cash
/// override is an explicit recompute, not a hidden reactive side effect.
pub fn compute_totals(
    items: &[LineItem],
    discount: i64,
    paid_amount: i64,
    kind: InvoiceType,
) -> Totals {
    let total_amount: i64 = items.iter().map(LineItem::line_total).sum();
    let final_amount = (total_amount - discount).max(0);
    let paid_amount = match kind {
        InvoiceType::Cash => final_amount,
        InvoiceType::Credit | InvoiceType::Installment => paid_amount,
    };

    Totals {
        total_amount,
        final_amount,
        paid_amount,
        remaining_amount: final_amount - paid_amount,
    }
}

/// A committed invoice.
///
/// Financial fields are creation-time snapshots. In particular
/// `remaining_amount` is **not** a live balance: installment payments are
/// tracked on the schedule and rolled up on demand by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: InvoiceType,
    pub items: Vec<LineItem>,
    pub total_amount: i64,
    pub discount: i64,
    pub final_amount: i64,
    pub paid_amount: i64,
    pub remaining_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub installments: Vec<Installment>,
}

/// A not-yet-committed invoice as assembled by the sales surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: Option<CustomerId>,
    pub date: NaiveDate,
    pub kind: InvoiceType,
    pub items: Vec<LineItem>,
    pub discount: i64,
    /// Ignored for cash drafts; [`compute_totals`] overrides it.
    pub paid_amount: i64,
    pub months: Option<u32>,
    pub notes: Option<String>,
}
