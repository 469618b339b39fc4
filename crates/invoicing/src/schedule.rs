use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use dukkan_core::{CustomerId, InstallmentId, InvoiceId};

/// Payment state of a single installment.
///
/// Transitions are user-triggered (`unpaid → paid`, `late → paid`); nothing
/// here moves an installment to `late` on its own. Lateness is applied by the
/// explicit [`crate::ledger::mark_overdue`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Unpaid,
    Late,
    Paid,
}

/// One scheduled repayment, embedded in its owning invoice.
///
/// Customer id/name are denormalized so receipts and the ledger listing can
/// render without a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub id: InstallmentId,
    pub invoice_id: InvoiceId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

/// Integer ceiling division for `denominator > 0`, matching the ceiling of
/// the real quotient (negative numerators round toward zero).
fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    if numerator >= 0 {
        (numerator + denominator - 1) / denominator
    } else {
        numerator / denominator
    }
}

/// Due date helper: `start` advanced by `months` calendar months, clamped to
/// the end of shorter months (Jan 31 + 1 month = Feb 28/29).
fn advance_months(start: NaiveDate, months: u32) -> NaiveDate {
    start.checked_add_months(Months::new(months)).unwrap_or(start)
}

/// Generate a repayment schedule of `months` installments.
///
/// Every period's amount is `ceil(remaining / months)`, independently
/// rounded; the schedule does **not** correct the final installment, so the
/// scheduled total may exceed `remaining` by up to `months - 1` currency
/// units. That overshoot is a contract of the schedule, asserted by the test
/// suite — do not "fix" it here.
///
/// `invoice_id` is left nil; the engine back-fills it once the owning
/// invoice's id is assigned. A `months` of zero is treated as one.
pub fn generate_schedule(
    remaining: i64,
    months: u32,
    start_date: NaiveDate,
    customer_id: CustomerId,
    customer_name: &str,
) -> Vec<Installment> {
    let months = months.max(1);
    let monthly_amount = ceil_div(remaining, i64::from(months));

    (1..=months)
        .map(|offset| Installment {
            id: InstallmentId::new(),
            invoice_id: InvoiceId::nil(),
            customer_id,
            customer_name: customer_name.to_owned(),
            amount: monthly_amount,
            due_date: advance_months(start_date, offset),
            status: InstallmentStatus::Unpaid,
            paid_date: None,
        })
        .collect()
}
