//! Installment Ledger: payment-state transitions and receipt aggregates over
//! the schedules embedded in installment invoices.
//!
//! The ledger mutates installment status only. It never recomputes the owning
//! invoice's `remaining_amount` — that field is a creation-time snapshot, and
//! the live figure is derived on demand by [`amount_paid_to_date`] /
//! [`outstanding_balance`].

use chrono::NaiveDate;

use dukkan_core::{InstallmentId, InvoiceId};

use crate::invoice::{Invoice, InvoiceType};
use crate::schedule::{Installment, InstallmentStatus};

/// Filter for [`list_installments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(InstallmentStatus),
}

impl StatusFilter {
    fn matches(self, status: InstallmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == wanted,
        }
    }
}

/// Set the status of one installment inside one invoice.
///
/// `paid_date` is stamped with `today` when the status becomes `Paid` and
/// cleared otherwise. Unknown invoice or installment ids are a no-op
/// (`false`) — callers source ids from the engine's own listings.
pub fn set_status(
    invoices: &mut [Invoice],
    invoice_id: InvoiceId,
    installment_id: InstallmentId,
    status: InstallmentStatus,
    today: NaiveDate,
) -> bool {
    let Some(invoice) = invoices.iter_mut().find(|inv| inv.id == invoice_id) else {
        return false;
    };
    let Some(installment) = invoice
        .installments
        .iter_mut()
        .find(|inst| inst.id == installment_id)
    else {
        return false;
    };

    installment.status = status;
    installment.paid_date = match status {
        InstallmentStatus::Paid => Some(today),
        InstallmentStatus::Unpaid | InstallmentStatus::Late => None,
    };
    true
}

/// The explicit lateness reconciliation pass.
///
/// Flags every `Unpaid` installment whose due date has passed as `Late` and
/// returns how many were flagged. The engine never runs this implicitly; the
/// calling surface decides when (e.g. once at startup or before rendering the
/// ledger).
pub fn mark_overdue(invoices: &mut [Invoice], today: NaiveDate) -> usize {
    let mut flagged = 0;
    for invoice in invoices.iter_mut() {
        for installment in &mut invoice.installments {
            if installment.status == InstallmentStatus::Unpaid && installment.due_date < today {
                installment.status = InstallmentStatus::Late;
                flagged += 1;
            }
        }
    }
    flagged
}

/// Everything the customer has handed over on this invoice so far: the
/// creation-time down payment plus every installment marked paid.
pub fn amount_paid_to_date(invoice: &Invoice) -> i64 {
    let paid_installments: i64 = invoice
        .installments
        .iter()
        .filter(|inst| inst.status == InstallmentStatus::Paid)
        .map(|inst| inst.amount)
        .sum();
    invoice.paid_amount + paid_installments
}

/// The live balance for receipts: `final_amount` minus everything paid so far.
pub fn outstanding_balance(invoice: &Invoice) -> i64 {
    invoice.final_amount - amount_paid_to_date(invoice)
}

/// Flatten the schedules of all installment-type invoices, optionally
/// filtered by status. Order is stable: invoice order, then schedule order.
pub fn list_installments(invoices: &[Invoice], filter: StatusFilter) -> Vec<&Installment> {
    invoices
        .iter()
        .filter(|inv| inv.kind == InvoiceType::Installment)
        .flat_map(|inv| inv.installments.iter())
        .filter(|inst| filter.matches(inst.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dukkan_core::{CustomerId, LineItemId};

    use crate::invoice::LineItem;
    use crate::schedule::generate_schedule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn installment_invoice(remaining: i64, months: u32, paid_amount: i64) -> Invoice {
        let customer_id = CustomerId::new();
        let id = InvoiceId::new();
        let mut installments =
            generate_schedule(remaining, months, date(2024, 1, 15), customer_id, "Ahmed");
        for installment in &mut installments {
            installment.invoice_id = id;
        }

        Invoice {
            id,
            customer_id,
            customer_name: "Ahmed".to_string(),
            date: date(2024, 1, 15),
            kind: InvoiceType::Installment,
            items: vec![LineItem {
                id: LineItemId::new(),
                product_id: None,
                name: "Phone".to_string(),
                price: remaining + paid_amount,
                quantity: 1,
                buy_price: None,
            }],
            total_amount: remaining + paid_amount,
            discount: 0,
            final_amount: remaining + paid_amount,
            paid_amount,
            remaining_amount: remaining,
            notes: None,
            months: Some(months),
            installments,
        }
    }

    #[test]
    fn paying_an_installment_stamps_paid_date() {
        let mut invoices = vec![installment_invoice(600_000, 6, 0)];
        let invoice_id = invoices[0].id;
        let installment_id = invoices[0].installments[0].id;
        let today = date(2024, 2, 20);

        assert!(set_status(
            &mut invoices,
            invoice_id,
            installment_id,
            InstallmentStatus::Paid,
            today,
        ));

        let installment = &invoices[0].installments[0];
        assert_eq!(installment.status, InstallmentStatus::Paid);
        assert_eq!(installment.paid_date, Some(today));
    }

    #[test]
    fn reverting_to_unpaid_clears_paid_date() {
        let mut invoices = vec![installment_invoice(600_000, 6, 0)];
        let invoice_id = invoices[0].id;
        let installment_id = invoices[0].installments[0].id;

        set_status(
            &mut invoices,
            invoice_id,
            installment_id,
            InstallmentStatus::Paid,
            date(2024, 2, 20),
        );
        set_status(
            &mut invoices,
            invoice_id,
            installment_id,
            InstallmentStatus::Unpaid,
            date(2024, 2, 21),
        );

        let installment = &invoices[0].installments[0];
        assert_eq!(installment.status, InstallmentStatus::Unpaid);
        assert_eq!(installment.paid_date, None);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut invoices = vec![installment_invoice(600_000, 6, 0)];
        let invoice_id = invoices[0].id;

        assert!(!set_status(
            &mut invoices,
            InvoiceId::new(),
            InstallmentId::new(),
            InstallmentStatus::Paid,
            date(2024, 2, 20),
        ));
        assert!(!set_status(
            &mut invoices,
            invoice_id,
            InstallmentId::new(),
            InstallmentStatus::Paid,
            date(2024, 2, 20),
        ));
    }

    #[test]
    fn paying_does_not_touch_the_invoice_snapshot() {
        let mut invoices = vec![installment_invoice(1_000_000, 6, 0)];
        let invoice_id = invoices[0].id;
        let installment_id = invoices[0].installments[0].id;
        let amount = invoices[0].installments[0].amount;

        let before = amount_paid_to_date(&invoices[0]);
        set_status(
            &mut invoices,
            invoice_id,
            installment_id,
            InstallmentStatus::Paid,
            date(2024, 2, 20),
        );

        // The derived figure moves by exactly the installment amount...
        assert_eq!(amount_paid_to_date(&invoices[0]), before + amount);
        // ...while the stored snapshot stays put.
        assert_eq!(invoices[0].remaining_amount, 1_000_000);
    }

    #[test]
    fn receipt_aggregates_include_down_payment() {
        let mut invoices = vec![installment_invoice(600_000, 6, 400_000)];
        let invoice_id = invoices[0].id;
        let installment_id = invoices[0].installments[0].id;
        let amount = invoices[0].installments[0].amount;

        set_status(
            &mut invoices,
            invoice_id,
            installment_id,
            InstallmentStatus::Paid,
            date(2024, 2, 20),
        );

        assert_eq!(amount_paid_to_date(&invoices[0]), 400_000 + amount);
        assert_eq!(
            outstanding_balance(&invoices[0]),
            1_000_000 - (400_000 + amount)
        );
    }

    #[test]
    fn mark_overdue_flags_only_past_due_unpaid() {
        let mut invoices = vec![installment_invoice(600_000, 6, 0)];
        let invoice_id = invoices[0].id;
        let paid_id = invoices[0].installments[0].id;

        // First installment (due 2024-02-15) already paid.
        set_status(
            &mut invoices,
            invoice_id,
            paid_id,
            InstallmentStatus::Paid,
            date(2024, 2, 10),
        );

        // Between the third and fourth due dates.
        let flagged = mark_overdue(&mut invoices, date(2024, 4, 20));
        assert_eq!(flagged, 2);

        let statuses: Vec<InstallmentStatus> = invoices[0]
            .installments
            .iter()
            .map(|inst| inst.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                InstallmentStatus::Paid,
                InstallmentStatus::Late,
                InstallmentStatus::Late,
                InstallmentStatus::Unpaid,
                InstallmentStatus::Unpaid,
                InstallmentStatus::Unpaid,
            ]
        );

        // The pass is idempotent.
        assert_eq!(mark_overdue(&mut invoices, date(2024, 4, 20)), 0);
    }

    #[test]
    fn listing_flattens_in_invoice_then_schedule_order() {
        let newer = installment_invoice(300_000, 3, 0);
        let older = installment_invoice(200_000, 2, 0);
        let invoices = vec![newer.clone(), older.clone()];

        let all = list_installments(&invoices, StatusFilter::All);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].id, newer.installments[0].id);
        assert_eq!(all[2].id, newer.installments[2].id);
        assert_eq!(all[3].id, older.installments[0].id);
    }

    #[test]
    fn listing_filters_by_status_and_skips_non_installment_invoices() {
        let mut schedule_invoice = installment_invoice(300_000, 3, 0);
        let invoice_id = schedule_invoice.id;
        let paid_id = schedule_invoice.installments[1].id;

        let mut credit = installment_invoice(100_000, 1, 0);
        credit.kind = InvoiceType::Credit;

        let mut invoices = vec![schedule_invoice, credit];
        set_status(
            &mut invoices,
            invoice_id,
            paid_id,
            InstallmentStatus::Paid,
            date(2024, 3, 1),
        );

        let paid = list_installments(&invoices, StatusFilter::Only(InstallmentStatus::Paid));
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].id, paid_id);

        let unpaid = list_installments(&invoices, StatusFilter::Only(InstallmentStatus::Unpaid));
        assert_eq!(unpaid.len(), 2);

        // The credit invoice's (anomalous) embedded schedule is never listed.
        let all = list_installments(&invoices, StatusFilter::All);
        assert_eq!(all.len(), 3);
    }
}
