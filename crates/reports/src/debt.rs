use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dukkan_core::CustomerId;
use dukkan_invoicing::{Invoice, InvoiceType};

/// Per-customer outstanding balance across non-installment invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub total_debt: i64,
    pub invoice_count: u32,
}

/// Fold the invoice book into per-customer debt records.
///
/// Only cash/credit invoices with a positive remainder count. Installment
/// invoices are excluded on purpose: their outstanding balance is tracked
/// per-installment by the ledger, not as a lump debt figure.
///
/// Records appear in first-encounter order over the invoice book, so with the
/// engine's most-recent-first ordering the most recently billed debtors come
/// first.
pub fn aggregate_debt(invoices: &[Invoice]) -> Vec<DebtRecord> {
    let mut index: HashMap<CustomerId, usize> = HashMap::new();
    let mut records: Vec<DebtRecord> = Vec::new();

    for invoice in invoices {
        if invoice.kind == InvoiceType::Installment || invoice.remaining_amount <= 0 {
            continue;
        }

        match index.get(&invoice.customer_id) {
            Some(&slot) => {
                records[slot].total_debt += invoice.remaining_amount;
                records[slot].invoice_count += 1;
            }
            None => {
                index.insert(invoice.customer_id, records.len());
                records.push(DebtRecord {
                    customer_id: invoice.customer_id,
                    customer_name: invoice.customer_name.clone(),
                    total_debt: invoice.remaining_amount,
                    invoice_count: 1,
                });
            }
        }
    }

    records
}
