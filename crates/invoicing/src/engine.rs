use dukkan_catalog::Catalog;
use dukkan_core::{DomainError, InvoiceId, StockShortage};
use dukkan_customers::CustomerDirectory;

use crate::invoice::{Invoice, InvoiceDraft, InvoiceType, compute_totals};
use crate::schedule::generate_schedule;

/// Owns the invoice collection and commits sales.
///
/// Committing is the only operation with side effects beyond this collection:
/// it decrements catalog stock. Everything is validated up front so a refusal
/// leaves both the catalog and the collection untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceEngine {
    invoices: Vec<Invoice>,
}

impl InvoiceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records (stored order preserved).
    pub fn from_invoices(invoices: Vec<Invoice>) -> Self {
        Self { invoices }
    }

    /// Invoices, most recently created first.
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Mutable access for the installment ledger's status transitions.
    pub fn invoices_mut(&mut self) -> &mut [Invoice] {
        &mut self.invoices
    }

    pub fn get(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == id)
    }

    /// Validate and commit a draft.
    ///
    /// Validation order: customer, items, stock (all shortages collected and
    /// reported together). On success the engine assigns a fresh id,
    /// decrements stock for every line with a resolvable product id,
    /// generates and back-fills the installment schedule where applicable,
    /// and prepends the invoice (most recent first).
    ///
    /// All-or-nothing: a failed draft causes no stock mutation and no insert.
    pub fn create(
        &mut self,
        draft: InvoiceDraft,
        catalog: &mut Catalog,
        customers: &CustomerDirectory,
    ) -> Result<&Invoice, DomainError> {
        let customer_id = draft.customer_id.ok_or(DomainError::NoCustomer)?;
        let customer = customers.get(customer_id).ok_or(DomainError::NoCustomer)?;

        if draft.items.is_empty() {
            return Err(DomainError::EmptyItems);
        }

        let mut shortages = Vec::new();
        for item in &draft.items {
            let Some(product_id) = item.product_id else {
                // Free-form line (no catalog link): nothing to check or decrement.
                continue;
            };
            if let Some(product) = catalog.get(product_id) {
                if product.stock < item.quantity {
                    shortages.push(StockShortage {
                        product_id,
                        name: product.name.clone(),
                        requested: item.quantity,
                        available: product.stock,
                    });
                }
            }
        }
        if !shortages.is_empty() {
            return Err(DomainError::InsufficientStock(shortages));
        }

        let totals = compute_totals(&draft.items, draft.discount, draft.paid_amount, draft.kind);

        let id = InvoiceId::new();
        let mut installments = Vec::new();
        if draft.kind == InvoiceType::Installment {
            installments = generate_schedule(
                totals.remaining_amount,
                draft.months.unwrap_or(1),
                draft.date,
                customer_id,
                &customer.name,
            );
            for installment in &mut installments {
                installment.invoice_id = id;
            }
        }

        // Point of no return: everything below must succeed unconditionally.
        for item in &draft.items {
            if let Some(product_id) = item.product_id {
                catalog.adjust_stock(product_id, -item.quantity);
            }
        }

        let invoice = Invoice {
            id,
            customer_id,
            customer_name: customer.name.clone(),
            date: draft.date,
            kind: draft.kind,
            items: draft.items,
            total_amount: totals.total_amount,
            discount: draft.discount,
            final_amount: totals.final_amount,
            paid_amount: totals.paid_amount,
            remaining_amount: totals.remaining_amount,
            notes: draft.notes,
            months: draft.months,
            installments,
        };
        self.invoices.insert(0, invoice);
        Ok(&self.invoices[0])
    }

    /// Replace the stored invoice matching `invoice.id` wholesale, including
    /// its installment list.
    ///
    /// Known limitation, kept on purpose: no stock re-diff against the
    /// previous item list, and regenerated installments lose their payment
    /// history. Unknown ids are a no-op.
    pub fn update(&mut self, invoice: Invoice) -> bool {
        match self.invoices.iter_mut().find(|inv| inv.id == invoice.id) {
            Some(slot) => {
                *slot = invoice;
                true
            }
            None => false,
        }
    }

    /// Remove an invoice and its embedded installments.
    ///
    /// Stock is **not** restored: adjustments happen on create only, a known
    /// asymmetry (see DESIGN.md).
    pub fn remove(&mut self, id: InvoiceId) -> bool {
        let before = self.invoices.len();
        self.invoices.retain(|inv| inv.id != id);
        self.invoices.len() != before
    }
}
