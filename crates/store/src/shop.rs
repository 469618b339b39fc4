use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use dukkan_catalog::{Catalog, NewProduct, Product, ProductPatch};
use dukkan_core::{CustomerId, DomainError, InstallmentId, InvoiceId, ProductId};
use dukkan_customers::{Customer, CustomerDirectory, CustomerPatch, NewCustomer};
use dukkan_events::{EventBus, InMemoryEventBus, Subscription};
use dukkan_invoicing::{
    Installment, InstallmentStatus, Invoice, InvoiceDraft, InvoiceEngine, StatusFilter, ledger,
};

use crate::change::ChangeEvent;
use crate::gateway::{StorageGateway, StorageKey};
use crate::settings::ShopSettings;
use crate::snapshot::BackupSnapshot;

/// The single owner of all shop state.
///
/// Every mutation goes through a method here: the method delegates to the
/// owning component, persists the affected collection through the gateway,
/// and publishes a [`ChangeEvent`] for derived views. Persistence is
/// fire-and-forget — a gateway failure is logged and does not roll back the
/// in-memory commit.
///
/// Single-threaded by design: one writer, synchronous methods, no locking.
pub struct ShopStore {
    catalog: Catalog,
    customers: CustomerDirectory,
    engine: InvoiceEngine,
    settings: ShopSettings,
    bus: InMemoryEventBus<ChangeEvent>,
    gateway: Arc<dyn StorageGateway>,
}

impl ShopStore {
    /// Seed all collections from the gateway, falling back to defaults for
    /// missing keys. A malformed stored value is logged and replaced by the
    /// default rather than aborting startup.
    pub fn load(gateway: Arc<dyn StorageGateway>) -> Self {
        let customers: Vec<Customer> = read_or_default(&*gateway, StorageKey::Customers);
        let invoices: Vec<Invoice> = read_or_default(&*gateway, StorageKey::Invoices);
        let products: Vec<Product> = read_or_default(&*gateway, StorageKey::Products);
        let settings: ShopSettings = read_or_default(&*gateway, StorageKey::Settings);

        tracing::info!(
            customers = customers.len(),
            invoices = invoices.len(),
            products = products.len(),
            "shop store loaded"
        );

        Self {
            catalog: Catalog::from_products(products),
            customers: CustomerDirectory::from_customers(customers),
            engine: InvoiceEngine::from_invoices(invoices),
            settings,
            bus: InMemoryEventBus::new(),
            gateway,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> Subscription<ChangeEvent> {
        self.bus.subscribe()
    }

    // --- read access -------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customers(&self) -> &[Customer] {
        self.customers.list()
    }

    pub fn invoices(&self) -> &[Invoice] {
        self.engine.invoices()
    }

    pub fn invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.engine.get(id)
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }

    pub fn list_installments(&self, filter: StatusFilter) -> Vec<&Installment> {
        ledger::list_installments(self.engine.invoices(), filter)
    }

    // --- customers ---------------------------------------------------------

    pub fn add_customer(&mut self, new: NewCustomer, now: DateTime<Utc>) -> Customer {
        let customer = self.customers.add(new, now).clone();
        tracing::info!(customer = %customer.id, "customer added");
        self.committed(StorageKey::Customers, now);
        customer
    }

    pub fn update_customer(
        &mut self,
        id: CustomerId,
        patch: CustomerPatch,
        now: DateTime<Utc>,
    ) -> bool {
        let changed = self.customers.update(id, patch);
        if changed {
            self.committed(StorageKey::Customers, now);
        }
        changed
    }

    pub fn remove_customer(&mut self, id: CustomerId, now: DateTime<Utc>) -> bool {
        let removed = self.customers.remove(id);
        if removed {
            tracing::info!(customer = %id, "customer removed");
            self.committed(StorageKey::Customers, now);
        }
        removed
    }

    // --- products ----------------------------------------------------------

    pub fn add_product(&mut self, new: NewProduct, now: DateTime<Utc>) -> Product {
        let product = self.catalog.add(new).clone();
        tracing::info!(product = %product.id, stock = product.stock, "product added");
        self.committed(StorageKey::Products, now);
        product
    }

    pub fn update_product(
        &mut self,
        id: ProductId,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> bool {
        let changed = self.catalog.update(id, patch);
        if changed {
            self.committed(StorageKey::Products, now);
        }
        changed
    }

    pub fn remove_product(&mut self, id: ProductId, now: DateTime<Utc>) -> bool {
        let removed = self.catalog.remove(id);
        if removed {
            tracing::info!(product = %id, "product removed");
            self.committed(StorageKey::Products, now);
        }
        removed
    }

    // --- invoices ----------------------------------------------------------

    /// Commit a draft sale. See [`InvoiceEngine::create`] for the validation
    /// and atomicity contract; on success both the invoice book and the
    /// product stock are persisted.
    pub fn create_invoice(
        &mut self,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> Result<Invoice, DomainError> {
        let invoice = self
            .engine
            .create(draft, &mut self.catalog, &self.customers)?
            .clone();

        tracing::info!(
            invoice = %invoice.id,
            customer = %invoice.customer_id,
            kind = ?invoice.kind,
            final_amount = invoice.final_amount,
            "invoice created"
        );
        self.committed(StorageKey::Products, now);
        self.committed(StorageKey::Invoices, now);
        Ok(invoice)
    }

    /// Replace a stored invoice wholesale (no stock re-diff; see the engine
    /// docs for the documented gaps).
    pub fn update_invoice(&mut self, invoice: Invoice, now: DateTime<Utc>) -> bool {
        let replaced = self.engine.update(invoice);
        if replaced {
            self.committed(StorageKey::Invoices, now);
        }
        replaced
    }

    /// Delete an invoice and its installments. Stock is not restored.
    pub fn remove_invoice(&mut self, id: InvoiceId, now: DateTime<Utc>) -> bool {
        let removed = self.engine.remove(id);
        if removed {
            tracing::info!(invoice = %id, "invoice removed");
            self.committed(StorageKey::Invoices, now);
        }
        removed
    }

    // --- installment ledger -------------------------------------------------

    /// Set one installment's payment status; `now`'s date stamps `paid_date`.
    pub fn set_installment_status(
        &mut self,
        invoice_id: InvoiceId,
        installment_id: InstallmentId,
        status: InstallmentStatus,
        now: DateTime<Utc>,
    ) -> bool {
        let changed = ledger::set_status(
            self.engine.invoices_mut(),
            invoice_id,
            installment_id,
            status,
            now.date_naive(),
        );
        if changed {
            tracing::info!(
                invoice = %invoice_id,
                installment = %installment_id,
                status = ?status,
                "installment status set"
            );
            self.committed(StorageKey::Invoices, now);
        }
        changed
    }

    /// Run the on-demand lateness pass over every schedule.
    pub fn mark_overdue(&mut self, now: DateTime<Utc>) -> usize {
        let flagged = ledger::mark_overdue(self.engine.invoices_mut(), now.date_naive());
        if flagged > 0 {
            tracing::info!(flagged, "installments flagged late");
            self.committed(StorageKey::Invoices, now);
        }
        flagged
    }

    // --- settings ----------------------------------------------------------

    pub fn save_settings(&mut self, settings: ShopSettings, now: DateTime<Utc>) {
        self.settings = settings;
        self.committed(StorageKey::Settings, now);
    }

    // --- backup / restore ---------------------------------------------------

    pub fn export_snapshot(&self, now: DateTime<Utc>) -> BackupSnapshot {
        BackupSnapshot {
            customers: self.customers.list().to_vec(),
            invoices: self.engine.invoices().to_vec(),
            products: self.catalog.list().to_vec(),
            settings: self.settings.clone(),
            timestamp: now,
        }
    }

    /// Replace all four collections with the snapshot's contents.
    ///
    /// Structural validation already happened in
    /// [`BackupSnapshot::from_json`]; a snapshot that parsed is applied
    /// unconditionally, with no merging against existing state.
    pub fn import_snapshot(&mut self, snapshot: BackupSnapshot, now: DateTime<Utc>) {
        self.customers = CustomerDirectory::from_customers(snapshot.customers);
        self.engine = InvoiceEngine::from_invoices(snapshot.invoices);
        self.catalog = Catalog::from_products(snapshot.products);
        self.settings = snapshot.settings;

        tracing::info!(taken_at = %snapshot.timestamp, "snapshot imported");
        self.committed(StorageKey::Customers, now);
        self.committed(StorageKey::Invoices, now);
        self.committed(StorageKey::Products, now);
        self.committed(StorageKey::Settings, now);
    }

    // --- commit plumbing ----------------------------------------------------

    fn committed(&self, key: StorageKey, now: DateTime<Utc>) {
        if let Err(err) = self.persist(key) {
            tracing::warn!(key = key.as_str(), error = %err, "persist after commit failed");
        }
        if self.bus.publish(ChangeEvent::for_key(key, now)).is_err() {
            tracing::warn!(key = key.as_str(), "change notification dropped");
        }
    }

    fn persist(&self, key: StorageKey) -> anyhow::Result<()> {
        let value = match key {
            StorageKey::Customers => serde_json::to_value(self.customers.list()),
            StorageKey::Invoices => serde_json::to_value(self.engine.invoices()),
            StorageKey::Products => serde_json::to_value(self.catalog.list()),
            StorageKey::Settings => serde_json::to_value(&self.settings),
        }
        .context("serializing collection")?;

        self.gateway
            .put(key, value)
            .context("storage gateway write")?;
        Ok(())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(
    gateway: &dyn StorageGateway,
    key: StorageKey,
) -> T {
    match gateway.get(key) {
        None => T::default(),
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(
                    key = key.as_str(),
                    error = %err,
                    "stored value is malformed, using defaults"
                );
                T::default()
            }
        },
    }
}
