use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dukkan_core::CustomerId;

/// A customer record.
///
/// Invoices snapshot the customer's name at sale time; editing or deleting a
/// customer here never rewrites those snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`CustomerDirectory::add`]; the directory assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Field-wise merge patch for [`CustomerDirectory::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Owns the customer collection, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records (stored order preserved).
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Register a customer with a fresh id, prepended (newest first).
    pub fn add(&mut self, new: NewCustomer, created_at: DateTime<Utc>) -> &Customer {
        let customer = Customer {
            id: CustomerId::new(),
            name: new.name,
            phone: new.phone,
            address: new.address,
            created_at,
        };
        self.customers.insert(0, customer);
        &self.customers[0]
    }

    /// Merge `patch` into the customer with `id`. Unknown ids are a no-op.
    pub fn update(&mut self, id: CustomerId, patch: CustomerPatch) -> bool {
        let Some(customer) = self.customers.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        if let Some(name) = patch.name {
            customer.name = name;
        }
        if let Some(phone) = patch.phone {
            customer.phone = phone;
        }
        if let Some(address) = patch.address {
            customer.address = address;
        }
        true
    }

    /// Remove a customer by id.
    ///
    /// Deleting a customer referenced by historical invoices is permitted:
    /// those invoices keep their name snapshot. Gating this behind a
    /// confirmation is the calling surface's choice.
    pub fn remove(&mut self, id: CustomerId) -> bool {
        let before = self.customers.len();
        self.customers.retain(|c| c.id != id);
        self.customers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewCustomer {
        NewCustomer {
            name: "Ahmed Ali".to_string(),
            phone: "07712345678".to_string(),
            address: "Baghdad".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn add_prepends_newest_first() {
        let mut directory = CustomerDirectory::new();
        let first = directory.add(sample(), now()).id;
        let second = directory.add(sample(), now()).id;

        assert_eq!(directory.list()[0].id, second);
        assert_eq!(directory.list()[1].id, first);
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut directory = CustomerDirectory::new();
        let id = directory.add(sample(), now()).id;

        assert!(directory.update(
            id,
            CustomerPatch {
                phone: Some("07800000000".to_string()),
                ..CustomerPatch::default()
            },
        ));

        let customer = directory.get(id).unwrap();
        assert_eq!(customer.phone, "07800000000");
        assert_eq!(customer.name, "Ahmed Ali");
        assert_eq!(customer.address, "Baghdad");
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut directory = CustomerDirectory::new();
        directory.add(sample(), now());

        assert!(!directory.update(CustomerId::new(), CustomerPatch::default()));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut directory = CustomerDirectory::new();
        let id = directory.add(sample(), now()).id;

        assert!(directory.remove(id));
        assert!(!directory.remove(id));
        assert!(directory.is_empty());
    }
}
