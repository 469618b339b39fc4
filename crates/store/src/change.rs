use chrono::{DateTime, Utc};

use dukkan_events::Event;

use crate::gateway::StorageKey;

/// Published on the store's bus after every committed mutation.
///
/// Coarse-grained on purpose: a subscriber re-reads the affected collection
/// rather than patching its own copy, so the payload only needs to say what
/// changed and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Customers { occurred_at: DateTime<Utc> },
    Products { occurred_at: DateTime<Utc> },
    Invoices { occurred_at: DateTime<Utc> },
    Settings { occurred_at: DateTime<Utc> },
}

impl ChangeEvent {
    pub fn for_key(key: StorageKey, occurred_at: DateTime<Utc>) -> Self {
        match key {
            StorageKey::Customers => ChangeEvent::Customers { occurred_at },
            StorageKey::Products => ChangeEvent::Products { occurred_at },
            StorageKey::Invoices => ChangeEvent::Invoices { occurred_at },
            StorageKey::Settings => ChangeEvent::Settings { occurred_at },
        }
    }
}

impl Event for ChangeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ChangeEvent::Customers { .. } => "shop.customers.changed",
            ChangeEvent::Products { .. } => "shop.products.changed",
            ChangeEvent::Invoices { .. } => "shop.invoices.changed",
            ChangeEvent::Settings { .. } => "shop.settings.changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ChangeEvent::Customers { occurred_at }
            | ChangeEvent::Products { occurred_at }
            | ChangeEvent::Invoices { occurred_at }
            | ChangeEvent::Settings { occurred_at } => *occurred_at,
        }
    }
}
