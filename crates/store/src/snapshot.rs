//! Backup/restore snapshots.
//!
//! A snapshot is the full shop state as one JSON document. Import replaces
//! all four collections wholesale — no merging — and a malformed document is
//! rejected before anything is touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dukkan_catalog::Product;
use dukkan_customers::Customer;
use dukkan_invoicing::Invoice;

use crate::settings::ShopSettings;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON or is missing a required section.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Full shop state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub customers: Vec<Customer>,
    pub invoices: Vec<Invoice>,
    pub products: Vec<Product>,
    pub settings: ShopSettings,
    pub timestamp: DateTime<Utc>,
}

impl BackupSnapshot {
    /// Parse a snapshot document, checking structural presence of every
    /// section. Nothing beyond shape is validated — import is trusted input
    /// from the shop's own exports.
    pub fn from_json(document: &str) -> Result<Self, ImportError> {
        serde_json::from_str(document).map_err(|e| ImportError::MalformedSnapshot(e.to_string()))
    }

    /// Render the snapshot as a pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> BackupSnapshot {
        BackupSnapshot {
            customers: vec![],
            invoices: vec![],
            products: vec![],
            settings: ShopSettings::default(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn json_round_trip() {
        let original = snapshot();
        let document = original.to_json().unwrap();
        let restored = BackupSnapshot::from_json(&document).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = BackupSnapshot::from_json("{not json").unwrap_err();
        match err {
            ImportError::MalformedSnapshot(_) => {}
        }
    }

    #[test]
    fn missing_sections_are_rejected() {
        // Structurally valid JSON, but no invoices/products/settings.
        let err = BackupSnapshot::from_json(r#"{"customers": []}"#).unwrap_err();
        match err {
            ImportError::MalformedSnapshot(msg) => assert!(msg.contains("missing field")),
        }
    }
}
