//! Shop-level composition: the explicit store object that owns every
//! collection, its persistence gateway, shop settings, and the change
//! notification feed consumed by derived views.

pub mod change;
pub mod gateway;
pub mod settings;
pub mod shop;
pub mod snapshot;

pub use change::ChangeEvent;
pub use gateway::{InMemoryGateway, StorageError, StorageGateway, StorageKey};
pub use settings::{ShopSettings, User, UserRole};
pub use shop::ShopStore;
pub use snapshot::{BackupSnapshot, ImportError};
