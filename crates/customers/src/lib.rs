//! Customer Directory: customer records and their CRUD operations.

pub mod customer;

pub use customer::{Customer, CustomerDirectory, CustomerPatch, NewCustomer};
