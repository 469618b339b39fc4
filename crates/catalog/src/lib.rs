//! Catalog: the product list and its stock counts.

pub mod product;

pub use product::{Catalog, NewProduct, Product, ProductPatch};
