use serde::{Deserialize, Serialize};

use dukkan_core::ProductId;

/// A sellable product with its current stock count.
///
/// Prices are in whole currency units. Invoice line items snapshot `name` and
/// `sell_price` at sale time, so later edits here never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub buy_price: i64,
    pub sell_price: i64,
    pub stock: i64,
}

/// Input for [`Catalog::add`]; the catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub buy_price: i64,
    pub sell_price: i64,
    pub stock: i64,
}

/// Field-wise merge patch for [`Catalog::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub buy_price: Option<i64>,
    pub sell_price: Option<i64>,
    pub stock: Option<i64>,
}

/// Owns the product collection.
///
/// The catalog applies stock deltas verbatim and never clamps: refusing a
/// sale that would drive stock negative is the invoice engine's job, decided
/// before anything is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records (insertion order preserved).
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Add a product with a fresh id. Appended at the end of the list.
    pub fn add(&mut self, new: NewProduct) -> &Product {
        let product = Product {
            id: ProductId::new(),
            name: new.name,
            buy_price: new.buy_price,
            sell_price: new.sell_price,
            stock: new.stock,
        };
        self.products.push(product);
        &self.products[self.products.len() - 1]
    }

    /// Merge `patch` into the product with `id`.
    ///
    /// Unknown ids are a no-op (`false`): callers source ids from [`Catalog::list`].
    pub fn update(&mut self, id: ProductId, patch: ProductPatch) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return false;
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(buy_price) = patch.buy_price {
            product.buy_price = buy_price;
        }
        if let Some(sell_price) = patch.sell_price {
            product.sell_price = sell_price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        true
    }

    /// Remove a product by id.
    ///
    /// Past invoice line items are immutable snapshots, so no cascade or
    /// reference check is needed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    /// Apply a signed stock delta (negative for a sale).
    ///
    /// Applied verbatim — no clamping here. Unknown ids are a no-op.
    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        product.stock += delta;
        true
    }
}
