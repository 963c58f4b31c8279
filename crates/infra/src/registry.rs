//! In-memory product registry.
//!
//! The registry map sits behind an `RwLock` and every product behind its own
//! `Mutex`, so mutations of one product are serialized while different
//! products proceed in parallel. No code path holds a product lock while
//! taking the map lock, so the two never deadlock.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{NaiveDate, Utc};

use stockledger_core::{
    BatchNumber, DomainError, DomainResult, ProductName, positive_quantity,
};
use stockledger_inventory::{
    BatchSnapshot, Product, ProductAttributes, SaleReceipt, StockSnapshot,
};

use crate::config::ExpiredSalePolicy;

/// Shared, lockable handle to one product.
pub type ProductHandle = Arc<Mutex<Product>>;

/// Registry of all products, keyed by name.
///
/// Products are created on first intake or explicit registration and live as
/// long as the registry does.
#[derive(Debug, Default)]
pub struct ProductRegistry {
    products: RwLock<BTreeMap<ProductName, ProductHandle>>,
    expired_sales: ExpiredSalePolicy,
}

pub(crate) fn lock(handle: &ProductHandle) -> MutexGuard<'_, Product> {
    // Product methods never panic half-way through a mutation, so a poisoned
    // lock still guards consistent state.
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ProductRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(expired_sales: ExpiredSalePolicy) -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            expired_sales,
        }
    }

    pub fn expired_sales(&self) -> ExpiredSalePolicy {
        self.expired_sales
    }

    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the existing product or create an empty one. Idempotent on
    /// name: attributes of an existing product are left untouched.
    pub fn get_or_create(&self, name: ProductName, attributes: ProductAttributes) -> ProductHandle {
        if let Some(handle) = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name)
        {
            return Arc::clone(handle);
        }

        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let handle = products.entry(name.clone()).or_insert_with(|| {
            tracing::info!(product = %name, category = %attributes.category, "product created");
            Arc::new(Mutex::new(Product::new(name, attributes)))
        });
        Arc::clone(handle)
    }

    /// Explicit registration with attributes.
    pub fn register(&self, name: &str, attributes: ProductAttributes) -> DomainResult<ProductHandle> {
        let name = ProductName::new(name)?;
        Ok(self.get_or_create(name, attributes))
    }

    pub fn get(&self, name: &str) -> DomainResult<ProductHandle> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        products
            .get(name.trim())
            .map(Arc::clone)
            .ok_or_else(|| DomainError::unknown_product(name))
    }

    /// Receive a batch for `name`, creating the product if needed.
    ///
    /// Inputs are validated before the registry is touched, so a rejected
    /// intake never creates a product.
    pub fn intake(
        &self,
        name: &str,
        quantity: i64,
        batch_number: &str,
        expiry_date: NaiveDate,
    ) -> DomainResult<()> {
        positive_quantity(quantity)?;
        let name = ProductName::new(name)?;
        let batch_number = BatchNumber::new(batch_number)?;

        let handle = self.get_or_create(name, ProductAttributes::default());
        let mut product = lock(&handle);
        product.intake(quantity, batch_number.clone(), expiry_date)?;

        tracing::info!(
            product = %product.name(),
            batch = %batch_number,
            quantity,
            %expiry_date,
            stock_level = product.stock_level(),
            "stock received"
        );
        Ok(())
    }

    /// Sell from `name` using today's date for the expired-sale policy.
    pub fn sell(&self, name: &str, quantity: i64) -> DomainResult<SaleReceipt> {
        self.sell_as_of(name, quantity, Utc::now().date_naive())
    }

    /// Sell from `name`, judging expiry against `as_of` when the policy
    /// blocks expired sales.
    pub fn sell_as_of(&self, name: &str, quantity: i64, as_of: NaiveDate) -> DomainResult<SaleReceipt> {
        let handle = self.get(name).inspect_err(|_| {
            tracing::warn!(product = name, quantity, "sale rejected: unknown product");
        })?;
        let mut product = lock(&handle);

        let result = match self.expired_sales {
            ExpiredSalePolicy::Allow => product.sell(quantity),
            ExpiredSalePolicy::Block => product.sell_unexpired(quantity, as_of),
        };

        match &result {
            Ok(receipt) => {
                for allocation in &receipt.allocations {
                    tracing::debug!(
                        product = name,
                        batch = %allocation.batch_number,
                        quantity = allocation.quantity,
                        "fifo allocation"
                    );
                }
                tracing::info!(
                    product = name,
                    quantity = receipt.quantity,
                    stock_level = product.stock_level(),
                    sales = product.sales_total(),
                    "sale recorded"
                );
            }
            Err(e) => tracing::warn!(product = name, quantity, error = %e, "sale rejected"),
        }
        result
    }

    pub fn stock_snapshot(&self, name: &str) -> DomainResult<StockSnapshot> {
        let handle = self.get(name)?;
        let snapshot = lock(&handle).stock_snapshot();
        Ok(snapshot)
    }

    /// FIFO batch listing for one product.
    pub fn batches(&self, name: &str) -> DomainResult<Vec<BatchSnapshot>> {
        let handle = self.get(name)?;
        let batches = lock(&handle).batches();
        Ok(batches)
    }

    /// Visit every product in name order and collect what `f` returns.
    ///
    /// Each product is locked only while `f` runs on it, so the result is a
    /// per-product consistent view, not a registry-wide atomic one.
    pub fn collect<T>(&self, mut f: impl FnMut(&Product) -> Option<T>) -> BTreeMap<ProductName, T> {
        let handles: Vec<(ProductName, ProductHandle)> = {
            let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
            products
                .iter()
                .map(|(name, handle)| (name.clone(), Arc::clone(handle)))
                .collect()
        };

        handles
            .into_iter()
            .filter_map(|(name, handle)| {
                let product = lock(&handle);
                f(&*product).map(|value| (name, value))
            })
            .collect()
    }
}
