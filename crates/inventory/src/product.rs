use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockledger_core::{
    BatchNumber, DomainError, DomainResult, Entity, ProductName, ValueObject, positive_quantity,
};

use crate::batch::{Allocation, Batch, BatchSnapshot};
use crate::ledger::BatchLedger;

/// Descriptive product attributes (immutable after creation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributes {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub size: String,
    /// Unit price in the smallest currency unit (e.g. cents).
    #[serde(default)]
    pub price: u64,
}

/// Live stock counters of one product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub stock_level: u64,
    pub sales: u64,
}

impl ValueObject for StockSnapshot {}

/// Result of a successful sale: the units taken from each batch, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub product: ProductName,
    pub quantity: u64,
    pub allocations: Vec<Allocation>,
}

/// Entity: Product.
///
/// Owns its batch ledger exclusively. `stock_level` is maintained
/// incrementally and always equals the sum of the ledger's batch quantities;
/// `sales_total` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: ProductName,
    attributes: ProductAttributes,
    stock_level: u64,
    sales_total: u64,
    ledger: BatchLedger,
}

impl Product {
    /// New product with no stock and no sales.
    pub fn new(name: ProductName, attributes: ProductAttributes) -> Self {
        Self {
            name,
            attributes,
            stock_level: 0,
            sales_total: 0,
            ledger: BatchLedger::new(),
        }
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn attributes(&self) -> &ProductAttributes {
        &self.attributes
    }

    pub fn stock_level(&self) -> u64 {
        self.stock_level
    }

    pub fn sales_total(&self) -> u64 {
        self.sales_total
    }

    pub fn ledger(&self) -> &BatchLedger {
        &self.ledger
    }

    pub fn stock_snapshot(&self) -> StockSnapshot {
        StockSnapshot {
            stock_level: self.stock_level,
            sales: self.sales_total,
        }
    }

    /// FIFO listing of the batches still holding stock.
    pub fn batches(&self) -> Vec<BatchSnapshot> {
        self.ledger.snapshot()
    }

    /// Batches expiring strictly before `as_of`. Advisory only.
    pub fn scan_expired(&self, as_of: NaiveDate) -> impl Iterator<Item = &Batch> + '_ {
        self.ledger.scan_expired(as_of)
    }

    /// Receive a new batch at the back of the ledger.
    ///
    /// Past expiry dates are accepted; expiry only matters at sale/report time.
    pub fn intake(
        &mut self,
        quantity: i64,
        batch_number: BatchNumber,
        expiry_date: NaiveDate,
    ) -> DomainResult<()> {
        let quantity = positive_quantity(quantity)?;
        let new_level = self
            .stock_level
            .checked_add(quantity)
            .ok_or_else(|| DomainError::validation("intake would overflow stock level"))?;

        self.ledger.push(Batch::new(batch_number, quantity, expiry_date));
        self.stock_level = new_level;
        Ok(())
    }

    /// Sell `quantity` units, depleting the oldest batches first.
    ///
    /// All-or-nothing: if the product cannot cover the whole request nothing
    /// changes and `InsufficientStock` is returned. Expired batches are sold
    /// like any other; see [`Product::sell_unexpired`] for the stricter walk.
    pub fn sell(&mut self, quantity: i64) -> DomainResult<SaleReceipt> {
        let quantity = positive_quantity(quantity)?;
        if quantity > self.stock_level {
            return Err(DomainError::insufficient_stock(
                self.name.as_str(),
                quantity,
                self.stock_level,
            ));
        }

        let allocations = self.ledger.consume_fifo(quantity);
        Ok(self.record_sale(quantity, allocations))
    }

    /// Like [`Product::sell`], but batches expired as of `as_of` are neither
    /// counted as available nor consumed. They stay in the ledger.
    pub fn sell_unexpired(&mut self, quantity: i64, as_of: NaiveDate) -> DomainResult<SaleReceipt> {
        let quantity = positive_quantity(quantity)?;
        let sellable = self.ledger.sellable_quantity(as_of);
        if quantity > sellable {
            return Err(DomainError::insufficient_stock(
                self.name.as_str(),
                quantity,
                sellable,
            ));
        }

        let allocations = self.ledger.consume_unexpired(quantity, as_of);
        Ok(self.record_sale(quantity, allocations))
    }

    fn record_sale(&mut self, quantity: u64, allocations: Vec<Allocation>) -> SaleReceipt {
        self.stock_level -= quantity;
        self.sales_total = self.sales_total.saturating_add(quantity);
        SaleReceipt {
            product: self.name.clone(),
            quantity,
            allocations,
        }
    }
}

impl Entity for Product {
    type Id = ProductName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
