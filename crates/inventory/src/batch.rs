use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockledger_core::{BatchNumber, ValueObject};

/// One intake lot: remaining units plus the day they expire.
///
/// `quantity` only ever moves down (via sales). A batch that reaches zero is
/// dropped by the ledger, so a live batch always has `quantity > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    batch_number: BatchNumber,
    quantity: u64,
    expiry_date: NaiveDate,
}

impl Batch {
    pub(crate) fn new(batch_number: BatchNumber, quantity: u64, expiry_date: NaiveDate) -> Self {
        Self {
            batch_number,
            quantity,
            expiry_date,
        }
    }

    pub fn batch_number(&self) -> &BatchNumber {
        &self.batch_number
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Expired means the expiry day is strictly before `as_of`.
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiry_date < as_of
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Remove up to `wanted` units, returning how many were actually taken.
    pub(crate) fn take(&mut self, wanted: u64) -> u64 {
        let taken = wanted.min(self.quantity);
        self.quantity -= taken;
        taken
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        BatchSnapshot {
            batch_number: self.batch_number.clone(),
            quantity: self.quantity,
            expiry_date: self.expiry_date,
        }
    }

    pub fn expired_entry(&self) -> ExpiredBatch {
        ExpiredBatch {
            batch_number: self.batch_number.clone(),
            expiry_date: self.expiry_date,
        }
    }
}

/// Read-only copy of a batch for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub batch_number: BatchNumber,
    pub quantity: u64,
    pub expiry_date: NaiveDate,
}

impl ValueObject for BatchSnapshot {}

/// Row of the expiry report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredBatch {
    pub batch_number: BatchNumber,
    pub expiry_date: NaiveDate,
}

impl ValueObject for ExpiredBatch {}

/// Units taken from a single batch by a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub batch_number: BatchNumber,
    pub quantity: u64,
}

impl ValueObject for Allocation {}
