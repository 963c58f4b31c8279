//! Journal replay: apply a recorded sequence of inventory operations to a
//! registry.
//!
//! A journal is a JSON array of entries tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "register", "product": "Milk", "category": "dairy", "size": "1L", "price": 120 },
//!   { "op": "intake", "product": "Milk", "quantity": 100, "batch_number": "B1", "expiry_date": "2025-01-01" },
//!   { "op": "sale", "product": "Milk", "quantity": 20 }
//! ]
//! ```
//!
//! Entries are applied in order. A rejected entry is logged and recorded in
//! the summary; replay carries on with the next one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockledger_core::DomainError;
use stockledger_inventory::ProductAttributes;

use crate::registry::ProductRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JournalEntry {
    Register {
        product: String,
        #[serde(default)]
        category: String,
        #[serde(default)]
        size: String,
        #[serde(default)]
        price: u64,
    },
    Intake {
        product: String,
        quantity: i64,
        batch_number: String,
        expiry_date: NaiveDate,
    },
    Sale {
        product: String,
        quantity: i64,
        /// Business date of the sale; today when absent.
        #[serde(default)]
        as_of: Option<NaiveDate>,
    },
}

impl JournalEntry {
    pub fn product(&self) -> &str {
        match self {
            JournalEntry::Register { product, .. }
            | JournalEntry::Intake { product, .. }
            | JournalEntry::Sale { product, .. } => product,
        }
    }

    fn apply(&self, registry: &ProductRegistry) -> Result<(), DomainError> {
        match self {
            JournalEntry::Register {
                product,
                category,
                size,
                price,
            } => registry
                .register(
                    product,
                    ProductAttributes {
                        category: category.clone(),
                        size: size.clone(),
                        price: *price,
                    },
                )
                .map(|_| ()),
            JournalEntry::Intake {
                product,
                quantity,
                batch_number,
                expiry_date,
            } => registry.intake(product, *quantity, batch_number, *expiry_date),
            JournalEntry::Sale {
                product,
                quantity,
                as_of,
            } => match as_of {
                Some(as_of) => registry.sell_as_of(product, *quantity, *as_of),
                None => registry.sell(product, *quantity),
            }
            .map(|_| ()),
        }
    }
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to parse journal: {0}")]
    Parse(String),
}

/// One entry that the registry refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// Zero-based position in the journal.
    pub index: usize,
    pub product: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: Vec<RejectedEntry>,
}

pub fn parse_journal(json: &str) -> Result<Vec<JournalEntry>, JournalError> {
    serde_json::from_str(json).map_err(|e| JournalError::Parse(e.to_string()))
}

/// Apply `entries` to `registry` in order.
pub fn replay(
    registry: &ProductRegistry,
    entries: impl IntoIterator<Item = JournalEntry>,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for (index, entry) in entries.into_iter().enumerate() {
        match entry.apply(registry) {
            Ok(()) => summary.applied += 1,
            Err(e) => {
                tracing::warn!(index, product = entry.product(), error = %e, "journal entry rejected");
                summary.rejected.push(RejectedEntry {
                    index,
                    product: entry.product().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        applied = summary.applied,
        rejected = summary.rejected.len(),
        products = registry.len(),
        "journal replayed"
    );
    summary
}
