//! FIFO batch ledger.
//!
//! Batches are kept oldest-first in a `VecDeque`: intake appends to the back,
//! sales consume from the front and pop batches as they run dry.

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::batch::{Allocation, Batch, BatchSnapshot};

/// Ordered collection of one product's batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchLedger {
    batches: VecDeque<Batch>,
}

impl BatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Batches in FIFO order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Batch> + '_ {
        self.batches.iter()
    }

    /// Sum of remaining units across all batches. O(n); the owning product
    /// keeps a cached copy for reads.
    pub fn total_quantity(&self) -> u64 {
        self.batches.iter().map(Batch::quantity).sum()
    }

    /// Units that are not expired as of `as_of`.
    pub fn sellable_quantity(&self, as_of: NaiveDate) -> u64 {
        self.batches
            .iter()
            .filter(|b| !b.is_expired(as_of))
            .map(Batch::quantity)
            .sum()
    }

    pub fn snapshot(&self) -> Vec<BatchSnapshot> {
        self.batches.iter().map(Batch::snapshot).collect()
    }

    /// Lazily yields batches whose expiry date is strictly before `as_of`.
    ///
    /// Read-only: nothing is removed and stock is not touched.
    pub fn scan_expired(&self, as_of: NaiveDate) -> impl Iterator<Item = &Batch> + '_ {
        self.batches.iter().filter(move |b| b.is_expired(as_of))
    }

    pub(crate) fn push(&mut self, batch: Batch) {
        self.batches.push_back(batch);
    }

    /// Take `quantity` units oldest-first, dropping batches that reach zero.
    ///
    /// Caller guarantees `quantity <= total_quantity()`.
    pub(crate) fn consume_fifo(&mut self, quantity: u64) -> Vec<Allocation> {
        let mut remaining = quantity;
        let mut allocations = Vec::new();

        while remaining > 0 {
            let Some(head) = self.batches.front_mut() else {
                break;
            };
            let taken = head.take(remaining);
            remaining -= taken;
            allocations.push(Allocation {
                batch_number: head.batch_number().clone(),
                quantity: taken,
            });
            if head.is_empty() {
                self.batches.pop_front();
            }
        }

        debug_assert_eq!(remaining, 0, "ledger ran dry during a checked sale");
        allocations
    }

    /// Same walk as `consume_fifo`, but expired batches are skipped and left
    /// in place.
    ///
    /// Caller guarantees `quantity <= sellable_quantity(as_of)`.
    pub(crate) fn consume_unexpired(&mut self, quantity: u64, as_of: NaiveDate) -> Vec<Allocation> {
        let mut remaining = quantity;
        let mut allocations = Vec::new();

        for batch in self.batches.iter_mut().filter(|b| !b.is_expired(as_of)) {
            if remaining == 0 {
                break;
            }
            let taken = batch.take(remaining);
            remaining -= taken;
            allocations.push(Allocation {
                batch_number: batch.batch_number().clone(),
                quantity: taken,
            });
        }

        debug_assert_eq!(remaining, 0, "sellable stock ran dry during a checked sale");
        self.batches.retain(|b| !b.is_empty());
        allocations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockledger_core::BatchNumber;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_of(batches: &[(&str, u64, NaiveDate)]) -> BatchLedger {
        let mut ledger = BatchLedger::new();
        for (number, qty, expiry) in batches {
            ledger.push(Batch::new(BatchNumber::new(*number).unwrap(), *qty, *expiry));
        }
        ledger
    }

    fn numbers(ledger: &BatchLedger) -> Vec<String> {
        ledger.iter().map(|b| b.batch_number().to_string()).collect()
    }

    #[test]
    fn consume_fifo_exhausts_oldest_batch_first() {
        let mut ledger = ledger_of(&[("A", 5, date(2025, 1, 1)), ("B", 5, date(2025, 1, 1))]);

        let allocations = ledger.consume_fifo(7);

        assert_eq!(numbers(&ledger), vec!["B"]);
        assert_eq!(ledger.iter().next().unwrap().quantity(), 3);
        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].batch_number.as_str(), "A");
        assert_eq!(allocations[0].quantity, 5);
        assert_eq!(allocations[1].batch_number.as_str(), "B");
        assert_eq!(allocations[1].quantity, 2);
    }

    #[test]
    fn consume_fifo_exact_batch_size_removes_batch() {
        let mut ledger = ledger_of(&[("A", 5, date(2025, 1, 1)), ("B", 2, date(2025, 1, 1))]);
        ledger.consume_fifo(5);
        assert_eq!(numbers(&ledger), vec!["B"]);
        assert_eq!(ledger.total_quantity(), 2);
    }

    #[test]
    fn consume_fifo_partial_head_keeps_order() {
        let mut ledger = ledger_of(&[("A", 5, date(2025, 1, 1)), ("B", 2, date(2025, 1, 1))]);
        ledger.consume_fifo(1);
        assert_eq!(numbers(&ledger), vec!["A", "B"]);
        assert_eq!(ledger.iter().next().unwrap().quantity(), 4);
    }

    #[test]
    fn scan_expired_is_read_only_and_restartable() {
        let ledger = ledger_of(&[
            ("OLD", 3, date(2020, 1, 1)),
            ("NEW", 4, date(2030, 1, 1)),
            ("EDGE", 1, date(2025, 1, 1)),
        ]);
        let before = ledger.clone();
        let as_of = date(2025, 1, 1);

        let first: Vec<_> = ledger.scan_expired(as_of).map(Batch::expired_entry).collect();
        let second: Vec<_> = ledger.scan_expired(as_of).map(Batch::expired_entry).collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].batch_number.as_str(), "OLD");
        assert_eq!(ledger, before);
    }

    #[test]
    fn consume_unexpired_skips_expired_batches_in_place() {
        let mut ledger = ledger_of(&[
            ("EXP", 5, date(2020, 1, 1)),
            ("A", 3, date(2030, 1, 1)),
            ("B", 4, date(2030, 1, 1)),
        ]);
        let as_of = date(2025, 1, 1);
        assert_eq!(ledger.sellable_quantity(as_of), 7);

        let allocations = ledger.consume_unexpired(5, as_of);

        assert_eq!(numbers(&ledger), vec!["EXP", "B"]);
        assert_eq!(ledger.total_quantity(), 7);
        assert_eq!(ledger.sellable_quantity(as_of), 2);
        let taken: Vec<_> = allocations
            .iter()
            .map(|a| (a.batch_number.as_str(), a.quantity))
            .collect();
        assert_eq!(taken, vec![("A", 3), ("B", 2)]);
    }
}
