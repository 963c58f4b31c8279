//! Infrastructure layer: product registry, reporting projections, config and
//! journal replay.

pub mod config;
pub mod journal;
pub mod registry;
pub mod reports;

pub use config::{ExpiredSalePolicy, InventoryConfig};
pub use journal::{JournalEntry, JournalError, ReplaySummary, parse_journal, replay};
pub use registry::{ProductHandle, ProductRegistry};
pub use reports::{AuditEntry, InventoryReports, ReplenishmentSuggestion};
