//! Ledger domain models: categories, entries, and the running-balance
//! aggregate.

pub mod balance;
pub mod category;
pub mod entry;

pub use balance::{CategoryTotals, Ledger};
pub use category::{Category, CategoryKind};
pub use entry::{Entry, EntryDelta, EntryPatch};
