//! Usage domain module.
//!
//! Per-period consumption counters. The engine reads [`UsageSnapshot`];
//! [`UsageDelta`] and [`UsageLedger`] belong to the persistence side.

mod delta;
mod ledger;
mod snapshot;

pub use delta::UsageDelta;
pub use ledger::UsageLedger;
pub use snapshot::UsageSnapshot;
