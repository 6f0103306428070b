//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod admission;

pub use admission::{
    CheckActionHandler, CheckActionOutcome, CheckActionQuery, RecordUsageCommand,
    RecordUsageHandler, RecordUsageResult,
};
