//! Admission handlers.
//!
//! ## Queries
//! - Check whether an action may proceed
//!
//! ## Commands
//! - Record usage after a successful AI call

mod check_action;
mod record_usage;

// Queries
pub use check_action::{CheckActionHandler, CheckActionOutcome, CheckActionQuery};

// Commands
pub use record_usage::{RecordUsageCommand, RecordUsageHandler, RecordUsageResult};
