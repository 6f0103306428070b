//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod errors;
pub mod handlers;
mod limit_response;

pub use errors::GateError;
pub use handlers::{
    CheckActionHandler, CheckActionOutcome, CheckActionQuery, RecordUsageCommand,
    RecordUsageHandler, RecordUsageResult,
};
pub use limit_response::{LimitResponse, RATE_LIMITED};
