//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the Study Gate domain.

mod billing_period;
mod errors;
mod ids;
mod timestamp;

pub use billing_period::BillingPeriod;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use timestamp::Timestamp;
