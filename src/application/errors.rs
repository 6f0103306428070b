//! Application-layer errors.

use thiserror::Error;

use crate::domain::admission::DenialReason;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::UsageStoreError;

/// Errors from the admission handlers.
///
/// A denial from the engine is not an error: handlers return it as part of
/// their result. `NotAdmitted` only arises when recording usage for an action
/// that was never admitted.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error("plan lookup failed: {0}")]
    PlanLookup(#[from] DomainError),

    #[error("usage store failed: {0}")]
    Usage(#[from] UsageStoreError),

    #[error("action was not admitted: {}", .0.map_or("no reason given", |r| r.as_str()))]
    NotAdmitted(Option<DenialReason>),
}
