//! Admission domain module.
//!
//! The gate in front of every AI call: requests, decisions, token estimation
//! and the engine that combines them.
//!
//! # Module Structure
//!
//! - `request` - ActionRequest tagged union and its inputs
//! - `decision` - AdmissionDecision with closed denial and remediation sets
//! - `estimator` - TokenEstimator heuristics
//! - `engine` - AdmissionEngine per-action rules

mod decision;
mod engine;
mod estimator;
mod request;

pub use decision::{AdmissionDecision, DenialReason, RemediationHint};
pub use engine::AdmissionEngine;
pub use estimator::{
    char_count, TokenEstimator, DEFAULT_CHARS_PER_MINUTE, DEFAULT_CHARS_PER_PAGE,
    DEFAULT_CHARS_PER_TOKEN, DEFAULT_CHAT_HISTORY_TURNS,
};
pub use request::{
    ActionKind, ActionRequest, ArtifactInput, ArtifactKind, ChatRole, ChatTurn, MediaKind,
    SourceDescriptor,
};
