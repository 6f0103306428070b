//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `plan` - Plan tiers and the catalog of per-tier limits
//! - `usage` - Per-period consumption snapshot and ledger
//! - `admission` - Action requests, decisions and the admission engine

pub mod admission;
pub mod foundation;
pub mod plan;
pub mod usage;
