//! Plan domain module.
//!
//! Subscription tiers and the quota ceilings attached to each.
//!
//! # Module Structure
//!
//! - `tier` - PlanTier subscription levels
//! - `limits` - PlanLimits ceilings and per-task output sizes
//! - `catalog` - PlanCatalog lookup table injected into the engine

mod catalog;
mod limits;
mod tier;

pub use catalog::PlanCatalog;
pub use limits::{OutputCeilings, PlanLimits, TaskKind};
pub use tier::PlanTier;
