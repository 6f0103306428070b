//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UsageStore` - per-period usage ledgers
//! - `PlanResolver` - subscriber to plan tier
//! - `RateLimiter` - short-window throttling in front of the engine

mod plan_resolver;
mod rate_limiter;
mod usage_store;

pub use plan_resolver::PlanResolver;
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitScope,
    RateLimitStatus, RateLimiter,
};
pub use usage_store::{UsageStore, UsageStoreError};
