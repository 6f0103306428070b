//! Adapters - Implementations of port interfaces.
//!
//! - `usage` - usage ledger stores
//! - `plan` - plan tier resolution
//! - `rate_limiter` - short-window throttling

pub mod plan;
pub mod rate_limiter;
pub mod usage;

pub use plan::StaticPlanResolver;
pub use rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
pub use usage::InMemoryUsageStore;
