//! Rate limiter adapters.
//!
//! ## Usage
//!
//! ```ignore
//! use study_gate::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitConfig::default());
//! ```

mod config;
mod in_memory;

pub use config::{ActionRateLimits, RateLimitConfig};
pub use in_memory::InMemoryRateLimiter;
