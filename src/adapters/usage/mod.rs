//! Usage store adapters.

mod in_memory_usage_store;

pub use in_memory_usage_store::InMemoryUsageStore;
