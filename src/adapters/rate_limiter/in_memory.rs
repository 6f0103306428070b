//! In-memory rate limiter.
//!
//! Uses a fixed-window counter per key in a HashMap. Counts are local to the
//! process, so each server instance throttles independently.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// In-memory fixed-window rate limiter.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    /// Unix seconds when the current window started.
    window_start: u64,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn limit_for(&self, key: &RateLimitKey) -> u32 {
        self.config.per_action.limit_for(key.action)
    }

    fn window_secs(&self) -> u64 {
        u64::from(self.config.window_secs.max(1))
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let storage_key = key.to_storage_key();
        let limit = self.limit_for(&key);
        let window_secs = self.window_secs();
        let now = Self::now_secs();

        let mut windows = self.windows.write().await;

        let state = windows.entry(storage_key).or_insert_with(|| WindowState {
            count: 0,
            window_start: now,
        });

        if now >= state.window_start + window_secs {
            state.count = 0;
            state.window_start = now;
        }

        let window_end = state.window_start + window_secs;

        if state.count >= limit {
            let retry_after = window_end.saturating_sub(now).max(1) as u32;

            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after,
                action: key.action,
                message: format!(
                    "Too many {} requests. Retry after {} seconds.",
                    key.action, retry_after
                ),
            }));
        }

        state.count += 1;

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(state.count),
            reset_at: Timestamp::from_unix_secs(window_end),
            window_secs: window_secs as u32,
        }))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let storage_key = key.to_storage_key();
        let limit = self.limit_for(&key);
        let window_secs = self.window_secs();
        let now = Self::now_secs();

        let windows = self.windows.read().await;

        let (count, window_start) = windows
            .get(&storage_key)
            .filter(|state| now < state.window_start + window_secs)
            .map(|state| (state.count, state.window_start))
            .unwrap_or((0, now));

        Ok(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(count),
            reset_at: Timestamp::from_unix_secs(window_start + window_secs),
            window_secs: window_secs as u32,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        let mut windows = self.windows.write().await;
        windows.remove(&key.to_storage_key());
        Ok(())
    }
}
