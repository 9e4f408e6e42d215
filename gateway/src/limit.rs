//! Per-credential sliding window rate limiting.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::error::{Error, Result};

/// Sliding window rate limiter keyed by credential.
///
/// Each credential gets its own window, so one caller saturating its quota
/// cannot starve another. The lock is held only while a window is mutated,
/// never across an executor invocation.
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            limit: config.requests_per_minute as usize,
            window: Duration::from_secs(config.window_secs),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Admit a request for `credential`, or fail with `RateLimited` when the
    /// trailing window is already at capacity.
    pub fn admit(&self, credential: &str) -> Result<()> {
        self.admit_at(credential, Instant::now())
    }

    fn admit_at(&self, credential: &str, now: Instant) -> Result<()> {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let window = windows.entry(credential.to_string()).or_default();

        // Drop timestamps that have aged out of the trailing window.
        if let Some(cutoff) = now.checked_sub(self.window) {
            while window.front().is_some_and(|&t| t <= cutoff) {
                window.pop_front();
            }
        }

        if window.len() >= self.limit {
            return Err(Error::RateLimited(
                "Please try again in a minute".to_string(),
            ));
        }

        window.push_back(now);
        Ok(())
    }
}
