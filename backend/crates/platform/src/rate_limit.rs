//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting keyed by an opaque client key.
//!
//! A window is anchored at the first request seen for a key and lasts
//! `config.window`. Within it at most `config.max_requests` requests are
//! allowed; rejected requests do not count. The first request after the
//! window elapses starts a fresh window with a count of 1.
//!
//! Counters are kept per `(config.scope, key)`, so routes with different
//! quotas can share one store without reading each other's windows.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Entries whose window started longer ago than this are dropped on the next check,
/// whatever window the caller uses.
pub const STALE_ENTRY_AGE: Duration = Duration::from_secs(30 * 60);

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
    /// Key space for this quota; configs with different scopes never share a counter
    pub scope: &'static str,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minutes(5, 5)
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            scope: "default",
        }
    }

    pub fn per_minutes(max_requests: u32, window_minutes: u64) -> Self {
        Self::new(max_requests, window_minutes.saturating_mul(60))
    }

    pub fn with_scope(mut self, scope: &'static str) -> Self {
        self.scope = scope;
        self
    }

    /// Window length in whole minutes, rounded up (for user-facing messages)
    pub fn window_minutes(&self) -> u64 {
        self.window.as_secs().div_ceil(60)
    }

    fn window_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.window).unwrap_or(TimeDelta::MAX)
    }

    fn entry_key(&self, key: &str) -> String {
        format!("{}:{}", self.scope, key)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Requests counted in the current window (after this one, if allowed)
    pub count: u32,
    pub remaining: u32,
    pub window_start: DateTime<Utc>,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitResult {
    /// Seconds until the window resets, at least 1
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let secs = (self.reset_at - now).num_seconds();
        u64::try_from(secs).unwrap_or(0).max(1)
    }
}

/// Snapshot of one key's counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub key: String,
    pub count: u32,
    pub window_start: DateTime<Utc>,
    /// Time left in the window measured against the supplied config
    pub remaining_time: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit backend unavailable: {0}")]
    Backend(String),
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count this request against `key` within `config.scope`; the check and the
    /// increment are one atomic step.
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError>;

    /// Current counter for `key`, if one is tracked
    async fn status(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<Option<RateLimitStatus>, RateLimitError>;

    /// Drop entries older than [`STALE_ENTRY_AGE`]; returns how many were removed
    async fn purge_expired(&self) -> Result<usize, RateLimitError>;
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: DateTime<Utc>,
}

/// Process-local store: one map behind one mutex
///
/// The stale-entry purge runs inline on every check, which is a linear scan.
/// Fine for the handful of clients a single instance sees; a large deployment
/// needs an expiring cache instead.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`RateLimitStore::check_and_increment`] with an explicit clock
    pub fn check_and_increment_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> RateLimitResult {
        let window = config.window_delta();
        let mut entries = self.entries.lock();

        Self::purge_locked(&mut entries, now);

        let entry_key = config.entry_key(key);
        let (allowed, entry) = match entries.get_mut(&entry_key) {
            Some(entry) if now.signed_duration_since(entry.window_start) < window => {
                if entry.count >= config.max_requests {
                    (false, *entry)
                } else {
                    entry.count += 1;
                    (true, *entry)
                }
            }
            Some(entry) => {
                *entry = WindowEntry {
                    count: 1,
                    window_start: now,
                };
                (true, *entry)
            }
            None => {
                let entry = WindowEntry {
                    count: 1,
                    window_start: now,
                };
                entries.insert(entry_key, entry);
                (true, entry)
            }
        };

        RateLimitResult {
            allowed,
            count: entry.count,
            remaining: config.max_requests.saturating_sub(entry.count),
            window_start: entry.window_start,
            reset_at: entry.window_start + window,
        }
    }

    pub fn status_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> Option<RateLimitStatus> {
        let entries = self.entries.lock();
        entries.get(&config.entry_key(key)).map(|entry| {
            let reset_at = entry.window_start + config.window_delta();
            RateLimitStatus {
                key: key.to_string(),
                count: entry.count,
                window_start: entry.window_start,
                remaining_time: (reset_at - now).to_std().unwrap_or(Duration::ZERO),
            }
        })
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock();
        Self::purge_locked(&mut entries, now)
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_locked(entries: &mut HashMap<String, WindowEntry>, now: DateTime<Utc>) -> usize {
        let stale = TimeDelta::from_std(STALE_ENTRY_AGE).unwrap_or(TimeDelta::MAX);
        let before = entries.len();
        entries.retain(|_, entry| now.signed_duration_since(entry.window_start) <= stale);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "Purged stale rate limit entries");
        }
        removed
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.check_and_increment_at(key, config, Utc::now()))
    }

    async fn status(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<Option<RateLimitStatus>, RateLimitError> {
        Ok(self.status_at(key, config, Utc::now()))
    }

    async fn purge_expired(&self) -> Result<usize, RateLimitError> {
        Ok(self.purge_expired_at(Utc::now()))
    }
}
