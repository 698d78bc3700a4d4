//! Compiled-pattern cache shared by concurrent evaluations.
//!
//! Keyed by exact regex source. Entries expire after a TTL and the oldest
//! entry is evicted once the capacity is reached. A disabled cache compiles
//! every pattern on demand and stores nothing.

use dashmap::DashMap;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

/// Default number of cached patterns.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Default entry lifetime in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

struct CacheEntry {
    regex: Arc<Regex>,
    inserted: Instant,
}

/// Thread-safe cache of compiled regexes.
pub struct PatternCache {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

static GLOBAL: LazyLock<PatternCache> =
    LazyLock::new(|| PatternCache::new(DEFAULT_CAPACITY, DEFAULT_TTL_SECS));

impl PatternCache {
    /// Create a cache holding up to `max_entries` patterns for `ttl_secs` each.
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    /// Process-wide cache with default settings.
    pub fn global() -> &'static PatternCache {
        &GLOBAL
    }

    pub fn is_enabled(&self) -> bool {
        self.max_entries > 0 && !self.ttl.is_zero()
    }

    /// Compile `pattern`, reusing a cached regex when it is still fresh.
    pub fn compile(&self, pattern: &str) -> Result<Arc<Regex>, regex::Error> {
        if !self.is_enabled() {
            return Regex::new(pattern).map(Arc::new);
        }

        if let Some(entry) = self.entries.get(pattern) {
            if entry.inserted.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.regex));
            }
            // Stale, drop the guard before removing
            drop(entry);
            self.entries.remove(pattern);
        }

        let regex = Arc::new(Regex::new(pattern)?);

        if self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        self.entries.insert(
            pattern.to_string(),
            CacheEntry {
                regex: Arc::clone(&regex),
                inserted: Instant::now(),
            },
        );
        Ok(regex)
    }

    /// Get the number of cached patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove expired entries.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted) < self.ttl);
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.inserted)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL_SECS)
    }
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCache")
            .field("entries", &self.entries.len())
            .field("max_entries", &self.max_entries)
            .field("ttl", &self.ttl)
            .finish()
    }
}
