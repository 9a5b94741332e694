use std::time::{Duration, Instant};
use tracing::info;

/// Memoized registry version list with a flat time-to-live.
///
/// Owned by the registry service and created once at construction; the
/// `_at` methods take an explicit timestamp so tests control the clock.
/// Replaced wholesale on every successful fetch, emptied only by
/// `clear`.
#[derive(Debug)]
pub struct VersionCache {
    versions: Option<Vec<String>>,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl VersionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            versions: None,
            fetched_at: None,
            ttl,
        }
    }

    /// Cached list, only while `now - fetched_at < ttl`.
    pub fn get_at(&self, now: Instant) -> Option<&[String]> {
        let fetched_at = self.fetched_at?;
        if now.duration_since(fetched_at) < self.ttl {
            self.versions.as_deref()
        } else {
            None
        }
    }

    pub fn get(&self) -> Option<&[String]> {
        self.get_at(Instant::now())
    }

    /// Last stored list regardless of age; the fallback when a refresh
    /// fails mid-fetch.
    pub fn get_stale(&self) -> Option<&[String]> {
        self.versions.as_deref()
    }

    pub fn store_at(&mut self, versions: Vec<String>, now: Instant) {
        self.versions = Some(versions);
        self.fetched_at = Some(now);
    }

    pub fn store(&mut self, versions: Vec<String>) {
        self.store_at(versions, Instant::now());
    }

    pub fn clear(&mut self) {
        self.versions = None;
        self.fetched_at = None;
        info!("version cache cleared");
    }
}
