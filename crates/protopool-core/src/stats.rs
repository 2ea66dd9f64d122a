//! Atomic pool statistics for lock-free usage tracking.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Snapshot of pool activity counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Acquires served from a free queue.
    pub hits: u64,
    /// Acquires that instantiated a fresh copy.
    pub misses: u64,
    /// Instances destroyed through the lifecycle.
    pub destroyed: u64,
    /// Templates fully reclaimed (destroyed and unregistered).
    pub reclaimed: u64,
    /// Reclamation attempts skipped because handles were still checked out.
    pub skipped: u64,
}

/// Atomic pool statistics for lock-free updates.
pub struct AtomicPoolStats {
    hits: AtomicU64,
    misses: AtomicU64,
    destroyed: AtomicU64,
    reclaimed: AtomicU64,
    skipped: AtomicU64,
}

impl AtomicPoolStats {
    /// Create new zeroed stats.
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            destroyed: AtomicU64::new(0),
            reclaimed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// Take a snapshot of current stats.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            destroyed: self.destroyed.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.destroyed.store(0, Ordering::Relaxed);
        self.reclaimed.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }

    /// Increment hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Add to the destroyed-instances counter.
    pub fn record_destroyed(&self, count: u64) {
        self.destroyed.fetch_add(count, Ordering::Relaxed);
    }

    /// Increment reclaimed-templates counter.
    pub fn record_reclaimed(&self) {
        self.reclaimed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment skipped-reclamation counter.
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AtomicPoolStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zeroed() {
        let stats = AtomicPoolStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.hits, 0);
        assert_eq!(snap.misses, 0);
        assert_eq!(snap.destroyed, 0);
        assert_eq!(snap.reclaimed, 0);
        assert_eq!(snap.skipped, 0);
    }

    #[test]
    fn record_and_snapshot() {
        let stats = AtomicPoolStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_destroyed(5);
        stats.record_reclaimed();
        stats.record_skipped();
        let snap = stats.snapshot();
        assert_eq!(snap.hits, 2);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.destroyed, 5);
        assert_eq!(snap.reclaimed, 1);
        assert_eq!(snap.skipped, 1);
    }

    #[test]
    fn reset_clears_counters() {
        let stats = AtomicPoolStats::new();
        stats.record_hit();
        stats.record_destroyed(3);
        stats.reset();
        let snap = stats.snapshot();
        assert_eq!(snap.hits, 0);
        assert_eq!(snap.destroyed, 0);
    }

    #[test]
    fn snapshot_serializes() {
        let stats = AtomicPoolStats::new();
        stats.record_miss();
        let json = serde_json::to_string(&stats.snapshot()).unwrap();
        assert!(json.contains("\"misses\":1"));
    }
}
