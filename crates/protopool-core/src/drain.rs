//! Incremental, budgeted destruction of queued templates.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::handle::TemplateKey;
use crate::lifecycle::InstanceLifecycle;
use crate::observer::ReclaimEvent;
use crate::pool::PrototypePool;

/// Counters for one [`drain`](PrototypePool::drain) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainOutcome {
    /// Keys dequeued this call, including unmarked ones passed over.
    pub processed: usize,
    /// Templates destroyed and unregistered.
    pub destroyed: usize,
    /// Templates skipped because handles were still checked out.
    pub skipped: usize,
}

enum DestroyAttempt {
    Destroyed,
    StillReferenced,
    Vanished,
}

impl<T, L: InstanceLifecycle<T>> PrototypePool<T, L> {
    /// Drain up to `max_count` keys from the pending-removal queue.
    ///
    /// Each dequeued key consumes one unit of `max_count` whether or not
    /// anything was destroyed; a key whose removal mark was cleared by an
    /// intervening `acquire` is passed over entirely. The loop stops early
    /// once `drain_time_budget` wall-clock time has elapsed; keys not yet
    /// dequeued stay queued for the next tick. The caller computes
    /// `max_count` from its frame-rate budget.
    pub fn drain(&mut self, max_count: usize) -> DrainOutcome {
        let started = Instant::now();
        let mut outcome = DrainOutcome::default();
        let mut remaining = max_count.min(self.pending.len());
        while remaining > 0 {
            let Some(key) = self.pending.pop_front() else {
                break;
            };
            if self.marks.remove(&key).is_some() {
                match self.try_destroy(key) {
                    DestroyAttempt::Destroyed => outcome.destroyed += 1,
                    DestroyAttempt::StillReferenced => outcome.skipped += 1,
                    DestroyAttempt::Vanished => {}
                }
            }
            outcome.processed += 1;
            remaining -= 1;
            if started.elapsed() > self.options.drain_time_budget {
                break;
            }
        }
        outcome
    }

    /// Destroy one template if nothing is checked out, otherwise skip it
    /// with a diagnostic. A skipped key must be re-marked before a later
    /// drain can pick it up again.
    fn try_destroy(&mut self, key: TemplateKey) -> DestroyAttempt {
        let Some(entry) = self.templates.get(&key) else {
            return DestroyAttempt::Vanished;
        };
        let active = entry.active.len();
        if active > 0 {
            warn!(key = key.0, active, "reclamation target still referenced, skipping");
            self.stats.record_skipped();
            self.observer.on_event(&ReclaimEvent::Skipped { key, active });
            return DestroyAttempt::StillReferenced;
        }
        let freed = entry.free.len();
        self.unregister(key);
        self.stats.record_reclaimed();
        self.observer.on_event(&ReclaimEvent::Destroyed { key, freed });
        DestroyAttempt::Destroyed
    }
}
