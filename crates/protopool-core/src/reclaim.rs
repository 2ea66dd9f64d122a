//! Tiered reclamation scheduling: memory sampling, removal marks, and the
//! pending-removal queue.

use std::time::Duration;

use tracing::debug;

use crate::handle::{InstanceId, TemplateKey};
use crate::lifecycle::InstanceLifecycle;
use crate::observer::ReclaimEvent;
use crate::pool::PrototypePool;
use crate::tier::Tier;

impl<T, L: InstanceLifecycle<T>> PrototypePool<T, L> {
    /// Whether `sample_and_trigger` would take a sample at `now`.
    ///
    /// True only while the pending-removal queue is empty (a pass in
    /// progress is never interrupted by a new sample) and the sample
    /// debounce interval has elapsed. Lets drivers avoid polling the
    /// memory metric every tick.
    #[must_use]
    pub fn should_sample(&self, now: Duration) -> bool {
        self.pending.is_empty()
            && now.saturating_sub(self.last_sample) >= self.options.sample_interval
    }

    /// Sample memory pressure and enqueue eligible marked templates.
    ///
    /// No-op unless [`should_sample`](Self::should_sample) holds. Exactly
    /// one ceiling is chosen per pass, the highest crossed threshold
    /// winning; below the lowest threshold the pass only resets the
    /// debounce clock.
    pub fn sample_and_trigger(&mut self, memory_mib: f64, now: Duration) {
        if !self.should_sample(now) {
            return;
        }
        self.last_sample = now;
        if let Some(ceiling) = self.options.ceiling_for(memory_mib) {
            debug!(
                memory_mib,
                ceiling = ceiling.value(),
                "memory pressure triggered reclamation"
            );
            self.mark_for_reclamation(ceiling, true, now);
        }
    }

    /// Enqueue every marked template at or below `ceiling` for
    /// incremental destruction.
    ///
    /// With `compare_time` set, only marks whose debounce timestamp has
    /// matured by `now` are enqueued; without it the timestamp is ignored
    /// (forced collection). Keys whose template has vanished count as
    /// tier 0.
    pub fn mark_for_reclamation(&mut self, ceiling: Tier, compare_time: bool, now: Duration) {
        for (&key, &eligible_at) in &self.marks {
            let tier = self.templates.get(&key).map_or(Tier::MIN, |entry| entry.tier);
            if tier <= ceiling && (!compare_time || now >= eligible_at) {
                self.pending.push_back(key);
            }
        }
    }

    /// Force-enqueue every marked template at or below `ceiling`,
    /// ignoring mark maturity.
    ///
    /// The manual counterpart of [`sample_and_trigger`](Self::sample_and_trigger)
    /// for on-demand collection of a tier.
    pub fn request_reclaim(&mut self, ceiling: Tier) {
        self.mark_for_reclamation(ceiling, false, Duration::ZERO);
    }

    /// Mark one key and enqueue it immediately, regardless of tier or
    /// timing.
    ///
    /// Returns the number of handles still checked out at marking time; a
    /// non-zero count means the next drain will skip this key until the
    /// handles are released and the key is re-marked.
    pub fn mark_single(&mut self, key: TemplateKey, now: Duration) -> usize {
        let active = self.templates.get(&key).map_or(0, |entry| entry.active.len());
        self.marks.insert(key, now + self.options.mark_delay);
        self.pending.push_back(key);
        active
    }

    /// Synchronously destroy one template, treating all of its checked-out
    /// handles as idle.
    ///
    /// Bypasses the incremental drain entirely; intended for urgent
    /// teardown of a single template. Returns `false` for unknown keys.
    pub fn force_clear(&mut self, key: TemplateKey) -> bool {
        let Some(entry) = self.templates.get_mut(&key) else {
            return false;
        };
        let recalled: Vec<InstanceId> = entry.active.drain().collect();
        for id in recalled {
            entry.free.push_back(id);
        }
        let freed = entry.free.len();
        self.unregister(key);
        self.stats.record_reclaimed();
        self.observer.on_event(&ReclaimEvent::Destroyed { key, freed });
        true
    }
}
