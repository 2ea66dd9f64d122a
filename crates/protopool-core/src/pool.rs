//! The pool context: template registry and checkout protocol.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::handle::{Handle, InstanceId, TemplateKey};
use crate::lifecycle::InstanceLifecycle;
use crate::observer::{ReclaimEvent, ReclaimObserver};
use crate::observers::NoOpObserver;
use crate::options::PoolOptions;
use crate::stats::{AtomicPoolStats, PoolStats};
use crate::template::{TemplateEntry, TemplateSource};
use crate::tier::Tier;

/// A pool of reusable instances grouped by template.
///
/// All pool state lives in this one context object; there are no hidden
/// statics, so multiple independent pools can coexist. Operations take
/// `&mut self` and never block, matching the single-threaded cooperative
/// model: `acquire`, `release`, and `drain` execute atomically within a
/// tick boundary. A multi-threaded host must serialize access externally
/// (confine the pool to one thread, or wrap it in a mutex).
pub struct PrototypePool<T, L: InstanceLifecycle<T>> {
    pub(crate) lifecycle: L,
    pub(crate) options: PoolOptions,
    pub(crate) templates: HashMap<TemplateKey, TemplateEntry<T>>,
    /// Key -> time after which the key is eligible for tier reclamation.
    pub(crate) marks: HashMap<TemplateKey, Duration>,
    /// Keys awaiting incremental destruction.
    pub(crate) pending: VecDeque<TemplateKey>,
    /// Time of the last memory-pressure sample.
    pub(crate) last_sample: Duration,
    pub(crate) observer: Arc<dyn ReclaimObserver>,
    pub(crate) stats: AtomicPoolStats,
    next_instance: u64,
}

impl<T, L: InstanceLifecycle<T>> PrototypePool<T, L> {
    /// Create an empty pool with the given lifecycle and options.
    pub fn new(lifecycle: L, options: PoolOptions) -> Self {
        Self {
            lifecycle,
            options,
            templates: HashMap::new(),
            marks: HashMap::new(),
            pending: VecDeque::new(),
            last_sample: Duration::ZERO,
            observer: Arc::new(NoOpObserver),
            stats: AtomicPoolStats::new(),
            next_instance: 0,
        }
    }

    /// Replace the reclamation observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ReclaimObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ------------------------------------------------------------------
    // Template registry
    // ------------------------------------------------------------------

    /// Register a template under `key`.
    ///
    /// Returns `true` if the key was newly registered. Re-registering an
    /// existing key replaces the source but keeps the tier and any pooled
    /// instances, and returns `false`.
    pub fn register(&mut self, key: TemplateKey, source: TemplateSource<T>, tier: Tier) -> bool {
        match self.templates.entry(key) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().source = source;
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(TemplateEntry::new(source, tier));
                debug!(key = key.0, tier = tier.value(), "registered template");
                true
            }
        }
    }

    /// Look up the template resource for `key`.
    pub fn lookup(&self, key: TemplateKey) -> Option<&T> {
        self.templates.get(&key).map(|entry| entry.source.template())
    }

    /// Whether `key` is registered.
    #[must_use]
    pub fn contains(&self, key: TemplateKey) -> bool {
        self.templates.contains_key(&key)
    }

    /// Destroy a template and every instance it still owns.
    ///
    /// All remaining instances, checked out or idle, go through the
    /// lifecycle destroyer; the source is torn down per its ownership tag.
    /// Idempotent when the key is absent.
    pub fn unregister(&mut self, key: TemplateKey) {
        let Some(mut entry) = self.templates.remove(&key) else {
            return;
        };
        self.marks.remove(&key);
        let count = entry.instances.len() as u64;
        for (_, instance) in entry.instances.drain() {
            self.lifecycle.destroy(instance);
        }
        match entry.source {
            TemplateSource::Owned(template) => self.lifecycle.destroy(template),
            TemplateSource::Shared(shared) => drop(shared),
        }
        self.stats.record_destroyed(count);
        debug!(key = key.0, instances = count, "unregistered template");
    }

    /// Destroy every template and instance and reset all scheduler state.
    pub fn clear_all(&mut self) {
        let keys: Vec<TemplateKey> = self.templates.keys().copied().collect();
        for key in keys {
            self.unregister(key);
        }
        self.marks.clear();
        self.pending.clear();
        self.last_sample = Duration::ZERO;
    }

    // ------------------------------------------------------------------
    // Checkout protocol
    // ------------------------------------------------------------------

    /// Check out an instance of `key`, reusing an idle one when possible.
    ///
    /// Returns `None` for keys not in the registry. A checkout cancels any
    /// pending idle-eviction mark for the key, so a template re-acquired
    /// before the drain reaches it is never destroyed.
    pub fn acquire(&mut self, key: TemplateKey) -> Option<Handle> {
        let entry = self.templates.get_mut(&key)?;
        self.marks.remove(&key);
        let id = if let Some(id) = entry.free.pop_front() {
            self.stats.record_hit();
            id
        } else {
            let instance = self.lifecycle.instantiate(entry.source.template());
            let id = InstanceId(self.next_instance);
            self.next_instance += 1;
            entry.instances.insert(id, instance);
            self.stats.record_miss();
            id
        };
        entry.active.insert(id);
        Some(Handle {
            template: key,
            instance: id,
        })
    }

    /// Return a checked-out instance to its template's free queue.
    ///
    /// Returns `false`, leaving all queues unchanged, when the handle's
    /// template is gone or the handle is not currently active (double
    /// release, foreign handle). When the last active handle comes back
    /// and the tier is below [`Tier::PINNED`], the template is marked for
    /// reclamation at `now + mark_delay`.
    pub fn release(&mut self, handle: Handle, now: Duration) -> bool {
        let Some(entry) = self.templates.get_mut(&handle.template) else {
            return false;
        };
        if !entry.active.remove(&handle.instance) {
            return false;
        }
        entry.free.push_back(handle.instance);
        if entry.active.is_empty() && entry.tier < Tier::PINNED {
            let eligible_at = now + self.options.mark_delay;
            self.marks.insert(handle.template, eligible_at);
            self.observer.on_event(&ReclaimEvent::Marked {
                key: handle.template,
                eligible_at,
            });
        }
        true
    }

    /// Borrow the instance behind a handle.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.templates
            .get(&handle.template)?
            .instances
            .get(&handle.instance)
    }

    /// Mutably borrow the instance behind a handle.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.templates
            .get_mut(&handle.template)?
            .instances
            .get_mut(&handle.instance)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of registered templates.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Idle instances pooled for `key`.
    #[must_use]
    pub fn free_count(&self, key: TemplateKey) -> usize {
        self.templates.get(&key).map_or(0, |entry| entry.free.len())
    }

    /// Checked-out instances for `key`.
    #[must_use]
    pub fn active_count(&self, key: TemplateKey) -> usize {
        self.templates
            .get(&key)
            .map_or(0, |entry| entry.active.len())
    }

    /// Live instances (idle and checked out) for `key`.
    #[must_use]
    pub fn instance_count(&self, key: TemplateKey) -> usize {
        self.templates
            .get(&key)
            .map_or(0, |entry| entry.instances.len())
    }

    /// Whether `key` currently carries a removal mark.
    #[must_use]
    pub fn is_marked(&self, key: TemplateKey) -> bool {
        self.marks.contains_key(&key)
    }

    /// Number of keys queued for incremental destruction.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Snapshot of activity counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Reset activity counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Reclamation options this pool was built with.
    #[must_use]
    pub fn options(&self) -> &PoolOptions {
        &self.options
    }
}
