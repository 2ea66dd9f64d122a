//! The per-tick driver gluing pool, probe, and throttle together.

use std::time::Duration;

use tracing::debug;

use protopool_core::{DrainOutcome, InstanceLifecycle, PrototypePool};

use crate::probe::MemoryProbe;
use crate::throttle::DrainThrottle;

/// What one driver tick did.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    /// Memory sample taken this tick, if the debounce allowed one.
    pub sampled_mib: Option<f64>,
    /// Outcome of the drain slice, if the queue was non-empty.
    pub drained: Option<DrainOutcome>,
}

/// Owns a pool and drives its reclamation once per host tick.
pub struct PoolDriver<T, L: InstanceLifecycle<T>, P: MemoryProbe> {
    pool: PrototypePool<T, L>,
    probe: P,
    throttle: DrainThrottle,
}

impl<T, L: InstanceLifecycle<T>, P: MemoryProbe> PoolDriver<T, L, P> {
    /// Create a driver around an existing pool.
    pub fn new(pool: PrototypePool<T, L>, probe: P, throttle: DrainThrottle) -> Self {
        Self {
            pool,
            probe,
            throttle,
        }
    }

    /// The driven pool.
    pub fn pool(&self) -> &PrototypePool<T, L> {
        &self.pool
    }

    /// Mutable pool access for `acquire`/`release` between ticks.
    pub fn pool_mut(&mut self) -> &mut PrototypePool<T, L> {
        &mut self.pool
    }

    /// Mutable access to the memory probe.
    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    /// Run one scheduler tick.
    ///
    /// Ordering within a tick is fixed: first a memory sample (only while
    /// the pending queue is empty and the sample debounce has elapsed),
    /// then one drain slice bounded by the throttle's count for
    /// `frame_delta` and the pool's wall-clock budget.
    ///
    /// `acquire` and `release` happen between ticks, never inside one. A
    /// removal mark cleared by an `acquire` before the next tick always
    /// wins over a queued key, because the drain re-checks marks at
    /// dequeue time.
    pub fn tick(&mut self, now: Duration, frame_delta: Duration) -> TickReport {
        let mut report = TickReport::default();

        if self.pool.should_sample(now) {
            let mib = self.probe.current_mib();
            self.pool.sample_and_trigger(mib, now);
            report.sampled_mib = Some(mib);
        }

        if self.pool.pending_len() > 0 {
            let max_count = self.throttle.max_count(frame_delta);
            let outcome = self.pool.drain(max_count);
            if outcome.destroyed > 0 {
                debug!(
                    destroyed = outcome.destroyed,
                    skipped = outcome.skipped,
                    remaining = self.pool.pending_len(),
                    "drained reclamation slice"
                );
            }
            report.drained = Some(outcome);
        }

        report
    }

    /// Tear down the driver, returning the pool.
    pub fn into_pool(self) -> PrototypePool<T, L> {
        self.pool
    }
}
