//! Frame-rate-bucketed destruction throttle.

use std::time::Duration;

/// Maps an observed frame delta to the number of pending keys one tick is
/// allowed to destroy.
///
/// Buckets are `(max frame delta, count)` pairs tested in ascending
/// order: fast frames get the largest destruction budget, and frames
/// slower than every bucket fall back to `fallback` so a struggling host
/// is never asked to destroy more than the minimum.
#[derive(Debug, Clone)]
pub struct DrainThrottle {
    buckets: Vec<(Duration, usize)>,
    fallback: usize,
}

impl Default for DrainThrottle {
    /// Buckets at 33/40/50 ms (roughly 30/25/20 fps) with counts 4/3/2,
    /// falling back to one destruction per tick below 20 fps.
    fn default() -> Self {
        Self {
            buckets: vec![
                (Duration::from_millis(33), 4),
                (Duration::from_millis(40), 3),
                (Duration::from_millis(50), 2),
            ],
            fallback: 1,
        }
    }
}

impl DrainThrottle {
    /// Build a custom throttle from ascending `(max delta, count)`
    /// buckets.
    #[must_use]
    pub fn new(buckets: Vec<(Duration, usize)>, fallback: usize) -> Self {
        Self { buckets, fallback }
    }

    /// Destruction budget for a tick with the given frame delta.
    #[must_use]
    pub fn max_count(&self, frame_delta: Duration) -> usize {
        for &(limit, count) in &self.buckets {
            if frame_delta <= limit {
                return count;
            }
        }
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_frames_get_largest_budget() {
        let throttle = DrainThrottle::default();
        assert_eq!(throttle.max_count(Duration::from_millis(16)), 4);
        assert_eq!(throttle.max_count(Duration::from_millis(33)), 4);
    }

    #[test]
    fn buckets_step_down_with_slower_frames() {
        let throttle = DrainThrottle::default();
        assert_eq!(throttle.max_count(Duration::from_millis(38)), 3);
        assert_eq!(throttle.max_count(Duration::from_millis(45)), 2);
    }

    #[test]
    fn slowest_frames_fall_back_to_minimum() {
        let throttle = DrainThrottle::default();
        assert_eq!(throttle.max_count(Duration::from_millis(51)), 1);
        assert_eq!(throttle.max_count(Duration::from_secs(1)), 1);
    }

    #[test]
    fn custom_buckets_apply_in_order() {
        let throttle = DrainThrottle::new(vec![(Duration::from_millis(10), 8)], 2);
        assert_eq!(throttle.max_count(Duration::from_millis(5)), 8);
        assert_eq!(throttle.max_count(Duration::from_millis(20)), 2);
    }
}
