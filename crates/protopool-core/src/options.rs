//! Pool configuration and validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Error type for pool configuration.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Tuning knobs for tiered, memory-pressure-driven reclamation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolOptions {
    /// Ascending memory thresholds in MiB. Crossing a higher threshold
    /// authorizes the matching (higher) tier ceiling.
    pub thresholds: [f64; 3],
    /// Ascending tier ceilings matched to `thresholds`.
    pub ceilings: [Tier; 3],
    /// Minimum time between two memory-pressure samples.
    pub sample_interval: Duration,
    /// Debounce delay before an idle template becomes eligible for
    /// automatic reclamation.
    pub mark_delay: Duration,
    /// Wall-clock budget for one incremental drain call.
    pub drain_time_budget: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            thresholds: [50.0, 100.0, 150.0],
            ceilings: [Tier::new(1), Tier::new(3), Tier::new(6)],
            sample_interval: Duration::from_secs(10),
            mark_delay: Duration::from_millis(500),
            drain_time_budget: Duration::from_millis(40),
        }
    }
}

impl PoolOptions {
    /// Validate threshold and ceiling ordering.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.thresholds[0] <= 0.0 {
            return Err(PoolError::Config(format!(
                "memory thresholds must be positive, got {:?}",
                self.thresholds
            )));
        }
        if self.thresholds[0] >= self.thresholds[1] || self.thresholds[1] >= self.thresholds[2] {
            return Err(PoolError::Config(format!(
                "memory thresholds must be strictly ascending, got {:?}",
                self.thresholds
            )));
        }
        if self.ceilings[0] > self.ceilings[1] || self.ceilings[1] > self.ceilings[2] {
            return Err(PoolError::Config(format!(
                "tier ceilings must be ascending, got {:?}",
                self.ceilings
            )));
        }
        if self.sample_interval.is_zero() {
            return Err(PoolError::Config(
                "sample interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Tier ceiling authorized by a memory sample, if any.
    ///
    /// The highest crossed threshold wins; exactly one ceiling is chosen
    /// per sampling pass. Below the lowest threshold no reclamation is
    /// authorized.
    #[must_use]
    pub fn ceiling_for(&self, memory_mib: f64) -> Option<Tier> {
        if memory_mib >= self.thresholds[2] {
            Some(self.ceilings[2])
        } else if memory_mib >= self.thresholds[1] {
            Some(self.ceilings[1])
        } else if memory_mib >= self.thresholds[0] {
            Some(self.ceilings[0])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_validate() {
        assert!(PoolOptions::default().validate().is_ok());
    }

    #[test]
    fn non_ascending_thresholds_rejected() {
        let opts = PoolOptions {
            thresholds: [100.0, 100.0, 150.0],
            ..PoolOptions::default()
        };
        assert!(matches!(opts.validate(), Err(PoolError::Config(_))));
    }

    #[test]
    fn non_positive_threshold_rejected() {
        let opts = PoolOptions {
            thresholds: [0.0, 100.0, 150.0],
            ..PoolOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn descending_ceilings_rejected() {
        let opts = PoolOptions {
            ceilings: [Tier::new(3), Tier::new(1), Tier::new(6)],
            ..PoolOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn zero_sample_interval_rejected() {
        let opts = PoolOptions {
            sample_interval: Duration::ZERO,
            ..PoolOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn ceiling_selection_highest_threshold_wins() {
        let opts = PoolOptions::default();
        assert_eq!(opts.ceiling_for(20.0), None);
        assert_eq!(opts.ceiling_for(50.0), Some(Tier::new(1)));
        assert_eq!(opts.ceiling_for(120.0), Some(Tier::new(3)));
        assert_eq!(opts.ceiling_for(150.0), Some(Tier::new(6)));
        assert_eq!(opts.ceiling_for(9000.0), Some(Tier::new(6)));
    }

    #[test]
    fn ceiling_selection_is_monotonic() {
        let opts = PoolOptions::default();
        let low = opts.ceiling_for(55.0).unwrap();
        let high = opts.ceiling_for(200.0).unwrap();
        // A higher sample authorizes a superset of tiers.
        assert!(low <= high);
    }

    #[test]
    fn options_round_trip_json() {
        let opts = PoolOptions::default();
        let json = serde_json::to_string(&opts).unwrap();
        let back: PoolOptions = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.ceilings, opts.ceilings);
    }
}
