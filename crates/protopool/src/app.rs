//! Simulation workload and reporting.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use protopool_core::{
    CloneLifecycle, Handle, PoolOptions, PrototypePool, TemplateKey, TemplateSource, Tier,
};
use protopool_driver::{DrainThrottle, FixedProbe, PoolDriver};

use crate::config::AppConfig;

/// One simulated scene resource.
#[derive(Clone)]
struct Prop {
    name: String,
    payload: Vec<u8>,
}

/// FNV-1a hash of a template name. Key derivation stays outside the pool
/// core; this is the harness's stand-in for the host's hasher.
fn key_of(name: &str) -> TemplateKey {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    TemplateKey(hash)
}

/// Deterministic generator for the workload (PCG-style multiplier).
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

/// Run the simulation described by `config`.
pub fn run(config: &AppConfig) -> Result<()> {
    let thresholds = config.thresholds_mib().map_err(|e| anyhow!(e))?;
    let frame_delta = config.frame_delta_duration().map_err(|e| anyhow!(e))?;
    let sample_interval = config.sample_interval_duration().map_err(|e| anyhow!(e))?;

    let options = PoolOptions {
        thresholds,
        sample_interval,
        ..PoolOptions::default()
    };
    options.validate()?;

    let pool = PrototypePool::new(CloneLifecycle, options);
    let mut driver = PoolDriver::new(pool, FixedProbe::new(0.0), DrainThrottle::default());

    // Register templates across the whole tier range.
    let mut keys = Vec::with_capacity(config.templates as usize);
    for i in 0..config.templates {
        let name = format!("prop-{i:04}");
        let key = key_of(&name);
        #[allow(clippy::cast_possible_truncation)]
        let tier = Tier::new((i % 9) as u8);
        let prop = Prop {
            name,
            payload: vec![0u8; 256],
        };
        debug!(template = %prop.name, tier = tier.value(), bytes = prop.payload.len(), "registering");
        driver
            .pool_mut()
            .register(key, TemplateSource::Owned(prop), tier);
        keys.push(key);
    }

    let mut rng = Rng(config.seed);
    let mut held: Vec<Handle> = Vec::new();
    let mut now = Duration::ZERO;

    for tick in 0..config.ticks {
        // Checkout churn: a few acquires, a few returns.
        for _ in 0..4 {
            let key = keys[rng.next() as usize % keys.len()];
            if let Some(handle) = driver.pool_mut().acquire(key) {
                held.push(handle);
            }
        }
        while !held.is_empty() && (held.len() > 64 || rng.next() % 3 == 0) {
            let index = rng.next() as usize % held.len();
            let handle = held.swap_remove(index);
            driver.pool_mut().release(handle, now);
        }

        // Synthetic memory curve: live instances weigh `instance_mib` each.
        let live: usize = keys
            .iter()
            .map(|&key| driver.pool().instance_count(key))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        driver.probe_mut().set(live as f64 * config.instance_mib);

        let report = driver.tick(now, frame_delta);
        if let Some(drained) = report.drained {
            if drained.destroyed > 0 {
                info!(
                    tick,
                    destroyed = drained.destroyed,
                    skipped = drained.skipped,
                    "reclaimed templates"
                );
            }
        }
        now += frame_delta;
    }

    let stats = driver.pool().stats();
    if config.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else if !config.quiet {
        println!("templates remaining: {}", driver.pool().template_count());
        println!("hits: {}  misses: {}", stats.hits, stats.misses);
        println!(
            "reclaimed: {}  skipped: {}  instances destroyed: {}",
            stats.reclaimed, stats.skipped, stats.destroyed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_of_is_stable_and_distinct() {
        assert_eq!(key_of("prop-0001"), key_of("prop-0001"));
        assert_ne!(key_of("prop-0001"), key_of("prop-0002"));
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = Rng(42);
        let mut b = Rng(42);
        for _ in 0..10 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn run_smoke() {
        let config = AppConfig {
            templates: 8,
            ticks: 200,
            frame_delta: "16ms".into(),
            thresholds: "2M,4M,6M".into(),
            sample_interval: "100ms".into(),
            instance_mib: 0.5,
            seed: 7,
            json: false,
            quiet: true,
        };
        run(&config).unwrap();
    }
}
