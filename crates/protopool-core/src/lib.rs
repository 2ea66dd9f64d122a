//! # protopool-core
//!
//! Runtime object pool for expensive-to-instantiate resources, combined
//! with a memory-pressure-driven, time-budgeted incremental reclamation
//! scheduler.
//!
//! Instances are recycled per registered template and checked out through
//! [`Handle`] tokens. When a template's last handle is returned, the
//! template is marked; once process memory crosses configured thresholds,
//! marked templates at or below the authorized tier ceiling are queued and
//! destroyed a few per tick, under a count and wall-clock budget, so
//! reclamation never causes a visible stall.
//!
//! ```
//! use std::time::Duration;
//!
//! use protopool_core::{
//!     CloneLifecycle, PoolOptions, PrototypePool, TemplateKey, TemplateSource, Tier,
//! };
//!
//! let mut pool = PrototypePool::new(CloneLifecycle, PoolOptions::default());
//! pool.register(
//!     TemplateKey(1),
//!     TemplateSource::Owned(String::from("tree")),
//!     Tier::new(0),
//! );
//!
//! let handle = pool.acquire(TemplateKey(1)).unwrap();
//! assert_eq!(pool.get(handle).map(String::as_str), Some("tree"));
//! assert!(pool.release(handle, Duration::ZERO));
//!
//! // The idle instance is reused on the next checkout.
//! assert_eq!(pool.acquire(TemplateKey(1)), Some(handle));
//! ```

pub mod drain;
pub mod handle;
pub mod lifecycle;
pub mod observer;
pub mod observers;
pub mod options;
pub mod pool;
mod reclaim;
pub mod stats;
pub mod template;
pub mod tier;

// Re-exports
pub use drain::DrainOutcome;
pub use handle::{Handle, InstanceId, TemplateKey};
pub use lifecycle::{CloneLifecycle, InstanceLifecycle};
pub use observer::{ReclaimEvent, ReclaimObserver};
pub use observers::{CollectingObserver, NoOpObserver};
pub use options::{PoolError, PoolOptions};
pub use pool::PrototypePool;
pub use stats::PoolStats;
pub use template::TemplateSource;
pub use tier::Tier;
