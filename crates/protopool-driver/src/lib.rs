//! # protopool-driver
//!
//! Per-tick driving of a [`protopool_core::PrototypePool`]: memory
//! probing, frame-rate-bucketed drain throttling, and the tick loop glue.
//! The pool core exposes no timer or thread of its own; a host calls
//! [`PoolDriver::tick`] once per frame with an elapsed-time sample and the
//! observed frame delta.

pub mod driver;
pub mod probe;
pub mod throttle;

// Re-exports
pub use driver::{PoolDriver, TickReport};
pub use probe::{FixedProbe, MemoryProbe, ProcessMemoryProbe};
pub use throttle::DrainThrottle;
