//! # protopool (CLI)
//!
//! Deterministic simulation harness for the protopool runtime object
//! pool: registers a spread of templates, churns acquires and releases,
//! and drives reclamation ticks against a synthetic memory curve.

pub mod app;
pub mod config;
