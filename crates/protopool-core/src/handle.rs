//! Key and handle value types.

use serde::{Deserialize, Serialize};

/// Stable integer key identifying one registered template.
///
/// Deriving keys from string names is an external concern; the core only
/// ever compares keys for equality and assumes the derivation is
/// collision-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateKey(pub u64);

/// Identifier of one pooled instance, unique within its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

/// Token for one instantiated, poolable copy of a template.
///
/// Handles are `Copy`; whether a handle is checked out or idle is tracked
/// by the owning pool, never by the token itself. A handle whose template
/// has since been destroyed simply fails `release` with `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    /// Key of the owning template.
    pub template: TemplateKey,
    /// Instance behind this handle.
    pub instance: InstanceId,
}
