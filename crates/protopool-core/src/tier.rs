//! Reclamation tiers.

use serde::{Deserialize, Serialize};

/// Reclamation priority of a template, an ordinal from 0 to 8.
///
/// Lower tiers are reclaimed first. A ceiling of tier `c` authorizes
/// reclaiming every tier `<= c`, inclusive of all lower tiers.
/// [`Tier::PINNED`] (8) is never eligible for automatic reclamation; such
/// templates are only destroyable through `force_clear` or `unregister`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8")]
pub struct Tier(u8);

impl Tier {
    /// Most disposable tier, reclaimed first.
    pub const MIN: Tier = Tier(0);

    /// Highest tier; never auto-reclaimed.
    pub const PINNED: Tier = Tier(8);

    /// Create a tier, clamping values above 8 to [`Tier::PINNED`].
    #[must_use]
    pub fn new(value: u8) -> Self {
        Tier(value.min(Self::PINNED.0))
    }

    /// Raw ordinal value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Tier {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}
