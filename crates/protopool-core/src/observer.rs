//! Observer hooks for reclamation events.

use std::time::Duration;

use crate::handle::TemplateKey;

/// A reclamation event emitted by the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimEvent {
    /// A template's active set emptied and it was marked for reclamation.
    Marked {
        /// Template that became idle.
        key: TemplateKey,
        /// Time after which the mark matures.
        eligible_at: Duration,
    },
    /// A template was destroyed and unregistered.
    Destroyed {
        /// Template that was destroyed.
        key: TemplateKey,
        /// Idle instances destroyed with it.
        freed: usize,
    },
    /// A reclamation target still had checked-out handles and was skipped.
    Skipped {
        /// Template that was passed over.
        key: TemplateKey,
        /// Handles still checked out at the time.
        active: usize,
    },
}

/// Observer trait for receiving reclamation events.
pub trait ReclaimObserver: Send + Sync {
    /// Receive one event.
    fn on_event(&self, event: &ReclaimEvent);
}
