//! Concrete observer implementations.

use parking_lot::Mutex;

use crate::observer::{ReclaimEvent, ReclaimObserver};

/// Observer that ignores all events.
#[derive(Debug, Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ReclaimObserver for NoOpObserver {
    fn on_event(&self, _event: &ReclaimEvent) {}
}

/// Observer that records every event, for tests and diagnostics.
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<ReclaimEvent>>,
}

impl CollectingObserver {
    /// Create a new collecting observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<ReclaimEvent> {
        self.events.lock().clone()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ReclaimObserver for CollectingObserver {
    fn on_event(&self, event: &ReclaimEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::handle::TemplateKey;

    #[test]
    fn noop_observer_swallows_events() {
        let observer = NoOpObserver::new();
        observer.on_event(&ReclaimEvent::Destroyed {
            key: TemplateKey(1),
            freed: 2,
        });
    }

    #[test]
    fn collecting_observer_records_in_order() {
        let observer = CollectingObserver::new();
        observer.on_event(&ReclaimEvent::Marked {
            key: TemplateKey(1),
            eligible_at: Duration::from_millis(500),
        });
        observer.on_event(&ReclaimEvent::Skipped {
            key: TemplateKey(1),
            active: 3,
        });
        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ReclaimEvent::Marked { .. }));
        assert!(matches!(
            events[1],
            ReclaimEvent::Skipped {
                key: TemplateKey(1),
                active: 3
            }
        ));

        observer.clear();
        assert!(observer.events().is_empty());
    }
}
