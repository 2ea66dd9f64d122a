//! Template entries and source ownership.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::handle::InstanceId;
use crate::tier::Tier;

/// A template resource together with who owns it.
///
/// The distinction only matters on teardown: an [`Owned`] template is
/// routed through the lifecycle destroyer, a [`Shared`] one belongs to an
/// external asset system and teardown drops this reference only.
///
/// [`Owned`]: TemplateSource::Owned
/// [`Shared`]: TemplateSource::Shared
pub enum TemplateSource<T> {
    /// The pool owns the resource and destroys it with the template.
    Owned(T),
    /// The resource is held by an external asset system.
    Shared(Arc<T>),
}

impl<T> TemplateSource<T> {
    /// Borrow the underlying template resource.
    pub fn template(&self) -> &T {
        match self {
            TemplateSource::Owned(template) => template,
            TemplateSource::Shared(shared) => shared,
        }
    }
}

/// Per-template pooling state.
pub(crate) struct TemplateEntry<T> {
    pub(crate) source: TemplateSource<T>,
    pub(crate) tier: Tier,
    /// Idle instances, reused in FIFO order.
    pub(crate) free: VecDeque<InstanceId>,
    /// Checked-out instances.
    pub(crate) active: HashSet<InstanceId>,
    /// Backing storage for every live instance of this template.
    pub(crate) instances: HashMap<InstanceId, T>,
}

impl<T> TemplateEntry<T> {
    pub(crate) fn new(source: TemplateSource<T>, tier: Tier) -> Self {
        Self {
            source,
            tier,
            free: VecDeque::new(),
            active: HashSet::new(),
            instances: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_template_borrows_both_variants() {
        let owned: TemplateSource<String> = TemplateSource::Owned("a".into());
        assert_eq!(owned.template(), "a");

        let shared: TemplateSource<String> = TemplateSource::Shared(Arc::new("b".into()));
        assert_eq!(shared.template(), "b");
    }

    #[test]
    fn shared_source_keeps_external_reference_alive() {
        let external = Arc::new(String::from("asset"));
        let source = TemplateSource::Shared(Arc::clone(&external));
        drop(source);
        // The external owner still holds the resource.
        assert_eq!(*external, "asset");
        assert_eq!(Arc::strong_count(&external), 1);
    }
}
