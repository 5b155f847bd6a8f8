use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::{
    foundation::value::Props,
    mount::builder::MountableTree,
    mount::channel::{PropObserver, Subscription},
};

#[derive(Default)]
struct LiveProps {
    latest: Mutex<Props>,
    deliveries: AtomicUsize,
    detached: AtomicBool,
}

impl PropObserver for LiveProps {
    fn next(&self, props: &Props) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = props.clone();
        self.deliveries.fetch_add(1, Ordering::SeqCst);
    }

    fn complete(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }
}

struct Shared(Arc<LiveProps>);

impl PropObserver for Shared {
    fn next(&self, props: &Props) {
        self.0.next(props);
    }

    fn complete(&self) {
        self.0.complete();
    }
}

/// Minimal host-side instance of a [`MountableTree`] for tests.
///
/// It follows the tree's prop channel like a live component would and can fire output events
/// into action props.
pub struct MountedStory {
    tree: MountableTree,
    live: Arc<LiveProps>,
    _subscription: Subscription,
}

impl MountedStory {
    /// Attach to `tree`'s prop channel.
    pub fn mount(tree: MountableTree) -> Self {
        let live = Arc::new(LiveProps::default());
        let subscription = tree.props.subscribe(Shared(live.clone()));
        Self {
            tree,
            live,
            _subscription: subscription,
        }
    }

    /// The mounted tree.
    pub fn tree(&self) -> &MountableTree {
        &self.tree
    }

    /// Props as currently seen by the component.
    pub fn props(&self) -> Props {
        self.live
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of prop values received, including the initial one.
    pub fn deliveries(&self) -> usize {
        self.live.deliveries.load(Ordering::SeqCst)
    }

    /// Whether the tree's channel completed.
    pub fn is_detached(&self) -> bool {
        self.live.detached.load(Ordering::SeqCst)
    }

    /// Fire output `name` with `payload`. Returns `false` when detached or when no action prop
    /// is bound under that name.
    pub fn emit(&self, name: &str, payload: &Value) -> bool {
        if self.is_detached() {
            return false;
        }
        let action = self
            .live
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .and_then(|v| v.as_action().cloned());
        match action {
            Some(a) => {
                a.invoke(payload);
                true
            }
            None => false,
        }
    }

    /// Tear the tree down, completing its channel.
    pub fn destroy(&self) {
        self.tree.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/host.rs"]
mod tests;
