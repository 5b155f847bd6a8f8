use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::foundation::value::Props;

/// Receiver of prop updates.
pub trait PropObserver: Send + Sync {
    /// A new props value; the last one delivered wins.
    fn next(&self, props: &Props);

    /// The channel completed; no further values follow.
    fn complete(&self) {}
}

impl<F> PropObserver for F
where
    F: Fn(&Props) + Send + Sync,
{
    fn next(&self, props: &Props) {
        self(props)
    }
}

struct ChannelState {
    current: Props,
    observers: Vec<(u64, Arc<dyn PropObserver>)>,
    next_id: u64,
    closed: bool,
}

/// Multicast, push-based stream of the current props of one mounted tree.
///
/// New subscribers immediately receive the current value. After [`PropChannel::complete`],
/// pushes are dropped and late subscribers only receive the completion signal.
/// Clones share the same stream.
#[derive(Clone)]
pub struct PropChannel {
    inner: Arc<Mutex<ChannelState>>,
}

impl PropChannel {
    /// Channel seeded with `initial`.
    pub fn new(initial: Props) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChannelState {
                current: initial,
                observers: Vec::new(),
                next_id: 0,
                closed: false,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, ChannelState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push a new value to every subscriber. Dropped once the channel is complete.
    pub fn next(&self, props: Props) {
        let observers = {
            let mut st = self.state();
            if st.closed {
                tracing::trace!("prop push after completion dropped");
                return;
            }
            st.current = props.clone();
            snapshot(&st)
        };
        for o in observers {
            o.next(&props);
        }
    }

    /// Complete the channel, detaching every subscriber. Idempotent.
    pub fn complete(&self) {
        let observers = {
            let mut st = self.state();
            if st.closed {
                return;
            }
            st.closed = true;
            std::mem::take(&mut st.observers)
        };
        tracing::debug!(subscribers = observers.len(), "prop channel completed");
        for (_, o) in observers {
            o.complete();
        }
    }

    /// Whether [`PropChannel::complete`] has been called.
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// Latest value pushed (or the seed).
    pub fn current(&self) -> Props {
        self.state().current.clone()
    }

    /// Number of attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.state().observers.len()
    }

    /// Whether both handles refer to the same stream.
    pub fn same_channel(&self, other: &PropChannel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Attach an observer. It receives the current value right away.
    pub fn subscribe(&self, observer: impl PropObserver + 'static) -> Subscription {
        let observer: Arc<dyn PropObserver> = Arc::new(observer);
        let (id, current) = {
            let mut st = self.state();
            if st.closed {
                drop(st);
                observer.complete();
                return Subscription {
                    channel: Weak::new(),
                    id: 0,
                };
            }
            let id = st.next_id;
            st.next_id += 1;
            st.observers.push((id, observer.clone()));
            (id, st.current.clone())
        };
        observer.next(&current);
        Subscription {
            channel: Arc::downgrade(&self.inner),
            id,
        }
    }
}

fn snapshot(st: &ChannelState) -> Vec<Arc<dyn PropObserver>> {
    st.observers.iter().map(|(_, o)| o.clone()).collect()
}

impl fmt::Debug for PropChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.state();
        f.debug_struct("PropChannel")
            .field("current", &st.current)
            .field("subscribers", &st.observers.len())
            .field("closed", &st.closed)
            .finish()
    }
}

/// Handle detaching its observer when dropped.
#[must_use = "dropping a subscription detaches the observer"]
pub struct Subscription {
    channel: Weak<Mutex<ChannelState>>,
    id: u64,
}

impl Subscription {
    /// Detach now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the observer is still attached to an open channel.
    pub fn is_active(&self) -> bool {
        self.channel.upgrade().is_some_and(|inner| {
            let st = inner.lock().unwrap_or_else(PoisonError::into_inner);
            st.observers.iter().any(|(id, _)| *id == self.id)
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.channel.upgrade() {
            let mut st = inner.lock().unwrap_or_else(PoisonError::into_inner);
            st.observers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/channel.rs"]
mod tests;
