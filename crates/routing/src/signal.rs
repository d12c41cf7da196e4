//! Per-instance observer registries.
//!
//! A [`Signal`] owns its subscriber list. Emission copies the list out and
//! invokes callbacks with no lock held, so a callback may query the emitter,
//! mutate it again, or (un)subscribe without deadlocking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

type Slot<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Handle returned by [`Signal::connect`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous notification channel carrying a payload of type `A`.
pub struct Signal<A> {
    name: &'static str,
    next_id: AtomicU64,
    slots: Mutex<Vec<(SubscriptionId, Slot<A>)>>,
}

impl<A: Clone> Signal<A> {
    /// Creates a signal with no subscribers. `name` is only used for tracing.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: AtomicU64::new(1),
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Registers `callback`; it runs on the emitting thread.
    pub fn connect<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.slots.lock().push((id, Arc::new(callback)));
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: SubscriptionId) -> bool {
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|(slot_id, _)| *slot_id != id);
        slots.len() != before
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Invokes every subscriber registered at the time of the call.
    pub fn emit(&self, arg: A) {
        let slots: Vec<Slot<A>> = self
            .slots
            .lock()
            .iter()
            .map(|(_, slot)| Arc::clone(slot))
            .collect();
        trace!(signal = self.name, subscribers = slots.len(), "emit");
        for slot in &slots {
            slot(arg.clone());
        }
    }
}

impl<A> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("subscribers", &self.slots.lock().len())
            .finish()
    }
}
