//! Replay-latest observable values.
//!
//! A [`BehaviorSignal`] always holds a current value. Subscribers receive that
//! value immediately on subscription and every published value afterwards,
//! synchronously, in publish order. Only the owning crate can publish.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct SignalState<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
}

/// Handle returned by [`BehaviorSignal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub struct BehaviorSignal<T> {
    state: Arc<Mutex<SignalState<T>>>,
}

impl<T> Clone for BehaviorSignal<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone> BehaviorSignal<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(SignalState {
                value: initial,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SignalState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Store `value` and notify every subscriber.
    ///
    /// Callbacks run after the lock is released, so a callback may read the
    /// signal (or subscribe) without deadlocking.
    pub(crate) fn publish(&self, value: T) {
        let subscribers: Vec<Callback<T>> = {
            let mut state = self.lock();
            state.value = value.clone();
            state.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in subscribers {
            callback(&value);
        }
    }

    /// Register `callback`, invoking it right away with the current value.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.push((id, Arc::clone(&callback)));
            (id, state.value.clone())
        };
        callback(&current);
        Subscription(id)
    }

    /// Remove a subscriber. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut state = self.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|(id, _)| *id != subscription.0);
        state.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for BehaviorSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("BehaviorSignal")
            .field("value", &state.value)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}
