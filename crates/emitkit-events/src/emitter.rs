//! Synchronous event emitter.
//!
//! Listeners run on the caller's thread, inside [`EventEmitter::emit`], in
//! subscription order. The first listener failure stops the emission and is
//! returned to the caller unchanged.

use emitkit_core::{IntoListenerResult, Listener, ListenerResult, SyncHandler};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::next_event::NextEvent;
use crate::source::EventSource;
use crate::subscription::{RemovalGuard, SubscriberList, Subscription, SubscriptionId};

/// Subscription handle returned by [`EventEmitter`]
pub type SyncSubscription<T> = Subscription<SyncHandler<T>>;

/// Emitter delivering events synchronously.
///
/// Cloning yields another handle to the same subscriber list. Use `T = ()`
/// for signal-only events.
pub struct EventEmitter<T = ()> {
    subscribers: SubscriberList<SyncHandler<T>>,
}

impl<T: 'static> EventEmitter<T> {
    /// Create an empty emitter
    pub fn new() -> Self {
        Self {
            subscribers: SubscriberList::new(None),
        }
    }

    /// Create an empty emitter whose name is reported in log records
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            subscribers: SubscriberList::new(Some(name.into())),
        }
    }

    /// Name given at construction, if any
    pub fn name(&self) -> Option<&str> {
        self.subscribers.name()
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscriber_count() == 0
    }

    /// Subscribe a listener.
    ///
    /// The listener may return `()` or any `Result<(), E>` whose error
    /// converts into `anyhow::Error`.
    pub fn subscribe<F, R>(&self, listener: F) -> SyncSubscription<T>
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.subscribe_listener(Arc::new(move |event: &T| {
            listener(event).into_listener_result()
        }))
    }

    /// Subscribe an already shared listener.
    ///
    /// Subscribing the same `Listener` twice registers it twice; each
    /// registration is invoked on every emission.
    pub fn subscribe_listener(&self, listener: Listener<T>) -> SyncSubscription<T> {
        self.subscribers.push(listener)
    }

    /// Unsubscribe the first registration of `listener`.
    ///
    /// Returns false, and does nothing else, if it is not subscribed.
    pub fn unsubscribe(&self, listener: &Listener<T>) -> bool {
        self.subscribers.remove_listener(listener)
    }

    /// Subscribe a listener that runs at most once.
    ///
    /// After its first invocation the registration removes itself, before the
    /// emission moves on to the next listener. This happens even when that
    /// invocation fails, so a failing once-listener is not retried on the next
    /// emission. Re-entrant emissions started from inside the listener do not
    /// invoke it again.
    pub fn subscribe_once<F, R>(&self, listener: F) -> SyncSubscription<T>
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        let id = SubscriptionId::new();
        let entries = self.subscribers.downgrade();
        let fired = AtomicBool::new(false);

        let wrapper: Listener<T> = Arc::new(move |event: &T| {
            if fired.swap(true, Ordering::AcqRel) {
                return Ok(());
            }
            let _removal = RemovalGuard::new(entries.clone(), id);
            listener(event).into_listener_result()
        });

        self.subscribers.insert(id, wrapper)
    }

    /// Emit an event.
    ///
    /// Listeners subscribed when the call starts are invoked in order with a
    /// reference to `event`. Changes to the subscriber list made by listeners
    /// apply to later emissions only. The first failing listener aborts the
    /// emission and its error is returned.
    pub fn emit(&self, event: T) -> ListenerResult {
        let snapshot = self.subscribers.snapshot();
        tracing::trace!(
            emitter = self.subscribers.label(),
            subscribers = snapshot.len(),
            "Emitting event"
        );

        for listener in snapshot {
            listener(&event)?;
        }
        Ok(())
    }

    /// Future resolving with the payload of the next emission
    pub fn next_event(&self) -> NextEvent<T>
    where
        T: Clone + Send,
    {
        let (tx, next) = NextEvent::channel();
        let tx = Mutex::new(Some(tx));

        self.subscribe_once(move |event: &T| {
            if let Some(tx) = tx.lock().take() {
                // Nobody waiting any more is not an error.
                let _ = tx.send(event.clone());
            }
        });

        next
    }

    /// Create an emitter that re-emits every future event of this one
    pub fn pipe(&self) -> EventEmitter<T>
    where
        T: Clone,
    {
        self.pipe_map(T::clone)
    }

    /// Create an emitter that emits `map(event)` for every future event of
    /// this one.
    ///
    /// The returned emitter has its own subscribers. Failures of its
    /// listeners propagate back out of this emitter's `emit`.
    pub fn pipe_map<U, F>(&self, map: F) -> EventEmitter<U>
    where
        U: 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let piped = EventEmitter::new();
        let target = piped.clone();
        self.subscribe(move |event: &T| target.emit(map(event)));
        piped
    }
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventSource for EventEmitter<T> {
    type Event = T;

    fn subscriber_count(&self) -> usize {
        EventEmitter::subscriber_count(self)
    }
}

impl<T: 'static> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("name", &self.name())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
