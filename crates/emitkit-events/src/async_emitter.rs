//! Asynchronous event emitter.
//!
//! Listeners return futures. An emission resolves them according to the
//! emitter's [`DeliveryMode`]:
//!
//! ```text
//!  Sequential:  A ──────▶ B ──▶ C ────▶ done      (first failure stops the chain)
//!
//!  Concurrent:  A ──────────┐
//!               B ──▶       ├──▶ done             (all run to completion,
//!               C ────▶     ┘                      first failure reported)
//! ```
//!
//! Nothing is spawned. Concurrent listeners are polled together by the
//! emission future itself, so they interleave only at their own await points.
//! Two emissions are never serialized against each other either; callers that
//! need that must await one before starting the next.

use emitkit_core::{
    all, AsyncHandler, AsyncListener, Awaitable, IntoListenerResult, ListenerResult,
};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::config::{AsyncEmitterConfig, DeliveryMode};
use crate::next_event::NextEvent;
use crate::source::EventSource;
use crate::subscription::{RemovalGuard, SubscriberList, Subscription, SubscriptionId};

/// Subscription handle returned by [`AsyncEventEmitter`]
pub type AsyncSubscription<T> = Subscription<AsyncHandler<T>>;

/// Future returned by [`AsyncEventEmitter::emit`].
///
/// The subscriber snapshot is taken when `emit` is called. Dropping the
/// emission before it completes stops delivery at the current listener.
#[must_use = "listeners are not run to completion unless the emission is awaited"]
pub struct Emission(Awaitable<'static, ListenerResult>);

impl Future for Emission {
    type Output = ListenerResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl std::fmt::Debug for Emission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Emission").field(&self.0).finish()
    }
}

/// Emitter delivering events to asynchronous listeners.
///
/// Cloning yields another handle to the same subscriber list and delivery
/// mode. Use `T = ()` for signal-only events.
pub struct AsyncEventEmitter<T = ()> {
    subscribers: SubscriberList<AsyncHandler<T>>,
    delivery: DeliveryMode,
}

impl<T> AsyncEventEmitter<T>
where
    T: Clone + Send + 'static,
{
    /// Create an empty emitter with sequential delivery
    pub fn new() -> Self {
        Self::with_config(AsyncEmitterConfig::default())
    }

    /// Create an empty emitter with the given delivery mode
    pub fn with_delivery(delivery: DeliveryMode) -> Self {
        Self::with_config(AsyncEmitterConfig::with_delivery(delivery))
    }

    /// Create an empty emitter from a configuration
    pub fn with_config(config: AsyncEmitterConfig) -> Self {
        Self {
            subscribers: SubscriberList::new(config.name),
            delivery: config.delivery,
        }
    }

    /// Delivery mode fixed at construction
    pub fn delivery(&self) -> DeliveryMode {
        self.delivery
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

    /// Subscribe an asynchronous listener.
    ///
    /// The listener receives its own clone of the payload. Its future may
    /// resolve to `()` or to any `Result<(), E>` whose error converts into
    /// `anyhow::Error`.
    pub fn subscribe<F, Fut>(&self, listener: F) -> AsyncSubscription<T>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoListenerResult,
    {
        self.subscribe_listener(Arc::new(move |event: T| {
            let pending = listener(event);
            Awaitable::pending(async move { pending.await.into_listener_result() })
        }))
    }

    /// Subscribe an already shared listener.
    ///
    /// Subscribing the same `AsyncListener` twice registers it twice.
    pub fn subscribe_listener(&self, listener: AsyncListener<T>) -> AsyncSubscription<T> {
        self.subscribers.push(listener)
    }

    /// Unsubscribe the first registration of `listener`.
    ///
    /// Returns false, and does nothing else, if it is not subscribed.
    pub fn unsubscribe(&self, listener: &AsyncListener<T>) -> bool {
        self.subscribers.remove_listener(listener)
    }

    /// Subscribe a listener that runs at most once.
    ///
    /// The registration is removed once the listener's future has completed,
    /// whether it succeeded or failed, or when that future is dropped
    /// unfinished because its emission was cancelled. Emissions that overlap
    /// the first one skip the listener instead of starting it a second time.
    pub fn subscribe_once<F, Fut>(&self, listener: F) -> AsyncSubscription<T>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoListenerResult,
    {
        let id = SubscriptionId::new();
        let entries = self.subscribers.downgrade();
        let fired = AtomicBool::new(false);

        let wrapper: AsyncListener<T> = Arc::new(move |event: T| {
            if fired.swap(true, Ordering::AcqRel) {
                return Awaitable::ready(Ok(()));
            }

            let removal = RemovalGuard::new(entries.clone(), id);
            let pending = listener(event);
            Awaitable::pending(async move {
                let _removal = removal;
                pending.await.into_listener_result()
            })
        });

        self.subscribers.insert(id, wrapper)
    }

    /// Emit an event.
    ///
    /// The listeners subscribed at the time of the call are resolved
    /// according to the delivery mode:
    /// - `Sequential`: one at a time, in order. The first failure is returned
    ///   and the remaining listeners are not started.
    /// - `Concurrent`: all are started immediately and the emission completes
    ///   once every one of them has. The first failure detected is returned;
    ///   later ones are logged.
    pub fn emit(&self, event: T) -> Emission {
        let snapshot = self.subscribers.snapshot();
        tracing::trace!(
            emitter = self.subscribers.label(),
            subscribers = snapshot.len(),
            delivery = %self.delivery,
            "Emitting event"
        );

        if snapshot.is_empty() {
            return Emission(Awaitable::ready(Ok(())));
        }

        match self.delivery {
            DeliveryMode::Sequential => Emission(Awaitable::pending(async move {
                for listener in snapshot {
                    listener(event.clone()).await?;
                }
                Ok(())
            })),
            DeliveryMode::Concurrent => {
                let started: Vec<_> = snapshot
                    .iter()
                    .map(|listener| listener(event.clone()))
                    .collect();
                Emission(Awaitable::pending(async move {
                    all(started).await.map(|_| ())
                }))
            }
        }
    }

    /// Future resolving with the payload of the next emission
    pub fn next_event(&self) -> NextEvent<T> {
        let (tx, next) = NextEvent::channel();
        let tx = Mutex::new(Some(tx));

        self.subscribe_once(move |event: T| {
            // Delivered on invocation, so dropping the emission cannot lose it.
            if let Some(tx) = tx.lock().take() {
                // Nobody waiting any more is not an error.
                let _ = tx.send(event);
            }
            std::future::ready(())
        });

        next
    }

    /// Create an emitter that re-emits every future event of this one
    pub fn pipe(&self) -> AsyncEventEmitter<T> {
        self.pipe_map(std::convert::identity)
    }

    /// Create an emitter that emits `map(event)` for every future event of
    /// this one.
    ///
    /// The returned emitter uses sequential delivery and has its own
    /// subscribers. This emitter's listener for it completes only when the
    /// downstream emission does, and downstream failures propagate back.
    pub fn pipe_map<U, F>(&self, map: F) -> AsyncEventEmitter<U>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let piped = AsyncEventEmitter::new();
        let target = piped.clone();
        self.subscribe(move |event: T| target.emit(map(event)));
        piped
    }
}

impl<T> Clone for AsyncEventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
            delivery: self.delivery,
        }
    }
}

impl<T> Default for AsyncEventEmitter<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventSource for AsyncEventEmitter<T>
where
    T: Clone + Send + 'static,
{
    type Event = T;

    fn subscriber_count(&self) -> usize {
        AsyncEventEmitter::subscriber_count(self)
    }
}

impl<T> std::fmt::Debug for AsyncEventEmitter<T>
where
    T: Clone + Send + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncEventEmitter")
            .field("name", &self.name())
            .field("delivery", &self.delivery)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use emitkit_core::thread_safe_vec;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_emit_without_subscribers_completes() {
        let emitter = AsyncEventEmitter::<u8>::new();
        let emission = emitter.emit(1);
        assert!(emission.0.is_ready());
        emission.await.expect("nothing to fail");
    }

    #[tokio::test]
    async fn test_sequential_awaits_each_listener() {
        let emitter = AsyncEventEmitter::<u32>::new();
        let log = thread_safe_vec();

        for (name, delay) in [("slow", 20), ("fast", 1)] {
            let log = log.clone();
            emitter.subscribe(move |_| {
                let log = log.clone();
                async move {
                    sleep(Duration::from_millis(delay)).await;
                    log.lock().push(name);
                }
            });
        }

        emitter.emit(7).await.unwrap();
        assert_eq!(*log.lock(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_concurrent_starts_all_listeners_at_emit() {
        let emitter = AsyncEventEmitter::<()>::with_delivery(DeliveryMode::Concurrent);
        let started = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let started = started.clone();
            emitter.subscribe(move |_| {
                started.fetch_add(1, Ordering::SeqCst);
                sleep(Duration::from_millis(5))
            });
        }

        let emission = emitter.emit(());
        assert_eq!(started.load(Ordering::SeqCst), 3);
        emission.await.unwrap();
    }

    #[tokio::test]
    async fn test_once_listener_skips_overlapping_emissions() {
        let emitter = AsyncEventEmitter::<u32>::with_delivery(DeliveryMode::Concurrent);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let subscription = emitter.subscribe_once(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            sleep(Duration::from_millis(10))
        });

        let first = emitter.emit(1);
        let second = emitter.emit(2);
        assert!(subscription.is_active());

        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!subscription.is_active());
    }

    #[tokio::test]
    async fn test_once_listener_is_removed_after_failure() {
        let emitter = AsyncEventEmitter::<u32>::new();

        let subscription =
            emitter.subscribe_once(|_| async { Err::<(), _>(anyhow!("once failed")) });

        let err = emitter.emit(1).await.unwrap_err();
        assert_eq!(err.to_string(), "once failed");
        assert!(!subscription.is_active());
        emitter.emit(2).await.expect("listener is gone");
    }

    #[test]
    fn test_debug_reports_delivery() {
        let emitter = AsyncEventEmitter::<()>::with_config(
            AsyncEmitterConfig::with_delivery(DeliveryMode::Concurrent).named("jobs"),
        );
        let shown = format!("{:?}", emitter);
        assert!(shown.contains("jobs"));
        assert!(shown.contains("Concurrent"));
    }
}
