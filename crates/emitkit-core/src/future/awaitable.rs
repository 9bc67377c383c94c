use futures::future::{BoxFuture, Ready};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A value that is either already available or still being computed.
///
/// Awaiting a `Ready` value completes on the first poll without allocating.
#[must_use = "an Awaitable does nothing unless awaited"]
pub enum Awaitable<'a, T> {
    /// Immediately available value.
    Ready(Ready<T>),
    /// Deferred value.
    Pending(BoxFuture<'a, T>),
}

impl<'a, T> Awaitable<'a, T> {
    /// Wrap an immediate value.
    pub fn ready(value: T) -> Self {
        Awaitable::Ready(futures::future::ready(value))
    }

    /// Wrap a deferred value.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
    {
        Awaitable::Pending(Box::pin(future))
    }

    /// Returns true if the value is available without suspending.
    pub fn is_ready(&self) -> bool {
        matches!(self, Awaitable::Ready(_))
    }
}

impl<T> Future for Awaitable<'_, T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut() {
            Awaitable::Ready(ready) => Pin::new(ready).poll(cx),
            Awaitable::Pending(future) => future.as_mut().poll(cx),
        }
    }
}

impl<T> std::fmt::Debug for Awaitable<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Awaitable::Ready(_) => f.write_str("Awaitable::Ready"),
            Awaitable::Pending(_) => f.write_str("Awaitable::Pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_and_pending_resolve() {
        let ready = Awaitable::ready(7);
        assert!(ready.is_ready());
        assert_eq!(ready.await, 7);

        let pending = Awaitable::pending(async {
            tokio::task::yield_now().await;
            "later"
        });
        assert!(!pending.is_ready());
        assert_eq!(pending.await, "later");
    }
}
