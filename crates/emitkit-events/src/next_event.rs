use emitkit_core::EmitError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Future resolving with the payload of the next emission.
///
/// Returned by `next_event()` on both emitters. The underlying once-listener
/// is registered when `next_event()` is called, not when the future is first
/// polled, so an emission that happens in between is not missed.
///
/// There is no timeout. Race it against `tokio::time::timeout` if needed.
/// The payload is handed over as soon as an emission reaches the listener,
/// so dropping that emission afterwards does not lose it. Resolves to
/// [`EmitError::Closed`] only if every handle to the emitter is dropped
/// before it emits.
#[derive(Debug)]
#[must_use = "futures do nothing unless awaited"]
pub struct NextEvent<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> NextEvent<T> {
    pub(crate) fn channel() -> (oneshot::Sender<T>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }
}

impl<T> Future for NextEvent<T> {
    type Output = Result<T, EmitError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.map_err(|_| EmitError::Closed))
    }
}
