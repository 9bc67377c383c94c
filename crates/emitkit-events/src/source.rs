/// Common view over both emitter types.
///
/// Lets generic code name the payload type of an emitter it was handed.
pub trait EventSource {
    /// Payload carried by each emission.
    type Event;

    /// Number of active subscriptions.
    fn subscriber_count(&self) -> usize;
}

/// Payload type of an emitter.
///
/// ```rust,ignore
/// fn log_payload<S: EventSource>(_: &S, event: EventOf<S>) where EventOf<S>: Debug { .. }
/// ```
pub type EventOf<S> = <S as EventSource>::Event;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AsyncEventEmitter, EventEmitter};

    fn describe<S: EventSource>(source: &S, event: EventOf<S>) -> (usize, EventOf<S>) {
        (source.subscriber_count(), event)
    }

    #[test]
    fn test_event_of_names_payload_type() {
        let sync = EventEmitter::<u16>::new();
        sync.subscribe(|_: &u16| {});
        assert_eq!(describe(&sync, 5u16), (1, 5));

        let queued = AsyncEventEmitter::<String>::new();
        assert_eq!(describe(&queued, "x".to_string()), (0, "x".to_string()));
    }
}
