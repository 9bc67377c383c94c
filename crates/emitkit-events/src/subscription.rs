//! Subscriber registry shared by both emitters.
//!
//! An emitter owns one [`SubscriberList`]: an ordered, lock-protected vector
//! of entries. Emission never iterates the live vector; it takes an owned
//! snapshot first, so listeners are free to subscribe, unsubscribe or emit
//! again while they run. The lock is only held for the duration of a single
//! push, removal or copy.

use emitkit_core::{same_listener, thread_safe_vec, ThreadSafeVec, WeakThreadSafeVec};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = Uuid::encode_buffer();
        let simple = self.0.simple().encode_lower(&mut buf);
        write!(f, "Sub({})", &simple[..8])
    }
}

pub(crate) struct Entry<H: ?Sized> {
    id: SubscriptionId,
    listener: Arc<H>,
}

/// Remove the entry registered under `id`, if the list still exists.
pub(crate) fn remove_entry<H: ?Sized>(
    entries: &WeakThreadSafeVec<Entry<H>>,
    id: SubscriptionId,
) -> bool {
    let Some(entries) = entries.upgrade() else {
        return false;
    };

    let removed = {
        let mut entries = entries.lock();
        entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| entries.remove(index))
    };

    match removed {
        Some(_) => {
            tracing::debug!("Subscription {} removed", id);
            true
        }
        None => false,
    }
}

/// Removes one registration when dropped.
///
/// Once-wrappers hold it for the duration of the invocation, so the entry goes
/// away on completion, on failure, and when an async invocation is cancelled.
pub(crate) struct RemovalGuard<H: ?Sized> {
    entries: WeakThreadSafeVec<Entry<H>>,
    id: SubscriptionId,
}

impl<H: ?Sized> RemovalGuard<H> {
    pub(crate) fn new(entries: WeakThreadSafeVec<Entry<H>>, id: SubscriptionId) -> Self {
        Self { entries, id }
    }
}

impl<H: ?Sized> Drop for RemovalGuard<H> {
    fn drop(&mut self) {
        remove_entry(&self.entries, self.id);
    }
}

/// Ordered subscriber storage
pub(crate) struct SubscriberList<H: ?Sized> {
    entries: ThreadSafeVec<Entry<H>>,
    name: Option<Arc<str>>,
}

impl<H: ?Sized> Clone for SubscriberList<H> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            name: self.name.clone(),
        }
    }
}

impl<H: ?Sized> SubscriberList<H> {
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            entries: thread_safe_vec(),
            name: name.map(Arc::from),
        }
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name used in log records.
    pub(crate) fn label(&self) -> &str {
        self.name().unwrap_or("unnamed")
    }

    /// Append `listener` under a fresh ID.
    pub(crate) fn push(&self, listener: Arc<H>) -> Subscription<H> {
        self.insert(SubscriptionId::new(), listener)
    }

    /// Append `listener` under an ID chosen by the caller.
    ///
    /// Self-removing wrappers need to know their ID before they exist.
    pub(crate) fn insert(&self, id: SubscriptionId, listener: Arc<H>) -> Subscription<H> {
        self.entries.lock().push(Entry {
            id,
            listener: Arc::clone(&listener),
        });
        tracing::debug!(emitter = self.label(), "Subscription {} added", id);

        Subscription {
            id,
            listener,
            entries: self.downgrade(),
        }
    }

    /// Remove the first entry holding this exact listener allocation.
    pub(crate) fn remove_listener(&self, listener: &Arc<H>) -> bool {
        let removed = {
            let mut entries = self.entries.lock();
            entries
                .iter()
                .position(|entry| same_listener(&entry.listener, listener))
                .map(|index| entries.remove(index))
        };

        match removed {
            Some(entry) => {
                tracing::debug!(emitter = self.label(), "Subscription {} removed", entry.id);
                true
            }
            None => false,
        }
    }

    /// Owned copy of the current listeners, in dispatch order.
    pub(crate) fn snapshot(&self) -> Vec<Arc<H>> {
        self.entries
            .lock()
            .iter()
            .map(|entry| Arc::clone(&entry.listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub(crate) fn downgrade(&self) -> WeakThreadSafeVec<Entry<H>> {
        Arc::downgrade(&self.entries)
    }
}

/// Handle to one registration on an emitter.
///
/// Dropping the handle does *not* unsubscribe; call [`Subscription::unsubscribe`].
/// The handle only holds a weak reference to its emitter.
pub struct Subscription<H: ?Sized> {
    id: SubscriptionId,
    listener: Arc<H>,
    entries: WeakThreadSafeVec<Entry<H>>,
}

impl<H: ?Sized> Subscription<H> {
    /// ID of this registration
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The listener that was registered.
    ///
    /// For once-subscriptions this is the self-removing wrapper, not the
    /// closure passed by the caller.
    pub fn callback(&self) -> &Arc<H> {
        &self.listener
    }

    /// Remove this registration from its emitter.
    ///
    /// Returns true if the registration was still present. Calling it again,
    /// or after the emitter was dropped, is a no-op.
    pub fn unsubscribe(&self) -> bool {
        remove_entry(&self.entries, self.id)
    }

    /// Returns true while the registration is still present on its emitter
    pub fn is_active(&self) -> bool {
        self.entries
            .upgrade()
            .is_some_and(|entries| entries.lock().iter().any(|entry| entry.id == self.id))
    }
}

impl<H: ?Sized> Clone for Subscription<H> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: Arc::clone(&self.listener),
            entries: self.entries.clone(),
        }
    }
}

impl<H: ?Sized> std::fmt::Debug for Subscription<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Handler = dyn Fn(u32) -> u32 + Send + Sync;

    fn handler(offset: u32) -> Arc<Handler> {
        Arc::new(move |value| value + offset)
    }

    #[test]
    fn test_subscription_id_display() {
        let id = SubscriptionId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("Sub("));
        assert_eq!(shown.len(), "Sub(".len() + 8 + 1);
    }

    #[test]
    fn test_subscription_id_display_uses_uuid_prefix() {
        let id = SubscriptionId::new();
        let simple = id.0.simple().to_string();
        assert_eq!(id.to_string(), format!("Sub({})", &simple[..8]));
    }

    #[test]
    fn test_removal_guard_removes_on_drop() {
        let list = SubscriberList::<Handler>::new(None);
        let subscription = list.push(handler(1));
        let kept = list.push(handler(2));

        let guard = RemovalGuard::new(list.downgrade(), subscription.id());
        assert!(subscription.is_active());
        drop(guard);

        assert!(!subscription.is_active());
        assert!(kept.is_active());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_push_and_snapshot_keep_order() {
        let list = SubscriberList::<Handler>::new(None);
        list.push(handler(1));
        list.push(handler(2));
        list.push(handler(3));

        let results: Vec<u32> = list.snapshot().iter().map(|h| h(10)).collect();
        assert_eq!(results, vec![11, 12, 13]);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_changes() {
        let list = SubscriberList::<Handler>::new(None);
        let first = list.push(handler(1));

        let snapshot = list.snapshot();
        first.unsubscribe();
        list.push(handler(5));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0](0), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let list = SubscriberList::<Handler>::new(Some("test".to_string()));
        let subscription = list.push(handler(1));
        assert!(subscription.is_active());

        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
        assert!(!subscription.is_active());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_remove_listener_removes_first_match_only() {
        let list = SubscriberList::<Handler>::new(None);
        let shared = handler(1);
        let first = list.push(Arc::clone(&shared));
        let other = list.push(handler(2));
        let second = list.push(Arc::clone(&shared));

        assert!(list.remove_listener(&shared));
        assert!(!first.is_active());
        assert!(other.is_active());
        assert!(second.is_active());

        assert!(list.remove_listener(&shared));
        assert!(!list.remove_listener(&shared));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_subscription_outliving_list_is_inert() {
        let list = SubscriberList::<Handler>::new(None);
        let subscription = list.push(handler(1));
        drop(list);

        assert!(!subscription.is_active());
        assert!(!subscription.unsubscribe());
    }
}
