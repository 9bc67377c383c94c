//! Type aliases for listeners and shared subscriber storage.
//!
//! Listener signatures are long enough that spelling them out at every use
//! site hurts readability. The aliases here give them names and keep the
//! sync and async variants side by side.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use emitkit_core::types::*;
//!
//! // Instead of: Arc<dyn Fn(&u32) -> anyhow::Result<()> + Send + Sync>
//! let listener: Listener<u32> = Arc::new(|value| {
//!     println!("got {value}");
//!     Ok(())
//! });
//! ```

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use crate::error::ListenerResult;
use crate::future::Awaitable;

// =============================================================================
// THREAD-SAFE SHARED TYPES
// =============================================================================

/// A thread-safe vector for cross-thread collection management.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafeVec<T> = Arc<Mutex<Vec<T>>>;

/// A non-owning handle to a [`ThreadSafeVec`].
///
/// Subscriptions hold one of these so that a forgotten handle does not keep
/// its emitter alive.
pub type WeakThreadSafeVec<T> = Weak<Mutex<Vec<T>>>;

/// Create a new empty thread-safe vector.
#[inline]
pub fn thread_safe_vec<T>() -> ThreadSafeVec<T> {
    Arc::new(Mutex::new(Vec::new()))
}

// =============================================================================
// LISTENER TYPES
// =============================================================================

/// Handler invoked synchronously with a borrowed payload.
pub type SyncHandler<T> = dyn Fn(&T) -> ListenerResult + Send + Sync;

/// Handler invoked with an owned payload, returning a deferred result.
///
/// Handlers with nothing left to await return [`Awaitable::ready`] and skip
/// the allocation a boxed future would need.
pub type AsyncHandler<T> = dyn Fn(T) -> Awaitable<'static, ListenerResult> + Send + Sync;

/// A shared synchronous listener.
///
/// The `Arc` allocation is the listener's identity: subscribing the same
/// `Listener` twice registers it twice, and unsubscribing it removes one of
/// those registrations.
pub type Listener<T> = Arc<SyncHandler<T>>;

/// A shared asynchronous listener.
pub type AsyncListener<T> = Arc<AsyncHandler<T>>;

/// Returns true when both listeners point at the same allocation.
///
/// Only the data pointer is compared, vtable pointers for the same closure
/// may differ between codegen units.
#[inline]
pub fn same_listener<H: ?Sized>(a: &Arc<H>, b: &Arc<H>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
