//! # emitkit Core
//!
//! Core types shared by the emitkit emitters:
//! - Error types and the listener failure alias
//! - Listener type aliases and return value normalization
//! - Future utilities ([`Awaitable`] and the [`all`] combinator)

pub mod error;
pub mod future;
pub mod types;

pub use error::{EmitError, ListenerError, ListenerResult, Result};

pub use future::{all, Awaitable};

// Re-export type aliases for convenience
pub use types::{
    same_listener, thread_safe_vec, AsyncHandler, AsyncListener, IntoListenerResult, Listener,
    SyncHandler, ThreadSafeVec, WeakThreadSafeVec,
};
