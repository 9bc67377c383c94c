//! Error handling for emitkit
//!
//! Two kinds of failure exist:
//! - Listener failures, raised by user code while an event is delivered.
//!   These are carried as [`ListenerError`] (an `anyhow::Error`) so that a
//!   listener may fail with any error type and the emitter hands the exact
//!   same value back to whoever called `emit`.
//! - Library errors ([`EmitError`]), raised by emitkit itself.

use thiserror::Error;

/// Failure raised by a listener while handling an event.
pub type ListenerError = anyhow::Error;

/// Outcome of delivering one event to one listener (or to all of them).
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Errors produced by the emitters themselves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// Every handle to the emitter was dropped before the awaited event fired
    #[error("Emitter closed before the next event was emitted")]
    Closed,

    /// A delivery mode name could not be parsed
    #[error("Unknown delivery mode '{name}', expected 'sequential' or 'concurrent'")]
    UnknownDeliveryMode {
        /// The rejected name.
        name: String,
    },
}

/// Result type alias for emitkit operations
pub type Result<T> = std::result::Result<T, EmitError>;
