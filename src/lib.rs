//! # emitkit
//!
//! In-process event emitters for Rust:
//! - Synchronous emitters that call listeners in order and stop at the first failure
//! - Asynchronous emitters resolving listeners sequentially or concurrently
//! - Single-shot listeners, `next_event()` futures and emitter piping
//!
//! ## Architecture
//!
//! emitkit is organized as a workspace with multiple crates:
//!
//! 1. **emitkit-core** - Error types, listener aliases, the `all` combinator
//! 2. **emitkit-events** - Subscriber registry and both emitters
//! 3. **emitkit** - This facade, plus logging setup

pub use emitkit_core::{
    all, AsyncListener, Awaitable, EmitError, IntoListenerResult, Listener, ListenerError,
    ListenerResult, Result,
};

pub use emitkit_events::{
    AsyncEmitterConfig, AsyncEventEmitter, AsyncSubscription, DeliveryMode, Emission, EventEmitter,
    EventOf, EventSource, NextEvent, Subscription, SubscriptionId, SyncSubscription,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support (defaults to `info`)
///
/// Fails if a global subscriber has already been installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Logging initialized, emitkit {}", VERSION);
    Ok(())
}
