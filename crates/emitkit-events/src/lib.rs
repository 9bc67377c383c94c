//! # emitkit Events
//!
//! In-process event emitters with two delivery disciplines.
//!
//! ## Overview
//!
//! - [`EventEmitter`] calls plain listeners synchronously, in subscription
//!   order, and stops at the first failure.
//! - [`AsyncEventEmitter`] calls listeners returning futures and resolves
//!   them either one after another or all together, per its
//!   [`DeliveryMode`].
//!
//! Both support single-shot listeners, a `next_event()` future and `pipe` /
//! `pipe_map` to derive a new emitter from an existing one.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use emitkit_events::{AsyncEventEmitter, DeliveryMode, EventEmitter};
//!
//! let clicks = EventEmitter::<(i32, i32)>::new();
//! let subscription = clicks.subscribe(|(x, y)| println!("click at {x},{y}"));
//! let xs = clicks.pipe_map(|(x, _)| *x);
//!
//! clicks.emit((3, 4))?;
//! subscription.unsubscribe();
//!
//! let jobs = AsyncEventEmitter::<u64>::with_delivery(DeliveryMode::Concurrent);
//! jobs.subscribe(|id| async move { process(id).await });
//! jobs.emit(42).await?;
//! ```

mod async_emitter;
mod config;
mod emitter;
mod next_event;
mod source;
mod subscription;

pub use async_emitter::{AsyncEventEmitter, AsyncSubscription, Emission};
pub use config::{AsyncEmitterConfig, DeliveryMode};
pub use emitter::{EventEmitter, SyncSubscription};
pub use next_event::NextEvent;
pub use source::{EventOf, EventSource};
pub use subscription::{Subscription, SubscriptionId};
