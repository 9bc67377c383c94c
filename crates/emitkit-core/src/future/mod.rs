//! Future utilities.
//!
//! - [`Awaitable`]: a value that is either available now or deferred
//! - [`all`]: wait for a set of fallible inputs, keeping their order

mod all;
mod awaitable;

pub use all::all;
pub use awaitable::Awaitable;
