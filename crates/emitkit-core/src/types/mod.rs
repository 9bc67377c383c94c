//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for listeners and shared subscriber storage
//! - [`outcome`]: Conversion of listener return values into [`ListenerResult`](crate::ListenerResult)

pub mod aliases;
pub mod outcome;

pub use aliases::*;
pub use outcome::*;
