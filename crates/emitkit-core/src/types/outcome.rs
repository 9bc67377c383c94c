//! Listener return values.
//!
//! Listeners may be infallible (return `()`) or fallible (return any
//! `Result<(), E>` whose error converts into [`ListenerError`]). Emitters
//! normalize both through [`IntoListenerResult`].

use crate::error::{ListenerError, ListenerResult};

/// Conversion of a listener's return value into a [`ListenerResult`]
pub trait IntoListenerResult {
    /// Normalize the value.
    fn into_listener_result(self) -> ListenerResult;
}

impl IntoListenerResult for () {
    #[inline]
    fn into_listener_result(self) -> ListenerResult {
        Ok(())
    }
}

impl<E> IntoListenerResult for Result<(), E>
where
    E: Into<ListenerError>,
{
    #[inline]
    fn into_listener_result(self) -> ListenerResult {
        self.map_err(Into::into)
    }
}
