use std::sync::Arc;

use crate::Event;

/// A callback that receives every event of a stream it is attached to.
pub type Listener<T, E> = Arc<dyn Fn(Event<T, E>) + Send + Sync + 'static>;

/// Trait for types that can be converted into listeners.
pub trait IntoListener<T, E> {
    fn into_listener(self) -> Listener<T, E>;
}

impl<F, T, E> IntoListener<T, E> for F
where F: Fn(Event<T, E>) + Send + Sync + 'static
{
    fn into_listener(self) -> Listener<T, E> { Arc::new(self) }
}

impl<T, E> IntoListener<T, E> for Listener<T, E> {
    fn into_listener(self) -> Listener<T, E> { self }
}

impl<T, E> IntoListener<T, E> for std::sync::mpsc::Sender<Event<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn into_listener(self) -> Listener<T, E> {
        Arc::new(move |event| {
            let _ = self.send(event); // receiver may be gone
        })
    }
}

#[cfg(feature = "tokio")]
impl<T, E> IntoListener<T, E> for tokio::sync::mpsc::UnboundedSender<Event<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn into_listener(self) -> Listener<T, E> {
        Arc::new(move |event| {
            let _ = self.send(event);
        })
    }
}
