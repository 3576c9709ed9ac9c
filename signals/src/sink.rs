use std::sync::Arc;

/// The write side of a binding: a callback that accepts values pushed into it.
pub struct Sink<T>(Arc<dyn Fn(T) + Send + Sync>);

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Sink<T> {
    pub fn new<F>(on_next: F) -> Self
    where F: Fn(T) + Send + Sync + 'static {
        Self(Arc::new(on_next))
    }

    pub fn on_next(&self, value: T) { (self.0)(value) }
}

impl<T> std::fmt::Debug for Sink<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("Sink").finish_non_exhaustive() }
}
