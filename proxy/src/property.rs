use std::convert::Infallible;

use rxtext_signals::{BoxObservable, Listener, Observable, ObservableExt, Sink, SubscriptionGuard};

/// A bindable control property: an observable of its values plus a sink that writes to it.
pub struct ControlProperty<T> {
    values: BoxObservable<T>,
    sink: Sink<T>,
}

impl<T> Clone for ControlProperty<T> {
    fn clone(&self) -> Self { Self { values: self.values.clone(), sink: self.sink.clone() } }
}

impl<T> ControlProperty<T>
where T: Clone + Send + Sync + 'static
{
    pub fn new<O>(values: O, sink: Sink<T>) -> Self
    where O: Observable<Item = T, Error = Infallible> + 'static {
        Self { values: values.boxed(), sink }
    }

    pub fn values(&self) -> BoxObservable<T> { self.values.clone() }

    /// Writes pushed into this sink are assigned to the control
    pub fn sink(&self) -> Sink<T> { self.sink.clone() }
}

impl<T> Observable for ControlProperty<T>
where T: Clone + Send + Sync + 'static
{
    type Item = T;
    type Error = Infallible;

    fn subscribe_listener(&self, listener: Listener<T, Infallible>) -> SubscriptionGuard { self.values.subscribe_listener(listener) }
}
