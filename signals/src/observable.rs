use std::convert::Infallible;
use std::sync::Arc;

use crate::{
    Event, IntoListener, Listener, Share, Sink, SubscriptionGuard,
    operator::{Map, StartWith, TakeUntil, TryMap, WithError},
};

/// Something that can be subscribed to with a listener.
///
/// Dyn safe, so heterogeneous streams can be stored as [`BoxObservable`].
pub trait Observable: Send + Sync {
    type Item: Clone + Send + Sync + 'static;
    type Error: Clone + Send + Sync + 'static;

    /// Attaches a listener; the subscription lasts until the returned guard is dropped
    fn subscribe_listener(&self, listener: Listener<Self::Item, Self::Error>) -> SubscriptionGuard;
}

/// A type-erased observable
pub type BoxObservable<T, E = Infallible> = Arc<dyn Observable<Item = T, Error = E>>;

impl<O> Observable for Arc<O>
where O: Observable + ?Sized
{
    type Item = O::Item;
    type Error = O::Error;

    fn subscribe_listener(&self, listener: Listener<Self::Item, Self::Error>) -> SubscriptionGuard { (**self).subscribe_listener(listener) }
}

/// Subscription porcelain and operators, available on every [`Observable`].
pub trait ObservableExt: Observable + Sized {
    /// Subscribe with anything convertible into a listener (a closure over [`Event`], a channel sender, ...)
    fn subscribe<L>(&self, listener: L) -> SubscriptionGuard
    where L: IntoListener<Self::Item, Self::Error> {
        self.subscribe_listener(listener.into_listener())
    }

    /// Subscribe to values only, ignoring termination
    fn subscribe_next<F>(&self, on_next: F) -> SubscriptionGuard
    where F: Fn(Self::Item) + Send + Sync + 'static {
        self.subscribe_listener(Arc::new(move |event: Event<Self::Item, Self::Error>| {
            if let Event::Next(value) = event {
                on_next(value)
            }
        }))
    }

    /// Forwards every value into `sink`
    fn bind_to(&self, sink: &Sink<Self::Item>) -> SubscriptionGuard {
        let sink = sink.clone();
        self.subscribe_next(move |value| sink.on_next(value))
    }

    fn map<U, F>(self, transform: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
    {
        Map::new(self, transform)
    }

    /// Like `map`, but an `Err` from the transform terminates the stream with that error
    fn try_map<U, F>(self, transform: F) -> TryMap<Self, F>
    where
        F: Fn(Self::Item) -> Result<U, Self::Error> + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
    {
        TryMap::new(self, transform)
    }

    /// Lifts a stream that cannot fail into one with error type `E`
    fn with_error<E>(self) -> WithError<Self, E>
    where
        Self: Observable<Error = Infallible>,
        E: Clone + Send + Sync + 'static,
    {
        WithError::new(self)
    }

    /// Emits `value` to each new subscriber before anything from upstream
    fn start_with(self, value: Self::Item) -> StartWith<Self> { StartWith::new(self, value) }

    /// Completes as soon as `notifier` emits or terminates
    fn take_until<N>(self, notifier: N) -> TakeUntil<Self, N>
    where N: Observable {
        TakeUntil::new(self, notifier)
    }

    /// Multiplexes one upstream subscription across all current subscribers, without replay
    fn share(self) -> Share<Self>
    where Self: 'static {
        Share::new(self)
    }

    fn boxed(self) -> BoxObservable<Self::Item, Self::Error>
    where Self: 'static {
        Arc::new(self)
    }
}

impl<O> ObservableExt for O where O: Observable {}
