use std::convert::Infallible;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Event, Listener, Observable, SubscriptionGuard};

/// Transforms each value. The transform runs once per value per subscription.
pub struct Map<S, F> {
    source: S,
    transform: Arc<F>,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(source: S, transform: F) -> Self { Self { source, transform: Arc::new(transform) } }
}

impl<S: Clone, F> Clone for Map<S, F> {
    fn clone(&self) -> Self { Self { source: self.source.clone(), transform: self.transform.clone() } }
}

impl<S, F, U> Observable for Map<S, F>
where
    S: Observable,
    F: Fn(S::Item) -> U + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
{
    type Item = U;
    type Error = S::Error;

    fn subscribe_listener(&self, listener: Listener<U, S::Error>) -> SubscriptionGuard {
        let transform = self.transform.clone();
        self.source.subscribe_listener(Arc::new(move |event: Event<S::Item, S::Error>| listener(event.map(|value| transform(value)))))
    }
}

/// Transforms each value with a fallible function. The first `Err` is delivered as a
/// terminal error and everything after it is dropped.
pub struct TryMap<S, F> {
    source: S,
    transform: Arc<F>,
}

impl<S, F> TryMap<S, F> {
    pub(crate) fn new(source: S, transform: F) -> Self { Self { source, transform: Arc::new(transform) } }
}

impl<S: Clone, F> Clone for TryMap<S, F> {
    fn clone(&self) -> Self { Self { source: self.source.clone(), transform: self.transform.clone() } }
}

impl<S, F, U> Observable for TryMap<S, F>
where
    S: Observable,
    F: Fn(S::Item) -> Result<U, S::Error> + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
{
    type Item = U;
    type Error = S::Error;

    fn subscribe_listener(&self, listener: Listener<U, S::Error>) -> SubscriptionGuard {
        let transform = self.transform.clone();
        let failed = Arc::new(AtomicBool::new(false));
        self.source.subscribe_listener(Arc::new(move |event: Event<S::Item, S::Error>| {
            if failed.load(Ordering::Acquire) {
                return;
            }
            match event {
                Event::Next(value) => match transform(value) {
                    Ok(output) => listener(Event::Next(output)),
                    Err(error) => {
                        failed.store(true, Ordering::Release);
                        listener(Event::Error(error));
                    }
                },
                Event::Error(error) => listener(Event::Error(error)),
                Event::Completed => listener(Event::Completed),
            }
        }))
    }
}

/// Re-types an infallible stream so it can be composed with fallible operators
pub struct WithError<S, E> {
    source: S,
    _error: PhantomData<fn() -> E>,
}

impl<S, E> WithError<S, E> {
    pub(crate) fn new(source: S) -> Self { Self { source, _error: PhantomData } }
}

impl<S: Clone, E> Clone for WithError<S, E> {
    fn clone(&self) -> Self { Self::new(self.source.clone()) }
}

impl<S, E> Observable for WithError<S, E>
where
    S: Observable<Error = Infallible>,
    E: Clone + Send + Sync + 'static,
{
    type Item = S::Item;
    type Error = E;

    fn subscribe_listener(&self, listener: Listener<S::Item, E>) -> SubscriptionGuard {
        self.source.subscribe_listener(Arc::new(move |event: Event<S::Item, Infallible>| {
            listener(match event {
                Event::Next(value) => Event::Next(value),
                Event::Error(never) => match never {},
                Event::Completed => Event::Completed,
            })
        }))
    }
}
