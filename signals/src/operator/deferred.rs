use std::sync::Arc;

use crate::{Listener, Observable, SubscriptionGuard};

/// Builds a fresh observable for every subscription.
pub struct Deferred<F> {
    factory: Arc<F>,
}

impl<F> Clone for Deferred<F> {
    fn clone(&self) -> Self { Self { factory: self.factory.clone() } }
}

/// Defers construction of an observable until something subscribes, so that
/// state read by the factory (such as a control's current value) is read at
/// subscription time rather than at composition time.
pub fn deferred<F, O>(factory: F) -> Deferred<F>
where
    F: Fn() -> O + Send + Sync + 'static,
    O: Observable + 'static,
{
    Deferred { factory: Arc::new(factory) }
}

impl<F, O> Observable for Deferred<F>
where
    F: Fn() -> O + Send + Sync + 'static,
    O: Observable + 'static,
{
    type Item = O::Item;
    type Error = O::Error;

    fn subscribe_listener(&self, listener: Listener<O::Item, O::Error>) -> SubscriptionGuard {
        let observable = (self.factory)();
        let guard = observable.subscribe_listener(listener);
        // the guard goes first so it is released before the observable it points into
        SubscriptionGuard::new((guard, observable))
    }
}
