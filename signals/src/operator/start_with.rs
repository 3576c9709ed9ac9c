use crate::{Event, Listener, Observable, SubscriptionGuard};

/// Prepends a value to every subscription.
#[derive(Clone)]
pub struct StartWith<S: Observable> {
    source: S,
    value: S::Item,
}

impl<S: Observable> StartWith<S> {
    pub(crate) fn new(source: S, value: S::Item) -> Self { Self { source, value } }
}

impl<S: Observable> Observable for StartWith<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn subscribe_listener(&self, listener: Listener<S::Item, S::Error>) -> SubscriptionGuard {
        listener(Event::Next(self.value.clone()));
        self.source.subscribe_listener(listener)
    }
}
