use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Event, Listener, Observable, SubscriptionGuard};

/// Mirrors `source` until `notifier` produces any event, then completes.
///
/// The notifier is subscribed first, so a notifier that has already terminated
/// completes the subscription before the source is ever touched.
#[derive(Clone)]
pub struct TakeUntil<S, N> {
    source: S,
    notifier: N,
}

impl<S, N> TakeUntil<S, N> {
    pub(crate) fn new(source: S, notifier: N) -> Self { Self { source, notifier } }
}

impl<S, N> Observable for TakeUntil<S, N>
where
    S: Observable,
    N: Observable,
{
    type Item = S::Item;
    type Error = S::Error;

    fn subscribe_listener(&self, listener: Listener<S::Item, S::Error>) -> SubscriptionGuard {
        let done = Arc::new(AtomicBool::new(false));

        let notifier = {
            let listener = listener.clone();
            let done = done.clone();
            self.notifier.subscribe_listener(Arc::new(move |_: Event<N::Item, N::Error>| {
                if !done.swap(true, Ordering::AcqRel) {
                    listener(Event::Completed);
                }
            }))
        };
        if done.load(Ordering::Acquire) {
            return notifier;
        }

        let source = self.source.subscribe_listener(Arc::new(move |event: Event<S::Item, S::Error>| {
            if done.load(Ordering::Acquire) {
                return;
            }
            if event.is_terminal() && done.swap(true, Ordering::AcqRel) {
                return;
            }
            listener(event);
        }));

        SubscriptionGuard::new((source, notifier))
    }
}
