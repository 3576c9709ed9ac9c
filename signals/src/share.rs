use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::{Event, Listener, ListenerGuard, Observable, Subject, SubscriptionGuard};

/// Shares a single upstream subscription among all current subscribers.
///
/// - No subscribers means no upstream subscription; upstream work (including any
///   `map` transform composed into the source) does not run.
/// - The first subscriber connects upstream. Each upstream value is computed once
///   and broadcast to every subscriber attached at that moment.
/// - Late subscribers only see values emitted after they attach. Nothing is replayed.
/// - When the last subscriber leaves, the upstream subscription is dropped. The next
///   subscriber starts a fresh connection.
/// - A terminal upstream event is broadcast to every subscriber and ends the
///   connection; a later subscriber reconnects.
///
/// Clones share the same connection.
pub struct Share<S: Observable> {
    source: Arc<S>,
    state: Arc<Mutex<ShareState<S::Item, S::Error>>>,
}

struct ShareState<T, E> {
    subject: Option<Subject<T, E>>,
    connection: Option<SubscriptionGuard>,
    subscribers: usize,
    // bumped whenever a connection ends, so guards and callbacks from an older
    // connection can tell they no longer apply
    generation: u64,
}

impl<T, E> ShareState<T, E> {
    /// Ends the current connection. The returned guard must be dropped after the lock is released.
    fn disconnect(&mut self) -> Option<SubscriptionGuard> {
        self.generation += 1;
        self.subscribers = 0;
        self.subject = None;
        self.connection.take()
    }
}

impl<S: Observable> Clone for Share<S> {
    fn clone(&self) -> Self { Self { source: self.source.clone(), state: self.state.clone() } }
}

impl<S: Observable> Share<S> {
    pub fn new(source: S) -> Self {
        Self { source: Arc::new(source), state: Arc::new(Mutex::new(ShareState { subject: None, connection: None, subscribers: 0, generation: 0 })) }
    }

    /// Number of subscribers attached to the current connection
    pub fn subscriber_count(&self) -> usize { self.state.lock().expect("share state lock is poisoned").subscribers }

    /// Whether an upstream subscription currently exists
    pub fn is_connected(&self) -> bool { self.state.lock().expect("share state lock is poisoned").connection.is_some() }
}

impl<S> Share<S>
where S: Observable + 'static
{
    fn connect(&self, subject: Subject<S::Item, S::Error>, generation: u64) {
        debug!(generation, "shared stream connecting upstream");
        let state = Arc::downgrade(&self.state);
        let connection = self.source.subscribe_listener(Arc::new(move |event: Event<S::Item, S::Error>| {
            if event.is_terminal() {
                // reset first, so a subscriber reacting to the terminal event gets a fresh connection
                if let Some(state) = state.upgrade() {
                    release(&state, generation);
                }
            }
            subject.send_event(event);
        }));

        let stale = {
            let mut state = self.state.lock().expect("share state lock is poisoned");
            if state.generation == generation {
                state.connection = Some(connection);
                None
            } else {
                Some(connection)
            }
        };
        if let Some(stale) = stale {
            // everyone left, or upstream terminated, before the connection was established
            debug!(generation, "shared stream ended while connecting");
            drop(stale);
        }
    }
}

fn release<T, E>(state: &Mutex<ShareState<T, E>>, generation: u64) {
    let connection = {
        let mut state = state.lock().expect("share state lock is poisoned");
        if state.generation != generation {
            return;
        }
        state.disconnect()
    };
    debug!(generation, "shared stream upstream terminated");
    drop(connection);
}

impl<S> Observable for Share<S>
where S: Observable + 'static
{
    type Item = S::Item;
    type Error = S::Error;

    fn subscribe_listener(&self, listener: Listener<S::Item, S::Error>) -> SubscriptionGuard {
        let (subject, generation, connect) = {
            let mut state = self.state.lock().expect("share state lock is poisoned");
            state.subscribers += 1;
            let generation = state.generation;
            match state.subject.clone() {
                Some(subject) => (subject, generation, false),
                None => {
                    let subject = Subject::new();
                    state.subject = Some(subject.clone());
                    (subject, generation, true)
                }
            }
        };

        // attach downstream before connecting, so values produced synchronously on connect are not lost
        let guard = ShareGuard { listener: Some(subject.listen(listener)), state: self.state.clone(), generation };
        if connect {
            self.connect(subject, generation);
        }
        SubscriptionGuard::new(guard)
    }
}

struct ShareGuard<T, E> {
    listener: Option<ListenerGuard<T, E>>,
    state: Arc<Mutex<ShareState<T, E>>>,
    generation: u64,
}

impl<T, E> Drop for ShareGuard<T, E> {
    fn drop(&mut self) {
        drop(self.listener.take());
        let connection = {
            let mut state = self.state.lock().expect("share state lock is poisoned");
            if state.generation != self.generation {
                return;
            }
            state.subscribers -= 1;
            if state.subscribers > 0 {
                return;
            }
            state.disconnect()
        };
        debug!(generation = self.generation, "last subscriber left, disconnecting shared stream");
        drop(connection);
    }
}
