use std::collections::{BTreeMap, VecDeque};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use tracing::trace;

use crate::{Event, IntoListener, Listener, Observable, SubscriptionGuard};

/// A unique identifier for a subject, derived from its allocation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubjectId(usize);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

/// A multicast event source. Every listener attached at the time of a send receives it,
/// in attachment order. Nothing is buffered for listeners that attach later, except the
/// terminal event which is delivered immediately to anyone arriving after termination.
///
/// Delivery is serialized: sends from several threads, or from inside a listener, are
/// queued and delivered one event at a time by whichever caller is already delivering,
/// so every listener observes the same emission order.
pub struct Subject<T, E = Infallible>(Arc<Inner<T, E>>);

struct Inner<T, E> {
    state: RwLock<State<T, E>>,
    next_id: AtomicUsize,
    delivery: Mutex<Delivery<T, E>>,
}

struct Delivery<T, E> {
    pending: VecDeque<Event<T, E>>,
    // true while some caller is draining `pending`
    draining: bool,
}

struct State<T, E> {
    // keyed by a monotonically increasing id, so iteration order is attachment order
    listeners: BTreeMap<usize, Listener<T, E>>,
    terminal: Option<Event<T, E>>,
}

/// A listen-only handle to a subject
pub struct SubjectRef<T, E = Infallible>(Subject<T, E>);

/// Detaches its listener from the subject when dropped.
pub struct ListenerGuard<T, E = Infallible> {
    inner: Weak<Inner<T, E>>,
    id: usize,
}

impl<T, E> Clone for Subject<T, E> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T, E> Clone for SubjectRef<T, E> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T, E> Default for Subject<T, E>
where
    T: Clone,
    E: Clone,
{
    fn default() -> Self { Self::new() }
}

impl<T, E> std::fmt::Debug for Subject<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.0.state.read().expect("subject lock is poisoned");
        f.debug_struct("Subject").field("listeners", &state.listeners.len()).field("terminated", &state.terminal.is_some()).finish()
    }
}

impl<T, E> Subject<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        Self(Arc::new(Inner {
            state: RwLock::new(State { listeners: BTreeMap::new(), terminal: None }),
            next_id: AtomicUsize::new(0),
            delivery: Mutex::new(Delivery { pending: VecDeque::new(), draining: false }),
        }))
    }

    pub fn id(&self) -> SubjectId { SubjectId(Arc::as_ptr(&self.0) as *const () as usize) }

    /// Sends a value to all attached listeners
    pub fn send(&self, value: T) { self.send_event(Event::Next(value)) }

    /// Terminates the subject with an error
    pub fn error(&self, error: E) { self.send_event(Event::Error(error)) }

    /// Terminates the subject successfully
    pub fn complete(&self) { self.send_event(Event::Completed) }

    /// Queues `event` for delivery. If nobody else is delivering, this call delivers it
    /// (and anything queued meanwhile) before returning; otherwise it returns at once and
    /// the caller already delivering picks the event up.
    pub fn send_event(&self, event: Event<T, E>) {
        {
            let mut delivery = self.0.delivery.lock().expect("subject delivery lock is poisoned");
            delivery.pending.push_back(event);
            if delivery.draining {
                trace!(subject = %self.id(), queued = delivery.pending.len(), "delivery in progress, event queued");
                return;
            }
            delivery.draining = true;
        }

        let _gate = DeliveryGate(&self.0.delivery);
        loop {
            let event = {
                let mut delivery = self.0.delivery.lock().expect("subject delivery lock is poisoned");
                match delivery.pending.pop_front() {
                    Some(event) => event,
                    None => {
                        delivery.draining = false;
                        return;
                    }
                }
            };
            if event.is_terminal() {
                self.terminate(event)
            } else {
                self.dispatch(event)
            }
        }
    }

    fn dispatch(&self, event: Event<T, E>) {
        // Snapshot the listeners so that none of our locks are held during callbacks
        let listeners: Vec<(usize, Listener<T, E>)> = {
            let state = self.0.state.read().expect("subject lock is poisoned");
            if state.terminal.is_some() {
                trace!(subject = %self.id(), "value sent after termination ignored");
                return;
            }
            state.listeners.iter().map(|(id, listener)| (*id, listener.clone())).collect()
        };

        trace!(subject = %self.id(), listeners = listeners.len(), "dispatching value");
        for (id, listener) in listeners {
            // a listener detached earlier in this pass must not see the value
            if self.is_attached(id) {
                listener(event.clone());
            }
        }
    }

    fn terminate(&self, event: Event<T, E>) {
        let listeners = {
            let mut state = self.0.state.write().expect("subject lock is poisoned");
            if state.terminal.is_some() {
                return;
            }
            state.terminal = Some(event.clone());
            std::mem::take(&mut state.listeners)
        };

        trace!(subject = %self.id(), listeners = listeners.len(), "dispatching terminal event");
        for listener in listeners.into_values() {
            listener(event.clone());
        }
    }

    fn is_attached(&self, id: usize) -> bool { self.0.state.read().expect("subject lock is poisoned").listeners.contains_key(&id) }

    /// Attaches a listener. A listener arriving after termination receives the terminal
    /// event immediately and is not retained.
    pub fn listen<L>(&self, listener: L) -> ListenerGuard<T, E>
    where L: IntoListener<T, E> {
        let listener = listener.into_listener();
        let mut state = self.0.state.write().expect("subject lock is poisoned");
        if let Some(terminal) = state.terminal.clone() {
            drop(state);
            listener(terminal);
            return ListenerGuard { inner: Weak::new(), id: 0 };
        }
        let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
        state.listeners.insert(id, listener);
        ListenerGuard { inner: Arc::downgrade(&self.0), id }
    }

    pub fn listener_count(&self) -> usize { self.0.state.read().expect("subject lock is poisoned").listeners.len() }

    pub fn is_terminated(&self) -> bool { self.0.state.read().expect("subject lock is poisoned").terminal.is_some() }

    /// A handle that can subscribe but not send
    pub fn reference(&self) -> SubjectRef<T, E> { SubjectRef(self.clone()) }
}

impl<T, E> SubjectRef<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn listen<L>(&self, listener: L) -> ListenerGuard<T, E>
    where L: IntoListener<T, E> {
        self.0.listen(listener)
    }

    pub fn id(&self) -> SubjectId { self.0.id() }
}

/// Reopens the gate if a listener panics mid-delivery, dropping whatever was still queued
struct DeliveryGate<'a, T, E>(&'a Mutex<Delivery<T, E>>);

impl<T, E> Drop for DeliveryGate<'_, T, E> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            if let Ok(mut delivery) = self.0.lock() {
                delivery.draining = false;
                delivery.pending.clear();
            }
        }
    }
}

impl<T, E> Drop for ListenerGuard<T, E> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.state.write().expect("subject lock is poisoned").listeners.remove(&self.id);
        }
    }
}

impl<T, E> Observable for Subject<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Item = T;
    type Error = E;

    fn subscribe_listener(&self, listener: Listener<T, E>) -> SubscriptionGuard { SubscriptionGuard::new(self.listen(listener)) }
}

impl<T, E> Observable for SubjectRef<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Item = T;
    type Error = E;

    fn subscribe_listener(&self, listener: Listener<T, E>) -> SubscriptionGuard { SubscriptionGuard::new(self.listen(listener)) }
}
