use std::sync::{Arc, RwLock};

use crate::{Event, Listener, Observable, Subject, SubjectRef, SubscriptionGuard};

/// Stateful value with change notification. We intentionally do not implement
/// [`Observable`] for the variable itself; use [`Variable::observable`].
///
/// Dropping the variable completes every observer.
pub struct Variable<T: Clone> {
    value: Arc<RwLock<T>>,
    changes: Subject<T>,
}

/// Observable view of a [`Variable`]: emits the present value on subscribe, then every change.
pub struct VariableObservable<T> {
    value: Arc<RwLock<T>>,
    changes: SubjectRef<T>,
}

impl<T> Clone for VariableObservable<T> {
    fn clone(&self) -> Self { Self { value: self.value.clone(), changes: self.changes.clone() } }
}

impl<T: Clone> Variable<T> {
    pub fn new(value: T) -> Self { Self { value: Arc::new(RwLock::new(value)), changes: Subject::new() } }

    /// Returns a clone of the current value
    pub fn get(&self) -> T { self.value.read().expect("variable lock is poisoned").clone() }

    /// Replaces the value and notifies observers, even if the new value equals the old one
    pub fn set(&self, value: T) {
        *self.value.write().expect("variable lock is poisoned") = value.clone();
        self.changes.send(value);
    }

    pub fn observable(&self) -> VariableObservable<T> { VariableObservable { value: self.value.clone(), changes: self.changes.reference() } }
}

impl<T: Clone> Drop for Variable<T> {
    fn drop(&mut self) { self.changes.complete() }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_tuple("Variable").field(&self.get()).finish() }
}

impl<T> Observable for VariableObservable<T>
where T: Clone + Send + Sync + 'static
{
    type Item = T;
    type Error = std::convert::Infallible;

    fn subscribe_listener(&self, listener: Listener<T, Self::Error>) -> SubscriptionGuard {
        let current = self.value.read().expect("variable lock is poisoned").clone();
        listener(Event::Next(current));
        self.changes.subscribe_listener(listener)
    }
}
