use tracing::trace;

use crate::{Subject, SubjectRef};

/// A drop token. Whatever owns a `Lifetime` announces its own destruction through
/// [`Lifetime::ended`]: when the token drops, the observable emits `()` once and completes.
pub struct Lifetime {
    ended: Subject<()>,
}

impl Lifetime {
    pub fn new() -> Self { Self { ended: Subject::new() } }

    /// Fires when the owner is dropped. Subscribing after that completes immediately.
    pub fn ended(&self) -> SubjectRef<()> { self.ended.reference() }
}

impl Default for Lifetime {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("Lifetime").field("id", &self.ended.id()).finish() }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        trace!(lifetime = %self.ended.id(), "lifetime ended");
        self.ended.send(());
        self.ended.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, ObservableExt};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_drop_fires_then_completes() {
        let lifetime = Lifetime::new();
        let ended = lifetime.ended();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _guard = {
            let seen = seen.clone();
            ended.subscribe(move |event: Event<()>| seen.lock().unwrap().push(event))
        };
        assert!(seen.lock().unwrap().is_empty());

        drop(lifetime);
        assert_eq!(*seen.lock().unwrap(), vec![Event::Next(()), Event::Completed]);

        let late = Arc::new(Mutex::new(Vec::new()));
        let _late = {
            let late = late.clone();
            ended.subscribe(move |event: Event<()>| late.lock().unwrap().push(event))
        };
        assert_eq!(*late.lock().unwrap(), vec![Event::Completed]);
    }
}
