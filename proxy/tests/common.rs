use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records whatever a stream delivers; the checker drains everything recorded since the last check
#[allow(unused)]
pub fn change_watcher<T: Send + 'static>() -> (Box<dyn Fn(T) + Send + Sync>, Box<dyn Fn() -> Vec<T> + Send + Sync>) {
    let received: Arc<Mutex<Vec<T>>> = Arc::default();
    let record = {
        let received = received.clone();
        Box::new(move |value: T| received.lock().unwrap().push(value))
    };
    let drain = Box::new(move || std::mem::take(&mut *received.lock().unwrap()));
    (record, drain)
}

/// Counts invocations of a side-effecting transform
#[allow(unused)]
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

#[allow(unused)]
impl Counter {
    pub fn tick(&self) { self.0.fetch_add(1, Ordering::SeqCst); }

    pub fn get(&self) -> usize { self.0.load(Ordering::SeqCst) }
}
