use tracing::Level;

use std::sync::{Arc, Mutex};

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }

#[allow(unused)]
pub fn change_watcher<T: Send + 'static>() -> (Box<dyn Fn(T) + Send + Sync>, Box<dyn Fn() -> Vec<T> + Send + Sync>) {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let watcher = {
        let changes = changes.clone();
        Box::new(move |value: T| {
            changes.lock().unwrap().push(value);
        })
    };

    let check = Box::new(move || {
        let changes: Vec<T> = changes.lock().unwrap().drain(..).collect();
        changes
    });

    (watcher, check)
}

/// Counts invocations of a side-effecting transform
#[allow(unused)]
#[derive(Clone, Default)]
pub struct Counter(Arc<std::sync::atomic::AtomicUsize>);

#[allow(unused)]
impl Counter {
    pub fn tick(&self) { self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst); }

    pub fn get(&self) -> usize { self.0.load(std::sync::atomic::Ordering::SeqCst) }
}
