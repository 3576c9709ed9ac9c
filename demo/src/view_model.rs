use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::bail;
use rxtext::{BoxObservable, ObservableExt, Variable};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppInput {
    Key1,
    Key2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    State1,
    State2,
}

impl FromStr for AppInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key1" => Ok(AppInput::Key1),
            "key2" => Ok(AppInput::Key2),
            _ => bail!("unknown input {s:?}, expected key1 or key2"),
        }
    }
}

impl fmt::Display for AppInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppInput::Key1 => write!(f, "key1"),
            AppInput::Key2 => write!(f, "key2"),
        }
    }
}

impl From<AppInput> for AppState {
    fn from(input: AppInput) -> Self {
        match input {
            AppInput::Key1 => AppState::State1,
            AppInput::Key2 => AppState::State2,
        }
    }
}

/// Holds the application input and derives the application state from it.
///
/// `app_state` is built once and shared: however many subscribers follow it, the
/// transform runs once per input value. Because the input is a [`Variable`], the
/// present input is replayed whenever the shared stream connects, which costs one
/// transform call per connection on top of one per [`ViewModel::set_input`].
pub struct ViewModel {
    app_input: Variable<AppInput>,
    app_state: BoxObservable<AppState>,
    transforms: Arc<AtomicUsize>,
}

impl ViewModel {
    pub fn new(initial: AppInput) -> Self {
        let app_input = Variable::new(initial);
        let transforms = Arc::new(AtomicUsize::new(0));
        let app_state = {
            let transforms = transforms.clone();
            app_input
                .observable()
                .map(move |input: AppInput| {
                    let calls = transforms.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(%input, calls, "deriving app state");
                    AppState::from(input)
                })
                .share()
                .boxed()
        };
        Self { app_input, app_state, transforms }
    }

    pub fn input(&self) -> AppInput { self.app_input.get() }

    pub fn set_input(&self, input: AppInput) { self.app_input.set(input) }

    /// The shared state stream. Every call returns a handle to the same shared computation.
    pub fn app_state(&self) -> BoxObservable<AppState> { self.app_state.clone() }

    /// How many times the state transform has run
    pub fn transform_count(&self) -> usize { self.transforms.load(Ordering::SeqCst) }
}

impl Default for ViewModel {
    fn default() -> Self { Self::new(AppInput::Key1) }
}
