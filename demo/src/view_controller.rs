use std::sync::{Arc, Mutex};

use rxtext::{ObservableExt, SubscriptionBag};
use tracing::info;

use crate::{AppInput, AppState, ViewModel};

/// Number of independent subscriptions `view_did_load` attaches to the state stream
pub const SUBSCRIPTIONS: usize = 3;

/// Follows the view model's state from several places at once.
pub struct ViewController {
    view_model: ViewModel,
    bag: SubscriptionBag,
    deliveries: Arc<Mutex<Vec<(usize, AppState)>>>,
}

impl ViewController {
    pub fn new(view_model: ViewModel) -> Self { Self { view_model, bag: SubscriptionBag::new(), deliveries: Arc::new(Mutex::new(Vec::new())) } }

    pub fn view_model(&self) -> &ViewModel { &self.view_model }

    /// Subscribes to the state stream [`SUBSCRIPTIONS`] times, then pushes `input`
    pub fn view_did_load(&mut self, input: AppInput) {
        for subscription in 1..=SUBSCRIPTIONS {
            let deliveries = self.deliveries.clone();
            self.view_model
                .app_state()
                .subscribe_next(move |state| {
                    info!(subscription, ?state, "subscription received state");
                    deliveries.lock().expect("deliveries lock is poisoned").push((subscription, state));
                })
                .add_to(&mut self.bag);
        }
        self.view_model.set_input(input);
    }

    /// Every `(subscription, state)` delivered so far, in delivery order
    pub fn deliveries(&self) -> Vec<(usize, AppState)> { self.deliveries.lock().expect("deliveries lock is poisoned").clone() }

    /// Drops every subscription made by `view_did_load`
    pub fn unload(&mut self) { self.bag.clear() }
}
