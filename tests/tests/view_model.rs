mod common;

use rxtext::ObservableExt;
use rxtext_demo::{AppInput, AppState, DemoConfig, ViewController, ViewModel, SUBSCRIPTIONS};

#[test]
fn view_controller_follows_state_three_times() {
    let mut controller = ViewController::new(ViewModel::default());
    controller.view_did_load(AppInput::Key1);

    // the present input is replayed to the first subscriber when the shared stream connects
    assert_eq!(controller.view_model().transform_count(), 2);
    let pushed: Vec<_> = controller.deliveries().into_iter().skip(1).collect();
    assert_eq!(pushed, (1..=SUBSCRIPTIONS).map(|n| (n, AppState::State1)).collect::<Vec<_>>());
}

#[test]
fn input_changes_reach_every_subscription_once() {
    let mut controller = ViewController::new(ViewModel::new(AppInput::Key2));
    controller.view_did_load(AppInput::Key1);
    let before = controller.deliveries().len();

    controller.view_model().set_input(AppInput::Key2);
    assert_eq!(controller.view_model().transform_count(), 3);
    assert_eq!(controller.deliveries()[before..], [(1, AppState::State2), (2, AppState::State2), (3, AppState::State2)]);
}

#[test]
fn unloaded_controller_stops_transforms() {
    let mut controller = ViewController::new(ViewModel::default());
    controller.view_did_load(AppInput::Key1);
    controller.unload();

    let calls = controller.view_model().transform_count();
    controller.view_model().set_input(AppInput::Key2);
    assert_eq!(controller.view_model().transform_count(), calls);

    // a fresh subscriber reconnects and sees the present input
    let (watcher, check) = common::change_watcher::<AppState>();
    let _guard = controller.view_model().app_state().subscribe_next(watcher);
    assert_eq!(check(), vec![AppState::State2]);
    assert_eq!(controller.view_model().transform_count(), calls + 1);
}

#[test]
fn config_from_vars() {
    let config = DemoConfig::from_vars(|name| (name == "RXTEXT_INPUT").then(|| "key2".to_string())).unwrap();
    assert_eq!(config.input, AppInput::Key2);
    assert_eq!(config.log_level, tracing::Level::INFO);
}
