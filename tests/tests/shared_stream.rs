mod common;

use common::{change_watcher, Counter};
use rxtext::{Event, ObservableExt, Subject, SubscriptionBag};
use rxtext_demo::{AppInput, AppState};

fn derive_state(upstream: &Subject<AppInput>, counter: &Counter) -> rxtext::BoxObservable<AppState> {
    let counter = counter.clone();
    upstream
        .reference()
        .map(move |input: AppInput| {
            counter.tick();
            AppState::from(input)
        })
        .share()
        .boxed()
}

#[test]
fn three_subscribers_one_transform() {
    let upstream = Subject::<AppInput>::new();
    let counter = Counter::default();
    let state = derive_state(&upstream, &counter);

    let mut bag = SubscriptionBag::new();
    let mut checks = Vec::new();
    for _ in 0..3 {
        let (watcher, check) = change_watcher::<AppState>();
        state.subscribe_next(watcher).add_to(&mut bag);
        checks.push(check);
    }

    upstream.send(AppInput::Key1);

    assert_eq!(counter.get(), 1);
    for check in &checks {
        assert_eq!(check(), vec![AppState::State1]);
    }
}

#[test]
fn zero_subscribers_zero_transforms() {
    let upstream = Subject::<AppInput>::new();
    let counter = Counter::default();
    let _state = derive_state(&upstream, &counter);

    upstream.send(AppInput::Key1);
    assert_eq!(counter.get(), 0);
    assert_eq!(upstream.listener_count(), 0);
}

#[test]
fn transform_count_follows_attachment() -> anyhow::Result<()> {
    let upstream = Subject::<AppInput>::new();
    let counter = Counter::default();
    let state = derive_state(&upstream, &counter);

    let mut guards = Vec::new();
    // (subscribers attached, expected transform calls after one emission)
    for (attached, expected) in [(0, 0), (1, 1), (3, 2), (2, 3), (0, 3), (1, 4)] {
        guards.truncate(attached);
        while guards.len() < attached {
            guards.push(state.subscribe_next(|_| {}));
        }
        upstream.send(AppInput::Key2);
        anyhow::ensure!(counter.get() == expected, "after attaching {attached}: {} calls, expected {expected}", counter.get());
    }
    Ok(())
}

#[test]
fn late_subscriber_sees_no_history() {
    let upstream = Subject::<AppInput>::new();
    let counter = Counter::default();
    let state = derive_state(&upstream, &counter);

    let (early, check_early) = change_watcher::<AppState>();
    let _early = state.subscribe_next(early);
    upstream.send(AppInput::Key1);

    let (late, check_late) = change_watcher::<AppState>();
    let _late = state.subscribe_next(late);
    assert_eq!(check_late(), vec![]);

    upstream.send(AppInput::Key2);
    assert_eq!(check_early(), vec![AppState::State1, AppState::State2]);
    assert_eq!(check_late(), vec![AppState::State2]);
    assert_eq!(counter.get(), 2);
}

#[test]
fn transform_failure_terminates_every_subscriber() {
    let upstream = Subject::<i32, String>::new();
    let derived = upstream.reference().try_map(|value| if value < 0 { Err(format!("negative input {value}")) } else { Ok(value * 2) }).share();

    let (first, check_first) = change_watcher::<Event<i32, String>>();
    let (second, check_second) = change_watcher::<Event<i32, String>>();
    let _first = derived.subscribe(first);
    let _second = derived.subscribe(second);

    upstream.send(1);
    upstream.send(-1);
    upstream.send(2);

    let expected = vec![Event::Next(2), Event::Error("negative input -1".to_string())];
    assert_eq!(check_first(), expected);
    assert_eq!(check_second(), expected);
    assert_eq!(upstream.listener_count(), 0);
}
