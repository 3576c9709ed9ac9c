mod common;

use std::sync::Arc;

use common::{change_watcher, Counter};
use rxtext::{
    DelegateInterceptor, Event, HeadlessTextField, HeadlessTextView, NativeObject, ObjectRef, ObservableExt, Reactive, TextControl, TextDelegate,
};

#[test]
fn text_edits_fan_out_through_a_shared_transform() {
    let view = HeadlessTextView::new();
    let counter = Counter::default();
    let words = {
        let counter = counter.clone();
        Reactive::new(&view)
            .text()
            .map(move |text: Option<String>| {
                counter.tick();
                text.unwrap_or_default().split_whitespace().count()
            })
            .share()
    };

    let (first, check_first) = change_watcher::<usize>();
    let (second, check_second) = change_watcher::<usize>();
    let _first = words.subscribe_next(first);
    let _second = words.subscribe_next(second);
    // the first subscriber connected and got the present (empty) text
    assert_eq!(check_first(), vec![0]);
    assert_eq!(check_second(), vec![]);

    view.type_text("two words");
    view.type_text(" and more");
    assert_eq!(counter.get(), 3);
    assert_eq!(check_first(), vec![2, 4]);
    assert_eq!(check_second(), vec![2, 4]);
}

#[test]
fn interceptor_is_unique_per_control() {
    let view = HeadlessTextView::new();
    let object: ObjectRef = view.clone();

    let a = DelegateInterceptor::<HeadlessTextView>::create_for(&object).unwrap();
    let b = Reactive::new(&view).delegate();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.is_installed());

    // the same generic interceptor type serves a different control
    let field = HeadlessTextField::new();
    let c = Reactive::new(&field).delegate();
    assert!(c.is_installed());
    assert!(DelegateInterceptor::<HeadlessTextField>::create_for(&object).is_err());
}

struct Plain;

impl TextDelegate for Plain {}

impl NativeObject for Plain {
    fn into_any(self: Arc<Self>) -> Arc<dyn std::any::Any + Send + Sync> { self }

    fn as_text_delegate(self: Arc<Self>) -> Option<rxtext::DelegateRef> { Some(self) }
}

#[test]
fn plain_delegate_replaces_interceptor() {
    let field = HeadlessTextField::new();
    let object: ObjectRef = field.clone();
    let (watcher, check) = change_watcher::<Option<String>>();
    let _guard = Reactive::new(&field).text().subscribe_next(watcher);

    let plain: ObjectRef = Arc::new(Plain);
    DelegateInterceptor::<HeadlessTextField>::set_delegate(Some(plain), &object).unwrap();
    let current = DelegateInterceptor::<HeadlessTextField>::current_delegate(&object).unwrap();
    assert!(current.is_some());
    assert!(!Reactive::new(&field).delegate().is_installed());

    field.type_text("unseen");
    assert_eq!(check(), vec![Some(String::new())]);
}

#[test]
fn destroying_the_control_completes_subscribers() {
    let view = HeadlessTextView::new();
    let text = Reactive::new(&view).text();
    let (watcher, check) = change_watcher::<Event<Option<String>>>();
    let _guard = text.subscribe(watcher);

    view.type_text("x");
    drop(view);
    assert_eq!(check(), vec![Event::Next(Some(String::new())), Event::Next(Some("x".to_string())), Event::Completed]);

    // the sink is inert once the control is gone
    text.sink().on_next(Some("ignored".to_string()));
}

#[tokio::test]
async fn text_changes_feed_an_async_task() {
    let field = HeadlessTextField::new();
    field.set_string_value("a");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event<Option<String>>>();
    let guard = Reactive::new(&field).text().subscribe(tx);

    field.type_text("b\n");
    drop(guard);
    field.type_text("c");

    let mut received = Vec::new();
    while let Some(event) = rx.recv().await {
        received.push(event);
    }
    assert_eq!(received, vec![Event::Next(Some("a".to_string())), Event::Next(Some("ab".to_string()))]);
    assert_eq!(field.text(), "abc");
}
