use std::sync::Arc;

use rxtext_signals::{ObservableExt, Sink, deferred};

use crate::{ControlProperty, DelegateInterceptor, TextControl};

/// Reactive extensions of a text control.
///
/// ```rust
/// use rxtext_proxy::{HeadlessTextView, Reactive};
/// use rxtext_signals::ObservableExt;
///
/// let view = HeadlessTextView::new();
/// view.set_string("draft");
/// let text = Reactive::new(&view).text();
/// let _guard = text.subscribe_next(|value| println!("text: {value:?}"));
/// view.type_text("!");
/// // Should print:
/// // text: Some("draft")
/// // text: Some("draft!")
/// ```
pub struct Reactive<C> {
    base: Arc<C>,
}

impl<C: TextControl> Reactive<C> {
    pub fn new(base: &Arc<C>) -> Self { Self { base: base.clone() } }

    /// The control's interceptor, created and installed on first access
    pub fn delegate(&self) -> Arc<DelegateInterceptor<C>> { DelegateInterceptor::proxy_for(&self.base) }

    /// Reactive wrapper for the control's text.
    ///
    /// Each subscriber first receives the text as it is at subscription time, then
    /// every user edit. The stream completes when the control is destroyed. Values
    /// pushed into the sink are assigned to the control (`None` clears it).
    pub fn text(&self) -> ControlProperty<Option<String>> {
        let delegate = self.delegate();
        let values = {
            let control = Arc::downgrade(&self.base);
            deferred(move || delegate.text_changes().start_with(control.upgrade().map(|control| control.text())))
                .take_until(self.base.lifetime().ended())
        };
        let sink = {
            let control = Arc::downgrade(&self.base);
            Sink::new(move |value: Option<String>| {
                if let Some(control) = control.upgrade() {
                    control.set_text(&value.unwrap_or_default());
                }
            })
        };
        ControlProperty::new(values, sink)
    }
}
