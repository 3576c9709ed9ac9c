//! In-process text controls implementing the native control contract.
//!
//! They behave like their toolkit counterparts as far as this crate is concerned:
//! one delegate slot, a text property, a text-did-change callback fired on user
//! edits (simulated with `type_text`) and not on programmatic assignment.

use std::any::Any;
use std::sync::{Arc, RwLock};

use rxtext_signals::Lifetime;

use crate::{DelegateRef, NativeObject, Notification, ObjectRef, TextControl};

#[derive(Default)]
struct Slots {
    text: RwLock<String>,
    delegate: RwLock<Option<DelegateRef>>,
    lifetime: Lifetime,
}

impl Slots {
    fn text(&self) -> String { self.text.read().expect("text lock is poisoned").clone() }

    fn set_text(&self, text: &str) { *self.text.write().expect("text lock is poisoned") = text.to_string() }

    fn delegate(&self) -> Option<DelegateRef> { self.delegate.read().expect("delegate lock is poisoned").clone() }

    fn set_delegate(&self, delegate: Option<DelegateRef>) { *self.delegate.write().expect("delegate lock is poisoned") = delegate }

    fn edit(&self, object: ObjectRef, edit: impl FnOnce(&mut String)) {
        edit(&mut self.text.write().expect("text lock is poisoned"));
        // the delegate is cloned out so that it may replace itself from the callback
        if let Some(delegate) = self.delegate() {
            delegate.text_did_change(&Notification::new(Notification::TEXT_DID_CHANGE, object));
        }
    }
}

/// A multi-line text view. Its text accessor is `string`.
#[derive(Default)]
pub struct HeadlessTextView {
    slots: Slots,
}

impl HeadlessTextView {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn string(&self) -> String { self.slots.text() }

    pub fn set_string(&self, string: &str) { self.slots.set_text(string) }

    /// Simulates the user typing `text` at the end of the view
    pub fn type_text(self: &Arc<Self>, text: &str) { self.slots.edit(self.clone(), |current| current.push_str(text)) }

    /// Simulates the user starting a new line
    pub fn insert_newline(self: &Arc<Self>) { self.slots.edit(self.clone(), |current| current.push('\n')) }
}

/// A single-line text field. Its text accessor is `string_value`.
#[derive(Default)]
pub struct HeadlessTextField {
    slots: Slots,
}

impl HeadlessTextField {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn string_value(&self) -> String { self.slots.text() }

    pub fn set_string_value(&self, value: &str) { self.slots.set_text(&single_line(value)) }

    /// Simulates the user typing `text` at the end of the field; line breaks are dropped
    pub fn type_text(self: &Arc<Self>, text: &str) {
        let text = single_line(text);
        self.slots.edit(self.clone(), |current| current.push_str(&text))
    }
}

fn single_line(text: &str) -> String { text.chars().filter(|c| *c != '\n' && *c != '\r').collect() }

impl NativeObject for HeadlessTextView {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> { self }
}

impl TextControl for HeadlessTextView {
    fn delegate(&self) -> Option<DelegateRef> { self.slots.delegate() }

    fn set_delegate(&self, delegate: Option<DelegateRef>) { self.slots.set_delegate(delegate) }

    fn text(&self) -> String { self.string() }

    fn set_text(&self, text: &str) { self.set_string(text) }

    fn lifetime(&self) -> &Lifetime { &self.slots.lifetime }
}

impl NativeObject for HeadlessTextField {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> { self }
}

impl TextControl for HeadlessTextField {
    fn delegate(&self) -> Option<DelegateRef> { self.slots.delegate() }

    fn set_delegate(&self, delegate: Option<DelegateRef>) { self.slots.set_delegate(delegate) }

    fn text(&self) -> String { self.string_value() }

    fn set_text(&self, text: &str) { self.set_string_value(text) }

    fn lifetime(&self) -> &Lifetime { &self.slots.lifetime }
}
