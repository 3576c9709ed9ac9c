use rxtext_signals::Lifetime;

use crate::{DelegateRef, NativeObject};

/// The minimal contract of a native text control.
///
/// Controls name their text accessor differently (`string` on a text view,
/// `string_value` on a field); implementations map theirs onto `text`/`set_text`
/// so one interceptor serves all of them.
pub trait TextControl: NativeObject + Sized {
    /// The single delegate slot
    fn delegate(&self) -> Option<DelegateRef>;

    /// Replaces whatever occupies the delegate slot
    fn set_delegate(&self, delegate: Option<DelegateRef>);

    fn text(&self) -> String;

    /// Assigns the text without firing delegate callbacks (programmatic change)
    fn set_text(&self, text: &str);

    /// Drop token of the control; ends when the control is destroyed
    fn lifetime(&self) -> &Lifetime;
}
