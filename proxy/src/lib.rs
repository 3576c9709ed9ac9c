/*!
Delegate interception for native text controls.

A native text control reports edits to a single delegate. [`DelegateInterceptor`]
occupies that slot and re-emits each callback on a multicast stream, so any number
of subscribers can follow a control that only supports one listener.

# Contract with the host toolkit
The crate only needs what [`TextControl`] describes: get and set the delegate, get and
set the text, a text-did-change callback on user edits, and a [`rxtext_signals::Lifetime`]
that ends when the control is destroyed. [`HeadlessTextView`] and [`HeadlessTextField`]
implement it in-process.

# Side effects
Creating an interceptor (directly, or through [`Reactive::text`] / [`Reactive::delegate`])
installs it as the control's delegate, replacing whatever the application had set.

# Failure classes
- A control or delegate without the required capability: [`ProxyError::TypeMismatch`].
- A callback whose payload is not the expected control: [`precondition_failure`], which panics.
  This can only be produced by a broken integration and is not meant to be handled.
*/

mod control;
mod error;
mod headless;
mod interceptor;
mod object;
mod property;
mod reactive;
mod registry;

pub use control::*;
pub use error::*;
pub use headless::*;
pub use interceptor::*;
pub use object::*;
pub use property::*;
pub use reactive::*;
pub use registry::*;
