//! # rxtext
//!
//! Bridges native text controls, which report edits to a single delegate, to multicast
//! streams that any number of subscribers can follow.
//!
//! ## Key Features
//!
//! - **Delegate interception**: one [`DelegateInterceptor`] per control, found by identity,
//!   installed in the control's delegate slot and re-emitting its callbacks
//! - **Shared derived streams**: [`ObservableExt::share`] runs upstream work once per value no
//!   matter how many subscribers are attached, and not at all when none are
//! - **No replay**: late subscribers see only what happens after they attach; present values
//!   are handed out explicitly (`start_with`, [`Variable`])
//!
//! ## Example: one transform, three subscribers
//!
//! ```rust
//! use rxtext::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let input = Subject::<&'static str>::new();
//! let transforms = Arc::new(AtomicUsize::new(0));
//! let state = {
//!     let transforms = transforms.clone();
//!     input.reference().map(move |key| {
//!         transforms.fetch_add(1, Ordering::SeqCst);
//!         key.len()
//!     })
//! }
//! .share();
//!
//! let mut bag = SubscriptionBag::new();
//! for n in 1..=3 {
//!     state.subscribe_next(move |len| println!("subscription {n}: {len}")).add_to(&mut bag);
//! }
//! input.send("Key1");
//! assert_eq!(transforms.load(Ordering::SeqCst), 1);
//! ```
//!
//! ## Example: following a text view
//!
//! ```rust
//! use rxtext::*;
//!
//! let view = HeadlessTextView::new();
//! let text = Reactive::new(&view).text();
//! let _guard = text.subscribe_next(|value| println!("text is now {value:?}"));
//! view.type_text("hello");
//! ```

pub use rxtext_proxy as proxy;
pub use rxtext_signals as signals;

pub use rxtext_proxy::*;
pub use rxtext_signals::*;
