/*!
Reactive stream primitives for rxtext

# Design requirements:
- `Observable` must be dyn object safe, so streams can be boxed and stored
- Senders and receivers are different types: a [`Subject`] can send, a [`SubjectRef`] can only listen
- Listeners are never called while an internal lock is held, so they may subscribe and unsubscribe re-entrantly
- Dropping a [`SubscriptionGuard`] is the only way to unsubscribe
- No replay: a subscriber sees what is emitted while it is attached and nothing from before.
  [`Variable`] and `start_with` are the explicit ways to hand a present value to a new subscriber

# Nomenclature:
- `subscribe` - attach a listener that receives every [`Event`] (values and termination)
- `subscribe_next` - attach a callback for values only
- `share` - one upstream subscription for any number of downstream subscribers

# Basic usage

```rust
use rxtext_signals::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

let input = Subject::<u32>::new();
let transforms = Arc::new(AtomicUsize::new(0));
let doubled = {
    let transforms = transforms.clone();
    input.clone().map(move |value| {
        transforms.fetch_add(1, Ordering::SeqCst);
        value * 2
    })
}
.share();

let _a = doubled.subscribe_next(|value| println!("a: {value}"));
let _b = doubled.subscribe_next(|value| println!("b: {value}"));
input.send(21);
// Should print:
// a: 42
// b: 42
assert_eq!(transforms.load(Ordering::SeqCst), 1);
```
*/

mod event;
mod lifetime;
mod listener;
mod observable;
pub mod operator;
mod share;
mod sink;
mod subject;
mod subscription;
mod variable;

pub use event::*;
pub use lifetime::*;
pub use listener::*;
pub use observable::*;
pub use operator::deferred;
pub use share::*;
pub use sink::*;
pub use subject::*;
pub use subscription::*;
pub use variable::*;
