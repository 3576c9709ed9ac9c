mod deferred;
mod map;
mod start_with;
mod take_until;

pub use deferred::*;
pub use map::*;
pub use start_with::*;
pub use take_until::*;
