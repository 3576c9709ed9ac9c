use std::convert::Infallible;

/// A single notification delivered to a listener.
///
/// A stream delivers any number of `Next` values followed by at most one terminal
/// event (`Error` or `Completed`). Nothing is delivered after a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T, E = Infallible> {
    Next(T),
    Error(E),
    Completed,
}

impl<T, E> Event<T, E> {
    /// True for `Error` and `Completed`
    pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }

    pub fn into_value(self) -> Option<T> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Transforms the payload of a `Next` event, passing terminal events through untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Event<U, E> {
        match self {
            Event::Next(value) => Event::Next(f(value)),
            Event::Error(error) => Event::Error(error),
            Event::Completed => Event::Completed,
        }
    }
}
