use thiserror::Error;
use tracing::error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The object (or delegate) does not have the capability the operation needs
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
}

impl ProxyError {
    pub fn type_mismatch<Expected: ?Sized>(found: &'static str) -> Self { ProxyError::TypeMismatch { expected: std::any::type_name::<Expected>(), found } }
}

/// Aborts on a broken contract between the integrating application and this crate.
///
/// This is not an error path. It is reserved for states that can only arise from a
/// caller defect, such as a native callback arriving with a payload of the wrong shape.
#[track_caller]
pub fn precondition_failure(message: std::fmt::Arguments<'_>) -> ! {
    error!("precondition failure: {message}");
    panic!("precondition failure: {message}")
}
