use std::any::Any;
use std::sync::Arc;

/// A native object as seen through the host toolkit: something with identity that
/// can be queried for capabilities at runtime.
///
/// Implementors provide `into_any` (always `self`) and override the capability
/// accessors for the roles they can play.
pub trait NativeObject: Any + Send + Sync {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// The object's text delegate capability, if it has one
    fn as_text_delegate(self: Arc<Self>) -> Option<DelegateRef> { None }

    /// Name used in diagnostics
    fn type_name(&self) -> &'static str { std::any::type_name::<Self>() }
}

/// A type-erased native object
pub type ObjectRef = Arc<dyn NativeObject>;

/// The identity of a native object, derived from its allocation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn of<T: ?Sized>(object: &Arc<T>) -> Self { Self(Arc::as_ptr(object) as *const () as usize) }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

/// Checks the typed capability of `object`, failing with `TypeMismatch` rather than casting blindly.
pub fn downcast<C: NativeObject>(object: &ObjectRef) -> Result<Arc<C>, crate::ProxyError> {
    let found = object.type_name();
    object.clone().into_any().downcast::<C>().map_err(|_| crate::ProxyError::type_mismatch::<C>(found))
}

/// Payload of a native callback: which notification fired and for which object.
#[derive(Clone)]
pub struct Notification {
    name: &'static str,
    object: ObjectRef,
}

impl Notification {
    pub const TEXT_DID_CHANGE: &'static str = "TextDidChange";

    pub fn new(name: &'static str, object: ObjectRef) -> Self { Self { name, object } }

    pub fn name(&self) -> &'static str { self.name }

    pub fn object(&self) -> &ObjectRef { &self.object }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification").field("name", &self.name).field("object", &self.object.type_name()).finish()
    }
}

/// Callbacks a text control sends to its single delegate.
#[allow(unused_variables)]
pub trait TextDelegate: Send + Sync {
    /// The control's text was changed by user interaction
    fn text_did_change(&self, notification: &Notification) {}
}

pub type DelegateRef = Arc<dyn TextDelegate>;

/// Identity comparison for delegates, ignoring vtables
pub fn same_delegate(a: &DelegateRef, b: &DelegateRef) -> bool { std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)) }
