use std::any::Any;
use std::sync::{Arc, Weak};

use rxtext_signals::{Subject, SubjectRef};
use tracing::{debug, trace};

use crate::{
    AssociatedProxy, DelegateRef, NativeObject, Notification, ObjectId, ObjectRef, ProxyError, ProxyRegistry, TextControl, TextDelegate,
    downcast, precondition_failure,
};

/// Sits in a control's delegate slot and re-emits its callbacks as a multicast stream.
///
/// There is at most one interceptor per control, looked up by identity in a
/// [`ProxyRegistry`]. Creating one installs it as the control's delegate, which
/// **replaces any delegate the application had set**. Application code may still set
/// a plain delegate afterwards through [`DelegateInterceptor::set_delegate`]; the
/// interceptor then stops receiving callbacks until it is reinstalled, but remains
/// associated with the control.
pub struct DelegateInterceptor<C: TextControl> {
    control: Weak<C>,
    text: Subject<Option<String>>,
}

impl<C: TextControl> DelegateInterceptor<C> {
    /// Returns the interceptor for `object`, creating and installing one if needed.
    /// Fails with `TypeMismatch` if `object` is not a `C`.
    pub fn create_for(object: &ObjectRef) -> Result<Arc<Self>, ProxyError> {
        let control = downcast::<C>(object)?;
        Ok(Self::proxy_for(&control))
    }

    /// Typed form of [`Self::create_for`] using the global registry
    pub fn proxy_for(control: &Arc<C>) -> Arc<Self> { Self::proxy_for_in(ProxyRegistry::global(), control) }

    pub(crate) fn proxy_for_in(registry: &ProxyRegistry, control: &Arc<C>) -> Arc<Self> {
        let (proxy, created) = registry.associate(control, |control| Arc::new(Self { control: Arc::downgrade(control), text: Subject::new() }));
        if created {
            debug!(object = %ObjectId::of(control), control = std::any::type_name::<C>(), "installing delegate interceptor");
            control.set_delegate(Some(proxy.clone()));
        }
        proxy
    }

    /// Whatever currently occupies the delegate slot of `object`
    pub fn current_delegate(object: &ObjectRef) -> Result<Option<DelegateRef>, ProxyError> { Ok(downcast::<C>(object)?.delegate()) }

    /// Installs `delegate` on `object`, replacing the interceptor if it is installed.
    /// Fails with `TypeMismatch` if `object` is not a `C` or `delegate` is not a [`TextDelegate`].
    pub fn set_delegate(delegate: Option<ObjectRef>, object: &ObjectRef) -> Result<(), ProxyError> {
        let control = downcast::<C>(object)?;
        let delegate = match delegate {
            None => None,
            Some(delegate) => {
                let found = delegate.type_name();
                Some(delegate.as_text_delegate().ok_or(ProxyError::type_mismatch::<dyn TextDelegate>(found))?)
            }
        };
        control.set_delegate(delegate);
        Ok(())
    }

    /// The control this interceptor belongs to, while it is alive
    pub fn control(&self) -> Option<Arc<C>> { self.control.upgrade() }

    /// Whether this interceptor currently occupies its control's delegate slot
    pub fn is_installed(self: &Arc<Self>) -> bool {
        let Some(control) = self.control() else { return false };
        let this: DelegateRef = self.clone();
        control.delegate().is_some_and(|delegate| crate::same_delegate(&delegate, &this))
    }

    /// Live text values, one per text-did-change callback. No present value, no replay.
    pub fn text_changes(&self) -> SubjectRef<Option<String>> { self.text.reference() }
}

impl<C: TextControl> TextDelegate for DelegateInterceptor<C> {
    fn text_did_change(&self, notification: &Notification) {
        let control = match downcast::<C>(notification.object()) {
            Ok(control) => control,
            Err(error) => precondition_failure(format_args!("{} callback payload: {error}", notification.name())),
        };
        let text = control.text();
        trace!(object = %ObjectId::of(&control), len = text.len(), "text did change");
        self.text.send(Some(text));
    }
}

impl<C: TextControl> NativeObject for DelegateInterceptor<C> {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> { self }

    fn as_text_delegate(self: Arc<Self>) -> Option<DelegateRef> { Some(self) }
}

impl<C: TextControl> AssociatedProxy<C> for DelegateInterceptor<C> {
    fn is_bound_to(&self, control: &Arc<C>) -> bool { self.control.strong_count() > 0 && Weak::ptr_eq(&self.control, &Arc::downgrade(control)) }
}

impl<C: TextControl> Drop for DelegateInterceptor<C> {
    fn drop(&mut self) { self.text.complete() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessTextView;

    #[test]
    fn test_private_registry_releases_destroyed_controls() {
        let registry = ProxyRegistry::new();
        let view = HeadlessTextView::new();
        let interceptor = DelegateInterceptor::proxy_for_in(&registry, &view);
        assert_eq!(registry.len(), 1);
        assert!(registry.get::<_, DelegateInterceptor<HeadlessTextView>>(&view).is_some());

        drop(view);
        assert!(registry.is_empty());
        assert!(interceptor.control().is_none());
    }

    #[test]
    fn test_existing_association_is_not_reinstalled() {
        let registry = ProxyRegistry::new();
        let view = HeadlessTextView::new();
        let first = DelegateInterceptor::proxy_for_in(&registry, &view);
        view.set_delegate(None);

        let second = DelegateInterceptor::proxy_for_in(&registry, &view);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!second.is_installed());
    }
}
