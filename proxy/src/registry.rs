use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock, Weak};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rxtext_signals::{Event, Observable, SubscriptionGuard};
use tracing::{debug, warn};

use crate::{ObjectId, TextControl, precondition_failure};

/// A proxy that is associated with exactly one control.
pub trait AssociatedProxy<C>: Any + Send + Sync {
    /// Whether this proxy still belongs to `control` (and not to a dead object at the same address)
    fn is_bound_to(&self, control: &Arc<C>) -> bool;
}

type Key = (TypeId, ObjectId);

struct Association {
    proxy: Arc<dyn Any + Send + Sync>,
    // removes the association when the control's lifetime ends
    _released: SubscriptionGuard,
}

/// Identity-keyed table of proxies: at most one proxy of each type per native object.
///
/// The table holds its proxies strongly, so a proxy survives being replaced in the
/// delegate slot, and drops them when the associated control is destroyed.
///
/// Only the process-wide table, [`ProxyRegistry::global`], is reachable outside this crate.
#[derive(Clone)]
pub struct ProxyRegistry(Arc<DashMap<Key, Association>>);

static GLOBAL: OnceLock<ProxyRegistry> = OnceLock::new();

impl ProxyRegistry {
    pub(crate) fn new() -> Self { Self(Arc::new(DashMap::new())) }

    /// The process-wide registry used by [`crate::DelegateInterceptor::proxy_for`]
    pub fn global() -> &'static ProxyRegistry { GLOBAL.get_or_init(ProxyRegistry::new) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns the proxy of type `P` associated with `control`, if any
    pub fn get<C, P>(&self, control: &Arc<C>) -> Option<Arc<P>>
    where
        C: TextControl,
        P: AssociatedProxy<C>,
    {
        let key = (TypeId::of::<P>(), ObjectId::of(control));
        // clone out of the map so no shard lock is held past this line
        let proxy = self.0.get(&key).map(|association| association.proxy.clone())?;
        let proxy = downcast_proxy::<P>(proxy);
        if proxy.is_bound_to(control) {
            Some(proxy)
        } else {
            warn!(object = %key.1, "discarding stale proxy association");
            self.0.remove(&key);
            None
        }
    }

    /// Returns the proxy associated with `control`, creating and registering one with `create`
    /// if there is none. The flag is true when the proxy was created by this call.
    pub(crate) fn associate<C, P>(&self, control: &Arc<C>, create: impl FnOnce(&Arc<C>) -> Arc<P>) -> (Arc<P>, bool)
    where
        C: TextControl,
        P: AssociatedProxy<C>,
    {
        if let Some(existing) = self.get::<C, P>(control) {
            return (existing, false);
        }

        let key = (TypeId::of::<P>(), ObjectId::of(control));
        match self.0.entry(key) {
            Entry::Occupied(entry) => (downcast_proxy::<P>(entry.get().proxy.clone()), false),
            Entry::Vacant(entry) => {
                let proxy = create(control);
                let released = {
                    let entries: Weak<DashMap<Key, Association>> = Arc::downgrade(&self.0);
                    control.lifetime().ended().subscribe_listener(Arc::new(move |event: Event<()>| {
                        if let (Event::Next(()), Some(entries)) = (event, entries.upgrade()) {
                            debug!(object = %key.1, "control destroyed, releasing proxy");
                            entries.remove(&key);
                        }
                    }))
                };
                entry.insert(Association { proxy: proxy.clone(), _released: released });
                debug!(object = %key.1, proxy = std::any::type_name::<P>(), "proxy associated");
                (proxy, true)
            }
        }
    }
}

fn downcast_proxy<P: Any + Send + Sync>(proxy: Arc<dyn Any + Send + Sync>) -> Arc<P> {
    match proxy.downcast::<P>() {
        Ok(proxy) => proxy,
        // the key contains the proxy's TypeId, so this cannot happen unless the table is corrupted
        Err(_) => precondition_failure(format_args!("registry entry is not a {}", std::any::type_name::<P>())),
    }
}
