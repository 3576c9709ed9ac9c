use std::any::Any;

/// A handle for an active subscription. Dropping it unsubscribes.
#[must_use = "dropping a SubscriptionGuard unsubscribes immediately"]
pub struct SubscriptionGuard {
    _guard: Option<Box<dyn Any + Send + Sync>>,
}

impl SubscriptionGuard {
    /// Wraps whatever keeps the subscription alive (a listener guard, a tuple of guards, ...)
    pub fn new<G: Any + Send + Sync>(guard: G) -> Self { Self { _guard: Some(Box::new(guard)) } }

    /// A guard for a subscription that has nothing left to release
    pub fn empty() -> Self { Self { _guard: None } }

    /// Hands the guard to a bag which releases it together with its siblings
    pub fn add_to(self, bag: &mut SubscriptionBag) { bag.insert(self) }

    pub fn unsubscribe(self) { drop(self) }
}

impl std::fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGuard").field("active", &self._guard.is_some()).finish()
    }
}

/// Owns a set of subscriptions and releases all of them when dropped.
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    guards: Vec<SubscriptionGuard>,
}

impl SubscriptionBag {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, guard: SubscriptionGuard) { self.guards.push(guard) }

    pub fn len(&self) -> usize { self.guards.len() }

    pub fn is_empty(&self) -> bool { self.guards.is_empty() }

    /// Unsubscribes everything held so far, leaving the bag reusable
    pub fn clear(&mut self) { self.guards.clear() }
}
