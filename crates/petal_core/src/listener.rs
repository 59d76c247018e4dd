//! Listener registries
//!
//! Subscribe/unsubscribe with an owned token. Whoever holds the token owns
//! the subscription; dropping the registry releases every handler at once.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Token identifying one subscription.
    pub struct ListenerToken;
}

type Handler<T> = Box<dyn Fn(&T) + Send>;

/// A registry of event handlers keyed by token.
pub struct ListenerRegistry<T> {
    handlers: SlotMap<ListenerToken, Handler<T>>,
}

impl<T> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
        }
    }

    /// Register a handler; the returned token is the only way to remove it.
    pub fn subscribe<F>(&mut self, handler: F) -> ListenerToken
    where
        F: Fn(&T) + Send + 'static,
    {
        let token = self.handlers.insert(Box::new(handler));
        tracing::trace!(?token, "listener subscribed");
        token
    }

    /// Remove a subscription. Returns `false` if the token was already gone.
    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        self.handlers.remove(token).is_some()
    }

    /// Invoke every handler with the event.
    pub fn emit(&self, event: &T) {
        for (_, handler) in self.handlers.iter() {
            handler(event);
        }
    }

    /// Drop all subscriptions.
    pub fn clear(&mut self) {
        if !self.handlers.is_empty() {
            tracing::trace!(count = self.handlers.len(), "listeners released");
        }
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn subscribe_and_emit() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let mut registry: ListenerRegistry<u32> = ListenerRegistry::new();
        let _token = registry.subscribe(move |n| {
            seen_clone.lock().unwrap().push(*n);
        });

        registry.emit(&1);
        registry.emit(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();

        let mut registry: ListenerRegistry<()> = ListenerRegistry::new();
        let token = registry.subscribe(move |_| {
            *count_clone.lock().unwrap() += 1;
        });

        registry.emit(&());
        assert!(registry.unsubscribe(token));
        registry.emit(&());

        assert_eq!(*count.lock().unwrap(), 1);
        // Second removal is a no-op
        assert!(!registry.unsubscribe(token));
    }

    #[test]
    fn clear_releases_everything() {
        let mut registry: ListenerRegistry<()> = ListenerRegistry::new();
        registry.subscribe(|_| {});
        registry.subscribe(|_| {});
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }
}
