//! Observer lists
//!
//! Widgets publish every state mutation through a [`Notifier`]; hosts
//! subscribe a render callback instead of polling.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Notifier::subscribe`]
    pub struct SubscriptionId;
}

/// Subscriber callback type
pub type Subscriber<T> = Box<dyn FnMut(&T) + Send>;

/// An ordered list of subscribers for values of type `T`
pub struct Notifier<T> {
    subscribers: SlotMap<SubscriptionId, Subscriber<T>>,
    /// Insertion order; slotmap iteration order is not stable across removals
    order: Vec<SubscriptionId>,
}

impl<T> Notifier<T> {
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = self.subscribers.insert(Box::new(callback));
        self.order.push(id);
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.order.retain(|other| *other != id);
        self.subscribers.remove(id).is_some()
    }

    /// Call every subscriber in subscription order
    pub fn notify(&mut self, value: &T) {
        for id in &self.order {
            if let Some(callback) = self.subscribers.get_mut(*id) {
                callback(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.order.clear();
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notify_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = Notifier::new();

        for tag in ["a", "b", "c"] {
            let log = log.clone();
            notifier.subscribe(move |value: &i32| log.lock().unwrap().push(format!("{tag}{value}")));
        }

        notifier.notify(&7);
        assert_eq!(*log.lock().unwrap(), vec!["a7", "b7", "c7"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut notifier = Notifier::new();

        let count_clone = count.clone();
        let id = notifier.subscribe(move |_: &()| *count_clone.lock().unwrap() += 1);

        notifier.notify(&());
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(&());

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(notifier.is_empty());
    }
}
