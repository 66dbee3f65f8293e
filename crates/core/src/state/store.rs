use std::fmt;

/// Identifies one subscriber so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A single value with synchronous change notification.
///
/// Reading is open to everyone; writing is crate-private so each store type
/// keeps exactly one write path. Subscribers run in subscription order
/// before the write returns.
pub struct Store<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T: Copy + PartialEq> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns whether the subscriber was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn set(&mut self, value: T) {
        self.value = value;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn notifies_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(1);
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            store.subscribe(move |v| log.borrow_mut().push(format!("{tag}{v}")));
        }
        store.set(2);
        assert_eq!(store.get(), 2);
        assert_eq!(*log.borrow(), vec!["a2", "b2"]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_running() {
        let hits = Rc::new(RefCell::new(0));
        let mut store = Store::new(false);
        let counter = Rc::clone(&hits);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.set(true);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(false);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }
}
