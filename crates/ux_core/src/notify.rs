//! Property-change notifications for views observing the installer model.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChanged<P> {
    pub property: P,
}

type Subscriber<P> = Box<dyn FnMut(&PropertyChanged<P>)>;

/// Observer list keyed by a property identifier type.
///
/// Subscribers are called synchronously, in subscription order, after the
/// owner has committed the new value.
pub struct PropertyNotifier<P> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<P>)>,
}

impl<P> Default for PropertyNotifier<P> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<P: Copy> PropertyNotifier<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&PropertyChanged<P>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn notify(&mut self, property: P) {
        let change = PropertyChanged { property };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&change);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
