use std::fmt;

/// Handle returned by `BookingStore::subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Observer<T> = Box<dyn FnMut(&T)>;

/// Ordered list of callbacks that receive every published value. Observers
/// run synchronously, in subscription order, on the publishing thread.
pub(crate) struct ObserverRegistry<T> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<T>)>,
}

impl<T> ObserverRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, observer: Observer<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Drop the observer registered under `id`. Returns `false` when the id is
    /// unknown or was already removed.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Deliver a single value to the observer registered under `id`.
    pub(crate) fn notify_one(&mut self, id: SubscriptionId, value: &T) {
        if let Some((_, observer)) = self.observers.iter_mut().find(|(existing, _)| *existing == id)
        {
            observer(value);
        }
    }

    pub(crate) fn notify_all(&mut self, value: &T) {
        for (_, observer) in self.observers.iter_mut() {
            observer(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
