use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::observers::{ObserverRegistry, SubscriptionId};
use crate::models::BookingEntry;

/// Immutable, insertion-ordered view of the collection at one point in time.
/// Holding on to a snapshot is safe: later mutations build a new one.
pub type Snapshot = Arc<[BookingEntry]>;

/// Single owner of the booking collection and the only place it changes.
///
/// Each mutation replaces the current snapshot with a fresh one and hands it
/// to every observer before returning, so callers never see a half-applied
/// change. The store performs no validation and has no failure modes; see
/// `crate::validation` for the checks callers run first.
pub struct BookingStore {
    entries: Snapshot,
    observers: ObserverRegistry<Snapshot>,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::<BookingEntry>::new().into(),
            observers: ObserverRegistry::new(),
        }
    }

    /// The current snapshot. Cloning the `Arc` is all this costs.
    pub fn current_entries(&self) -> Snapshot {
        Arc::clone(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an observer. It is called right away with the current
    /// snapshot and then once for every change until unsubscribed.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        let id = self.observers.register(Box::new(observer));
        let current = self.current_entries();
        self.observers.notify_one(id, &current);
        debug!(subscription = %id, observers = self.observers.len(), "observer subscribed");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.observers.remove(id);
        debug!(subscription = %id, removed, "observer unsubscribed");
        removed
    }

    /// Append a new entry built from the trimmed `name` and both dates, and
    /// return it. Callers are expected to have validated the input.
    pub fn add(
        &mut self,
        name: &str,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> BookingEntry {
        let entry = BookingEntry::new(name, arrival_date, departure_date);
        let mut next = self.entries.to_vec();
        next.push(entry.clone());
        info!(
            name = entry.name(),
            arrival = %entry.arrival_date(),
            departure = %entry.departure_date(),
            "booking added"
        );
        self.publish(next);
        entry
    }

    /// Remove the first entry equal to `entry`. Returns `false`, and leaves
    /// the snapshot and observers untouched, when nothing matches.
    pub fn delete(&mut self, entry: &BookingEntry) -> bool {
        let Some(position) = self.entries.iter().position(|existing| existing == entry) else {
            debug!(name = entry.name(), "delete matched no booking");
            return false;
        };

        let mut next = self.entries.to_vec();
        next.remove(position);
        info!(
            name = entry.name(),
            arrival = %entry.arrival_date(),
            departure = %entry.departure_date(),
            "booking deleted"
        );
        self.publish(next);
        true
    }

    fn publish(&mut self, next: Vec<BookingEntry>) {
        self.entries = Arc::from(next);
        let snapshot = self.current_entries();
        debug!(
            entries = snapshot.len(),
            observers = self.observers.len(),
            "publishing snapshot"
        );
        self.observers.notify_all(&snapshot);
    }
}
