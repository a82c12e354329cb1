use std::cell::RefCell;
use std::rc::Rc;

use booking_ledger::{is_valid, validate, BookingEntry, BookingStore, Snapshot};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn summary(snapshot: &Snapshot) -> Vec<(String, NaiveDate, NaiveDate)> {
    snapshot
        .iter()
        .map(|entry| {
            (
                entry.name().to_string(),
                entry.arrival_date(),
                entry.departure_date(),
            )
        })
        .collect()
}

/// Validate like a screen would, then add only when the input passes.
fn submit(
    store: &mut BookingStore,
    name: &str,
    arrival: Option<NaiveDate>,
    departure: Option<NaiveDate>,
) -> Option<BookingEntry> {
    let booking = validate(arrival, departure, name).ok()?;
    Some(store.add(&booking.name, booking.arrival_date, booking.departure_date))
}

#[test]
fn alice_and_bob_scenario() {
    let mut store = BookingStore::new();
    assert!(store.is_empty());

    let alice = store.add("Alice", date(2024, 1, 10), date(2024, 1, 15));
    assert_eq!(
        summary(&store.current_entries()),
        vec![("Alice".to_string(), date(2024, 1, 10), date(2024, 1, 15))]
    );

    store.add("Bob", date(2024, 2, 1), date(2024, 2, 3));
    assert_eq!(
        summary(&store.current_entries()),
        vec![
            ("Alice".to_string(), date(2024, 1, 10), date(2024, 1, 15)),
            ("Bob".to_string(), date(2024, 2, 1), date(2024, 2, 3)),
        ]
    );

    assert!(store.delete(&alice));
    assert_eq!(
        summary(&store.current_entries()),
        vec![("Bob".to_string(), date(2024, 2, 1), date(2024, 2, 3))]
    );
}

#[test]
fn deleting_an_entry_never_added_changes_nothing() {
    let mut store = BookingStore::new();
    store.add("Alice", date(2024, 1, 10), date(2024, 1, 15));
    let before = store.current_entries();

    let mut other = BookingStore::new();
    let never_added = other.add("Carol", date(2024, 3, 1), date(2024, 3, 4));

    assert!(!store.delete(&never_added));
    assert_eq!(summary(&store.current_entries()), summary(&before));
}

#[test]
fn duplicates_are_kept_and_removed_one_at_a_time() {
    let mut store = BookingStore::new();
    let entry = store.add("Alice", date(2024, 1, 10), date(2024, 1, 15));
    store.add("Alice", date(2024, 1, 10), date(2024, 1, 15));
    assert_eq!(store.len(), 2);

    store.delete(&entry);
    assert_eq!(store.len(), 1);
}

#[test]
fn invalid_submissions_never_reach_the_store() {
    let mut store = BookingStore::new();
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    store.subscribe(move |_: &Snapshot| *sink.borrow_mut() += 1);

    let d1 = date(2024, 1, 10);
    let d2 = date(2024, 1, 15);
    assert!(submit(&mut store, "x", None, Some(d2)).is_none());
    assert!(submit(&mut store, "x", Some(d1), None).is_none());
    assert!(submit(&mut store, "", Some(d1), Some(d2)).is_none());
    assert!(submit(&mut store, "   ", Some(d1), Some(d2)).is_none());
    assert!(store.is_empty());
    assert_eq!(*calls.borrow(), 1);

    assert!(is_valid(Some(d1), Some(d2), " Alice "));
    let added = submit(&mut store, " Alice ", Some(d1), Some(d2)).unwrap();
    assert_eq!(added.name(), "Alice");
    assert_eq!(store.len(), 1);
    assert_eq!(*calls.borrow(), 2);
}
