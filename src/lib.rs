//! Core library surface for the booking ledger TUI.
//!
//! The store and validation modules carry all of the behavior; `ui` is a
//! thin adapter that renders the store's snapshots and forwards key presses
//! to `add` and `delete`. Everything lives in memory for the lifetime of the
//! process.
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod validation;

/// Set up file logging before the terminal is taken over.
pub use logging::init_logging;

/// The booking value type and its display helpers.
pub use models::{format_input_date, format_medium_date, BookingEntry};

/// The state holder and its observation handles.
pub use store::{BookingStore, Snapshot, SubscriptionId};

/// Caller-side checks run before `BookingStore::add`.
pub use validation::{is_valid, parse_date_input, validate, InvalidBookingInput, ValidBooking};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
