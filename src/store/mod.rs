//! In-memory booking state split across logical submodules.

mod bookings;
mod observers;

pub use bookings::{BookingStore, Snapshot};
pub use observers::SubscriptionId;
