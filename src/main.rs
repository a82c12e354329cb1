//! Binary entry point that wires logging, the in-memory store, and the TUI.
use booking_ledger::{init_logging, run_app, App, BookingStore};

/// Start logging, hand a fresh store to the app, and drive the Ratatui event
/// loop until the user exits. Bookings are not saved anywhere.
fn main() -> anyhow::Result<()> {
    let log_path = init_logging()?;
    tracing::info!(log = %log_path.display(), "booking ledger starting");

    let mut app = App::new(BookingStore::new());
    run_app(&mut app)
}
