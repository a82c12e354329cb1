//! Ratatui front-end for the booking ledger: a home screen listing every
//! booking and an add screen with a three-field form. The UI only talks to
//! the store through `add`, `delete`, and `current_entries`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
