//! Domain model for the booking ledger. Entries are plain values: they carry
//! no identifier, compare by all of their fields, and never change after the
//! store creates them. Formatting helpers live next to the type so both the
//! list and the add form render dates the same way.

use std::fmt;

use chrono::NaiveDate;

/// Medium calendar format used on the home screen (`Jan 10, 2024`).
const MEDIUM_DATE_FORMAT: &str = "%b %-d, %Y";
/// Compact format typed into the add form (`10.01.2024`).
pub const INPUT_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A single stay: who is coming, when they arrive, and when they leave.
///
/// Fields are private so an entry stays exactly as the store created it. The
/// store trims the name on construction; arrival is not required to precede
/// departure.
pub struct BookingEntry {
    name: String,
    arrival_date: NaiveDate,
    departure_date: NaiveDate,
}

impl BookingEntry {
    pub(crate) fn new(name: &str, arrival_date: NaiveDate, departure_date: NaiveDate) -> Self {
        Self {
            name: name.trim().to_string(),
            arrival_date,
            departure_date,
        }
    }

    /// Guest name, already trimmed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    /// `Arrival - Departure` in the medium date format. List rows show this
    /// underneath the guest name.
    pub fn date_range(&self) -> String {
        format!(
            "{} - {}",
            format_medium_date(self.arrival_date),
            format_medium_date(self.departure_date)
        )
    }
}

impl fmt::Display for BookingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date_range())
    }
}

/// Render a date the way the booking list shows it.
pub fn format_medium_date(date: NaiveDate) -> String {
    date.format(MEDIUM_DATE_FORMAT).to_string()
}

/// Render a date the way the add form expects it to be typed.
pub fn format_input_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}
