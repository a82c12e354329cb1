//! Input checks performed by callers before they touch the store. The store
//! itself accepts anything; screens run these first and show the error
//! instead of calling `add` when they fail.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::INPUT_DATE_FORMAT;

/// Why a booking could not be saved. Every variant is recoverable: the form
/// shows the message and the user tries again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBookingInput {
    #[error("Arrival date is required.")]
    MissingArrival,
    #[error("Departure date is required.")]
    MissingDeparture,
    #[error("Name is required.")]
    BlankName,
    #[error("'{0}' is not a date in dd.mm.yyyy format.")]
    MalformedDate(String),
    #[error("{} is in the past.", .0.format(INPUT_DATE_FORMAT))]
    PastDate(NaiveDate),
}

/// Inputs that passed [`validate`], ready to hand to `BookingStore::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub name: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
}

/// Both dates present and a name that is not blank after trimming.
pub fn is_valid(arrival: Option<NaiveDate>, departure: Option<NaiveDate>, name: &str) -> bool {
    validate(arrival, departure, name).is_ok()
}

/// Same rule as [`is_valid`], reporting the first failing field. Departure
/// before arrival is accepted.
pub fn validate(
    arrival: Option<NaiveDate>,
    departure: Option<NaiveDate>,
    name: &str,
) -> Result<ValidBooking, InvalidBookingInput> {
    let arrival_date = arrival.ok_or(InvalidBookingInput::MissingArrival)?;
    let departure_date = departure.ok_or(InvalidBookingInput::MissingDeparture)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(InvalidBookingInput::BlankName);
    }
    Ok(ValidBooking {
        name: name.to_string(),
        arrival_date,
        departure_date,
    })
}

/// Parse a date field from the add form. An empty field means "not picked
/// yet" and yields `Ok(None)`; days before `today` cannot be picked.
pub fn parse_date_input(
    raw: &str,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, InvalidBookingInput> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT)
        .map_err(|_| InvalidBookingInput::MalformedDate(raw.to_string()))?;
    if date < today {
        return Err(InvalidBookingInput::PastDate(date));
    }
    Ok(Some(date))
}
