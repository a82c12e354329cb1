use chrono::{Days, NaiveDate};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{format_input_date, BookingEntry};
use crate::validation::{parse_date_input, validate, InvalidBookingInput, ValidBooking};

/// Internal representation of the "add booking" form fields. Dates are kept
/// as typed text until the user saves so half-typed values survive redraws.
#[derive(Clone)]
pub(crate) struct BookingForm {
    pub(crate) name: String,
    pub(crate) arrival: String,
    pub(crate) departure: String,
    pub(crate) active: BookingField,
    pub(crate) error: Option<String>,
    today: NaiveDate,
}

/// Fields available within the booking form, in tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum BookingField {
    #[default]
    Name,
    Arrival,
    Departure,
}

impl BookingField {
    fn is_date(self) -> bool {
        matches!(self, BookingField::Arrival | BookingField::Departure)
    }
}

impl BookingForm {
    /// Start an empty form. `today` is the earliest date that can be picked.
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            arrival: String::new(),
            departure: String::new(),
            active: BookingField::default(),
            error: None,
            today,
        }
    }

    /// Move focus forward (Name → Arrival → Departure → Name).
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookingField::Name => BookingField::Arrival,
            BookingField::Arrival => BookingField::Departure,
            BookingField::Departure => BookingField::Name,
        };
    }

    /// Move focus backward (Name ← Arrival ← Departure ← Name).
    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            BookingField::Name => BookingField::Departure,
            BookingField::Arrival => BookingField::Name,
            BookingField::Departure => BookingField::Arrival,
        };
    }

    /// Append a character to the active field. Date fields only take digits
    /// and the `.` separator.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookingField::Name => {
                if ch.is_control() {
                    return false;
                }
                self.name.push(ch);
                true
            }
            field => {
                if !(ch.is_ascii_digit() || ch == '.') {
                    return false;
                }
                self.field_mut(field).push(ch);
                true
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.field_mut(field).pop();
    }

    /// Shift the active date field by `days`, the keyboard stand-in for a
    /// date picker. An empty or unreadable arrival starts at today; an empty
    /// departure starts at the arrival. Dates never go before today. Returns
    /// `false` when the active field is not a date.
    pub(crate) fn step_date(&mut self, days: i64) -> bool {
        let field = self.active;
        if !field.is_date() {
            return false;
        }

        let start = match self.picked(field) {
            Some(date) => shift(date, days),
            None => match field {
                BookingField::Departure => self.picked(BookingField::Arrival),
                _ => None,
            }
            .unwrap_or(self.today),
        };
        let date = start.max(self.today);
        *self.field_mut(field) = format_input_date(date);
        true
    }

    /// Validate the inputs and return typed values ready for the store.
    pub(crate) fn parse_inputs(&self) -> Result<ValidBooking, InvalidBookingInput> {
        let arrival = parse_date_input(&self.arrival, self.today)?;
        let departure = parse_date_input(&self.departure, self.today)?;
        validate(arrival, departure, &self.name)
    }

    /// `arrival - departure` once both date fields hold a valid date.
    pub(crate) fn date_range_preview(&self) -> Option<String> {
        let arrival = self.picked(BookingField::Arrival)?;
        let departure = self.picked(BookingField::Departure)?;
        Some(format!(
            "{} - {}",
            format_input_date(arrival),
            format_input_date(departure)
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: BookingField) -> Line<'static> {
        let value = self.field(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                BookingField::Name => "<required>".to_string(),
                _ => "dd.mm.yyyy".to_string(),
            }
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookingField) -> usize {
        self.field(field).chars().count()
    }

    fn picked(&self, field: BookingField) -> Option<NaiveDate> {
        parse_date_input(self.field(field), self.today).ok().flatten()
    }

    fn field(&self, field: BookingField) -> &str {
        match field {
            BookingField::Name => &self.name,
            BookingField::Arrival => &self.arrival,
            BookingField::Departure => &self.departure,
        }
    }

    fn field_mut(&mut self, field: BookingField) -> &mut String {
        match field {
            BookingField::Name => &mut self.name,
            BookingField::Arrival => &mut self.arrival,
            BookingField::Departure => &mut self.departure,
        }
    }
}

fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    let stepped = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    stepped.unwrap_or(date)
}

/// State for confirming the removal of a booking from the list.
#[derive(Clone)]
pub(crate) struct ConfirmBookingDelete {
    pub(crate) entry: BookingEntry,
}
