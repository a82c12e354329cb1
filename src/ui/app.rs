use std::mem;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info};

use crate::models::BookingEntry;
use crate::store::{BookingStore, Snapshot};

use super::forms::{BookingField, BookingForm, ConfirmBookingDelete};
use super::helpers::{booking_list_item, centered_rect, surface_error};
use super::screens::HomeScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown on the booking list.
const PAGE_STEP: isize = 5;

/// The two navigable screens. The add screen owns its form so leaving it
/// discards whatever was typed.
enum Screen {
    Home,
    Add(BookingForm),
}

/// Modal overlays drawn on top of the current screen.
enum Mode {
    Normal,
    ConfirmDelete(ConfirmBookingDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The store is injected by
/// the caller and owned here for the lifetime of the session.
pub struct App {
    store: BookingStore,
    home: HomeScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new(store: BookingStore) -> Self {
        Self::with_clock(store, local_today)
    }

    /// Build the app with a custom source for "today", which bounds the dates
    /// the add form accepts.
    pub fn with_clock(mut store: BookingStore, today: fn() -> NaiveDate) -> Self {
        store.subscribe(|snapshot: &Snapshot| {
            debug!(entries = snapshot.len(), "booking list refreshed");
        });
        Self {
            store,
            home: HomeScreen::default(),
            screen: Screen::Home,
            mode: Mode::Normal,
            status: None,
            today,
        }
    }

    /// Read access to the store, mainly for callers embedding the app.
    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Feed one key press through the active screen or modal. Returns `true`
    /// when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let screen = mem::replace(&mut self.screen, Screen::Home);
        match screen {
            Screen::Home => self.handle_home_key(code, exit),
            Screen::Add(form) => {
                self.screen = self.handle_add_key(code, form)?;
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_home_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let len = self.store.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.home.move_selection(-1, len),
            KeyCode::Down => self.home.move_selection(1, len),
            KeyCode::PageUp => self.home.move_selection(-PAGE_STEP, len),
            KeyCode::PageDown => self.home.move_selection(PAGE_STEP, len),
            KeyCode::Home => self.home.select_first(),
            KeyCode::End => self.home.select_last(len),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                self.screen = Screen::Add(BookingForm::new((self.today)()));
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Some(entry) = self.current_booking() {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmBookingDelete { entry }));
                }
                self.set_status("No booking selected to delete.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_key(&mut self, code: KeyCode, mut form: BookingForm) -> Result<Screen> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add booking cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
            }
            KeyCode::Up => {
                if form.step_date(1) {
                    form.error = None;
                }
            }
            KeyCode::Down => {
                if form.step_date(-1) {
                    form.error = None;
                }
            }
            KeyCode::Enter => match self.save_new_booking(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    debug!(reason = %message, "booking input rejected");
                    self.set_status(
                        format!("Invalid booking entry: {message}"),
                        StatusKind::Error,
                    );
                    form.error = Some(message);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Screen::Add(form))
        } else {
            Ok(Screen::Home)
        }
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmBookingDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.perform_delete(&confirm.entry);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    /// Validate the form and append the booking. Invalid input never reaches
    /// the store.
    fn save_new_booking(&mut self, form: &BookingForm) -> Result<()> {
        let booking = form
            .parse_inputs()
            .context("failed to validate booking")?;
        let entry = self
            .store
            .add(&booking.name, booking.arrival_date, booking.departure_date);
        self.home.select_last(self.store.len());
        self.set_status(format!("Added booking for {}.", entry.name()), StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, entry: &BookingEntry) {
        if self.store.delete(entry) {
            self.set_status(format!("Deleted booking for {}.", entry.name()), StatusKind::Info);
        } else {
            info!(name = entry.name(), "booking already gone");
            self.set_status("Booking was already removed.", StatusKind::Info);
        }
        self.home.ensure_in_bounds(self.store.len());
    }

    fn current_booking(&self) -> Option<BookingEntry> {
        self.store.current_entries().get(self.home.selected).cloned()
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Home => self.draw_home(frame, content_area),
            Screen::Add(form) => self.draw_add_form(frame, content_area, form),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::ConfirmDelete(confirm) = &self.mode {
            self.draw_confirm_delete(frame, area, confirm);
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Booking Entries")
            .borders(Borders::ALL);
        let entries = self.store.current_entries();

        if entries.is_empty() {
            let lines = vec![
                Line::from("No bookings available"),
                Line::from(Span::styled(
                    "Press '+' to add one.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let message = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = entries.iter().map(booking_list_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.home.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_add_form(&self, frame: &mut Frame, area: Rect, form: &BookingForm) {
        let block = Block::default()
            .title("Add Booking Entry")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines = vec![
            form.build_line("Name", BookingField::Name),
            form.build_line("Arrival", BookingField::Arrival),
            form.build_line("Departure", BookingField::Departure),
            Line::from(""),
        ];

        if let Some(range) = form.date_range_preview() {
            lines.push(Line::from(vec![
                Span::raw("Stay: "),
                Span::styled(range, Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(""));
        }

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • ↑↓ to pick a date • Esc to go back",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            BookingField::Name => ("Name: ", 0),
            BookingField::Arrival => ("Arrival: ", 1),
            BookingField::Departure => ("Departure: ", 2),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookingDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete the booking for {}?", confirm.entry.name())),
            Line::from(confirm.entry.date_range()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::ConfirmDelete(_)) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[n]", key_style),
                Span::raw(" Keep"),
            ]),
            (Screen::Add(_), _) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Change Date   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back"),
            ]),
            (Screen::Home, _) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        App::with_clock(BookingStore::new(), fixed_today)
    }

    fn press(app: &mut App, code: KeyCode) {
        let exit = app.handle_key(code).unwrap();
        assert!(!exit, "unexpected exit on {code:?}");
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn add_booking(app: &mut App, name: &str, arrival: &str, departure: &str) {
        press(app, KeyCode::Char('+'));
        type_text(app, name);
        press(app, KeyCode::Tab);
        type_text(app, arrival);
        press(app, KeyCode::Tab);
        type_text(app, departure);
        press(app, KeyCode::Enter);
    }

    fn status_text(app: &App) -> Option<(&str, StatusKind)> {
        app.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.kind))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_add_flow_appends_and_returns_home() {
        let mut app = app();
        add_booking(&mut app, " Alice ", "10.01.2024", "15.01.2024");

        assert!(matches!(app.screen, Screen::Home));
        let entries = app.store().current_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "Alice");
        assert_eq!(entries[0].arrival_date(), date(2024, 1, 10));
        assert_eq!(entries[0].departure_date(), date(2024, 1, 15));
        assert_eq!(
            status_text(&app),
            Some(("Added booking for Alice.", StatusKind::Info))
        );
    }

    #[test]
    fn test_invalid_input_keeps_form_open_and_store_untouched() {
        let mut app = app();
        add_booking(&mut app, "   ", "10.01.2024", "15.01.2024");

        assert!(app.store().is_empty());
        match &app.screen {
            Screen::Add(form) => assert_eq!(form.error.as_deref(), Some("Name is required.")),
            Screen::Home => panic!("form should stay open"),
        }
        assert_eq!(
            status_text(&app),
            Some((
                "Invalid booking entry: Name is required.",
                StatusKind::Error
            ))
        );
    }

    #[test]
    fn test_missing_dates_are_rejected() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Alice");
        press(&mut app, KeyCode::Enter);

        assert!(app.store().is_empty());
        assert!(matches!(app.screen, Screen::Add(_)));
    }

    #[test]
    fn test_past_date_is_rejected() {
        let mut app = app();
        add_booking(&mut app, "Alice", "31.12.2023", "02.01.2024");
        assert!(app.store().is_empty());
        assert_eq!(
            status_text(&app),
            Some((
                "Invalid booking entry: 31.12.2023 is in the past.",
                StatusKind::Error
            ))
        );
    }

    #[test]
    fn test_arrow_keys_pick_dates() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        type_text(&mut app, "Bob");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);

        let entries = app.store().current_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].arrival_date(), date(2024, 1, 2));
        assert_eq!(entries[0].departure_date(), date(2024, 1, 3));
    }

    #[test]
    fn test_escape_discards_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        type_text(&mut app, "Alice");
        press(&mut app, KeyCode::Esc);

        assert!(matches!(app.screen, Screen::Home));
        assert!(app.store().is_empty());

        press(&mut app, KeyCode::Char('+'));
        match &app.screen {
            Screen::Add(form) => assert!(form.name.is_empty()),
            Screen::Home => panic!("add screen should be open"),
        }
    }

    #[test]
    fn test_delete_selected_booking_after_confirmation() {
        let mut app = app();
        add_booking(&mut app, "Alice", "10.01.2024", "15.01.2024");
        add_booking(&mut app, "Bob", "01.02.2024", "03.02.2024");

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Char('-'));
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));
        press(&mut app, KeyCode::Char('y'));

        let entries = app.store().current_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "Bob");
        assert_eq!(app.home.selected, 0);
        assert_eq!(
            status_text(&app),
            Some(("Deleted booking for Alice.", StatusKind::Info))
        );
    }

    #[test]
    fn test_cancelled_delete_keeps_booking() {
        let mut app = app();
        add_booking(&mut app, "Alice", "10.01.2024", "15.01.2024");

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.store().len(), 1);
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn test_delete_on_empty_list_reports_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('-'));
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status_text(&app),
            Some(("No booking selected to delete.", StatusKind::Error))
        );
    }

    #[test]
    fn test_quit_from_home() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn test_render_empty_and_populated_home() {
        let mut app = app();
        let screen = render(&app);
        assert!(screen.contains("Booking Entries"));
        assert!(screen.contains("No bookings available"));

        add_booking(&mut app, "Alice", "10.01.2024", "15.01.2024");
        let screen = render(&app);
        assert!(screen.contains("Alice"));
        assert!(screen.contains("Jan 10, 2024 - Jan 15, 2024"));
        assert!(!screen.contains("No bookings available"));
    }

    #[test]
    fn test_render_add_screen() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        let screen = render(&app);
        assert!(screen.contains("Add Booking Entry"));
        assert!(screen.contains("Name: <required>"));
    }
}
