use crate::calendar::{
    Calendar, CalendarError, CalendarEvent, CalendarView, DateFormatter, Direction, Selection,
};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<F> {
    calendar: Calendar<F>,
    state: AppState,
}

impl<F: DateFormatter> App<F> {
    pub(crate) fn new(calendar: Calendar<F>) -> App<F> {
        App {
            calendar,
            state: AppState::Calendar,
        }
    }

    /// Runs until the user confirms a selection or quits.  Returns the
    /// confirmed selection, if any.
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<Selection>> {
        while !self.finished() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.into_selection())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key was invalid or its action was refused
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.apply(|c| c.move_cursor(Direction::Left)),
                KeyCode::Char('l') | KeyCode::Right => {
                    self.apply(|c| c.move_cursor(Direction::Right))
                }
                KeyCode::Char('k') | KeyCode::Up => self.apply(|c| c.move_cursor(Direction::Up)),
                KeyCode::Char('j') | KeyCode::Down => self.apply(|c| c.move_cursor(Direction::Down)),
                KeyCode::Char('[') | KeyCode::PageUp => self.apply(Calendar::page_backwards),
                KeyCode::Char(']') | KeyCode::PageDown => self.apply(Calendar::page_forwards),
                KeyCode::Char(' ') => self.apply(|c| c.activate().map(|_| ())),
                KeyCode::Enter => self.confirm(),
                KeyCode::Char('v') => self.apply(Calendar::header_select),
                KeyCode::Tab => self.apply(Calendar::switch_focus),
                KeyCode::Char('t') => self.apply(|c| c.go_to_today().map(|_| ())),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Confirmed(_) | AppState::Quitting => false,
        }
    }

    fn apply<G>(&mut self, action: G) -> bool
    where
        G: FnOnce(&mut Calendar<F>) -> Result<(), CalendarError>,
    {
        let r = action(&mut self.calendar);
        self.log_events();
        match r {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Refused key press: {e}");
                false
            }
        }
    }

    /// Select the date under the cursor and finish, or pick a month or year
    fn confirm(&mut self) -> bool {
        let r = self.calendar.activate();
        self.log_events();
        match r {
            Ok(Some(selection)) => {
                log::info!("Confirmed selection of {}", selection.date);
                self.state = AppState::Confirmed(selection);
                true
            }
            Ok(None) => true,
            Err(e) => {
                log::debug!("Refused confirmation: {e}");
                false
            }
        }
    }

    fn log_events(&mut self) {
        for event in self.calendar.take_events() {
            match event {
                CalendarEvent::Navigated(date) => log::debug!("Navigated to {date}"),
                CalendarEvent::Selected(selection) => log::debug!(
                    "Selected {} ({} date(s) in range)",
                    selection.date,
                    selection.range.len()
                ),
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn finished(&self) -> bool {
        matches!(self.state, AppState::Confirmed(_) | AppState::Quitting)
    }

    fn into_selection(self) -> Option<Selection> {
        match self.state {
            AppState::Confirmed(selection) => Some(selection),
            _ => None,
        }
    }
}

impl<F: DateFormatter> Widget for &mut App<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        CalendarView::new().render(area, buf, &mut self.calendar);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Confirmed(Selection),
    Quitting,
}
