use super::grid::{GridParams, MonthGrid};
use super::monthpicker::{self, MonthPage};
use super::yearpicker::{self, DecadePage};
use super::DateFormatter;
use crate::config::CalendarConfig;
use crate::datemath::{add_days, add_months, add_years, clamp_supported, month_end, month_start};
use crate::range::date_range;
use thiserror::Error;
use time::Date;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Picker {
    Day,
    Month,
    Year,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum View {
    /// The day picker with, optionally, the month or year picker beside it
    Inline { side: Option<Picker>, focus: Picker },
    /// A single picker at a time
    Overlay(Picker),
    /// The month or year picker with no day picker; picking a month selects
    /// it
    MonthOnly(Picker),
}

/// The selected date together with every date highlighted alongside it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Selection {
    pub(crate) date: Date,
    pub(crate) range: Vec<Date>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum CalendarEvent {
    Navigated(Date),
    Selected(Selection),
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum CalendarError {
    #[error("date is outside the selectable range")]
    OutOfBounds,
    #[error("action is not available in the current view")]
    Unavailable,
}

// Invariant: `navigated` is always within `config.bounds`
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<F> {
    config: CalendarConfig,
    formatter: F,
    navigated: Date,
    selected: Date,
    view: View,
    events: Vec<CalendarEvent>,
}

impl<F: DateFormatter> Calendar<F> {
    pub(crate) fn new(config: CalendarConfig, formatter: F) -> Self {
        let selected = clamp_supported(config.value.unwrap_or(config.today));
        let navigated = config.bounds.clamp(selected);
        let view = if config.month_picker_overlay {
            View::Overlay(Picker::Day)
        } else if !config.day_picker_visible {
            View::MonthOnly(Picker::Month)
        } else {
            View::Inline {
                side: config.month_picker_visible.then_some(Picker::Month),
                focus: Picker::Day,
            }
        };
        Calendar {
            config,
            formatter,
            navigated,
            selected,
            view,
            events: Vec::new(),
        }
    }

    pub(crate) fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub(crate) fn formatter(&self) -> &F {
        &self.formatter
    }

    pub(crate) fn navigated(&self) -> Date {
        self.navigated
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn focus(&self) -> Picker {
        match self.view {
            View::Inline { focus, .. } => focus,
            View::Overlay(p) | View::MonthOnly(p) => p,
        }
    }

    pub(crate) fn day_picker_visible(&self) -> bool {
        matches!(
            self.view,
            View::Inline { .. } | View::Overlay(Picker::Day)
        )
    }

    /// The month or year picker, if one is shown
    pub(crate) fn side_picker(&self) -> Option<Picker> {
        match self.view {
            View::Inline { side, .. } => side,
            View::Overlay(Picker::Day) => None,
            View::Overlay(p) | View::MonthOnly(p) => Some(p),
        }
    }

    pub(crate) fn day_grid(&self) -> MonthGrid {
        MonthGrid::build(&GridParams {
            navigated: self.navigated,
            selected: self.selected,
            today: self.config.today,
            range_type: self.config.range_type,
            first_day: self.config.first_day,
            work_days: self.config.work_days,
            bounds: self.config.bounds,
            six_weeks: self.config.show_six_weeks,
        })
    }

    pub(crate) fn month_page(&self) -> MonthPage {
        MonthPage::build(
            self.navigated,
            self.selected,
            self.config.today,
            self.config.bounds,
        )
    }

    pub(crate) fn decade_page(&self) -> DecadePage {
        DecadePage::build(
            self.navigated.year(),
            self.selected.year(),
            self.config.today.year(),
            self.config.bounds,
        )
    }

    pub(crate) fn selection(&self) -> Selection {
        let range = date_range(
            self.selected,
            self.config.range_type,
            self.config.first_day,
            self.config.work_days,
        );
        Selection {
            date: self.selected,
            range: self.config.bounds.clip(range),
        }
    }

    pub(crate) fn take_events(&mut self) -> Vec<CalendarEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn can_go_to_today(&self) -> bool {
        self.config.show_go_to_today && self.config.bounds.contains(self.config.today)
    }

    pub(crate) fn prev_month_in_bounds(&self) -> bool {
        self.config.bounds.min() < month_start(self.navigated)
    }

    pub(crate) fn next_month_in_bounds(&self) -> bool {
        month_end(self.navigated) < self.config.bounds.max()
    }

    fn navigate_to(&mut self, date: Date) {
        if date != self.navigated {
            self.navigated = date;
            self.events.push(CalendarEvent::Navigated(date));
        }
    }

    pub(crate) fn move_days(&mut self, days: i64) -> Result<(), CalendarError> {
        let target = add_days(self.navigated, days);
        if !self.config.bounds.contains(target) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(target);
        Ok(())
    }

    pub(crate) fn move_months(&mut self, months: i32) -> Result<(), CalendarError> {
        let target = add_months(self.navigated, months);
        if !self
            .config
            .bounds
            .overlaps(month_start(target), month_end(target))
        {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(target));
        Ok(())
    }

    pub(crate) fn move_years(&mut self, years: i32) -> Result<(), CalendarError> {
        let target = add_years(self.navigated, years);
        if !self.config.bounds.contains_year(target.year()) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(target));
        Ok(())
    }

    pub(crate) fn prev_month(&mut self) -> Result<(), CalendarError> {
        if !self.prev_month_in_bounds() {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(add_months(self.navigated, -1)));
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), CalendarError> {
        if !self.next_month_in_bounds() {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(add_months(self.navigated, 1)));
        Ok(())
    }

    pub(crate) fn prev_year(&mut self) -> Result<(), CalendarError> {
        if !monthpicker::prev_year_in_bounds(self.navigated, self.config.bounds) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(add_years(self.navigated, -1)));
        Ok(())
    }

    pub(crate) fn next_year(&mut self) -> Result<(), CalendarError> {
        if !monthpicker::next_year_in_bounds(self.navigated, self.config.bounds) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(add_years(self.navigated, 1)));
        Ok(())
    }

    pub(crate) fn prev_decade(&mut self) -> Result<(), CalendarError> {
        if !yearpicker::prev_decade_in_bounds(self.navigated.year(), self.config.bounds) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(add_years(self.navigated, -10)));
        Ok(())
    }

    pub(crate) fn next_decade(&mut self) -> Result<(), CalendarError> {
        if !yearpicker::next_decade_in_bounds(self.navigated.year(), self.config.bounds) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.bounds.clamp(add_years(self.navigated, 10)));
        Ok(())
    }

    /// Move the cursor of the focused picker by one cell
    pub(crate) fn move_cursor(&mut self, direction: Direction) -> Result<(), CalendarError> {
        let (step, row) = match direction {
            Direction::Left => (-1, false),
            Direction::Right => (1, false),
            Direction::Up => (-1, true),
            Direction::Down => (1, true),
        };
        match self.focus() {
            Picker::Day => self.move_days(i64::from(if row { step * 7 } else { step })),
            Picker::Month => self.move_months(if row { step * 4 } else { step }),
            Picker::Year => self.move_years(if row { step * 4 } else { step }),
        }
    }

    pub(crate) fn page_backwards(&mut self) -> Result<(), CalendarError> {
        match self.focus() {
            Picker::Day => self.prev_month(),
            Picker::Month => self.prev_year(),
            Picker::Year => self.prev_decade(),
        }
    }

    pub(crate) fn page_forwards(&mut self) -> Result<(), CalendarError> {
        match self.focus() {
            Picker::Day => self.next_month(),
            Picker::Month => self.next_year(),
            Picker::Year => self.next_decade(),
        }
    }

    /// Select the date under the cursor
    pub(crate) fn select(&mut self) -> Result<Selection, CalendarError> {
        if self.focus() != Picker::Day {
            return Err(CalendarError::Unavailable);
        }
        self.select_navigated()
    }

    fn select_navigated(&mut self) -> Result<Selection, CalendarError> {
        if !self.config.bounds.contains(self.navigated) {
            return Err(CalendarError::OutOfBounds);
        }
        self.selected = self.navigated;
        let selection = self.selection();
        self.events.push(CalendarEvent::Selected(selection.clone()));
        Ok(selection)
    }

    /// Choose the month under the cursor and return to the day picker.
    /// Without a day picker, the month is selected instead.
    pub(crate) fn pick_month(&mut self) -> Result<Option<Selection>, CalendarError> {
        self.view = match self.view {
            View::MonthOnly(Picker::Month) => return self.select_navigated().map(Some),
            View::Overlay(Picker::Month) => View::Overlay(Picker::Day),
            View::Inline {
                side: Some(Picker::Month),
                focus: Picker::Month,
            } => View::Inline {
                side: Some(Picker::Month),
                focus: Picker::Day,
            },
            _ => return Err(CalendarError::Unavailable),
        };
        Ok(None)
    }

    /// Choose the year under the cursor and return to the month picker
    pub(crate) fn pick_year(&mut self) -> Result<(), CalendarError> {
        self.view = match self.view {
            View::Overlay(Picker::Year) => View::Overlay(Picker::Month),
            View::MonthOnly(Picker::Year) => View::MonthOnly(Picker::Month),
            View::Inline {
                side: Some(Picker::Year),
                focus: Picker::Year,
            } => View::Inline {
                side: Some(Picker::Month),
                focus: Picker::Month,
            },
            _ => return Err(CalendarError::Unavailable),
        };
        Ok(())
    }

    /// Select in the day picker, or pick in the month and year pickers.
    /// Returns the new selection if there is one.
    pub(crate) fn activate(&mut self) -> Result<Option<Selection>, CalendarError> {
        match self.focus() {
            Picker::Day => self.select().map(Some),
            Picker::Month => self.pick_month(),
            Picker::Year => self.pick_year().map(|()| None),
        }
    }

    /// The header toggle of the focused picker
    pub(crate) fn header_select(&mut self) -> Result<(), CalendarError> {
        self.view = match self.view {
            View::Overlay(Picker::Day | Picker::Year) => View::Overlay(Picker::Month),
            View::Overlay(Picker::Month) => View::Overlay(Picker::Year),
            View::MonthOnly(Picker::Month) => View::MonthOnly(Picker::Year),
            View::MonthOnly(_) => View::MonthOnly(Picker::Month),
            View::Inline {
                side: Some(_),
                focus: Picker::Month,
            } => View::Inline {
                side: Some(Picker::Year),
                focus: Picker::Year,
            },
            View::Inline {
                side: Some(_),
                focus: Picker::Year,
            } => View::Inline {
                side: Some(Picker::Month),
                focus: Picker::Month,
            },
            View::Inline { .. } => return Err(CalendarError::Unavailable),
        };
        Ok(())
    }

    /// Move keyboard focus between the day picker and the picker beside it
    pub(crate) fn switch_focus(&mut self) -> Result<(), CalendarError> {
        let View::Inline {
            side: Some(side),
            focus,
        } = self.view
        else {
            return Err(CalendarError::Unavailable);
        };
        let focus = if focus == Picker::Day {
            side
        } else {
            Picker::Day
        };
        self.view = View::Inline {
            side: Some(side),
            focus,
        };
        Ok(())
    }

    pub(crate) fn go_to_today(&mut self) -> Result<Selection, CalendarError> {
        if !self.config.show_go_to_today {
            return Err(CalendarError::Unavailable);
        }
        if !self.config.bounds.contains(self.config.today) {
            return Err(CalendarError::OutOfBounds);
        }
        self.navigate_to(self.config.today);
        self.view = match self.view {
            View::Overlay(_) => View::Overlay(Picker::Day),
            View::Inline { side, .. } => View::Inline {
                side,
                focus: Picker::Day,
            },
            View::MonthOnly(_) => View::MonthOnly(Picker::Month),
        };
        self.select_navigated()
    }
}
