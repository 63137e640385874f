mod canvas;
mod grid;
mod monthpicker;
mod state;
mod widget;
mod yearpicker;
pub(crate) use self::state::{Calendar, CalendarError, CalendarEvent, Direction, Picker, Selection};
pub(crate) use self::widget::CalendarView;
use time::{Date, Month, Weekday};

/// Names shown by the pickers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarStrings {
    pub(crate) months: [&'static str; 12],
    pub(crate) short_months: [&'static str; 12],
    pub(crate) short_days: [&'static str; 7],
    pub(crate) go_to_today: &'static str,
}

impl CalendarStrings {
    pub(crate) const ENGLISH: CalendarStrings = CalendarStrings {
        months: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
        short_months: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        short_days: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        go_to_today: "Go to today",
    };

    pub(crate) fn month(&self, month: Month) -> &'static str {
        self.months[month_index0(month)]
    }

    pub(crate) fn short_month(&self, month: Month) -> &'static str {
        self.short_months[month_index0(month)]
    }

    pub(crate) fn short_day(&self, wd: Weekday) -> &'static str {
        self.short_days[usize::from(wd.number_days_from_sunday())]
    }
}

impl Default for CalendarStrings {
    fn default() -> CalendarStrings {
        CalendarStrings::ENGLISH
    }
}

fn month_index0(month: Month) -> usize {
    usize::from(u8::from(month) - 1)
}

pub(crate) trait DateFormatter {
    fn format_day(&self, date: Date) -> String;
    fn format_month_year(&self, date: Date, strings: &CalendarStrings) -> String;
    fn format_month_day_year(&self, date: Date, strings: &CalendarStrings) -> String;
    fn format_year(&self, year: i32) -> String;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DefaultFormatter;

impl DateFormatter for DefaultFormatter {
    fn format_day(&self, date: Date) -> String {
        date.day().to_string()
    }

    fn format_month_year(&self, date: Date, strings: &CalendarStrings) -> String {
        format!("{} {}", strings.month(date.month()), date.year())
    }

    fn format_month_day_year(&self, date: Date, strings: &CalendarStrings) -> String {
        format!(
            "{} {}, {}",
            strings.month(date.month()),
            date.day(),
            date.year()
        )
    }

    fn format_year(&self, year: i32) -> String {
        year.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_default_formatter() {
        let strings = CalendarStrings::default();
        let d = date!(2025 - 01 - 22);
        assert_eq!(DefaultFormatter.format_day(d), "22");
        assert_eq!(DefaultFormatter.format_month_year(d, &strings), "January 2025");
        assert_eq!(
            DefaultFormatter.format_month_day_year(d, &strings),
            "January 22, 2025"
        );
        assert_eq!(DefaultFormatter.format_year(-44), "-44");
    }

    #[test]
    fn test_strings_lookup() {
        let strings = CalendarStrings::ENGLISH;
        assert_eq!(strings.short_month(Month::December), "Dec");
        assert_eq!(strings.short_day(Weekday::Wednesday), "We");
    }
}
