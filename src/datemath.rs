use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::{
    macros::date,
    util::is_leap_year,
    Date, Duration,
    Month::{self, *},
    Weekday::{self, *},
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Earliest date the picker will navigate to.  Sits one year after
/// `Date::MIN` so that every month grid can be back-filled.
pub(crate) const EARLIEST: Date = date!(-9998 - 01 - 01);

/// Latest date the picker will navigate to
pub(crate) const LATEST: Date = date!(9998 - 12 - 31);

pub(crate) trait WeekdayExt {
    /// Column of this weekday in a week that starts on `first_day`
    fn days_from(self, first_day: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn days_from(self, first_day: Weekday) -> u8 {
        (self.number_days_from_sunday() + 7 - first_day.number_days_from_sunday()) % 7
    }
}

pub(crate) fn clamp_supported(date: Date) -> Date {
    date.clamp(EARLIEST, LATEST)
}

pub(crate) fn add_days(date: Date, days: i64) -> Date {
    date.saturating_add(Duration::days(days))
}

pub(crate) fn add_weeks(date: Date, weeks: i64) -> Date {
    date.saturating_add(Duration::weeks(weeks))
}

/// Move `date` by whole months, keeping the day of month unless the target
/// month is too short, in which case the last day of that month is used.
pub(crate) fn add_months(date: Date, months: i32) -> Date {
    let index = date
        .year()
        .saturating_mul(12)
        .saturating_add(i32::from(u8::from(date.month())) - 1)
        .saturating_add(months);
    ymd_clamped(index.div_euclid(12), month_from_index0(index.rem_euclid(12)), date.day())
}

pub(crate) fn add_years(date: Date, years: i32) -> Date {
    ymd_clamped(date.year().saturating_add(years), date.month(), date.day())
}

pub(crate) fn set_month(date: Date, month: Month) -> Date {
    ymd_clamped(date.year(), month, date.day())
}

pub(crate) fn month_start(date: Date) -> Date {
    ymd_clamped(date.year(), date.month(), 1)
}

pub(crate) fn month_end(date: Date) -> Date {
    ymd_clamped(date.year(), date.month(), 31)
}

pub(crate) fn year_start(date: Date) -> Date {
    ymd_clamped(date.year(), January, 1)
}

pub(crate) fn year_end(date: Date) -> Date {
    ymd_clamped(date.year(), December, 31)
}

pub(crate) fn same_month(a: Date, b: Date) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        January | March | May | July | August | October | December => 31,
        April | June | September | November => 30,
        February if is_leap_year(year) => 29,
        February => 28,
    }
}

/// Build a date, pulling an overlong day back to the end of the month and
/// saturating at the ends of representable time
fn ymd_clamped(year: i32, month: Month, day: u8) -> Date {
    let day = day.clamp(1, days_in_month(year, month));
    Date::from_calendar_date(year, month, day).unwrap_or(if year < 0 {
        Date::MIN
    } else {
        Date::MAX
    })
}

fn month_from_index0(index: i32) -> Month {
    u8::try_from(index).map_or(January, |i| January.nth_next(i))
}

pub(crate) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

/// Returns the first day of the week (starting on `first_day`) that contains
/// `date`
pub(crate) fn week_start(date: Date, first_day: Weekday) -> Date {
    add_days(date, -i64::from(date.weekday().days_from(first_day)))
}

/// Rule for deciding which week is the first week of a year
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum FirstWeekOfYear {
    /// Week 1 is the week containing January 1
    #[default]
    FirstDay,
    /// Week 1 is the first week lying entirely within the year
    FirstFullWeek,
    /// Week 1 is the first week with at least four days in the year
    FirstFourDayWeek,
}

impl FirstWeekOfYear {
    fn min_days(self) -> u8 {
        match self {
            FirstWeekOfYear::FirstDay => 1,
            FirstWeekOfYear::FirstFullWeek => 7,
            FirstWeekOfYear::FirstFourDayWeek => 4,
        }
    }
}

impl FromStr for FirstWeekOfYear {
    type Err = ParseFirstWeekError;

    fn from_str(s: &str) -> Result<FirstWeekOfYear, ParseFirstWeekError> {
        match s.to_ascii_lowercase().as_str() {
            "first-day" => Ok(FirstWeekOfYear::FirstDay),
            "first-full-week" => Ok(FirstWeekOfYear::FirstFullWeek),
            "first-four-day-week" => Ok(FirstWeekOfYear::FirstFourDayWeek),
            _ => Err(ParseFirstWeekError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid first-week rule {0:?}; expected first-day, first-full-week, or first-four-day-week")]
pub(crate) struct ParseFirstWeekError(String);

fn first_week_start(year: i32, first_day: Weekday, rule: FirstWeekOfYear) -> Date {
    let jan1 = ymd_clamped(year, January, 1);
    let start = week_start(jan1, first_day);
    if 7 - jan1.weekday().days_from(first_day) >= rule.min_days() {
        start
    } else {
        add_weeks(start, 1)
    }
}

/// Week of the year containing `date`.  Days before week 1 belong to the
/// last week of the previous year; days at the end of a year never roll
/// over into week 1 of the next.
pub(crate) fn week_number(date: Date, first_day: Weekday, rule: FirstWeekOfYear) -> u8 {
    let mut start = first_week_start(date.year(), first_day, rule);
    if date < start {
        start = first_week_start(date.year().saturating_sub(1), first_day, rule);
    }
    u8::try_from((date - start).whole_days() / 7 + 1).unwrap_or(u8::MAX)
}

pub(crate) fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let lower = s.to_ascii_lowercase();
    let wd = match lower.as_str() {
        "su" | "sun" | "sunday" => Sunday,
        "mo" | "mon" | "monday" => Monday,
        "tu" | "tue" | "tuesday" => Tuesday,
        "we" | "wed" | "wednesday" => Wednesday,
        "th" | "thu" | "thursday" => Thursday,
        "fr" | "fri" | "friday" => Friday,
        "sa" | "sat" | "saturday" => Saturday,
        _ => return Err(ParseWeekdayError(s.to_owned())),
    };
    Ok(wd)
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday {0:?}")]
pub(crate) struct ParseWeekdayError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_from() {
        assert_eq!(Sunday.days_from(Sunday), 0);
        assert_eq!(Saturday.days_from(Sunday), 6);
        assert_eq!(Monday.days_from(Tuesday), 6);
        assert_eq!(Wednesday.days_from(Monday), 2);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date!(2025 - 01 - 31), 1), date!(2025 - 02 - 28));
        assert_eq!(add_months(date!(2024 - 01 - 31), 1), date!(2024 - 02 - 29));
        assert_eq!(add_months(date!(2025 - 03 - 31), -1), date!(2025 - 02 - 28));
        assert_eq!(add_months(date!(2025 - 05 - 31), 1), date!(2025 - 06 - 30));
    }

    #[test]
    fn test_add_months_across_years() {
        assert_eq!(add_months(date!(2024 - 12 - 15), 1), date!(2025 - 01 - 15));
        assert_eq!(add_months(date!(2025 - 01 - 15), -1), date!(2024 - 12 - 15));
        assert_eq!(add_months(date!(2025 - 01 - 15), -25), date!(2022 - 12 - 15));
        assert_eq!(add_months(date!(2025 - 01 - 15), 24), date!(2027 - 01 - 15));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(add_years(date!(2024 - 02 - 29), 1), date!(2025 - 02 - 28));
        assert_eq!(add_years(date!(2024 - 02 - 29), 4), date!(2028 - 02 - 29));
        assert_eq!(add_years(date!(2025 - 07 - 04), -10), date!(2015 - 07 - 04));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(Date::MAX, 1), Date::MAX);
        assert_eq!(add_weeks(Date::MIN, -1), Date::MIN);
    }

    #[test]
    fn test_month_and_year_edges() {
        let d = date!(2024 - 02 - 10);
        assert_eq!(month_start(d), date!(2024 - 02 - 01));
        assert_eq!(month_end(d), date!(2024 - 02 - 29));
        assert_eq!(year_start(d), date!(2024 - 01 - 01));
        assert_eq!(year_end(d), date!(2024 - 12 - 31));
        assert_eq!(set_month(date!(2025 - 03 - 31), April), date!(2025 - 04 - 30));
    }

    #[test]
    fn test_week_start() {
        assert_eq!(week_start(date!(2023 - 11 - 16), Sunday), date!(2023 - 11 - 12));
        assert_eq!(week_start(date!(2023 - 11 - 16), Monday), date!(2023 - 11 - 13));
        assert_eq!(week_start(date!(2023 - 11 - 12), Monday), date!(2023 - 11 - 06));
        assert_eq!(week_start(date!(2023 - 11 - 13), Monday), date!(2023 - 11 - 13));
    }

    #[test]
    fn test_week_number_first_day() {
        // 2025-01-01 is a Wednesday
        let rule = FirstWeekOfYear::FirstDay;
        assert_eq!(week_number(date!(2025 - 01 - 01), Sunday, rule), 1);
        assert_eq!(week_number(date!(2025 - 01 - 04), Sunday, rule), 1);
        assert_eq!(week_number(date!(2025 - 01 - 05), Sunday, rule), 2);
        assert_eq!(week_number(date!(2025 - 01 - 22), Sunday, rule), 4);
        assert_eq!(week_number(date!(2025 - 12 - 31), Sunday, rule), 53);
    }

    #[test]
    fn test_week_number_first_full_week() {
        let rule = FirstWeekOfYear::FirstFullWeek;
        // The first full Sunday-based week of 2025 starts on January 5
        assert_eq!(week_number(date!(2025 - 01 - 05), Sunday, rule), 1);
        assert_eq!(week_number(date!(2025 - 01 - 04), Sunday, rule), 52);
        assert_eq!(week_number(date!(2024 - 12 - 31), Sunday, rule), 52);
    }

    #[test]
    fn test_week_number_four_day_week_matches_iso() {
        let rule = FirstWeekOfYear::FirstFourDayWeek;
        assert_eq!(week_number(date!(2021 - 01 - 01), Monday, rule), 53);
        assert_eq!(week_number(date!(2020 - 12 - 31), Monday, rule), 53);
        assert_eq!(week_number(date!(2025 - 01 - 22), Monday, rule), 4);
        // ISO would call this 2025-W01, but year-end weeks never roll over
        assert_eq!(week_number(date!(2024 - 12 - 30), Monday, rule), 53);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Mon"), Ok(Monday));
        assert_eq!(parse_weekday("sunday"), Ok(Sunday));
        assert_eq!(parse_weekday("SA"), Ok(Saturday));
        assert!(parse_weekday("funday").is_err());
    }

    #[test]
    fn test_parse_first_week() {
        assert_eq!(
            "first-four-day-week".parse::<FirstWeekOfYear>(),
            Ok(FirstWeekOfYear::FirstFourDayWeek)
        );
        assert!("second-day".parse::<FirstWeekOfYear>().is_err());
    }

    #[test]
    fn test_iter_days_from() {
        let days = iter_days_from(date!(2024 - 02 - 28)).take(3).collect::<Vec<_>>();
        assert_eq!(
            days,
            [date!(2024 - 02 - 28), date!(2024 - 02 - 29), date!(2024 - 03 - 01)]
        );
    }
}
