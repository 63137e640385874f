use crate::datemath::{
    iter_days_from, month_end, month_start, parse_weekday, week_start, ParseWeekdayError,
    DAYS_IN_WEEK, EARLIEST, LATEST,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Weekday};

/// How many contiguous days are highlighted together when one is selected
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum DateRangeType {
    #[default]
    Day,
    Week,
    Month,
    WorkWeek,
}

impl fmt::Display for DateRangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DateRangeType::Day => "day",
            DateRangeType::Week => "week",
            DateRangeType::Month => "month",
            DateRangeType::WorkWeek => "work-week",
        };
        f.pad(s)
    }
}

impl FromStr for DateRangeType {
    type Err = ParseRangeTypeError;

    fn from_str(s: &str) -> Result<DateRangeType, ParseRangeTypeError> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(DateRangeType::Day),
            "week" => Ok(DateRangeType::Week),
            "month" => Ok(DateRangeType::Month),
            "work-week" | "workweek" => Ok(DateRangeType::WorkWeek),
            _ => Err(ParseRangeTypeError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid range type {0:?}; expected day, week, month, or work-week")]
pub(crate) struct ParseRangeTypeError(String);

/// Set of weekdays making up the work week
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct WorkWeekDays(u8);

impl WorkWeekDays {
    pub(crate) fn new<I: IntoIterator<Item = Weekday>>(days: I) -> WorkWeekDays {
        WorkWeekDays(
            days.into_iter()
                .fold(0, |bits, wd| bits | (1 << wd.number_days_from_sunday())),
        )
    }

    pub(crate) fn contains(self, wd: Weekday) -> bool {
        self.0 & (1 << wd.number_days_from_sunday()) != 0
    }

    pub(crate) fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for WorkWeekDays {
    fn default() -> WorkWeekDays {
        use Weekday::*;
        WorkWeekDays::new([Monday, Tuesday, Wednesday, Thursday, Friday])
    }
}

impl FromStr for WorkWeekDays {
    type Err = ParseWorkWeekError;

    fn from_str(s: &str) -> Result<WorkWeekDays, ParseWorkWeekError> {
        let days = s
            .split(',')
            .map(|d| parse_weekday(d.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        let wwd = WorkWeekDays::new(days);
        if wwd.is_empty() {
            Err(ParseWorkWeekError::Empty)
        } else {
            Ok(wwd)
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseWorkWeekError {
    #[error(transparent)]
    Weekday(#[from] ParseWeekdayError),
    #[error("work week must contain at least one day")]
    Empty,
}

/// Inclusive window of selectable dates.  Missing limits are filled in with
/// the ends of the supported date range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Bounds {
    min: Date,
    max: Date,
}

impl Bounds {
    pub(crate) fn new(min: Option<Date>, max: Option<Date>) -> Result<Bounds, BoundsError> {
        for d in min.into_iter().chain(max) {
            if !(EARLIEST..=LATEST).contains(&d) {
                return Err(BoundsError::Unsupported(d));
            }
        }
        let bounds = Bounds {
            min: min.unwrap_or(EARLIEST),
            max: max.unwrap_or(LATEST),
        };
        if bounds.min > bounds.max {
            return Err(BoundsError::Inverted {
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(bounds)
    }

    pub(crate) fn min(&self) -> Date {
        self.min
    }

    pub(crate) fn max(&self) -> Date {
        self.max
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.min <= date && date <= self.max
    }

    pub(crate) fn contains_year(&self, year: i32) -> bool {
        self.min.year() <= year && year <= self.max.year()
    }

    /// Does any date in `start..=end` fall within the bounds?
    pub(crate) fn overlaps(&self, start: Date, end: Date) -> bool {
        self.min <= end && start <= self.max
    }

    pub(crate) fn clamp(&self, date: Date) -> Date {
        date.clamp(self.min, self.max)
    }

    pub(crate) fn clip(&self, mut dates: Vec<Date>) -> Vec<Date> {
        dates.retain(|&d| self.contains(d));
        dates
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: EARLIEST,
            max: LATEST,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoundsError {
    #[error("minimum date {min} is after maximum date {max}")]
    Inverted { min: Date, max: Date },
    #[error("date limit {0} is outside the supported years -9998 to 9998")]
    Unsupported(Date),
}

/// Returns the dates highlighted together with `date` under `range_type`,
/// before any bounds are applied
pub(crate) fn date_range(
    date: Date,
    range_type: DateRangeType,
    first_day: Weekday,
    work_days: WorkWeekDays,
) -> Vec<Date> {
    match range_type {
        DateRangeType::Day => vec![date],
        DateRangeType::Week => iter_days_from(week_start(date, first_day))
            .take(DAYS_IN_WEEK)
            .collect(),
        DateRangeType::WorkWeek => iter_days_from(week_start(date, first_day))
            .take(DAYS_IN_WEEK)
            .filter(|d| work_days.contains(d.weekday()))
            .collect(),
        DateRangeType::Month => {
            let end = month_end(date);
            iter_days_from(month_start(date))
                .take_while(|&d| d <= end)
                .collect()
        }
    }
}
