use crate::datemath::{
    add_days, add_weeks, month_start, same_month, week_number, week_start, FirstWeekOfYear,
    DAYS_IN_WEEK,
};
use crate::range::{date_range, Bounds, DateRangeType, WorkWeekDays};
use time::{Date, Weekday};

/// A month never spans more than this many rows
pub(crate) const MAX_WEEKS: usize = 6;

/// Rounding applied to the cells at the edges of a highlighted month
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum CornerType {
    #[default]
    None,
    TopLeft,
    TopSingle,
    TopRight,
    BottomLeft,
    BottomSingle,
    BottomRight,
}

impl CornerType {
    pub(crate) fn left_glyph(self) -> Option<char> {
        match self {
            CornerType::TopLeft | CornerType::TopSingle => Some('╭'),
            CornerType::BottomLeft | CornerType::BottomSingle => Some('╰'),
            _ => None,
        }
    }

    pub(crate) fn right_glyph(self) -> Option<char> {
        match self {
            CornerType::TopRight | CornerType::TopSingle => Some('╮'),
            CornerType::BottomRight | CornerType::BottomSingle => Some('╯'),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayInfo {
    pub(crate) date: Date,
    pub(crate) is_in_month: bool,
    pub(crate) is_today: bool,
    pub(crate) is_selected: bool,
    pub(crate) is_in_bounds: bool,
    pub(crate) corner: CornerType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Week([DayInfo; DAYS_IN_WEEK]);

impl Week {
    pub(crate) fn days(&self) -> &[DayInfo; DAYS_IN_WEEK] {
        &self.0
    }

    pub(crate) fn last(&self) -> &DayInfo {
        &self.0[DAYS_IN_WEEK - 1]
    }

    fn has_in_month(&self) -> bool {
        self.0.iter().any(|d| d.is_in_month)
    }

    /// Columns of the first and last in-month days of the week
    fn in_month_span(&self) -> Option<(usize, usize)> {
        let first = self.0.iter().position(|d| d.is_in_month)?;
        let last = self.0.iter().rposition(|d| d.is_in_month)?;
        Some((first, last))
    }

    fn set_corner(&mut self, index: usize, corner: CornerType) {
        if let Some(day) = self.0.get_mut(index) {
            day.corner = corner;
        }
    }
}

/// Everything that determines the contents of a day grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridParams {
    pub(crate) navigated: Date,
    pub(crate) selected: Date,
    pub(crate) today: Date,
    pub(crate) range_type: DateRangeType,
    pub(crate) first_day: Weekday,
    pub(crate) work_days: WorkWeekDays,
    pub(crate) bounds: Bounds,
    pub(crate) six_weeks: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub(crate) fn build(params: &GridParams) -> MonthGrid {
        let factory = DayFactory::new(params);
        let mut start = week_start(month_start(params.navigated), params.first_day);
        let mut weeks = Vec::with_capacity(MAX_WEEKS);
        while weeks.len() < MAX_WEEKS {
            let week = factory.make_week(start);
            if !week.has_in_month() && !params.six_weeks {
                break;
            }
            weeks.push(week);
            start = add_weeks(start, 1);
        }
        if params.range_type == DateRangeType::Month && same_month(params.selected, params.navigated)
        {
            assign_corners(&mut weeks);
        }
        MonthGrid { weeks }
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Week-of-year numbers for each row, taken from the row's last day
    pub(crate) fn week_numbers(&self, first_day: Weekday, rule: FirstWeekOfYear) -> Vec<u8> {
        self.weeks
            .iter()
            .map(|w| week_number(w.last().date, first_day, rule))
            .collect()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct DayFactory<'a> {
    params: &'a GridParams,
    selected: Vec<Date>,
}

impl<'a> DayFactory<'a> {
    fn new(params: &'a GridParams) -> Self {
        let selected = params.bounds.clip(date_range(
            params.selected,
            params.range_type,
            params.first_day,
            params.work_days,
        ));
        DayFactory { params, selected }
    }

    fn make_day(&self, date: Date) -> DayInfo {
        DayInfo {
            date,
            is_in_month: same_month(date, self.params.navigated),
            is_today: date == self.params.today,
            is_selected: self.selected.contains(&date),
            is_in_bounds: self.params.bounds.contains(date),
            corner: CornerType::None,
        }
    }

    fn make_week(&self, start: Date) -> Week {
        let mut date = start;
        Week(std::array::from_fn(|_| {
            let day = self.make_day(date);
            date = add_days(date, 1);
            day
        }))
    }
}

fn assign_corners(weeks: &mut [Week]) {
    let Some(last) = weeks.iter().rposition(Week::has_in_month) else {
        return;
    };
    if let Some((lo, hi)) = weeks.first().and_then(Week::in_month_span) {
        if lo == hi {
            weeks[0].set_corner(lo, CornerType::TopSingle);
        } else {
            weeks[0].set_corner(lo, CornerType::TopLeft);
            weeks[0].set_corner(hi, CornerType::TopRight);
        }
        if lo != 0 {
            // The left edge of the block steps down a row
            if let Some(w) = weeks.get_mut(1) {
                w.set_corner(0, CornerType::TopLeft);
            }
        }
    }
    if let Some((lo, hi)) = weeks[last].in_month_span() {
        if lo == hi {
            weeks[last].set_corner(lo, CornerType::BottomSingle);
        } else {
            weeks[last].set_corner(lo, CornerType::BottomLeft);
            weeks[last].set_corner(hi, CornerType::BottomRight);
        }
        if hi != DAYS_IN_WEEK - 1 && last > 0 {
            weeks[last - 1].set_corner(DAYS_IN_WEEK - 1, CornerType::BottomRight);
        }
    }
}
