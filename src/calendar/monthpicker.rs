use crate::datemath::{month_end, month_start, same_month, set_month, year_end, year_start};
use crate::range::Bounds;
use time::{Date, Month};

pub(crate) const MONTHS_PER_ROW: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthCell {
    pub(crate) month: Month,
    /// The month containing today
    pub(crate) is_current: bool,
    pub(crate) is_navigated: bool,
    pub(crate) is_selected: bool,
    pub(crate) is_in_bounds: bool,
}

/// The twelve months of the navigated year
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthPage {
    pub(crate) year: i32,
    pub(crate) cells: [MonthCell; 12],
    pub(crate) prev_in_bounds: bool,
    pub(crate) next_in_bounds: bool,
}

impl MonthPage {
    pub(crate) fn build(navigated: Date, selected: Date, today: Date, bounds: Bounds) -> MonthPage {
        let mut month = Month::January;
        let cells = std::array::from_fn(|_| {
            let indexed = set_month(navigated, month);
            let cell = MonthCell {
                month,
                is_current: same_month(indexed, today),
                is_navigated: month == navigated.month(),
                is_selected: same_month(indexed, selected),
                is_in_bounds: bounds.overlaps(month_start(indexed), month_end(indexed)),
            };
            month = month.next();
            cell
        });
        MonthPage {
            year: navigated.year(),
            cells,
            prev_in_bounds: prev_year_in_bounds(navigated, bounds),
            next_in_bounds: next_year_in_bounds(navigated, bounds),
        }
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[MonthCell]> + '_ {
        self.cells.chunks(MONTHS_PER_ROW)
    }
}

pub(crate) fn prev_year_in_bounds(navigated: Date, bounds: Bounds) -> bool {
    bounds.min() < year_start(navigated)
}

pub(crate) fn next_year_in_bounds(navigated: Date, bounds: Bounds) -> bool {
    year_end(navigated) < bounds.max()
}
