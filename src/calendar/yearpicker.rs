use crate::range::Bounds;

pub(crate) const YEARS_PER_ROW: usize = 4;

/// Number of years in a decade page: the decade plus one year on each side
pub(crate) const YEARS_PER_PAGE: usize = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearCell {
    pub(crate) year: i32,
    /// `false` for the two years flanking the decade
    pub(crate) is_in_decade: bool,
    /// The year containing today
    pub(crate) is_current: bool,
    pub(crate) is_navigated: bool,
    pub(crate) is_selected: bool,
    pub(crate) is_in_bounds: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DecadePage {
    /// First year of the decade, always a multiple of ten
    pub(crate) start: i32,
    pub(crate) cells: [YearCell; YEARS_PER_PAGE],
    pub(crate) prev_in_bounds: bool,
    pub(crate) next_in_bounds: bool,
}

impl DecadePage {
    pub(crate) fn build(navigated: i32, selected: i32, today: i32, bounds: Bounds) -> DecadePage {
        let start = decade_start(navigated);
        let mut year = start - 1;
        let cells = std::array::from_fn(|_| {
            let cell = YearCell {
                year,
                is_in_decade: (start..start + 10).contains(&year),
                is_current: year == today,
                is_navigated: year == navigated,
                is_selected: year == selected,
                is_in_bounds: bounds.contains_year(year),
            };
            year += 1;
            cell
        });
        DecadePage {
            start,
            cells,
            prev_in_bounds: prev_decade_in_bounds(navigated, bounds),
            next_in_bounds: next_decade_in_bounds(navigated, bounds),
        }
    }

    /// Last year of the decade
    pub(crate) fn end(&self) -> i32 {
        self.start + 9
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[YearCell]> + '_ {
        self.cells.chunks(YEARS_PER_ROW)
    }
}

pub(crate) fn decade_start(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

pub(crate) fn prev_decade_in_bounds(navigated: i32, bounds: Bounds) -> bool {
    bounds.min().year() < decade_start(navigated)
}

pub(crate) fn next_decade_in_bounds(navigated: i32, bounds: Bounds) -> bool {
    bounds.max().year() >= decade_start(navigated) + 10
}
