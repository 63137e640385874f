use crate::calendar::CalendarStrings;
use crate::datemath::FirstWeekOfYear;
use crate::range::{Bounds, DateRangeType, WorkWeekDays};
use time::{Date, Weekday};

/// Everything the calendar needs to know that the user doesn't change while
/// it's open
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarConfig {
    pub(crate) today: Date,
    /// Initially selected date; today if not set
    pub(crate) value: Option<Date>,
    pub(crate) range_type: DateRangeType,
    pub(crate) first_day: Weekday,
    pub(crate) first_week: FirstWeekOfYear,
    pub(crate) work_days: WorkWeekDays,
    pub(crate) bounds: Bounds,
    pub(crate) show_week_numbers: bool,
    pub(crate) show_six_weeks: bool,
    /// Show the month picker in place of the day picker instead of beside it
    pub(crate) month_picker_overlay: bool,
    pub(crate) month_picker_visible: bool,
    /// When unset, only the month picker is shown and picking a month
    /// selects it.  Ignored in overlay mode.
    pub(crate) day_picker_visible: bool,
    pub(crate) show_go_to_today: bool,
    pub(crate) highlight_current_month: bool,
    pub(crate) highlight_selected_month: bool,
    pub(crate) strings: CalendarStrings,
}

impl CalendarConfig {
    pub(crate) fn new(today: Date) -> CalendarConfig {
        CalendarConfig {
            today,
            value: None,
            range_type: DateRangeType::default(),
            first_day: Weekday::Sunday,
            first_week: FirstWeekOfYear::default(),
            work_days: WorkWeekDays::default(),
            bounds: Bounds::default(),
            show_week_numbers: false,
            show_six_weeks: false,
            month_picker_overlay: false,
            month_picker_visible: true,
            day_picker_visible: true,
            show_go_to_today: true,
            highlight_current_month: false,
            highlight_selected_month: false,
            strings: CalendarStrings::default(),
        }
    }
}
