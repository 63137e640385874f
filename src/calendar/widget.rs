use super::canvas::BufferCanvas;
use super::grid::DayInfo;
use super::monthpicker::MonthCell;
use super::yearpicker::YearCell;
use super::{Calendar, DateFormatter, Picker};
use crate::config::CalendarConfig;
use crate::range::DateRangeType;
use crate::theme;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    widgets::StatefulWidget,
};
use std::marker::PhantomData;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

const WEEK_WIDTH: u16 = DAY_WIDTH * 7;

const WEEK_NUMBER_WIDTH: u16 = 4;

const MONTH_WIDTH: u16 = 5;

const YEAR_WIDTH: u16 = 6;

// Both pickers lay out four cells per row
const MONTH_PANEL_WIDTH: u16 = MONTH_WIDTH * 4;

const YEAR_PANEL_WIDTH: u16 = YEAR_WIDTH * 4;

/// Columns between the day picker and the picker beside it
const PANEL_GAP: u16 = 3;

/// Number of lines above the first row of cells in every panel
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each row of the month and year pickers
const PICKER_ROW_LINES: u16 = 2;

const DAY_PANEL_HEIGHT: u16 = HEADER_LINES + 6;

const PICKER_PANEL_HEIGHT: u16 = HEADER_LINES + 3 * PICKER_ROW_LINES - 1;

/// A blank line followed by the go-to-today, selection and help lines
const FOOTER_LINES: u16 = 4;

const PREV_ARROW: char = '◀';
const NEXT_ARROW: char = '▶';
const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarView<F> {
    _data: PhantomData<F>,
}

impl<F> CalendarView<F> {
    pub(crate) fn new() -> CalendarView<F> {
        CalendarView { _data: PhantomData }
    }
}

impl<F: DateFormatter> StatefulWidget for CalendarView<F> {
    type State = Calendar<F>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, theme::BASE_STYLE);
        let day_width = if state.day_picker_visible() {
            day_panel_width(state.config())
        } else {
            0
        };
        let side_width = match state.side_picker() {
            Some(Picker::Month) => MONTH_PANEL_WIDTH,
            Some(Picker::Year) => YEAR_PANEL_WIDTH,
            Some(Picker::Day) | None => 0,
        };
        let gap = if day_width > 0 && side_width > 0 {
            PANEL_GAP
        } else {
            0
        };
        let footer = footer_lines(state);
        let footer_width = footer
            .iter()
            .map(|s| u16::try_from(s.chars().count()).unwrap_or(u16::MAX))
            .max()
            .unwrap_or_default();
        let width = (day_width + gap + side_width).max(footer_width);
        let body_height = if state.day_picker_visible() {
            DAY_PANEL_HEIGHT
        } else {
            PICKER_PANEL_HEIGHT
        };
        let [area] = Layout::horizontal([width.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([(body_height + FOOTER_LINES).min(area.height)])
            .flex(Flex::Center)
            .areas(area);

        let mut x = area.x;
        if day_width > 0 {
            let panel = Rect { width: day_width, height: body_height, ..area }.intersection(area);
            draw_day_panel(&mut BufferCanvas::new(panel, buf), state);
            x = x.saturating_add(day_width + gap);
        }
        let side_area = Rect {
            x,
            width: side_width,
            height: body_height,
            ..area
        }
        .intersection(area);
        match state.side_picker() {
            Some(Picker::Month) => draw_month_panel(&mut BufferCanvas::new(side_area, buf), state),
            Some(Picker::Year) => draw_year_panel(&mut BufferCanvas::new(side_area, buf), state),
            Some(Picker::Day) | None => (),
        }

        let footer_area = Rect {
            y: area.y.saturating_add(body_height),
            height: FOOTER_LINES,
            ..area
        }
        .intersection(area);
        let mut canvas = BufferCanvas::new(footer_area, buf);
        for (y, line) in (1u16..).zip(&footer) {
            canvas.mvprint(y, 0, line, theme::FOOTER_STYLE);
        }
    }
}

fn day_panel_width(config: &CalendarConfig) -> u16 {
    let left = if config.show_week_numbers {
        WEEK_NUMBER_WIDTH
    } else {
        0
    };
    left + WEEK_WIDTH
}

fn footer_lines<F: DateFormatter>(state: &Calendar<F>) -> [String; 3] {
    let strings = &state.config().strings;
    let fmt = |d| state.formatter().format_month_day_year(d, strings);
    let today = if state.can_go_to_today() {
        format!("t: {}", strings.go_to_today)
    } else {
        String::new()
    };
    let selection = state.selection();
    let selected = match (selection.range.first(), selection.range.last()) {
        (Some(&first), Some(&last)) if first != last => {
            format!("Selected: {} - {}", fmt(first), fmt(last))
        }
        _ => format!("Selected: {}", fmt(selection.date)),
    };
    [today, selected, String::from("Press ? for help")]
}

fn nav_style(enabled: bool) -> Style {
    if enabled {
        theme::NAV_STYLE
    } else {
        theme::DISABLED_NAV_STYLE
    }
}

fn draw_title(
    canvas: &mut BufferCanvas<'_>,
    width: u16,
    title: &str,
    (prev, next): (bool, bool),
    focused: bool,
) {
    canvas.mvaddch(0, 0, PREV_ARROW, nav_style(prev));
    let style = if focused {
        theme::FOCUSED_TITLE_STYLE
    } else {
        theme::TITLE_STYLE
    };
    canvas.mvprint_centered(0, 0, width, title, style);
    canvas.mvaddch(0, width.saturating_sub(1), NEXT_ARROW, nav_style(next));
}

fn draw_day_panel<F: DateFormatter>(canvas: &mut BufferCanvas<'_>, state: &Calendar<F>) {
    let config = state.config();
    let focused = state.focus() == Picker::Day;
    let grid = state.day_grid();
    let width = day_panel_width(config);
    let left = width - WEEK_WIDTH;
    let title = state
        .formatter()
        .format_month_year(state.navigated(), &config.strings);
    draw_title(
        canvas,
        width,
        &title,
        (state.prev_month_in_bounds(), state.next_month_in_bounds()),
        focused,
    );
    let mut wd = config.first_day;
    for x in (left..width).step_by(DAY_WIDTH.into()) {
        canvas.mvprint(1, x + 1, config.strings.short_day(wd), theme::WEEKDAY_STYLE);
        wd = wd.next();
    }
    canvas.hline(2, 0, ACS_HLINE, width, theme::RULE_STYLE);

    let week_numbers = grid.week_numbers(config.first_day, config.first_week);
    let whole_weeks = matches!(
        config.range_type,
        DateRangeType::Week | DateRangeType::WorkWeek
    );
    for ((y, week), number) in (HEADER_LINES..).zip(grid.weeks()).zip(week_numbers) {
        if config.show_week_numbers {
            let style = if whole_weeks && week.days().iter().any(|d| d.is_selected) {
                theme::SELECTED_STYLE
            } else {
                theme::WEEK_NUMBER_STYLE
            };
            canvas.mvprint(y, 0, format!("{number:>3} "), style);
        }
        for (x, day) in (left..).step_by(DAY_WIDTH.into()).zip(week.days()) {
            let is_cursor = focused && day.date == state.navigated();
            draw_day(canvas, y, x, day, is_cursor, state.formatter());
        }
    }
}

fn draw_day<F: DateFormatter>(
    canvas: &mut BufferCanvas<'_>,
    y: u16,
    x: u16,
    day: &DayInfo,
    is_cursor: bool,
    formatter: &F,
) {
    let (open, close) = if day.is_today { ('[', ']') } else { (' ', ' ') };
    let label = format!("{open}{:>2}{close}", formatter.format_day(day.date));
    canvas.mvprint(y, x, label, day_style(day, is_cursor));
    // Today's brackets occupy the corner columns
    if day.is_today {
        return;
    }
    if let Some(ch) = day.corner.left_glyph() {
        canvas.mvaddch(y, x, ch, theme::CORNER_STYLE);
    }
    if let Some(ch) = day.corner.right_glyph() {
        canvas.mvaddch(y, x + DAY_WIDTH - 1, ch, theme::CORNER_STYLE);
    }
}

fn day_style(day: &DayInfo, is_cursor: bool) -> Style {
    let mut style = theme::BASE_STYLE;
    if !day.is_in_month {
        style = style.patch(theme::OUTSIDE_STYLE);
    }
    if day.is_selected {
        style = style.patch(theme::SELECTED_STYLE);
    }
    if day.is_today {
        style = style.patch(theme::TODAY_STYLE);
    }
    if !day.is_in_bounds {
        style = style.patch(theme::OUT_OF_BOUNDS_STYLE);
    }
    if is_cursor {
        style = style.patch(theme::CURSOR_STYLE);
    }
    style
}

fn draw_month_panel<F: DateFormatter>(canvas: &mut BufferCanvas<'_>, state: &Calendar<F>) {
    let config = state.config();
    let focused = state.focus() == Picker::Month;
    let page = state.month_page();
    let title = state.formatter().format_year(page.year);
    draw_title(
        canvas,
        MONTH_PANEL_WIDTH,
        &title,
        (page.prev_in_bounds, page.next_in_bounds),
        focused,
    );
    canvas.hline(2, 0, ACS_HLINE, MONTH_PANEL_WIDTH, theme::RULE_STYLE);
    for (y, row) in (HEADER_LINES..).step_by(PICKER_ROW_LINES.into()).zip(page.rows()) {
        for (x, cell) in (0..).step_by(MONTH_WIDTH.into()).zip(row) {
            let label = format!("{:^5}", config.strings.short_month(cell.month));
            canvas.mvprint(y, x, label, month_style(cell, focused, config));
        }
    }
}

fn month_style(cell: &MonthCell, focused: bool, config: &CalendarConfig) -> Style {
    let mut style = theme::BASE_STYLE;
    if config.highlight_current_month && cell.is_current {
        style = style.patch(theme::CURRENT_STYLE);
    }
    if config.highlight_selected_month && cell.is_selected {
        style = style.patch(theme::SELECTED_STYLE);
    }
    if !cell.is_in_bounds {
        style = style.patch(theme::OUT_OF_BOUNDS_STYLE);
    }
    if cell.is_navigated {
        style = style.patch(if focused {
            theme::CURSOR_STYLE
        } else {
            theme::NAVIGATED_STYLE
        });
    }
    style
}

fn draw_year_panel<F: DateFormatter>(canvas: &mut BufferCanvas<'_>, state: &Calendar<F>) {
    let config = state.config();
    let formatter = state.formatter();
    let focused = state.focus() == Picker::Year;
    let page = state.decade_page();
    let title = format!(
        "{} - {}",
        formatter.format_year(page.start),
        formatter.format_year(page.end())
    );
    draw_title(
        canvas,
        YEAR_PANEL_WIDTH,
        &title,
        (page.prev_in_bounds, page.next_in_bounds),
        focused,
    );
    canvas.hline(2, 0, ACS_HLINE, YEAR_PANEL_WIDTH, theme::RULE_STYLE);
    for (y, row) in (HEADER_LINES..).step_by(PICKER_ROW_LINES.into()).zip(page.rows()) {
        for (x, cell) in (0..).step_by(YEAR_WIDTH.into()).zip(row) {
            let label = format!("{:^6}", formatter.format_year(cell.year));
            canvas.mvprint(y, x, label, year_style(cell, focused, config));
        }
    }
}

fn year_style(cell: &YearCell, focused: bool, config: &CalendarConfig) -> Style {
    let mut style = theme::BASE_STYLE;
    if !cell.is_in_decade {
        style = style.patch(theme::OUTSIDE_STYLE);
    }
    if config.highlight_current_month && cell.is_current {
        style = style.patch(theme::CURRENT_STYLE);
    }
    if config.highlight_selected_month && cell.is_selected {
        style = style.patch(theme::SELECTED_STYLE);
    }
    if !cell.is_in_bounds {
        style = style.patch(theme::OUT_OF_BOUNDS_STYLE);
    }
    if cell.is_navigated {
        style = style.patch(if focused {
            theme::CURSOR_STYLE
        } else {
            theme::NAVIGATED_STYLE
        });
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DefaultFormatter;
    use crate::range::Bounds;
    use time::macros::date;
    use time::{Date, Weekday};

    fn render(calendar: &mut Calendar<DefaultFormatter>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        CalendarView::new().render(area, &mut buf, calendar);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    fn day_only(today: Date) -> CalendarConfig {
        let mut config = CalendarConfig::new(today);
        config.month_picker_visible = false;
        config
    }

    #[test]
    fn test_day_picker() {
        let mut cal = Calendar::new(day_only(date!(2023 - 11 - 15)), DefaultFormatter);
        let lines = render(&mut cal, 28, 13);
        assert_eq!(
            lines,
            [
                "◀      November 2023       ▶",
                " Su  Mo  Tu  We  Th  Fr  Sa",
                "────────────────────────────",
                " 29  30  31   1   2   3   4",
                "  5   6   7   8   9  10  11",
                " 12  13  14 [15] 16  17  18",
                " 19  20  21  22  23  24  25",
                " 26  27  28  29  30   1   2",
                "",
                "",
                "t: Go to today",
                "Selected: November 15, 2023",
                "Press ? for help",
            ]
        );
    }

    #[test]
    fn test_week_numbers_and_monday_start() {
        let mut config = day_only(date!(2025 - 01 - 22));
        config.first_day = Weekday::Monday;
        config.show_week_numbers = true;
        config.show_go_to_today = false;
        let mut cal = Calendar::new(config, DefaultFormatter);
        let lines = render(&mut cal, 32, 13);
        assert_eq!(
            lines[..8],
            [
                "◀         January 2025         ▶",
                "     Mo  Tu  We  Th  Fr  Sa  Su",
                "────────────────────────────────",
                "  1  30  31   1   2   3   4   5",
                "  2   6   7   8   9  10  11  12",
                "  3  13  14  15  16  17  18  19",
                "  4  20  21 [22] 23  24  25  26",
                "  5  27  28  29  30  31   1   2",
            ]
        );
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "Selected: January 22, 2025");
    }

    #[test]
    fn test_month_corners() {
        let mut config = day_only(date!(2023 - 12 - 20));
        config.range_type = DateRangeType::Month;
        config.value = Some(date!(2023 - 11 - 15));
        let mut cal = Calendar::new(config, DefaultFormatter);
        let lines = render(&mut cal, 46, 13);
        assert_eq!(
            lines[3..8],
            [
                " 29  30  31 ╭ 1   2   3   4╮",
                "╭ 5   6   7   8   9  10  11",
                " 12  13  14  15  16  17  18",
                " 19  20  21  22  23  24  25╯",
                "╰26  27  28  29  30╯  1   2",
            ]
        );
        assert_eq!(lines[11], "Selected: November 1, 2023 - November 30, 2023");
    }

    #[test]
    fn test_today_marker_wins_over_corner() {
        let mut config = day_only(date!(2023 - 11 - 01));
        config.range_type = DateRangeType::Month;
        config.value = Some(date!(2023 - 11 - 15));
        let mut cal = Calendar::new(config, DefaultFormatter);
        let lines = render(&mut cal, 46, 13);
        assert_eq!(lines[3], " 29  30  31 [ 1]  2   3   4╮");
        assert_eq!(lines[4], "╭ 5   6   7   8   9  10  11");
    }

    #[test]
    fn test_month_picker_alone() {
        let mut config = CalendarConfig::new(date!(2025 - 01 - 22));
        config.day_picker_visible = false;
        let mut cal = Calendar::new(config, DefaultFormatter);
        let lines = render(&mut cal, 30, 12)
            .into_iter()
            .map(|ln| ln.trim_start().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            lines[..8],
            [
                "◀       2025       ▶",
                "",
                "────────────────────",
                "Jan  Feb  Mar  Apr",
                "",
                "May  Jun  Jul  Aug",
                "",
                "Sep  Oct  Nov  Dec",
            ]
        );
        assert_eq!(lines[9], "t: Go to today");
        assert_eq!(lines[10], "Selected: January 22, 2025");
    }

    #[test]
    fn test_inline_month_picker() {
        let mut cal = Calendar::new(
            CalendarConfig::new(date!(2025 - 01 - 22)),
            DefaultFormatter,
        );
        let lines = render(&mut cal, 51, 13);
        assert_eq!(
            lines[0],
            "◀       January 2025       ▶   ◀       2025       ▶"
        );
        assert_eq!(
            lines[2],
            "────────────────────────────   ────────────────────"
        );
        assert!(lines[3].ends_with("  Jan  Feb  Mar  Apr"));
        assert!(lines[5].ends_with("  May  Jun  Jul  Aug"));
        assert!(lines[7].ends_with("  Sep  Oct  Nov  Dec"));
    }

    #[test]
    fn test_overlay_year_picker() {
        let mut config = day_only(date!(2025 - 01 - 22));
        config.month_picker_overlay = true;
        config.bounds =
            Bounds::new(Some(date!(2020 - 01 - 01)), Some(date!(2035 - 12 - 31))).unwrap();
        let mut cal = Calendar::new(config, DefaultFormatter);
        cal.header_select().unwrap();
        cal.header_select().unwrap();
        let lines = render(&mut cal, 26, 12);
        assert_eq!(
            lines[..8],
            [
                "◀     2020 - 2029      ▶",
                "",
                "────────────────────────",
                " 2019  2020  2021  2022",
                "",
                " 2023  2024  2025  2026",
                "",
                " 2027  2028  2029  2030",
            ]
        );
        assert_eq!(lines[10], "Selected: January 22, 2025");
    }

    #[test]
    fn test_disabled_arrows() {
        let mut config = day_only(date!(2016 - 04 - 10));
        config.bounds =
            Bounds::new(Some(date!(2016 - 04 - 01)), Some(date!(2016 - 05 - 31))).unwrap();
        let mut cal = Calendar::new(config, DefaultFormatter);
        let area = Rect::new(0, 0, 28, 13);
        let mut buf = Buffer::empty(area);
        CalendarView::new().render(area, &mut buf, &mut cal);
        assert_eq!(buf[(0, 0)].symbol(), "◀");
        assert_eq!(Some(buf[(0, 0)].fg), theme::DISABLED_NAV_STYLE.fg);
        assert_eq!(buf[(27, 0)].symbol(), "▶");
        assert_eq!(Some(buf[(27, 0)].fg), theme::NAV_STYLE.fg);
    }
}
