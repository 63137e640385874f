use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE;

pub(crate) const FOCUSED_TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const RULE_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const NAV_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);

pub(crate) const DISABLED_NAV_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::Gray);

/// Days of adjacent months and years flanking a decade
pub(crate) const OUTSIDE_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

/// Rounded corners drawn outside of a selected month
pub(crate) const CORNER_STYLE: Style = BASE_STYLE.fg(Color::Blue);

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const CURRENT_STYLE: Style = Style::new().fg(Color::LightYellow);

pub(crate) const NAVIGATED_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const OUT_OF_BOUNDS_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

pub(crate) const FOOTER_STYLE: Style = BASE_STYLE.fg(Color::Gray);
