mod app;
mod calendar;
mod config;
mod datemath;
mod help;
mod range;
mod theme;
use crate::app::App;
use crate::calendar::{Calendar, DefaultFormatter};
use crate::config::CalendarConfig;
use crate::datemath::{parse_weekday, FirstWeekOfYear};
use crate::range::{Bounds, DateRangeType, WorkWeekDays};
use anyhow::Context;
use env_logger::{Env, Target};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    /// The positional initial date, validated once logging is set up
    value: Option<String>,
    range_type: DateRangeType,
    first_day: Option<Weekday>,
    first_week: FirstWeekOfYear,
    work_days: WorkWeekDays,
    min: Option<Date>,
    max: Option<Date>,
    today: Option<Date>,
    week_numbers: bool,
    six_weeks: bool,
    overlay: bool,
    no_month_picker: bool,
    no_day_picker: bool,
    no_go_to_today: bool,
    highlight_current_month: bool,
    highlight_selected_month: bool,
    log_file: Option<PathBuf>,
}

impl Options {
    fn into_config(self, today: Date) -> Result<CalendarConfig, range::BoundsError> {
        let bounds = Bounds::new(self.min, self.max)?;
        let mut config = CalendarConfig::new(today);
        config.value = self.value.and_then(|s| match parse_ymd(&s) {
            Ok(d) => Some(d),
            Err(e) => {
                log::warn!("Invalid initial date {s:?}: {e}; starting from today instead");
                None
            }
        });
        config.range_type = self.range_type;
        config.first_day = self.first_day.unwrap_or(Weekday::Sunday);
        config.first_week = self.first_week;
        config.work_days = self.work_days;
        config.bounds = bounds;
        config.show_week_numbers = self.week_numbers;
        config.show_six_weeks = self.six_weeks;
        config.month_picker_overlay = self.overlay;
        config.month_picker_visible = !self.no_month_picker;
        config.day_picker_visible = !self.no_day_picker;
        config.show_go_to_today = !self.no_go_to_today;
        config.highlight_current_month = self.highlight_current_month;
        config.highlight_selected_month = self.highlight_selected_month;
        Ok(config)
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('r') | Arg::Long("range") => {
                    opts.range_type = parser.value()?.parse()?;
                }
                Arg::Short('f') | Arg::Long("first-day") => {
                    opts.first_day = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Long("first-week") => opts.first_week = parser.value()?.parse()?,
                Arg::Long("work-days") => opts.work_days = parser.value()?.parse()?,
                Arg::Long("min") => opts.min = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Long("max") => opts.max = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Long("today") => opts.today = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Short('w') | Arg::Long("week-numbers") => opts.week_numbers = true,
                Arg::Long("six-weeks") => opts.six_weeks = true,
                Arg::Long("overlay") => opts.overlay = true,
                Arg::Long("no-month-picker") => opts.no_month_picker = true,
                Arg::Long("no-day-picker") => opts.no_day_picker = true,
                Arg::Long("no-go-to-today") => opts.no_go_to_today = true,
                Arg::Long("highlight-current-month") => opts.highlight_current_month = true,
                Arg::Long("highlight-selected-month") => opts.highlight_selected_month = true,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.value.is_none() => opts.value = Some(value.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let today = match opts.today {
                    Some(d) => d,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                let config = opts.into_config(today)?;
                log::info!(
                    "Starting with today = {}, value = {:?}, range = {}, bounds = {}..={}",
                    config.today,
                    config.value,
                    config.range_type,
                    config.bounds.min(),
                    config.bounds.max()
                );
                let calendar = Calendar::new(config, DefaultFormatter);
                let selection = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(calendar)
                        .run(&mut terminal)
                        .context("error running calendar")
                })?;
                if let Some(selection) = selection {
                    let mut out = io::stdout().lock();
                    for date in selection.range {
                        writeln!(out, "{date}")?;
                    }
                    out.flush()?;
                } else {
                    log::info!("Quit without a selection");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal date picker with day, week, work-week & month range selection");
                println!();
                println!("Options:");
                println!("  -r, --range <day|week|month|work-week>");
                println!("                    Kind of date range to select [default: day]");
                println!("  -f, --first-day <WEEKDAY>");
                println!("                    First day of the week [default: sunday]");
                println!("      --first-week <first-day|first-full-week|first-four-day-week>");
                println!("                    Rule for the first week of the year");
                println!("      --work-days <WEEKDAY,...>");
                println!("                    Days in a work week [default: mon,tue,wed,thu,fri]");
                println!("      --min <YYYY-MM-DD>");
                println!("                    Earliest selectable date");
                println!("      --max <YYYY-MM-DD>");
                println!("                    Latest selectable date");
                println!("      --today <YYYY-MM-DD>");
                println!("                    Treat the given date as today");
                println!("  -w, --week-numbers");
                println!("                    Show week numbers");
                println!("      --six-weeks   Always show six weeks");
                println!("      --overlay     Show the month picker in place of the day picker");
                println!("      --no-month-picker");
                println!("                    Only show the day picker");
                println!("      --no-day-picker");
                println!("                    Only show the month picker; picking a month selects it");
                println!("      --no-go-to-today");
                println!("                    Hide the \"Go to today\" control");
                println!("      --highlight-current-month");
                println!("                    Highlight the current month & year in the pickers");
                println!("      --highlight-selected-month");
                println!("                    Highlight the selected month & year in the pickers");
                println!("      --log-file <PATH>");
                println!("                    Write logs to the given file");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
