use super::window::Window;
use crate::model::{
    SkippedRepo, StatsOutput, WeekGrid, WeekRow, DAYS_PER_WEEK, SCHEMA_VERSION,
};
use anyhow::Result;
use chrono::{Datelike, Days, TimeZone, Utc};
use console::{style, Style};
use std::io::{self, Write};

const CELL_WIDTH: usize = 4;
const LABEL_WIDTH: usize = 5;

/// Intensity tier a cell is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Empty,
    Low,
    Medium,
    High,
    Today,
}

impl Tier {
    pub fn for_cell(count: u32, today: bool) -> Self {
        if today {
            return Tier::Today;
        }
        match count {
            0 => Tier::Empty,
            1..=4 => Tier::Low,
            5..=9 => Tier::Medium,
            _ => Tier::High,
        }
    }

    pub fn style(self) -> Style {
        match self {
            Tier::Empty => Style::new().dim(),
            Tier::Low => Style::new().black().on_white().bold(),
            Tier::Medium => Style::new().black().on_yellow().bold(),
            Tier::High => Style::new().black().on_green().bold(),
            Tier::Today => Style::new().white().on_magenta().bold(),
        }
    }
}

/// Fixed-width text of a cell: `"  - "` for nothing, otherwise the count
/// right-aligned so columns line up up to three digits.
pub fn cell_text(count: u32) -> String {
    match count {
        0 => "  - ".to_string(),
        1..=9 => format!("  {count} "),
        10..=99 => format!(" {count} "),
        _ => format!("{count} "),
    }
}

fn day_label(weekday: usize) -> &'static str {
    match weekday {
        1 => " Mon ",
        3 => " Wed ",
        5 => " Fri ",
        _ => "     ",
    }
}

fn write_months<Tz: TimeZone, W: Write>(
    out: &mut W,
    window: &Window<Tz>,
    last_week: usize,
) -> io::Result<()> {
    write!(out, "{}", " ".repeat(LABEL_WIDTH))?;
    let mut shown = None;
    for week in (0..=last_week).rev() {
        let first_day = window.week_start(week);
        let month = (first_day.year(), first_day.month());
        if shown == Some(month) {
            write!(out, "{}", " ".repeat(CELL_WIDTH))?;
        } else {
            write!(out, "{} ", first_day.format("%b"))?;
            shown = Some(month);
        }
    }
    writeln!(out)
}

/// Slots later than today or earlier than the window start stay blank.
fn in_window<Tz: TimeZone>(window: &Window<Tz>, week: usize, weekday: usize) -> bool {
    window
        .week_start(week)
        .checked_add_days(Days::new(weekday as u64))
        .is_some_and(|date| date >= window.start && date <= window.today)
}

/// Draw the calendar: a month header, then one row per weekday with the
/// oldest week on the left. Output depends only on the arguments.
pub fn render<Tz: TimeZone, W: Write>(
    grid: &WeekGrid,
    window: &Window<Tz>,
    out: &mut W,
) -> io::Result<()> {
    let last_week = grid.last_week();
    write_months(out, window, last_week)?;

    for weekday in 0..DAYS_PER_WEEK {
        write!(out, "{}", day_label(weekday))?;
        for week in (0..=last_week).rev() {
            if !in_window(window, week, weekday) {
                write!(out, "{}", " ".repeat(CELL_WIDTH))?;
                continue;
            }
            let count = grid.cell(week, weekday);
            let today = week == 0 && weekday == window.today_weekday;
            let tier = Tier::for_cell(count, today);
            write!(out, "{}", tier.style().apply_to(cell_text(count)))?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    write!(out, "{}", " ".repeat(LABEL_WIDTH))?;
    for (tier, label) in [
        (Tier::Empty, "none"),
        (Tier::Low, "1-4"),
        (Tier::Medium, "5-9"),
        (Tier::High, "10+"),
        (Tier::Today, "today"),
    ] {
        write!(out, "{} {label}  ", tier.style().apply_to("  "))?;
    }
    writeln!(out)
}

pub fn print_calendar<Tz: TimeZone>(
    grid: &WeekGrid,
    window: &Window<Tz>,
    email: &str,
    total: u64,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "{} {} ({} commits, {} to {})",
        style("Contributions of").bold(),
        style(email).bold().cyan(),
        total,
        window.start,
        window.today
    )?;
    writeln!(out, "{}", "─".repeat(LABEL_WIDTH + CELL_WIDTH * (grid.last_week() + 1)))?;
    render(grid, window, &mut out)?;
    Ok(())
}

pub fn output_json<Tz: TimeZone>(
    grid: &WeekGrid,
    window: &Window<Tz>,
    email: &str,
    repositories: Vec<String>,
    skipped: Vec<SkippedRepo>,
) -> Result<()> {
    let weeks = (0..=grid.last_week())
        .rev()
        .map(|week| WeekRow {
            week,
            starts_on: window.week_start(week),
            days: grid.row(week),
        })
        .collect();

    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        email: email.to_string(),
        window_start: window.start,
        today: window.today,
        window_days: window.days,
        total: grid.total(),
        repositories,
        skipped,
        weeks,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
