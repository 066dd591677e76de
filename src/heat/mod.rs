pub mod aggregate;
pub mod classify;
pub mod exec;
pub mod grid;
pub mod output;
pub mod window;

pub use aggregate::accumulate;
pub use classify::{classify, days_ago};
pub use exec::{collect_stats, exec, StatsReport};
pub use grid::{build_grid, slot};
pub use output::{cell_text, output_json, print_calendar, render, Tier};
pub use window::{Window, DEFAULT_MONTHS};
