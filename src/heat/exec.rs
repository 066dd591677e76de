use super::{accumulate, build_grid, output_json, print_calendar, Window};
use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{DayCounts, SkippedRepo};
use crate::store::RepoStore;
use crate::util::display_paths;
use anyhow::Context;
use chrono::{Local, TimeZone};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

const LOG_TARGET: &str = "stats";

/// Result of reading every registered repository.
#[derive(Debug)]
pub struct StatsReport {
    pub counts: DayCounts,
    pub scanned: Vec<PathBuf>,
    pub skipped: Vec<SkippedRepo>,
}

/// Fold the commits of `email` from every repository into one map.
///
/// A repository that cannot be read is reported in `skipped` and the
/// remaining repositories are still counted.
pub fn collect_stats<Tz: TimeZone>(
    repos: &[PathBuf],
    email: &str,
    window: &Window<Tz>,
    show_progress: bool,
) -> StatsReport {
    let mut counts = DayCounts::new(window.days);
    let mut scanned = Vec::new();
    let mut skipped = Vec::new();

    let pb = if show_progress {
        ProgressBar::new(repos.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for path in repos {
        pb.set_message(path.display().to_string());

        let history = GitRepo::open(path).and_then(|repo| repo.signatures());
        match history {
            Ok(commits) => {
                let matched = accumulate(&commits, email, window, &mut counts);
                log::info!(
                    target: LOG_TARGET,
                    "{}: {matched} of {} commits counted",
                    path.display(),
                    commits.len()
                );
                scanned.push(path.clone());
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping {}: {e}", path.display());
                skipped.push(SkippedRepo {
                    path: path.to_string_lossy().to_string(),
                    error: e.to_string(),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    StatsReport {
        counts,
        scanned,
        skipped,
    }
}

pub fn exec(common: &CommonArgs, email: &str) -> anyhow::Result<()> {
    let store = RepoStore::new(common.dotfile_path()?);
    let repos = store
        .load()
        .with_context(|| format!("Failed to load repository list from {}", store.path().display()))?;

    if repos.is_empty() {
        eprintln!(
            "{} no repositories registered in {}, add some with --add <FOLDER>",
            style("warning:").yellow().bold(),
            store.path().display()
        );
    }

    let now = Local::now();
    let window = Window::new(&now, common.months);
    log::debug!(
        target: LOG_TARGET,
        "Window {} .. {} ({} days, {} weeks)",
        window.start,
        window.today,
        window.days,
        window.weeks
    );

    let report = collect_stats(&repos, email, &window, !common.json);
    let grid = build_grid(&report.counts, window.today_weekday);

    if common.json {
        output_json(
            &grid,
            &window,
            email,
            display_paths(&report.scanned),
            report.skipped,
        )?;
    } else {
        for skipped in &report.skipped {
            eprintln!(
                "{} skipped {}: {}",
                style("warning:").yellow().bold(),
                skipped.path,
                skipped.error
            );
        }
        print_calendar(&grid, &window, email, report.counts.total())?;
    }

    Ok(())
}
