use super::classify::classify;
use super::window::Window;
use crate::model::{CommitSignature, DayCounts};
use chrono::TimeZone;
use std::borrow::Borrow;

/// Adds every matching commit of one repository into `counts`.
///
/// Calls fold into the same map, so running it once per repository yields
/// the total across repositories. Returns how many commits were counted.
pub fn accumulate<I, Tz>(
    commits: I,
    target_email: &str,
    window: &Window<Tz>,
    counts: &mut DayCounts,
) -> usize
where
    I: IntoIterator,
    I::Item: Borrow<CommitSignature>,
    Tz: TimeZone,
{
    let mut matched = 0;
    for commit in commits {
        if let Some(day) = classify(commit.borrow(), target_email, window) {
            counts.add(day);
            matched += 1;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heat::window::DEFAULT_MONTHS;
    use chrono::{Duration, FixedOffset};
    use pretty_assertions::assert_eq;

    const ME: &str = "me@example.com";

    fn window() -> Window<FixedOffset> {
        let tz = FixedOffset::east_opt(3600).unwrap();
        Window::new(&tz.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap(), DEFAULT_MONTHS)
    }

    fn commits(email: &str, days: &[i64]) -> Vec<CommitSignature> {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let noon = tz.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        days.iter()
            .map(|&d| CommitSignature::new(email, noon - Duration::days(d)))
            .collect()
    }

    #[test]
    fn repositories_fold_into_one_map() {
        let window = window();
        let mut counts = DayCounts::new(window.days);

        let repo_a = commits(ME, &[10, 10, 10]);
        let repo_b = commits(ME, &[10, 10]);
        assert_eq!(accumulate(&repo_a, ME, &window, &mut counts), 3);
        assert_eq!(accumulate(&repo_b, ME, &window, &mut counts), 2);

        assert_eq!(counts.get(10), 5);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn order_does_not_matter() {
        let window = window();
        let history = commits(ME, &[0, 3, 3, 17, 64, 181, 182, 183, -2]);

        let mut forward = DayCounts::new(window.days);
        accumulate(&history, ME, &window, &mut forward);

        let mut backward = DayCounts::new(window.days);
        accumulate(history.iter().rev(), ME, &window, &mut backward);

        assert_eq!(forward, backward);
        assert_eq!(forward.total(), 7);
    }

    #[test]
    fn foreign_commits_leave_counts_untouched() {
        let window = window();
        let mut counts = DayCounts::new(window.days);

        let matched = accumulate(commits("other@example.com", &[0, 1, 2]), ME, &window, &mut counts);

        assert_eq!(matched, 0);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn partial_maps_reduce_to_the_same_total() {
        let window = window();
        let repo_a = commits(ME, &[1, 2, 2]);
        let repo_b = commits(ME, &[2, 90]);

        let mut folded = DayCounts::new(window.days);
        accumulate(&repo_a, ME, &window, &mut folded);
        accumulate(&repo_b, ME, &window, &mut folded);

        let mut part_a = DayCounts::new(window.days);
        let mut part_b = DayCounts::new(window.days);
        accumulate(&repo_a, ME, &window, &mut part_a);
        accumulate(&repo_b, ME, &window, &mut part_b);
        part_a.merge(&part_b);

        assert_eq!(folded, part_a);
    }
}
