use super::window::Window;
use crate::model::CommitSignature;
use chrono::{DateTime, FixedOffset, TimeZone};

/// Signed day distance between today and the day `authored_at` falls on,
/// both taken in the window's reference timezone.
pub fn days_ago<Tz: TimeZone>(authored_at: &DateTime<FixedOffset>, window: &Window<Tz>) -> i64 {
    let day = authored_at.with_timezone(&window.tz).date_naive();
    window.days_ago(day)
}

/// Day index this commit counts towards, or `None` when it was written by
/// someone else or falls outside the window (future dates included).
pub fn classify<Tz: TimeZone>(
    commit: &CommitSignature,
    target_email: &str,
    window: &Window<Tz>,
) -> Option<usize> {
    if commit.author_email != target_email {
        return None;
    }

    let days = days_ago(&commit.authored_at, window);
    window.day_index(days)
}
