use crate::model::{DayCounts, WeekGrid, DAYS_PER_WEEK};

/// Week and weekday slot for a day index.
///
/// Day 0 sits on today's weekday in week 0; each older day steps one slot
/// to the left, wrapping from Sunday into the previous week's Saturday.
pub fn slot(day: usize, today_weekday: usize) -> (usize, usize) {
    let from_saturday = day + (DAYS_PER_WEEK - 1 - today_weekday);
    let week = from_saturday / DAYS_PER_WEEK;
    let weekday = DAYS_PER_WEEK - 1 - from_saturday % DAYS_PER_WEEK;
    (week, weekday)
}

/// Reshape per-day counts into a week by weekday grid.
pub fn build_grid(counts: &DayCounts, today_weekday: usize) -> WeekGrid {
    let today_weekday = today_weekday.min(DAYS_PER_WEEK - 1);
    let mut grid = WeekGrid::new();
    for (day, count) in counts.iter() {
        let (week, weekday) = slot(day, today_weekday);
        grid.add(week, weekday, count);
    }
    grid
}
