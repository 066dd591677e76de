use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, TimeZone};

pub const DEFAULT_MONTHS: u32 = 6;

/// Trailing time window ending today.
///
/// All dates are calendar dates in the reference timezone `tz`, i.e. "now"
/// truncated to the beginning of its day.
#[derive(Debug, Clone)]
pub struct Window<Tz: TimeZone = Local> {
    pub tz: Tz,
    pub today: NaiveDate,
    pub start: NaiveDate,
    /// Whole days from `start` to `today`.
    pub days: usize,
    pub weeks: usize,
    /// Weekday of today, Sunday = 0 .. Saturday = 6.
    pub today_weekday: usize,
}

impl<Tz: TimeZone> Window<Tz> {
    pub fn new(now: &DateTime<Tz>, months: u32) -> Self {
        let today = now.date_naive();
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        let days = usize::try_from(today.signed_duration_since(start).num_days()).unwrap_or(0);

        Self {
            tz: now.timezone(),
            today,
            start,
            days,
            weeks: days / 7,
            today_weekday: today.weekday().num_days_from_sunday() as usize,
        }
    }

    /// Signed number of days from `date` to today; negative for future dates.
    pub fn days_ago(&self, date: NaiveDate) -> i64 {
        self.today.signed_duration_since(date).num_days()
    }

    /// Day index for a signed day distance: inclusive of today (0) and of
    /// the window start (`days`), `None` for future or older days.
    pub fn day_index(&self, days_ago: i64) -> Option<usize> {
        usize::try_from(days_ago).ok().filter(|&d| d <= self.days)
    }

    /// Sunday that opens the week `week` weeks before the current one.
    pub fn week_start(&self, week: usize) -> NaiveDate {
        let back = self.today_weekday as u64 + 7 * week as u64;
        self.today
            .checked_sub_days(Days::new(back))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use pretty_assertions::assert_eq;

    fn window_at(y: i32, m: u32, d: u32) -> Window<Utc> {
        let now = Utc.with_ymd_and_hms(y, m, d, 14, 30, 0).unwrap();
        Window::new(&now, DEFAULT_MONTHS)
    }

    #[test]
    fn mid_march_window() {
        let window = window_at(2024, 3, 15);

        assert_eq!(window.today, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2023, 9, 15).unwrap());
        assert_eq!(window.days, 182);
        assert_eq!(window.weeks, 26);
        assert_eq!(window.today_weekday, 5);
    }

    #[test]
    fn window_length_follows_the_calendar() {
        // Sep 15 2022 .. Mar 15 2023 spans a 28-day February.
        assert_eq!(window_at(2023, 3, 15).days, 181);
        // Aug 31 clamps to Feb 29 in a leap year.
        let window = window_at(2024, 8, 31);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(window.days, 184);
    }

    #[test]
    fn today_is_taken_in_the_reference_timezone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        // 04:30 UTC on the 16th is still the 15th in UTC-5.
        let now = tz.with_ymd_and_hms(2024, 3, 15, 23, 30, 0).unwrap();
        let window = Window::new(&now, DEFAULT_MONTHS);

        assert_eq!(window.today, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(window.today_weekday, 5);
    }

    #[test]
    fn day_index_is_inclusive_at_both_ends() {
        let window = window_at(2024, 3, 15);

        assert_eq!(window.day_index(0), Some(0));
        assert_eq!(window.day_index(182), Some(182));
        assert_eq!(window.day_index(-1), None);
        assert_eq!(window.day_index(183), None);
    }

    #[test]
    fn week_start_walks_back_from_this_sunday() {
        let window = window_at(2024, 3, 15);

        assert_eq!(window.week_start(0), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(window.week_start(1), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(window.week_start(26), NaiveDate::from_ymd_opt(2023, 9, 10).unwrap());
    }
}
