//! Start date resolution and schedule generation
//!
//! The schedule walks the matrix week by week, emitting all seven days of a
//! week before moving on, so columns of the matrix become consecutive weeks
//! on the graph. One entry is produced per cell, including zero-count cells,
//! and consecutive entries are exactly one day apart.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{GraphError, Result};
use crate::font::{DAYS_IN_WEEK, MAX_INTENSITY};
use crate::pattern::IntensityMatrix;

/// Weeks subtracted from "now" when no start date is given
pub const DEFAULT_WEEKS_BACK: u64 = 53;

/// Years a user supplied start date may fall in
pub const START_YEARS: std::ops::RangeInclusive<i32> = 1970..=9999;

/// First day of the schedule: always a Sunday at midnight UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StartDate(NaiveDate);

impl StartDate {
    /// Round `date` back to the Sunday of its week (a Sunday stays put)
    pub fn resolve(date: NaiveDate) -> Result<Self> {
        let back = u64::from(date.weekday().num_days_from_sunday());
        date.checked_sub_days(Days::new(back))
            .map(Self)
            .ok_or_else(|| out_of_range(date))
    }

    /// Parse a user supplied date and resolve it to its week's Sunday.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and RFC 3339 timestamps. For a
    /// timestamp the calendar date as written is used. Years outside
    /// [`START_YEARS`] are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let parsed = ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok());
        let date = match parsed {
            Some(date) => date,
            None => DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.date_naive())
                .map_err(|e| GraphError::InvalidStartDate {
                    input: Arc::new(input.to_string()),
                    message: Arc::new(format!("expected YYYY-MM-DD ({e})")),
                })?,
        };

        if !START_YEARS.contains(&date.year()) {
            return Err(GraphError::InvalidStartDate {
                input: Arc::new(input.to_string()),
                message: Arc::new(format!(
                    "year must be between {} and {}",
                    START_YEARS.start(),
                    START_YEARS.end()
                )),
            });
        }
        Self::resolve(date)
    }

    /// Default start: 53 weeks before `now`, moved to the following week's
    /// Sunday so the drawing ends inside the visible year.
    pub fn default_for(now: DateTime<Utc>) -> Result<Self> {
        let today = now.date_naive();
        let earlier = today
            .checked_sub_days(Days::new(DEFAULT_WEEKS_BACK * 7))
            .ok_or_else(|| out_of_range(today))?;
        let Self(sunday) = Self::resolve(earlier)?;
        sunday
            .checked_add_days(Days::new(7))
            .map(Self)
            .ok_or_else(|| out_of_range(sunday))
    }

    /// Date `days` after the start, if chrono can represent it
    pub fn offset(&self, days: usize) -> Result<NaiveDate> {
        u64::try_from(days)
            .ok()
            .and_then(|d| self.0.checked_add_days(Days::new(d)))
            .ok_or_else(|| out_of_range(self.0))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Midnight UTC of the start date
    pub fn datetime(&self) -> DateTime<Utc> {
        midnight_utc(self.0)
    }
}

impl fmt::Display for StartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a %b %d %Y"))
    }
}

fn out_of_range(date: NaiveDate) -> GraphError {
    GraphError::InvalidStartDate {
        input: Arc::new(date.to_string()),
        message: Arc::new("schedule runs outside the supported calendar range".to_string()),
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Positive scale factor applied to every intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Multiplier(u32);

impl Multiplier {
    pub const ONE: Self = Self(1);

    /// Largest multiplier whose scaled intensities still fit a `u32`
    pub const MAX: Self = Self(u32::MAX / MAX_INTENSITY as u32);

    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(GraphError::config("multiplier must be a positive integer"));
        }
        if value > Self::MAX.0 {
            return Err(GraphError::config(format!(
                "multiplier must not exceed {}",
                Self::MAX.0
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Multiplier {
    type Error = GraphError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Multiplier> for u32 {
    fn from(m: Multiplier) -> u32 {
        m.0
    }
}

/// One day of the drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Week column in the matrix
    pub week: usize,
    /// Weekday row in the matrix
    pub day: usize,
    /// Midnight UTC of the day
    pub date: DateTime<Utc>,
    /// Commits to create on that day
    pub commits: u32,
}

impl ScheduleEntry {
    pub fn unix_seconds(&self) -> i64 {
        self.date.timestamp()
    }

    /// 1-indexed count of cells processed once this entry is done
    pub fn cells_passed(&self) -> usize {
        self.week * DAYS_IN_WEEK + self.day + 1
    }
}

/// Ordered list of entries plus totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
    pub weeks: usize,
    pub total_commits: u64,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that actually produce commits
    pub fn active(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.commits > 0)
    }
}

/// Map the matrix onto calendar days starting at `start`.
///
/// Fails with `InvalidStartDate` when the last day of the drawing falls
/// outside the calendar chrono can represent.
pub fn generate(
    matrix: &IntensityMatrix,
    start: StartDate,
    multiplier: Multiplier,
) -> Result<Schedule> {
    let weeks = matrix.width();
    if let Some(last) = matrix.area().checked_sub(1) {
        start.offset(last)?;
    }

    let mut entries = Vec::with_capacity(matrix.area());
    let mut total_commits = 0u64;

    for week in 0..weeks {
        for day in 0..DAYS_IN_WEEK {
            let intensity = matrix.get(day, week).unwrap_or(0);
            // Multiplier::MAX keeps this within u32
            let commits = u32::from(intensity) * multiplier.get();
            total_commits += u64::from(commits);
            entries.push(ScheduleEntry {
                week,
                day,
                date: midnight_utc(start.offset(week * DAYS_IN_WEEK + day)?),
                commits,
            });
        }
    }

    debug!(
        "Scheduled {} days over {} weeks, {} commits",
        entries.len(),
        weeks,
        total_commits
    );
    Ok(Schedule {
        entries,
        weeks,
        total_commits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;
    use crate::pattern::compile;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_resolve_wednesday_to_previous_sunday() {
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        assert_eq!(start.date(), date(2023, 12, 31));
        assert_eq!(start.datetime().timestamp() % 86_400, 0);
    }

    #[test]
    fn test_resolve_sunday_is_stable() {
        let start = StartDate::resolve(date(2023, 12, 31)).expect("in range");
        assert_eq!(start.date(), date(2023, 12, 31));
    }

    #[test]
    fn test_parse_formats() {
        let expected = date(2023, 12, 31);
        assert_eq!(StartDate::parse("2024-01-03").map(|s| s.date()).ok(), Some(expected));
        assert_eq!(StartDate::parse("2024/01/03").map(|s| s.date()).ok(), Some(expected));
        assert_eq!(
            StartDate::parse("2024-01-03T15:42:00Z").map(|s| s.date()).ok(),
            Some(expected)
        );
        assert!(StartDate::parse("next tuesday").is_err());
    }

    #[test]
    fn test_default_start_is_next_sunday_after_53_weeks() {
        // Saturday 2026-10-17
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 13, 5, 0).unwrap();
        let start = StartDate::default_for(now).expect("in range");
        // 53 weeks back is Saturday 2025-10-11; its Sunday is 10-05, plus a week
        assert_eq!(start.date(), date(2025, 10, 12));
        assert_eq!(start.date().weekday(), Weekday::Sun);
    }

    #[test]
    fn test_display_format() {
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        assert_eq!(start.to_string(), "Sun Dec 31 2023");
    }

    #[test]
    fn test_multiplier_rejects_zero() {
        assert!(Multiplier::new(0).is_err());
        assert_eq!(Multiplier::new(4).map(Multiplier::get).ok(), Some(4));
    }

    #[test]
    fn test_multiplier_upper_bound_keeps_totals_exact() {
        assert!(Multiplier::new(Multiplier::MAX.get() + 1).is_err());

        let matrix = compile("I", &Font::builtin()).expect("compiles");
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        let schedule = generate(&matrix, start, Multiplier::MAX).expect("schedules");
        let summed: u64 = schedule.entries.iter().map(|e| u64::from(e.commits)).sum();
        assert_eq!(summed, matrix.total() * u64::from(Multiplier::MAX.get()));
        assert_eq!(summed, schedule.total_commits);
    }

    #[test]
    fn test_parse_rejects_years_outside_range() {
        for input in ["+262142-12-25", "1969-12-31", "10000-01-01"] {
            let err = StartDate::parse(input).unwrap_err();
            assert!(matches!(err, GraphError::InvalidStartDate { .. }), "{input}");
        }
        assert!(StartDate::parse("9999-12-31").is_ok());
    }

    #[test]
    fn test_calendar_edges_are_errors() {
        // NaiveDate::MIN is not a Sunday, so rounding back leaves the calendar
        assert!(StartDate::resolve(NaiveDate::MIN).is_err());

        let late = NaiveDate::MAX - chrono::Days::new(7);
        let start = StartDate::resolve(late).expect("in range");
        let matrix = compile("HI", &Font::builtin()).expect("compiles");
        let err = generate(&matrix, start, Multiplier::ONE).unwrap_err();
        assert!(matches!(err, GraphError::InvalidStartDate { .. }));
    }

    #[test]
    fn test_schedule_is_week_major() {
        let matrix = compile("I", &Font::builtin()).expect("compiles");
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        let schedule = generate(&matrix, start, Multiplier::ONE).expect("schedules");

        assert_eq!(schedule.len(), 7 * matrix.width());
        let order: Vec<(usize, usize)> =
            schedule.entries.iter().take(8).map(|e| (e.week, e.day)).collect();
        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (1, 0)]
        );
    }

    #[test]
    fn test_dates_are_consecutive_days() {
        let matrix = compile("HI", &Font::builtin()).expect("compiles");
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        let schedule = generate(&matrix, start, Multiplier::ONE).expect("schedules");

        assert_eq!(schedule.entries[0].date, start.datetime());
        for pair in schedule.entries.windows(2) {
            assert_eq!(pair[1].unix_seconds() - pair[0].unix_seconds(), 86_400);
        }
    }

    #[test]
    fn test_total_scales_with_multiplier() {
        let matrix = compile("OK!", &Font::builtin()).expect("compiles");
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        let multiplier = Multiplier::new(3).expect("positive");
        let schedule = generate(&matrix, start, multiplier).expect("schedules");
        let summed: u64 = schedule.entries.iter().map(|e| u64::from(e.commits)).sum();
        assert_eq!(summed, schedule.total_commits);
        assert_eq!(schedule.total_commits, matrix.total() * 3);
    }

    #[test]
    fn test_cells_passed_is_one_indexed() {
        let matrix = compile("I", &Font::builtin()).expect("compiles");
        let start = StartDate::resolve(date(2024, 1, 3)).expect("in range");
        let schedule = generate(&matrix, start, Multiplier::ONE).expect("schedules");
        assert_eq!(schedule.entries[0].cells_passed(), 1);
        assert_eq!(schedule.entries.last().map(ScheduleEntry::cells_passed), Some(schedule.len()));
    }
}
