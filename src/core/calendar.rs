use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

/// Six full weeks, so every month fits regardless of its first weekday.
pub const CALENDAR_CELLS: usize = 42;

/// Date format shared by calendar cells and [`crate::domain::DateTimeSelection`].
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Month currently shown by the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Month given by a zero-based month index.
    pub fn from_index(year: i32, month_index: u32) -> Option<Self> {
        Self::new(year, month_index + 1)
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn month_index(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Moves the cursor by whole months. Out-of-range results keep the cursor.
    pub fn shift(&self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        shifted.map(|first| Self { first }).unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    /// Title such as `October 2026`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub day: u32,
    pub date: String,
    pub is_current_month: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl CalendarCell {
    /// Cells the picker lets the user choose.
    pub fn is_selectable(&self) -> bool {
        self.is_current_month && !self.is_past
    }
}

/// Lays out the 42-cell grid for `month`, starting at the Sunday on or
/// before the first of the month.
pub fn generate_calendar(
    month: MonthCursor,
    selected_date: &str,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let first = month.first_day();
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let start = first - Duration::days(lead);

    (0..CALENDAR_CELLS)
        .filter_map(|offset| start.checked_add_signed(Duration::days(offset as i64)))
        .map(|date| {
            let iso = date.format(ISO_DATE).to_string();
            CalendarCell {
                day: date.day(),
                is_current_month: month.contains(date),
                is_past: date < today,
                is_today: date == today,
                is_selected: !selected_date.is_empty() && iso == selected_date,
                date: iso,
            }
        })
        .collect()
}
