//! Gregorian month metadata and day/month arithmetic.

use crate::consts::{DAYS_PER_WEEK, MAX_DAY, MIN_DAY, MIN_MONTH_DAYS, WEEKDAY_SYMBOLS};
use crate::types::{MonthMetadata, WeekdayIndex};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Error raised when the calendar cannot resolve metadata for a date.
///
/// Every date `chrono` can represent has resolvable month bounds, so in
/// practice this only surfaces at the very edges of the representable range.
/// Callers should treat it as a broken precondition rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// The first or last day of the month containing `date` is not representable.
    #[error("Cannot resolve month bounds for {date}")]
    MonthBounds { date: NaiveDate },

    /// Offsetting `date` by `days` leaves the representable range.
    #[error("Cannot offset {date} by {days} days")]
    DayOffset { date: NaiveDate, days: i64 },

    /// Offsetting `date` by `months` leaves the representable range.
    #[error("Cannot offset {date} by {months} months")]
    MonthOffset { date: NaiveDate, months: i32 },

    /// A weekday index outside `1..=7`.
    #[error("Invalid weekday index: {0} (must be 1-7)")]
    WeekdayIndex(u8),
}

/// Calendar arithmetic under one first-day-of-week convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMath {
    first_weekday: Weekday,
}

impl Default for CalendarMath {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl CalendarMath {
    pub const fn new(first_weekday: Weekday) -> Self {
        Self { first_weekday }
    }

    /// The day that opens every grid row
    pub const fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Number of days in the month containing `date`.
    ///
    /// # Errors
    /// Returns `MetadataError::MonthBounds` if the month's last day is not representable.
    pub fn days_in_month(&self, date: NaiveDate) -> Result<u32, MetadataError> {
        self.last_day_of_month(date).map(|last| last.day())
    }

    /// The 1st of the month containing `date`.
    ///
    /// # Errors
    /// Returns `MetadataError::MonthBounds` if the 1st is not representable.
    pub fn first_day_of_month(&self, date: NaiveDate) -> Result<NaiveDate, MetadataError> {
        date.with_day(MIN_DAY).ok_or(MetadataError::MonthBounds { date })
    }

    /// The last day of the month containing `date`.
    ///
    /// # Errors
    /// Returns `MetadataError::MonthBounds` if the last day is not representable.
    pub fn last_day_of_month(&self, date: NaiveDate) -> Result<NaiveDate, MetadataError> {
        last_day_in(date).ok_or(MetadataError::MonthBounds { date })
    }

    /// Position of `date` within its week, 1 being the configured first weekday
    pub fn weekday_index(&self, date: NaiveDate) -> WeekdayIndex {
        WeekdayIndex::of(date.weekday(), self.first_weekday)
    }

    /// Moves `date` by a signed number of days.
    ///
    /// # Errors
    /// Returns `MetadataError::DayOffset` if the result is not representable.
    pub fn add_days(&self, date: NaiveDate, days: i64) -> Result<NaiveDate, MetadataError> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            date.checked_add_days(magnitude)
        } else {
            date.checked_sub_days(magnitude)
        };
        shifted.ok_or(MetadataError::DayOffset { date, days })
    }

    /// Moves `date` by a signed number of months, clamping the day to the
    /// end of the target month (Jan 31 + 1 month is the last day of February).
    ///
    /// # Errors
    /// Returns `MetadataError::MonthOffset` if the result is not representable.
    pub fn add_months(&self, date: NaiveDate, months: i32) -> Result<NaiveDate, MetadataError> {
        let magnitude = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            date.checked_add_months(magnitude)
        } else {
            date.checked_sub_months(magnitude)
        };
        shifted.ok_or(MetadataError::MonthOffset { date, months })
    }

    /// Day count, first day and first weekday of the month containing `date`.
    ///
    /// # Errors
    /// Returns `MetadataError::MonthBounds` if the month cannot be resolved.
    pub fn month_metadata(&self, date: NaiveDate) -> Result<MonthMetadata, MetadataError> {
        let first_day = self.first_day_of_month(date)?;
        let day_count = self.days_in_month(date)?;
        Ok(MonthMetadata::new(day_count, first_day, self.weekday_index(first_day)))
    }

    /// Days needed after `last_day` to complete its week
    pub fn trailing_filler(&self, last_day: NaiveDate) -> u8 {
        (DAYS_PER_WEEK - self.weekday_index(last_day).get()) % DAYS_PER_WEEK
    }

    /// Number of grid rows the month containing `date` occupies (4 to 6).
    ///
    /// # Errors
    /// Returns `MetadataError::MonthBounds` if the month cannot be resolved.
    pub fn weeks_in_month(&self, date: NaiveDate) -> Result<u32, MetadataError> {
        let metadata = self.month_metadata(date)?;
        let trailing = self.trailing_filler(self.last_day_of_month(date)?);
        let cells = u32::from(metadata.leading_filler()) + metadata.day_count() + u32::from(trailing);
        Ok(cells / u32::from(DAYS_PER_WEEK))
    }

    /// Short weekday headers in grid column order
    pub fn weekday_symbols(&self) -> [&'static str; 7] {
        let start = self.first_weekday.num_days_from_sunday() as usize;
        std::array::from_fn(|column| WEEKDAY_SYMBOLS[(start + column) % WEEKDAY_SYMBOLS.len()])
    }
}

// Helper functions

/// Whether `year` has a February 29th. Years outside `chrono`'s range are never leap years.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_yo_opt(year, 366).is_some()
}

/// Number of days in `month` (1-12) of `year`, or `None` for an invalid month
/// or a year outside `chrono`'s range.
pub fn days_in_month_of(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, MIN_DAY)
        .and_then(last_day_in)
        .map(|last| last.day())
}

// Probes downwards from the 31st, so the last representable month still resolves
fn last_day_in(date: NaiveDate) -> Option<NaiveDate> {
    (MIN_MONTH_DAYS..=MAX_DAY).rev().find_map(|day| date.with_day(day))
}
