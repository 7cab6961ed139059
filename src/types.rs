use crate::MetadataError;
use crate::consts::{DAY_LABEL_FORMAT, DAYS_PER_WEEK, FIRST_WEEKDAY_INDEX};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A day-of-week position guaranteed to be in the range `1..=7`, counted from
/// the configured first day of the week (1 = that day).
/// Uses `NonZeroU8` internally, so 0 is not a valid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekdayIndex(NonZeroU8);

impl WeekdayIndex {
    /// Creates a new `WeekdayIndex`, validating that it's non-zero and <= 7
    ///
    /// # Errors
    /// Returns `MetadataError::WeekdayIndex` if the value is 0 or > 7.
    pub fn new(value: u8) -> Result<Self, MetadataError> {
        let non_zero = NonZeroU8::new(value).ok_or(MetadataError::WeekdayIndex(value))?;
        if value > DAYS_PER_WEEK {
            return Err(MetadataError::WeekdayIndex(value));
        }
        Ok(Self(non_zero))
    }

    /// Position of `weekday` in a week that starts on `first`
    pub fn of(weekday: Weekday, first: Weekday) -> Self {
        let offset = (weekday.num_days_from_sunday() + u32::from(DAYS_PER_WEEK)
            - first.num_days_from_sunday())
            % u32::from(DAYS_PER_WEEK);
        // offset is in 0..7, so the narrowing and the add cannot overflow
        Self(NonZeroU8::MIN.saturating_add(offset as u8))
    }

    /// Returns the index value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Number of days between the first day of the week and this one
    #[inline]
    pub const fn offset(self) -> u8 {
        self.0.get() - FIRST_WEEKDAY_INDEX
    }

    /// The weekday this index names in a week that starts on `first`
    pub fn weekday(self, first: Weekday) -> Weekday {
        (0..self.offset()).fold(first, |day, _| day.succ())
    }
}

impl TryFrom<u8> for WeekdayIndex {
    type Error = MetadataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekdayIndex> for u8 {
    fn from(index: WeekdayIndex) -> Self {
        index.0.get()
    }
}

impl fmt::Display for WeekdayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout facts about one month, recomputed for every grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthMetadata {
    day_count:     u32,
    first_day:     NaiveDate,
    first_weekday: WeekdayIndex,
}

impl MonthMetadata {
    pub(crate) const fn new(day_count: u32, first_day: NaiveDate, first_weekday: WeekdayIndex) -> Self {
        Self {
            day_count,
            first_day,
            first_weekday,
        }
    }

    /// Number of days in the month (28 through 31)
    pub const fn day_count(&self) -> u32 {
        self.day_count
    }

    /// The 1st of the month
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Which day of the week the 1st falls on
    pub const fn first_weekday(&self) -> WeekdayIndex {
        self.first_weekday
    }

    /// Days borrowed from the previous month to fill the first row
    pub const fn leading_filler(&self) -> u8 {
        self.first_weekday.offset()
    }
}

/// One cell of a month grid.
///
/// The label is derived from `date` on demand. Serialized output includes it
/// so that a renderer on the far side of a serialization boundary does not
/// need a date formatter of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct DayDescriptor {
    date:                  NaiveDate,
    is_selected:           bool,
    is_in_displayed_month: bool,
}

impl DayDescriptor {
    pub const fn new(date: NaiveDate, is_selected: bool, is_in_displayed_month: bool) -> Self {
        Self {
            date,
            is_selected,
            is_in_displayed_month,
        }
    }

    /// The calendar day this cell represents
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Day-of-month number as displayed in the cell ("1" through "31")
    pub fn label(&self) -> String {
        self.date.format(DAY_LABEL_FORMAT).to_string()
    }

    /// Day-of-month number
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// True when the date lies within the selected range, both ends inclusive
    pub const fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// True for days of the displayed month, false for filler days
    pub const fn is_in_displayed_month(&self) -> bool {
        self.is_in_displayed_month
    }

    pub const fn is_filler(&self) -> bool {
        !self.is_in_displayed_month
    }
}

impl Serialize for DayDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DayDescriptor", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("label", &self.label())?;
        state.serialize_field("is_selected", &self.is_selected)?;
        state.serialize_field("is_in_displayed_month", &self.is_in_displayed_month)?;
        state.end()
    }
}
