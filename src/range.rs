use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{RANGE_SEPARATOR, prelude::*};

/// An inclusive range of calendar days.
/// The start date is always less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct SelectionRange {
    start: NaiveDate,
    end:   NaiveDate,
}

/// Error type for building a range from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Error parsing a date component.
    #[error("Invalid date in range: {0}")]
    ParseError(#[from] chrono::ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl SelectionRange {
    /// Creates a new range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end:   date,
        }
    }

    /// Returns the first selected day
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last selected day
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given date, both ends inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn day_count(&self) -> u64 {
        self.end.signed_duration_since(self.start).num_days().unsigned_abs() + 1
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

impl FromStr for SelectionRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<NaiveDate>()?;
                let end = end_str.trim().parse::<NaiveDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for SelectionRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SelectionRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which end of the range the next selected date will set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// The next selection starts a fresh single-day range
    #[default]
    #[display(fmt = "start")]
    Start,
    /// The next selection extends the range
    #[display(fmt = "end")]
    End,
}

impl EditMode {
    /// The other mode
    pub const fn toggled(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// The selected range together with the mode that decides how the next
/// selected date changes it.
///
/// `select` never changes the mode. Only `toggle_editing_end`,
/// `set_edit_mode` and `reset` do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeSelectionState {
    range: SelectionRange,
    mode:  EditMode,
}

impl RangeSelectionState {
    /// A single-day selection on `date`, editing the start
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            range: SelectionRange::single(date),
            mode:  EditMode::Start,
        }
    }

    pub const fn range(&self) -> SelectionRange {
        self.range
    }

    pub const fn edit_mode(&self) -> EditMode {
        self.mode
    }

    pub const fn is_editing_start(&self) -> bool {
        matches!(self.mode, EditMode::Start)
    }

    /// Flips which end of the range the next `select` targets
    pub const fn toggle_editing_end(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub const fn set_edit_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Applies a selected date and returns the updated range.
    ///
    /// Editing the start collapses the range onto `date`. Editing the end
    /// moves the end forward to `date`, or moves the start back to `date`
    /// when it falls before the current start. In that last case the end is
    /// kept as it was.
    pub fn select(&mut self, date: NaiveDate) -> SelectionRange {
        self.range = match self.mode {
            EditMode::Start => SelectionRange::single(date),
            EditMode::End if date >= self.range.start => SelectionRange {
                start: self.range.start,
                end:   date,
            },
            // date < start <= end, so the ordering still holds
            EditMode::End => SelectionRange {
                start: date,
                end:   self.range.end,
            },
        };
        self.range
    }

    /// Collapses the range onto `date` and goes back to editing the start
    pub const fn reset(&mut self, date: NaiveDate) {
        self.range = SelectionRange::single(date);
        self.mode = EditMode::Start;
    }
}
