//! Month-grid generation and date-range selection for calendar pickers.
//!
//! The crate computes what a month view must show (the month's days plus
//! filler days from the neighbouring months, padded to whole weeks) and keeps
//! the selected range up to date as the user picks a start and an end date.
//! Drawing the grid and handling input events is left to the caller, which
//! talks to a [`CalendarEngine`].

mod config;
mod consts;
mod engine;
mod grid;
mod math;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use config::CalendarConfig;
pub use consts::*;
pub use engine::{CalendarEngine, Clock, FixedClock, SystemClock};
pub use grid::{GridLengthError, MonthGrid, MonthGridGenerator};
pub use math::{CalendarMath, MetadataError, days_in_month_of, is_leap_year};
pub use range::{EditMode, RangeError, RangeSelectionState, SelectionRange};
pub use types::{DayDescriptor, MonthMetadata, WeekdayIndex};

/// Re-exported so callers can name dates and weekdays without a direct dependency.
pub use chrono::{NaiveDate, Weekday};
