//! Month grid generation.
//!
//! A grid is the full run of days a month view shows: the month itself plus
//! filler days from the neighbouring months so that every row is a complete
//! week. Grids are regenerated from scratch on every change; at most 42 cells
//! are built, so nothing is cached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, MAX_GRID_DAYS, MAX_GRID_WEEKS, MIN_GRID_WEEKS};
use crate::math::{CalendarMath, MetadataError};
use crate::prelude::*;
use crate::range::SelectionRange;
use crate::types::DayDescriptor;

/// The generated cells for one displayed month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct MonthGrid {
    month: NaiveDate,
    #[deref]
    days:  Vec<DayDescriptor>,
}

/// Unvalidated grid as read from a serialized form
#[derive(Deserialize)]
struct GridParts {
    month: NaiveDate,
    days:  Vec<DayDescriptor>,
}

/// A deserialized grid that is not a run of whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid grid length: {0} days (must be {min}-{max} whole weeks)", min = MIN_GRID_WEEKS, max = MAX_GRID_WEEKS)]
pub struct GridLengthError(pub usize);

impl TryFrom<GridParts> for MonthGrid {
    type Error = GridLengthError;

    fn try_from(parts: GridParts) -> Result<Self, Self::Error> {
        let len = parts.days.len();
        let min_days = MIN_GRID_WEEKS * usize::from(DAYS_PER_WEEK);
        if len % usize::from(DAYS_PER_WEEK) != 0 || !(min_days..=MAX_GRID_DAYS).contains(&len) {
            return Err(GridLengthError(len));
        }
        Ok(Self {
            month: parts.month,
            days:  parts.days,
        })
    }
}

impl MonthGrid {
    /// The 1st of the displayed month, for the renderer's month/year label
    pub const fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn days(&self) -> &[DayDescriptor] {
        &self.days
    }

    pub fn into_days(self) -> Vec<DayDescriptor> {
        self.days
    }

    /// Rows of exactly seven days, in display order
    pub fn weeks(&self) -> impl Iterator<Item = &[DayDescriptor]> {
        self.days.chunks_exact(usize::from(DAYS_PER_WEEK))
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / usize::from(DAYS_PER_WEEK)
    }

    /// The cell at a grid position, as reported by a tap on that cell
    pub fn day_at(&self, position: usize) -> Option<&DayDescriptor> {
        self.days.get(position)
    }

    /// Filler days before the 1st
    pub fn leading_filler(&self) -> usize {
        self.days.iter().take_while(|day| day.is_filler()).count()
    }

    /// Filler days after the month's last day
    pub fn trailing_filler(&self) -> usize {
        self.days.iter().rev().take_while(|day| day.is_filler()).count()
    }

    /// Cells inside the selected range, filler days included
    pub fn selected(&self) -> impl Iterator<Item = &DayDescriptor> {
        self.days.iter().filter(|day| day.is_selected())
    }
}

/// Builds month grids under one week-start convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MonthGridGenerator {
    math: CalendarMath,
}

impl MonthGridGenerator {
    pub const fn new(math: CalendarMath) -> Self {
        Self { math }
    }

    pub const fn math(&self) -> CalendarMath {
        self.math
    }

    /// Generates the grid for the month containing `base_date`, flagging the
    /// cells that fall inside `selection`.
    ///
    /// The result is a pure function of the two inputs. Its length is always
    /// a multiple of seven and its first cell falls on the first weekday.
    ///
    /// # Errors
    /// Returns `MetadataError` if the month or a filler day cannot be resolved.
    pub fn generate(&self, base_date: NaiveDate, selection: &SelectionRange) -> Result<MonthGrid, MetadataError> {
        let metadata = self.math.month_metadata(base_date)?;
        let first_day = metadata.first_day();
        let last_day = self.math.last_day_of_month(base_date)?;

        let leading = i64::from(metadata.leading_filler());
        let trailing = i64::from(self.math.trailing_filler(last_day));
        // Filler past the representable range means the month cannot be shown
        let unresolved = |_: MetadataError| MetadataError::MonthBounds { date: base_date };
        let grid_start = self.math.add_days(first_day, -leading).map_err(unresolved)?;
        let cell_count = leading + i64::from(metadata.day_count()) + trailing;

        let days = (0..cell_count)
            .map(|offset| -> Result<DayDescriptor, MetadataError> {
                let date = self.math.add_days(grid_start, offset).map_err(unresolved)?;
                let in_month = first_day <= date && date <= last_day;
                Ok(DayDescriptor::new(date, selection.contains(date), in_month))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::trace!(
            "generated {} cells for {}: {leading} leading, {trailing} trailing",
            days.len(),
            first_day.format("%Y-%m")
        );

        Ok(MonthGrid {
            month: first_day,
            days,
        })
    }
}
