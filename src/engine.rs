//! The calendar engine a rendering layer drives.
//!
//! The engine owns the displayed month and the selection, and turns the
//! controls a picker exposes (previous, next, refresh, start/end mode, tap on
//! a day) into plain method calls. Each mutation returns the regenerated grid
//! and commits its new state only once that grid has been built, so an error
//! leaves the engine exactly as it was.

use chrono::{Datelike, NaiveDate};

use crate::config::CalendarConfig;
use crate::consts::{MIN_DAY, MONTH_TITLE_FORMAT};
use crate::grid::{MonthGrid, MonthGridGenerator};
use crate::math::MetadataError;
use crate::range::{EditMode, RangeSelectionState, SelectionRange};

/// Source of the current date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads today's date from the local system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}

/// Displayed month plus range selection, for one picker.
///
/// Not meant to be shared between threads: callers serialize their calls the
/// same way user input events arrive, one at a time.
#[derive(Debug, Clone)]
pub struct CalendarEngine<C = SystemClock> {
    config:    CalendarConfig,
    generator: MonthGridGenerator,
    base_date: NaiveDate,
    selection: RangeSelectionState,
    clock:     C,
}

impl CalendarEngine<SystemClock> {
    /// An engine opened on the local system date
    pub fn with_system_clock(config: CalendarConfig) -> Self {
        Self::new(config, SystemClock)
    }
}

impl<C: Clock> CalendarEngine<C> {
    /// Opens on today's month with today selected, editing the start.
    pub fn new(config: CalendarConfig, clock: C) -> Self {
        let today = clock.today();
        Self {
            config,
            generator: MonthGridGenerator::new(config.math()),
            base_date: today,
            selection: RangeSelectionState::new(today),
            clock,
        }
    }

    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Any day of the displayed month; navigation keeps the day-of-month where the target month allows it
    pub const fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    pub const fn selection(&self) -> &RangeSelectionState {
        &self.selection
    }

    pub const fn range(&self) -> SelectionRange {
        self.selection.range()
    }

    pub const fn edit_mode(&self) -> EditMode {
        self.selection.edit_mode()
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Regenerates the grid for the displayed month and current selection.
    ///
    /// # Errors
    /// Returns `MetadataError` if the displayed month cannot be resolved.
    pub fn current_grid(&self) -> Result<MonthGrid, MetadataError> {
        self.generator.generate(self.base_date, &self.selection.range())
    }

    /// The 1st of the displayed month. Formatting it is left to the renderer.
    pub fn current_month_label(&self) -> NaiveDate {
        // The 1st of a representable date's month is always representable.
        self.base_date.with_day(MIN_DAY).unwrap_or(self.base_date)
    }

    /// English month title such as "April 2024", for renderers without a
    /// localized formatter of their own
    pub fn month_title(&self) -> String {
        self.current_month_label().format(MONTH_TITLE_FORMAT).to_string()
    }

    /// Weekday column headers in grid order
    pub fn weekday_symbols(&self) -> [&'static str; 7] {
        self.generator.math().weekday_symbols()
    }

    /// Moves the display by `delta` months, forwards or backwards.
    ///
    /// # Errors
    /// Returns `MetadataError` if the target month is not representable. The
    /// displayed month is unchanged in that case.
    pub fn navigate_month(&mut self, delta: i32) -> Result<MonthGrid, MetadataError> {
        let base_date = self.generator.math().add_months(self.base_date, delta)?;
        let grid = self.generator.generate(base_date, &self.selection.range())?;

        log::debug!("navigated {delta:+} months from {} to {base_date}", self.base_date);
        self.base_date = base_date;
        Ok(grid)
    }

    /// # Errors
    /// See [`Self::navigate_month`].
    pub fn previous_month(&mut self) -> Result<MonthGrid, MetadataError> {
        self.navigate_month(-1)
    }

    /// # Errors
    /// See [`Self::navigate_month`].
    pub fn next_month(&mut self) -> Result<MonthGrid, MetadataError> {
        self.navigate_month(1)
    }

    /// Shows today's month and collapses the selection onto today, editing
    /// the start.
    ///
    /// # Errors
    /// Returns `MetadataError` if today's month cannot be resolved; nothing
    /// changes in that case.
    pub fn reset_to_today(&mut self) -> Result<MonthGrid, MetadataError> {
        let today = self.clock.today();
        let mut selection = self.selection;
        selection.reset(today);
        let grid = self.generator.generate(today, &selection.range())?;

        log::debug!("reset to {today}");
        self.base_date = today;
        self.selection = selection;
        Ok(grid)
    }

    /// Switches which end of the range the next selection sets and returns
    /// the new mode. The grid does not change.
    pub fn toggle_editing_end(&mut self) -> EditMode {
        self.selection.toggle_editing_end();
        log::debug!("editing {}", self.selection.edit_mode());
        self.selection.edit_mode()
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.selection.set_edit_mode(mode);
        log::debug!("editing {mode}");
    }

    /// Applies a selected date to the range and regenerates the grid for the
    /// displayed month. Selecting a day outside that month does not navigate.
    ///
    /// # Errors
    /// Returns `MetadataError` if the displayed month cannot be resolved; the
    /// selection is unchanged in that case.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<MonthGrid, MetadataError> {
        let mut selection = self.selection;
        let range = selection.select(date);
        let grid = self.generator.generate(self.base_date, &range)?;

        log::debug!("selected {date} while editing {}: range is now {range}", selection.edit_mode());
        self.selection = selection;
        Ok(grid)
    }

    /// Selects the date shown at `position` in the current grid, as reported
    /// by a tap on that cell. Returns `None` when the position is outside the
    /// grid.
    ///
    /// # Errors
    /// Returns `MetadataError` if the displayed month cannot be resolved.
    pub fn select_at(&mut self, position: usize) -> Result<Option<MonthGrid>, MetadataError> {
        let grid = self.current_grid()?;
        let Some(day) = grid.day_at(position) else {
            log::debug!("ignored tap at {position}: grid has {} cells", grid.len());
            return Ok(None);
        };
        self.select_date(day.date()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::Weekday;

    use super::*;
    use crate::test_utils::{date, month_and_year};

    fn engine_on(today: NaiveDate) -> CalendarEngine<FixedClock> {
        CalendarEngine::new(CalendarConfig::default(), FixedClock(today))
    }

    #[test]
    fn test_initial_state() {
        let engine = engine_on(date(2024, 4, 17));

        assert_eq!(engine.base_date(), date(2024, 4, 17));
        assert_eq!(engine.range().dates(), (date(2024, 4, 17), date(2024, 4, 17)));
        assert_eq!(engine.edit_mode(), EditMode::Start);
        assert_eq!(engine.current_month_label(), date(2024, 4, 1));
        assert_eq!(engine.month_title(), "April 2024");
    }

    #[test]
    fn test_current_grid_marks_today() {
        let engine = engine_on(date(2024, 4, 17));
        let grid = engine.current_grid().unwrap();

        let selected: Vec<_> = grid.selected().map(|day| day.date()).collect();
        assert_eq!(selected, [date(2024, 4, 17)]);
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn test_navigate_month() {
        let mut engine = engine_on(date(2024, 4, 17));

        let grid = engine.next_month().unwrap();
        assert_eq!(grid.month(), date(2024, 5, 1));
        assert_eq!(engine.current_month_label(), date(2024, 5, 1));

        let grid = engine.navigate_month(-13).unwrap();
        assert_eq!(grid.month(), date(2023, 4, 1));
        assert_eq!(engine.month_title(), "April 2023");
    }

    #[test]
    fn test_navigation_round_trip() {
        for start in [date(2024, 4, 17), date(2024, 1, 31), date(2023, 12, 31), date(2024, 3, 31)] {
            let mut engine = engine_on(start);
            engine.next_month().unwrap();
            engine.previous_month().unwrap();
            assert_eq!(month_and_year(engine.base_date()), month_and_year(start), "from {start}");
        }
    }

    #[test]
    fn test_navigation_clamps_day_of_month() {
        let mut engine = engine_on(date(2024, 1, 31));
        engine.next_month().unwrap();
        assert_eq!(engine.base_date(), date(2024, 2, 29));
        engine.previous_month().unwrap();
        assert_eq!(engine.base_date(), date(2024, 1, 29));
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let mut engine = engine_on(date(2024, 4, 17));
        let grid = engine.next_month().unwrap();

        assert_eq!(engine.range().dates(), (date(2024, 4, 17), date(2024, 4, 17)));
        assert_eq!(grid.selected().count(), 0);
    }

    #[test]
    fn test_select_range_flow() {
        let mut engine = engine_on(date(2024, 3, 10));

        engine.select_date(date(2024, 3, 10)).unwrap();
        assert_eq!(engine.toggle_editing_end(), EditMode::End);

        let grid = engine.select_date(date(2024, 3, 14)).unwrap();
        assert_eq!(engine.range().dates(), (date(2024, 3, 10), date(2024, 3, 14)));
        assert_eq!(grid.selected().count(), 5);

        let grid = engine.select_date(date(2024, 3, 5)).unwrap();
        assert_eq!(engine.range().dates(), (date(2024, 3, 5), date(2024, 3, 14)));
        assert_eq!(grid.selected().count(), 10);
        assert_eq!(engine.edit_mode(), EditMode::End);
    }

    #[test]
    fn test_select_in_start_mode_collapses() {
        let mut engine = engine_on(date(2024, 3, 10));
        engine.set_edit_mode(EditMode::End);
        engine.select_date(date(2024, 3, 15)).unwrap();
        engine.set_edit_mode(EditMode::Start);

        engine.select_date(date(2024, 3, 20)).unwrap();
        assert_eq!(engine.range().dates(), (date(2024, 3, 20), date(2024, 3, 20)));
    }

    #[test]
    fn test_select_outside_displayed_month_does_not_navigate() {
        let mut engine = engine_on(date(2024, 4, 17));
        engine.toggle_editing_end();

        let grid = engine.select_date(date(2024, 5, 3)).unwrap();
        assert_eq!(engine.current_month_label(), date(2024, 4, 1));
        assert_eq!(grid.month(), date(2024, 4, 1));

        // Trailing filler days inside the range are flagged
        let trailing: Vec<_> = grid.iter().filter(|day| day.is_filler() && day.is_selected()).collect();
        assert_eq!(trailing.len(), 3);
    }

    #[test]
    fn test_toggle_does_not_change_grid() {
        let mut engine = engine_on(date(2024, 4, 17));
        let before = engine.current_grid().unwrap();
        engine.toggle_editing_end();
        assert_eq!(engine.current_grid().unwrap(), before);
        assert_eq!(engine.toggle_editing_end(), EditMode::Start);
    }

    #[test]
    fn test_select_at_position() {
        let mut engine = engine_on(date(2024, 4, 17));

        // Position 0 is the leading filler day 2024-03-31
        let grid = engine.select_at(0).unwrap().unwrap();
        assert_eq!(engine.range().dates(), (date(2024, 3, 31), date(2024, 3, 31)));
        assert_eq!(grid.month(), date(2024, 4, 1));
        assert!(grid.day_at(0).unwrap().is_selected());

        assert!(engine.select_at(35).unwrap().is_none());
        assert_eq!(engine.range().start(), date(2024, 3, 31));
    }

    #[test]
    fn test_reset_to_today() {
        let today = Rc::new(Cell::new(date(2024, 4, 17)));
        let clock = {
            let today = Rc::clone(&today);
            move || today.get()
        };
        let mut engine = CalendarEngine::new(CalendarConfig::default(), clock);

        engine.navigate_month(5).unwrap();
        engine.toggle_editing_end();
        engine.select_date(date(2024, 9, 30)).unwrap();

        today.set(date(2024, 6, 2));
        let grid = engine.reset_to_today().unwrap();

        assert_eq!(engine.base_date(), date(2024, 6, 2));
        assert_eq!(engine.range().dates(), (date(2024, 6, 2), date(2024, 6, 2)));
        assert_eq!(engine.edit_mode(), EditMode::Start);
        assert_eq!(grid.month(), date(2024, 6, 1));
        assert_eq!(grid.selected().count(), 1);
    }

    #[test]
    fn test_monday_first_config() {
        let config = CalendarConfig::default().with_first_weekday(Weekday::Mon);
        let engine = CalendarEngine::new(config, FixedClock(date(2024, 4, 17)));

        assert_eq!(engine.weekday_symbols()[0], "MON");
        let grid = engine.current_grid().unwrap();
        assert_eq!(grid.leading_filler(), 0);
        assert_eq!(grid.trailing_filler(), 5);
    }

    #[test]
    fn test_failed_navigation_leaves_state_unchanged() {
        let mut engine = engine_on(NaiveDate::MAX);

        let result = engine.next_month();
        assert!(matches!(result, Err(MetadataError::MonthOffset { months: 1, .. })));
        assert_eq!(engine.base_date(), NaiveDate::MAX);
    }

    #[test]
    fn test_failed_selection_leaves_state_unchanged() {
        let mut engine = engine_on(NaiveDate::MAX);
        let before = *engine.selection();

        // The last representable month cannot be padded to a full week
        let result = engine.select_date(date(2024, 1, 1));
        assert!(result.is_err());
        assert_eq!(*engine.selection(), before);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CalendarEngine<FixedClock>>();
        assert_send::<CalendarEngine>();
    }
}
