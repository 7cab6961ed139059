/// Number of days in a week, and the width of every grid row
pub const DAYS_PER_WEEK: u8 = 7;

/// Smallest number of rows a month grid can span (a 28-day February starting on the first weekday)
pub const MIN_GRID_WEEKS: usize = 4;

/// Largest number of rows a month grid can span
pub const MAX_GRID_WEEKS: usize = 6;

/// Upper bound on the number of cells in a generated grid
pub const MAX_GRID_DAYS: usize = MAX_GRID_WEEKS * DAYS_PER_WEEK as usize;

/// Index of the first weekday under any convention
pub const FIRST_WEEKDAY_INDEX: u8 = 1;

/// First day of month, used for lower bounds
pub const MIN_DAY: u32 = 1;

/// Last possible day of a month
pub const MAX_DAY: u32 = 31;

/// Length of the shortest month (February in a common year)
pub const MIN_MONTH_DAYS: u32 = 28;

/// Short weekday headers, Sunday first
pub const WEEKDAY_SYMBOLS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// `chrono` format for a day cell label ("1" through "31", no padding)
pub const DAY_LABEL_FORMAT: &str = "%-d";

/// `chrono` format for the default month title ("April 2024")
pub const MONTH_TITLE_FORMAT: &str = "%B %Y";

/// Range separator (ISO 8601 interval notation)
pub const RANGE_SEPARATOR: char = '/';
