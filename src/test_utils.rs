//! Fixtures shared by the unit tests.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::math::CalendarMath;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test dates must be valid")
}

pub const fn sunday_first() -> CalendarMath {
    CalendarMath::new(Weekday::Sun)
}

/// The 1st of every month from January of `first_year` to December of `last_year`
pub fn each_month(first_year: i32, last_year: i32) -> impl Iterator<Item = NaiveDate> {
    (first_year..=last_year).flat_map(|year| (1..=12).map(move |month| date(year, month, 1)))
}

pub fn month_and_year(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
