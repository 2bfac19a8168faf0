use serde::Serialize;
use std::fmt;
use time::{Month, Weekday};

/// Calendar month key for timelines. Orders by (year, month), never by label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8, // 1..=12
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> Self {
        assert!((1..=12).contains(&month), "Month must be 1..=12");
        Self { year, month }
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// "MonthName-Year", e.g. "January-2023".
    pub fn label(self) -> String {
        format!("{}-{}", self.month_name(), self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub fn month_name(m: Month) -> &'static str {
    MONTH_NAMES[(u8::from(m) - 1) as usize]
}

pub fn weekday_name(d: Weekday) -> &'static str {
    match d {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

/// One-hour bucket starting at `hour`. Renders as "h-(h+1)", with 23 wrapping to "23-0".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourPeriod(u8);

impl HourPeriod {
    pub fn new(hour: u8) -> Self {
        assert!(hour < 24, "hour must be 0..=23");
        Self(hour)
    }
    pub fn hour(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HourPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 23 {
            write!(f, "23-0")
        } else {
            write!(f, "{}-{}", self.0, self.0 + 1)
        }
    }
}

impl Serialize for HourPeriod {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}
