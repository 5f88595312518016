use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr, sync::OnceLock};
use thiserror::Error as ThisError;
use time::{Date as TimeDate, Month, format_description::FormatItem};

///
/// DateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum DateError {
    #[error("invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidComponents { year: i32, month: u8, day: u8 },

    #[error("invalid date string: '{input}'")]
    ParseFailed { input: String },
}

///
/// DateStyle
///
/// Display styles for dates: `Full` renders "01 January 2023", `Short`
/// renders "01 Jan 2023", `Iso` renders "2023-01-01".
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum DateStyle {
    Full,
    Iso,
    Short,
}

///
/// Date
///
/// Calendar date stored as days since the Unix epoch.
/// Construction always validates, so the stored offset is always a real
/// calendar date.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(i32);

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        let calendar_month = Month::try_from(month)
            .map_err(|_| DateError::InvalidComponents { year, month, day })?;
        let date = TimeDate::from_calendar_date(year, calendar_month, day)
            .map_err(|_| DateError::InvalidComponents { year, month, day })?;

        Ok(Self::from_time(date))
    }

    /// Parse an ISO `YYYY-MM-DD` date string.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let date = TimeDate::parse(input, iso_format()).map_err(|_| DateError::ParseFailed {
            input: input.to_owned(),
        })?;

        Ok(Self::from_time(date))
    }

    #[must_use]
    pub const fn days_since_epoch(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.to_time().year()
    }

    #[must_use]
    pub fn month(self) -> u8 {
        u8::from(self.to_time().month())
    }

    #[must_use]
    pub fn day(self) -> u8 {
        self.to_time().day()
    }

    /// Render the date in the given display style.
    #[must_use]
    pub fn format(self, style: DateStyle) -> String {
        let date = self.to_time();
        match style {
            DateStyle::Full => format!(
                "{:02} {} {}",
                date.day(),
                month_name(date.month()),
                date.year()
            ),
            DateStyle::Iso => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            DateStyle::Short => format!(
                "{:02} {} {}",
                date.day(),
                &month_name(date.month())[..3],
                date.year()
            ),
        }
    }

    fn from_time(date: TimeDate) -> Self {
        Self(date.to_julian_day() - epoch().to_julian_day())
    }

    fn to_time(self) -> TimeDate {
        match TimeDate::from_julian_day(epoch().to_julian_day() + self.0) {
            Ok(date) => date,
            // offsets only come from valid dates via from_time
            Err(_) => unreachable!("day offset out of calendar range"),
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(DateStyle::Iso))
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;

        Self::parse(&input).map_err(de::Error::custom)
    }
}

fn epoch() -> TimeDate {
    match TimeDate::from_calendar_date(1970, Month::January, 1) {
        Ok(date) => date,
        Err(_) => unreachable!("epoch is a valid date"),
    }
}

fn iso_format() -> &'static [FormatItem<'static>] {
    static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();

    FORMAT.get_or_init(|| time::format_description::parse("[year]-[month]-[day]").unwrap())
}

const fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

///
/// TESTS
///
