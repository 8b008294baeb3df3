//! Temporal primitives: `date`, `dateTime` (and `instant`, represented as a full `dateTime`).
//!
//! FHIR dates may be partial (`2023`, `2023-01`). Comparisons between values of different
//! precision are done on the interval each value covers, via `lower_bound`/`upper_bound`.

use crate::{lexical_serde, TypeError, TypeResult};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Precision of a temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DateRepr {
    Year(i32),
    YearMonth(i32, u32),
    Day(NaiveDate),
}

/// FHIR `date`: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Date(DateRepr);

impl Date {
    /// Parses `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    ///
    /// Fails with [`TypeError::Empty`] on empty input and [`TypeError::Invalid`] for any other
    /// shape, a month outside `01..=12` or a day that is not on the calendar.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.is_empty() {
            return Err(TypeError::Empty { kind: "date" });
        }
        let invalid = || TypeError::invalid("date", input, "expected YYYY, YYYY-MM or YYYY-MM-DD");

        let parts: Vec<&str> = input.split('-').collect();
        let year = match parts.first() {
            Some(y) if y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()) => {
                y.parse::<i32>().map_err(|_| invalid())?
            }
            _ => return Err(invalid()),
        };
        let two_digits = |s: &str| -> TypeResult<u32> {
            if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse::<u32>().map_err(|_| invalid())
            } else {
                Err(invalid())
            }
        };

        match parts.len() {
            1 => Self::year(year),
            2 => Self::year_month(year, two_digits(parts[1])?),
            3 => Self::from_ymd(year, two_digits(parts[1])?, two_digits(parts[2])?),
            _ => Err(invalid()),
        }
        .map_err(|_| invalid())
    }

    /// A year-precision date. Fails unless `year` is in `1..=9999`.
    pub fn year(year: i32) -> TypeResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(TypeError::invalid(
                "date",
                &year.to_string(),
                "year must be between 0001 and 9999",
            ));
        }
        Ok(Self(DateRepr::Year(year)))
    }

    /// A month-precision date. Fails for an out-of-range year or month.
    pub fn year_month(year: i32, month: u32) -> TypeResult<Self> {
        Self::year(year)?;
        if !(1..=12).contains(&month) {
            return Err(TypeError::invalid(
                "date",
                &format!("{year:04}-{month:02}"),
                "month must be between 01 and 12",
            ));
        }
        Ok(Self(DateRepr::YearMonth(year, month)))
    }

    /// A day-precision date. Fails when the triple is not a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> TypeResult<Self> {
        Self::year(year)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|d| Self(DateRepr::Day(d)))
            .ok_or_else(|| {
                TypeError::invalid(
                    "date",
                    &format!("{year:04}-{month:02}-{day:02}"),
                    "not a calendar date",
                )
            })
    }

    /// How much of the date was given.
    pub fn precision(&self) -> DatePrecision {
        match self.0 {
            DateRepr::Year(_) => DatePrecision::Year,
            DateRepr::YearMonth(..) => DatePrecision::Month,
            DateRepr::Day(_) => DatePrecision::Day,
        }
    }

    /// The full calendar date, if the value has day precision.
    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        match self.0 {
            DateRepr::Day(d) => Some(d),
            _ => None,
        }
    }

    /// First instant covered by this date.
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        let first_day = match self.0 {
            DateRepr::Year(y) => NaiveDate::from_ymd_opt(y, 1, 1)?,
            DateRepr::YearMonth(y, m) => NaiveDate::from_ymd_opt(y, m, 1)?,
            DateRepr::Day(d) => d,
        };
        first_day.and_hms_opt(0, 0, 0)
    }

    /// Last instant covered by this date.
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        let last_day = match self.0 {
            DateRepr::Year(y) => NaiveDate::from_ymd_opt(y, 12, 31)?,
            DateRepr::YearMonth(y, m) => {
                let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
                NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()?
            }
            DateRepr::Day(d) => d,
        };
        last_day.and_hms_nano_opt(23, 59, 59, 999_999_999)
    }
}

impl From<NaiveDate> for Date {
    fn from(value: NaiveDate) -> Self {
        Self(DateRepr::Day(value))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DateRepr::Year(y) => write!(f, "{y:04}"),
            DateRepr::YearMonth(y, m) => write!(f, "{y:04}-{m:02}"),
            DateRepr::Day(d) => write!(f, "{:04}-{:02}-{:02}", d.year(), d.month(), d.day()),
        }
    }
}

#[derive(Debug, Clone)]
enum DateTimeRepr {
    Partial(Date),
    Instant(chrono::DateTime<FixedOffset>),
}

impl DateTimeRepr {
    /// Instant plus the offset it was written with. chrono alone ignores the offset.
    fn instant_key(dt: &chrono::DateTime<FixedOffset>) -> (NaiveDateTime, i32) {
        (dt.naive_utc(), dt.offset().local_minus_utc())
    }
}

impl PartialEq for DateTimeRepr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Partial(a), Self::Partial(b)) => a == b,
            (Self::Instant(a), Self::Instant(b)) => {
                Self::instant_key(a) == Self::instant_key(b)
            }
            _ => false,
        }
    }
}

impl Eq for DateTimeRepr {}

impl Hash for DateTimeRepr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Partial(d) => {
                0u8.hash(state);
                d.hash(state);
            }
            Self::Instant(dt) => {
                1u8.hash(state);
                Self::instant_key(dt).hash(state);
            }
        }
    }
}

/// FHIR `dateTime`: a partial date, or a full timestamp with seconds and a zone offset.
///
/// Timestamps are equal only when both the instant and the written offset match, so
/// `10:30:00Z` and `11:30:00+01:00` differ. Use `lower_bound`/`upper_bound` to compare
/// instants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime(DateTimeRepr);

impl DateTime {
    /// Parses a partial date or an RFC 3339 timestamp.
    ///
    /// Fails with [`TypeError::Empty`] on empty input and [`TypeError::Invalid`] when a time is
    /// present without seconds or a zone offset, or the date part is malformed.
    pub fn parse(input: &str) -> TypeResult<Self> {
        if input.is_empty() {
            return Err(TypeError::Empty { kind: "dateTime" });
        }
        if input.contains('T') {
            return chrono::DateTime::parse_from_rfc3339(input)
                .map(|dt| Self(DateTimeRepr::Instant(dt)))
                .map_err(|_| {
                    TypeError::invalid(
                        "dateTime",
                        input,
                        "a time requires seconds and a zone offset (YYYY-MM-DDThh:mm:ss+zz:zz)",
                    )
                });
        }
        Date::parse(input)
            .map(|d| Self(DateTimeRepr::Partial(d)))
            .map_err(|_| {
                TypeError::invalid(
                    "dateTime",
                    input,
                    "expected YYYY, YYYY-MM, YYYY-MM-DD or a full timestamp",
                )
            })
    }

    pub fn precision(&self) -> DatePrecision {
        match &self.0 {
            DateTimeRepr::Partial(d) => d.precision(),
            DateTimeRepr::Instant(_) => DatePrecision::Time,
        }
    }

    /// The date part, when the value has no time component.
    pub fn as_date(&self) -> Option<&Date> {
        match &self.0 {
            DateTimeRepr::Partial(d) => Some(d),
            DateTimeRepr::Instant(_) => None,
        }
    }

    /// The timestamp, when the value has a time component.
    pub fn as_instant(&self) -> Option<chrono::DateTime<FixedOffset>> {
        match &self.0 {
            DateTimeRepr::Partial(_) => None,
            DateTimeRepr::Instant(dt) => Some(*dt),
        }
    }

    /// First instant covered by this value (UTC, naive).
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        match &self.0 {
            DateTimeRepr::Partial(d) => d.lower_bound(),
            DateTimeRepr::Instant(dt) => Some(dt.naive_utc()),
        }
    }

    /// Last instant covered by this value (UTC, naive).
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        match &self.0 {
            DateTimeRepr::Partial(d) => d.upper_bound(),
            DateTimeRepr::Instant(dt) => Some(dt.naive_utc()),
        }
    }
}

impl From<Date> for DateTime {
    fn from(value: Date) -> Self {
        Self(DateTimeRepr::Partial(value))
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTime {
    fn from(value: chrono::DateTime<FixedOffset>) -> Self {
        Self(DateTimeRepr::Instant(value))
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self(DateTimeRepr::Instant(value.fixed_offset()))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            DateTimeRepr::Partial(d) => fmt::Display::fmt(d, f),
            DateTimeRepr::Instant(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

lexical_serde!(Date);
lexical_serde!(DateTime);
