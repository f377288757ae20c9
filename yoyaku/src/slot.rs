//! Slot and schedule value types.
//!
//! This module provides the time-grid types the booking core is built on:
//! slot start times at a fixed granularity, per-day opening hours, weekly
//! schedules, and calendar-date ranges.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// The fixed slot granularity, in minutes.
///
/// Bookings may only start on this grid; the value matches the 30-minute
/// steps salons expose to their customers.
pub const SLOT_MINUTES: u32 = 30;

/// A slot start time, aligned to the fixed booking granularity.
///
/// Slot times carry no date; they are a time of day sitting on the
/// [`SLOT_MINUTES`] grid with zero seconds.
///
/// # Examples
///
/// ```
/// use yoyaku::SlotTime;
///
/// let slot: SlotTime = "17:30".parse().unwrap();
/// assert_eq!(slot.to_string(), "17:30");
///
/// // Off-grid times are invalid
/// assert!("17:45".parse::<SlotTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Creates a slot time from a time of day.
    ///
    /// # Errors
    ///
    /// Returns an error if the time does not sit on the [`SLOT_MINUTES`]
    /// grid or carries a seconds component.
    pub fn new(time: NaiveTime) -> Result<Self, InvalidSlotTimeError> {
        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(InvalidSlotTimeError {
                value: time.format("%H:%M:%S").to_string(),
                reason: "slot times have no seconds component".into(),
            });
        }
        if time.minute() % SLOT_MINUTES != 0 {
            return Err(InvalidSlotTimeError {
                value: time.format("%H:%M").to_string(),
                reason: format!("slot times sit on a {SLOT_MINUTES}-minute grid"),
            });
        }
        Ok(Self(time))
    }

    /// Returns the underlying time of day.
    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0
    }

    /// Returns the number of minutes since midnight.
    #[must_use]
    pub fn minutes_from_midnight(self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Builds a slot time from minutes since midnight.
    ///
    /// Callers guarantee `minutes` is grid-aligned and within the day;
    /// the calendar derives its values from validated opening hours.
    pub(crate) fn from_minutes(minutes: u32) -> Self {
        debug_assert!(minutes < 24 * 60 && minutes % SLOT_MINUTES == 0);
        Self(
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
                .expect("minutes within a single day"),
        )
    }
}

impl TryFrom<NaiveTime> for SlotTime {
    type Error = InvalidSlotTimeError;

    fn try_from(time: NaiveTime) -> Result<Self, Self::Error> {
        Self::new(time)
    }
}

impl FromStr for SlotTime {
    type Err = InvalidSlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = parse_hhmm(s).map_err(|reason| InvalidSlotTimeError {
            value: s.to_string(),
            reason,
        })?;
        Self::new(time)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for SlotTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for invalid slot times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSlotTimeError {
    /// The rejected input.
    pub value: String,
    /// The reason the input is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidSlotTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slot time {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidSlotTimeError {}

/// Parses an `HH:MM` time-of-day string.
fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| "expected a time in HH:MM form".to_string())
}

/// The open interval of a single day, `start` inclusive to `end` exclusive.
///
/// Overnight intervals (closing past midnight) are not supported; `start`
/// must precede `end` within one calendar day.
///
/// # Examples
///
/// ```
/// use yoyaku::DayHours;
///
/// let hours = DayHours::parse("09:00", "18:00").unwrap();
/// assert_eq!(hours.to_string(), "09:00-18:00");
///
/// // Reversed intervals are rejected
/// assert!(DayHours::parse("18:00", "09:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DayHoursRepr", into = "DayHoursRepr")]
pub struct DayHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl DayHours {
    /// Creates an open interval from opening and closing times.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not strictly before `end`, or if
    /// either bound carries a seconds component.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidSlotTimeError> {
        for bound in [start, end] {
            if bound.second() != 0 || bound.nanosecond() != 0 {
                return Err(InvalidSlotTimeError {
                    value: bound.format("%H:%M:%S").to_string(),
                    reason: "opening hours have no seconds component".into(),
                });
            }
        }
        if start >= end {
            return Err(InvalidSlotTimeError {
                value: format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
                reason: "opening time must precede closing time".into(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates an open interval from `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either string is malformed or the interval is
    /// empty or reversed.
    pub fn parse(start: &str, end: &str) -> Result<Self, InvalidSlotTimeError> {
        let start_time = parse_hhmm(start).map_err(|reason| InvalidSlotTimeError {
            value: start.to_string(),
            reason,
        })?;
        let end_time = parse_hhmm(end).map_err(|reason| InvalidSlotTimeError {
            value: end.to_string(),
            reason,
        })?;
        Self::new(start_time, end_time)
    }

    /// Returns the opening time.
    #[must_use]
    pub const fn start(self) -> NaiveTime {
        self.start
    }

    /// Returns the closing time.
    #[must_use]
    pub const fn end(self) -> NaiveTime {
        self.end
    }

    /// Returns the opening time as minutes since midnight.
    #[must_use]
    pub fn start_minutes(self) -> u32 {
        self.start.hour() * 60 + self.start.minute()
    }

    /// Returns the closing time as minutes since midnight.
    #[must_use]
    pub fn end_minutes(self) -> u32 {
        self.end.hour() * 60 + self.end.minute()
    }
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Wire form of [`DayHours`]: `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DayHoursRepr {
    start: String,
    end: String,
}

impl TryFrom<DayHoursRepr> for DayHours {
    type Error = InvalidSlotTimeError;

    fn try_from(repr: DayHoursRepr) -> Result<Self, Self::Error> {
        Self::parse(&repr.start, &repr.end)
    }
}

impl From<DayHours> for DayHoursRepr {
    fn from(hours: DayHours) -> Self {
        Self {
            start: hours.start.format("%H:%M").to_string(),
            end: hours.end.format("%H:%M").to_string(),
        }
    }
}

/// A salon's weekly opening schedule.
///
/// Each weekday carries an optional open interval; an absent entry means
/// the salon is closed that day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Monday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    /// Tuesday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    /// Wednesday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    /// Thursday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    /// Friday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    /// Saturday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
    /// Sunday hours, absent when closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
}

impl OpeningHours {
    /// Returns the hours for the given weekday, `None` when closed.
    #[must_use]
    pub const fn for_weekday(&self, weekday: Weekday) -> Option<DayHours> {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Returns a schedule with the same hours every day of the week.
    #[must_use]
    pub const fn every_day(hours: DayHours) -> Self {
        Self {
            monday: Some(hours),
            tuesday: Some(hours),
            wednesday: Some(hours),
            thursday: Some(hours),
            friday: Some(hours),
            saturday: Some(hours),
            sunday: Some(hours),
        }
    }
}

/// An inclusive range of calendar dates.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yoyaku::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2029, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2029, 1, 31).unwrap();
/// let range = DateRange::new(start, end).unwrap();
/// assert!(range.contains(NaiveDate::from_ymd_opt(2029, 1, 15).unwrap()));
///
/// // Reversed ranges are rejected
/// assert!(DateRange::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRangeError> {
        if start > end {
            return Err(InvalidDateRangeError {
                start,
                end,
                reason: "range start must not be after its end".into(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the first date of the range.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// Returns the last date of the range.
    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if the date falls within the range.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Error type for invalid date ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateRangeError {
    /// The requested range start.
    pub start: NaiveDate,
    /// The requested range end.
    pub end: NaiveDate,
    /// The reason the range is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidDateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date range {}..{}: {}",
            self.start, self.end, self.reason
        )
    }
}

impl std::error::Error for InvalidDateRangeError {}
