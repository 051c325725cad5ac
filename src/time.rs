//! Time-of-day and interval utilities.
//!
//! All times are minutes since midnight. Intervals are half-open
//! `[start, end)`: two slots that touch exactly at a boundary
//! (`end1 == start2`) do not overlap.
//!
//! Parsing is strict. A malformed time string is an error, never a
//! silently wrong number, since a bad parse here would hide a
//! double-booking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// A time of day with minute resolution.
///
/// Parsed from `"HH:MM"` or `"HH:MM:SS"` (database `time` columns carry
/// seconds; they are dropped). Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a time from hours and minutes.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self> {
        if hours >= 24 || minutes >= 60 {
            return Err(ScheduleError::InvalidTime {
                value: format!("{hours}:{minutes:02}"),
            });
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Builds a time from in-range constants. Used for built-in defaults.
    pub(crate) const fn hm(hours: u16, minutes: u16) -> Self {
        Self(hours * 60 + minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59).
    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidTime {
            value: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let field = |p: &str, max_len: usize| -> Option<u16> {
            if p.is_empty() || p.len() > max_len || !p.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            p.parse().ok()
        };

        let hours = field(parts[0], 2).ok_or_else(invalid)?;
        if parts[1].len() != 2 {
            return Err(invalid());
        }
        let minutes = field(parts[1], 2).ok_or_else(invalid)?;
        if let Some(&sec) = parts.get(2) {
            match field(sec, 2) {
                Some(s) if sec.len() == 2 && s < 60 => {}
                _ => return Err(invalid()),
            }
        }

        Self::from_hm(hours, minutes).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Day of the week a slot meets on.
///
/// Accepts full names and three-letter abbreviations in any case
/// (`"monday"`, `"Monday"`, `"MON"`). Serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All days, Sunday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Lowercase full name.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str() == lower || d.as_str()[..3] == lower)
            .ok_or_else(|| ScheduleError::InvalidDay {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Weekday {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(d: Weekday) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time interval [start, end) within one day.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Interval start (inclusive).
    pub start: ClockTime,
    /// Interval end (exclusive).
    pub end: ClockTime,
}

impl TimeRange {
    /// Creates a range, rejecting empty or inverted intervals.
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(start.parse()?, end.parse()?)
    }

    /// Length of the range in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.minutes() - self.start.minutes())
    }

    /// Whether a time falls within this range.
    #[inline]
    pub fn contains(&self, t: ClockTime) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether two ranges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the shared part of two ranges, if any.
    pub fn overlap_minutes(&self, other: &Self) -> Option<u32> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            Some(u32::from(end.minutes() - start.minutes()))
        } else {
            None
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Converts `"HH:MM"` to minutes since midnight.
///
/// # Errors
/// [`ScheduleError::InvalidTime`] on anything that is not a valid time of day.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    time.parse::<ClockTime>().map(|t| u32::from(t.minutes()))
}

/// Half-open overlap test on raw `HH:MM` strings.
///
/// True iff `start1 < end2 && start2 < end1`. Adjacent slots
/// (`end1 == start2`) do not overlap.
pub fn time_overlap(start1: &str, end1: &str, start2: &str, end2: &str) -> Result<bool> {
    let (s1, e1) = (time_to_minutes(start1)?, time_to_minutes(end1)?);
    let (s2, e2) = (time_to_minutes(start2)?, time_to_minutes(end2)?);
    Ok(s1 < e2 && s2 < e1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("09:30").unwrap(), 570);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
        assert_eq!(time_to_minutes("9:05").unwrap(), 545);
        assert_eq!(time_to_minutes("13:15:00").unwrap(), 795);
    }

    #[test]
    fn test_time_to_minutes_rejects_malformed() {
        for bad in ["", "9", "9am", "24:00", "12:60", "12:5", "ab:cd", "-1:00", "12:00:61", "1:2:3:4"] {
            let err = time_to_minutes(bad).unwrap_err();
            assert!(
                matches!(err, ScheduleError::InvalidTime { .. }),
                "expected InvalidTime for {bad:?}"
            );
        }
    }

    #[test]
    fn test_time_overlap_partial() {
        assert!(time_overlap("09:00", "10:00", "09:30", "10:30").unwrap());
    }

    #[test]
    fn test_time_overlap_adjacent_is_not_overlap() {
        assert!(!time_overlap("09:00", "10:00", "10:00", "11:00").unwrap());
        assert!(!time_overlap("10:00", "11:00", "09:00", "10:00").unwrap());
    }

    #[test]
    fn test_time_overlap_symmetric() {
        let slots = [
            ("08:00", "09:00"),
            ("08:30", "09:30"),
            ("09:00", "10:00"),
            ("07:00", "12:00"),
            ("11:59", "12:00"),
        ];
        for (a, b) in slots {
            for (c, d) in slots {
                assert_eq!(
                    time_overlap(a, b, c, d).unwrap(),
                    time_overlap(c, d, a, b).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_time_overlap_containment() {
        assert!(time_overlap("08:00", "12:00", "09:00", "10:00").unwrap());
        assert!(time_overlap("09:00", "10:00", "08:00", "12:00").unwrap());
    }

    #[test]
    fn test_time_overlap_propagates_parse_error() {
        assert!(time_overlap("09:00", "xx", "09:30", "10:30").is_err());
    }

    #[test]
    fn test_clock_time_display_and_serde() {
        let t: ClockTime = "7:05".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");

        let back: ClockTime = serde_json::from_str("\"07:05:00\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }

    #[test]
    fn test_weekday_parsing() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Thursday".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!("SUN".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("funday".parse::<Weekday>().is_err());

        let d: Weekday = serde_json::from_str("\"Wed\"").unwrap();
        assert_eq!(d, Weekday::Wednesday);
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"wednesday\"");
    }

    #[test]
    fn test_time_range() {
        let r = TimeRange::parse("09:00", "10:30").unwrap();
        assert_eq!(r.duration_minutes(), 90);
        assert!(r.contains("09:00".parse().unwrap()));
        assert!(!r.contains("10:30".parse().unwrap())); // exclusive end

        let lunch = TimeRange::parse("10:00", "11:00").unwrap();
        assert!(r.overlaps(&lunch));
        assert_eq!(r.overlap_minutes(&lunch), Some(30));

        let later = TimeRange::parse("10:30", "11:00").unwrap();
        assert!(!r.overlaps(&later));
        assert_eq!(r.overlap_minutes(&later), None);
    }

    #[test]
    fn test_time_range_rejects_inverted() {
        let err = TimeRange::parse("10:00", "09:00").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeRange { .. }));
        assert!(TimeRange::parse("10:00", "10:00").is_err());
    }
}
