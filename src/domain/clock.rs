// src/domain/clock.rs
use crate::domain::error::{DomainError, DomainResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Display slot receiving the local weekday name
pub const DAY_SLOT: &str = "currentDay";
/// Display slot receiving the local `Date: DD/MM/YYYY` line
pub const DATE_SLOT: &str = "currentDate";

/// One configured timezone and how to print it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockZone {
    pub slot: String,
    pub label: String,
    pub tz: Tz,
    time_format: String,
    date_format: String,
}

impl ClockZone {
    pub fn new(
        slot: impl Into<String>,
        label: impl Into<String>,
        timezone: &str,
        time_format: impl Into<String>,
        date_format: impl Into<String>,
    ) -> DomainResult<Self> {
        let tz: Tz = timezone
            .trim()
            .parse()
            .map_err(|e| DomainError::InvalidTimezone(format!("{}: {}", timezone, e)))?;
        let time_format = time_format.into();
        let date_format = date_format.into();
        validate_format(&time_format)?;
        validate_format(&date_format)?;

        Ok(Self {
            slot: slot.into(),
            label: label.into(),
            tz,
            time_format,
            date_format,
        })
    }

    pub fn read(&self, now: DateTime<Utc>) -> ClockReading {
        let local = now.with_timezone(&self.tz);
        ClockReading {
            slot: self.slot.clone(),
            label: self.label.clone(),
            time: local.format(&self.time_format).to_string(),
            date: local.format(&self.date_format).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub slot: String,
    pub label: String,
    pub time: String,
    pub date: String,
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.label, self.time, self.date)
    }
}

/// Weekday and date line shown above the clocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHeader {
    pub day: String,
    pub date: String,
}

impl DayHeader {
    pub fn at<Z: TimeZone>(now: &DateTime<Z>) -> Self
    where
        Z::Offset: fmt::Display,
    {
        Self {
            day: now.format("%A").to_string(),
            date: format!(
                "Date: {:02}/{:02}/{}",
                now.day(),
                now.month(),
                now.year()
            ),
        }
    }
}

/// Where formatted clock strings end up.
pub trait ClockDisplay {
    /// Write `text` into `slot`; returns false when the slot does not exist.
    fn write_slot(&mut self, slot: &str, text: &str) -> bool;
}

/// strftime strings with unknown specifiers would make `format()` fail at
/// display time, so they are rejected up front.
fn validate_format(format: &str) -> DomainResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DomainError::InvalidTimeFormat(format.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn instant() -> DateTime<Utc> {
        // 2024-01-15 03:04:05 UTC
        Utc.with_ymd_and_hms(2024, 1, 15, 3, 4, 5).unwrap()
    }

    #[test]
    fn given_sydney_in_summer_when_read_then_daylight_offset_applied() {
        let zone = ClockZone::new("sydney", "Sydney", "Australia/Sydney", "%I:%M:%S %p", "%a, %b %-d")
            .unwrap();
        let reading = zone.read(instant());
        // AEDT is UTC+11 in January
        assert_eq!(reading.time, "02:04:05 PM");
        assert_eq!(reading.date, "Mon, Jan 15");
        assert_eq!(reading.slot, "sydney");
    }

    #[test]
    fn given_dhaka_when_read_then_fixed_offset_applied() {
        let zone = ClockZone::new("dhaka", "Dhaka", "Asia/Dhaka", "%H:%M", "%Y-%m-%d").unwrap();
        let reading = zone.read(instant());
        assert_eq!(reading.time, "09:04");
        assert_eq!(reading.date, "2024-01-15");
        assert_eq!(reading.to_string(), "Dhaka: 09:04 (2024-01-15)");
    }

    #[test]
    fn given_unknown_timezone_when_new_then_error() {
        let result = ClockZone::new("x", "X", "Mars/Olympus_Mons", "%H", "%d");
        assert!(matches!(result, Err(DomainError::InvalidTimezone(_))));
    }

    #[test]
    fn given_broken_format_when_new_then_error() {
        let result = ClockZone::new("x", "X", "UTC", "%H:%", "%d");
        assert!(matches!(result, Err(DomainError::InvalidTimeFormat(_))));
    }

    #[test]
    fn given_datetime_when_header_then_weekday_and_padded_date() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 12, 0, 0)
            .unwrap();
        let header = DayHeader::at(&now);
        assert_eq!(header.day, "Tuesday");
        assert_eq!(header.date, "Date: 05/03/2024");
    }
}
