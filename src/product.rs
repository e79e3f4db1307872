// Product availability model and the fit predicate
use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use crate::error::{FinderError, Result};
use crate::supplier::RawAvailability;

/// Timestamp format used for every date on the wire, in and out.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Seats assumed per slot when reporting how many participants are booked.
pub const CAPACITY_BASELINE: i64 = 99;

/// One bookable start time of a product.
///
/// The end time is derived from the start time and duration when the record
/// is built and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    places_available: u32,
    activity_duration_minutes: u32,
    product_id: u64,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

impl AvailabilityRecord {
    pub fn new(
        places_available: u32,
        activity_duration_minutes: u32,
        product_id: u64,
        start_time: NaiveDateTime,
    ) -> Result<Self> {
        let end_time = start_time
            .checked_add_signed(Duration::minutes(i64::from(activity_duration_minutes)))
            .ok_or_else(|| {
                FinderError::MalformedRecord(format!(
                    "activity of {} minutes starting {} ends outside the supported range",
                    activity_duration_minutes,
                    format_timestamp(&start_time)
                ))
            })?;

        Ok(Self {
            places_available,
            activity_duration_minutes,
            product_id,
            start_time,
            end_time,
        })
    }

    /// Build a record from an untyped JSON object.
    ///
    /// Fails with [`FinderError::MalformedRecord`] when a required key is
    /// missing, has the wrong type, or the start time is not `YYYY-MM-DDTHH:MM`.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let raw = RawAvailability::deserialize(value)
            .map_err(|e| FinderError::MalformedRecord(e.to_string()))?;
        Self::try_from(raw)
    }

    pub fn to_raw(&self) -> RawAvailability {
        RawAvailability {
            places_available: self.places_available,
            activity_duration_in_minutes: self.activity_duration_minutes,
            product_id: self.product_id,
            activity_start_datetime: format_timestamp(&self.start_time),
        }
    }

    /// True when the slot has room for `travellers` and lies entirely inside
    /// `[window_start, window_end]`. Both bounds are inclusive.
    pub fn fits(
        &self,
        window_start: &NaiveDateTime,
        window_end: &NaiveDateTime,
        travellers: u32,
    ) -> bool {
        if travellers > self.places_available {
            return false;
        }

        if *window_start > self.start_time {
            return false;
        }

        if *window_end < self.end_time {
            return false;
        }

        true
    }

    pub fn places_available(&self) -> u32 {
        self.places_available
    }

    pub fn activity_duration_minutes(&self) -> u32 {
        self.activity_duration_minutes
    }

    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    pub fn start_time(&self) -> &NaiveDateTime {
        &self.start_time
    }

    pub fn end_time(&self) -> &NaiveDateTime {
        &self.end_time
    }

    pub fn number_of_participants(&self) -> i64 {
        CAPACITY_BASELINE - i64::from(self.places_available)
    }
}

impl TryFrom<RawAvailability> for AvailabilityRecord {
    type Error = FinderError;

    fn try_from(raw: RawAvailability) -> Result<Self> {
        let start_time = parse_timestamp(&raw.activity_start_datetime).ok_or_else(|| {
            FinderError::MalformedRecord(format!(
                "Wrong format datetime {}",
                raw.activity_start_datetime
            ))
        })?;

        Self::new(
            raw.places_available,
            raw.activity_duration_in_minutes,
            raw.product_id,
            start_time,
        )
    }
}

// Only the canonical zero-padded form is accepted; chrono alone would also
// take single-digit fields, surrounding whitespace and a signed year.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .ok()
        .filter(|parsed| format_timestamp(parsed) == value)
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}
