//! Conversion between the wire timestamp (`google.protobuf.Timestamp`) and
//! the stored timestamp (`DateTime<Utc>`).
//!
//! Only timestamps between 0001-01-01T00:00:00Z and 9999-12-31T23:59:59.999999999Z
//! with `nanos` in `[0, 1e9)` are representable. Anything else is rejected,
//! never clamped.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use thiserror::Error;

/// Seconds of 0001-01-01T00:00:00Z since the Unix epoch
pub const MIN_VALID_SECONDS: i64 = -62_135_596_800;

/// Seconds of 9999-12-31T23:59:59Z since the Unix epoch
pub const MAX_VALID_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp: seconds:{seconds} nanos:{nanos}: nanos not in range [0, 1e9)")]
    NanosOutOfRange { seconds: i64, nanos: i64 },

    #[error("timestamp: seconds:{seconds} nanos:{nanos} before 0001-01-01")]
    BeforeMin { seconds: i64, nanos: i64 },

    #[error("timestamp: seconds:{seconds} nanos:{nanos} after 10000-01-01")]
    AfterMax { seconds: i64, nanos: i64 },
}

fn validate(seconds: i64, nanos: i64) -> Result<(), TimestampError> {
    if !(0..NANOS_PER_SECOND).contains(&nanos) {
        return Err(TimestampError::NanosOutOfRange { seconds, nanos });
    }
    if seconds < MIN_VALID_SECONDS {
        return Err(TimestampError::BeforeMin { seconds, nanos });
    }
    if seconds > MAX_VALID_SECONDS {
        return Err(TimestampError::AfterMax { seconds, nanos });
    }
    Ok(())
}

/// Wire → storage
pub fn to_datetime(ts: &Timestamp) -> Result<DateTime<Utc>, TimestampError> {
    let (seconds, nanos) = (ts.seconds, i64::from(ts.nanos));
    validate(seconds, nanos)?;

    // Validated values always fit chrono's range.
    DateTime::from_timestamp(seconds, nanos as u32)
        .ok_or(TimestampError::AfterMax { seconds, nanos })
}

/// Storage → wire
///
/// Fails for dates chrono can hold but the wire format cannot (year 10000+,
/// negative years, leap-second nanos).
pub fn to_timestamp(dt: &DateTime<Utc>) -> Result<Timestamp, TimestampError> {
    let seconds = dt.timestamp();
    let nanos = i64::from(dt.timestamp_subsec_nanos());
    validate(seconds, nanos)?;

    Ok(Timestamp {
        seconds,
        nanos: nanos as i32,
    })
}
