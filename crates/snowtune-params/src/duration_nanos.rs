//! Serde adapter encoding a `Duration` as integer nanoseconds.
//!
//! Use with `#[serde(with = "snowtune_params::duration_nanos")]`, or
//! `serialize_with` for output-only structs. Durations beyond `u64::MAX`
//! nanoseconds are a serialization error rather than a silent clamp.

use std::time::Duration;

use serde::{ser, Deserialize, Deserializer, Serializer};

/// Largest duration the wire format can carry (about 584 years).
pub const MAX: Duration = Duration::from_nanos(u64::MAX);

/// Nanosecond count of `d`, or `None` when it does not fit in a `u64`.
pub fn to_nanos(d: Duration) -> Option<u64> {
    u64::try_from(d.as_nanos()).ok()
}

pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    match to_nanos(*d) {
        Some(nanos) => s.serialize_u64(nanos),
        None => Err(ser::Error::custom(format!(
            "duration {d:?} exceeds u64::MAX nanoseconds"
        ))),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    u64::deserialize(d).map(Duration::from_nanos)
}
