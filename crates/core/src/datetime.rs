// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Common date and time functions.

use chrono::{DateTime, NaiveTime, Timelike, Utc};

use crate::UnixNanos;

/// Number of milliseconds in one second.
pub const MILLISECONDS_IN_SECOND: u64 = 1_000;

/// Number of nanoseconds in one second.
pub const NANOSECONDS_IN_SECOND: u64 = 1_000_000_000;

/// Number of nanoseconds in one millisecond.
pub const NANOSECONDS_IN_MILLISECOND: u64 = 1_000_000;

/// Converts seconds to nanoseconds (ns).
///
/// Casting f64 to u64 by truncating the fractional part is intentional for unit conversion,
/// which may lose precision and drop negative values after clamping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn secs_to_nanos(secs: f64) -> u64 {
    let nanos = secs * NANOSECONDS_IN_SECOND as f64;
    nanos.max(0.0).trunc() as u64
}

/// Converts milliseconds (ms) to nanoseconds (ns).
///
/// Casting f64 to u64 by truncating the fractional part is intentional for unit conversion,
/// which may lose precision and drop negative values after clamping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn millis_to_nanos(millis: f64) -> u64 {
    let nanos = millis * NANOSECONDS_IN_MILLISECOND as f64;
    nanos.max(0.0).trunc() as u64
}

/// Converts nanoseconds (ns) to seconds.
///
/// Casting u64 to f64 may lose precision for large values,
/// but is acceptable when computing fractional seconds.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn nanos_to_secs(nanos: u64) -> f64 {
    let seconds = nanos / NANOSECONDS_IN_SECOND;
    let rem_nanos = nanos % NANOSECONDS_IN_SECOND;
    (seconds as f64) + (rem_nanos as f64) / (NANOSECONDS_IN_SECOND as f64)
}

/// Converts nanoseconds (ns) to milliseconds (ms).
#[must_use]
pub const fn nanos_to_millis(nanos: u64) -> u64 {
    nanos / NANOSECONDS_IN_MILLISECOND
}

/// Re-anchors a time-of-day onto the date of the given reference instant (UTC).
///
/// Venue fill feeds often carry only a time-of-day with an unreliable or absent date
/// component. Joining that time onto the reference date makes it comparable with the
/// current session clock.
#[must_use]
pub fn at_time_of_day(reference: DateTime<Utc>, time: NaiveTime) -> DateTime<Utc> {
    reference.date_naive().and_time(time).and_utc()
}

/// Returns whether the instant falls inside the daily hour window `[start_hour, end_hour)`.
///
/// A window with `start_hour > end_hour` wraps past midnight.
#[must_use]
pub fn in_hour_window(t: DateTime<Utc>, start_hour: u32, end_hour: u32) -> bool {
    let hour = t.hour();
    if start_hour <= end_hour {
        hour >= start_hour && hour < end_hour
    } else {
        hour >= start_hour || hour < end_hour
    }
}

/// Formats the timestamp as a compact `HHMMSSmmm` tag (UTC).
///
/// Used to build unique human-sortable identifier fragments.
#[must_use]
pub fn compact_time_tag(ts: UnixNanos) -> String {
    let datetime = ts.to_datetime_utc();
    format!(
        "{}{:03}",
        datetime.format("%H%M%S"),
        datetime.timestamp_subsec_millis()
    )
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 0)]
    #[case(1.1, 1_100_000_000)]
    #[case(-1.0, 0)]
    fn test_secs_to_nanos(#[case] value: f64, #[case] expected: u64) {
        assert_eq!(secs_to_nanos(value), expected);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(1.1, 1_100_000)]
    fn test_millis_to_nanos(#[case] value: f64, #[case] expected: u64) {
        assert_eq!(millis_to_nanos(value), expected);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(1_500_000_000, 1.5)]
    fn test_nanos_to_secs(#[case] value: u64, #[case] expected: f64) {
        assert_eq!(nanos_to_secs(value), expected);
    }

    #[rstest]
    #[case(1_000_000, 1)]
    #[case(1_500_000, 1)]
    #[case(2_000_000, 2)]
    fn test_nanos_to_millis(#[case] value: u64, #[case] expected: u64) {
        assert_eq!(nanos_to_millis(value), expected);
    }

    #[rstest]
    fn test_at_time_of_day() {
        let reference = Utc.with_ymd_and_hms(2024, 2, 10, 14, 58, 43).unwrap();
        let time = NaiveTime::from_hms_opt(9, 30, 5).unwrap();
        let anchored = at_time_of_day(reference, time);
        assert_eq!(anchored, Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 5).unwrap());
    }

    #[rstest]
    #[case(14, 15, 21, false)]
    #[case(15, 15, 21, true)]
    #[case(20, 15, 21, true)]
    #[case(21, 15, 21, false)]
    #[case(23, 21, 3, true)] // Wrapping window
    #[case(2, 21, 3, true)] // Wrapping window
    #[case(12, 21, 3, false)] // Wrapping window
    fn test_in_hour_window(
        #[case] hour: u32,
        #[case] start: u32,
        #[case] end: u32,
        #[case] expected: bool,
    ) {
        let t = Utc.with_ymd_and_hms(2024, 2, 10, hour, 0, 0).unwrap();
        assert_eq!(in_hour_window(t, start, end), expected);
    }

    #[rstest]
    fn test_compact_time_tag() {
        let datetime = Utc.with_ymd_and_hms(2024, 2, 10, 14, 58, 43).unwrap()
            + chrono::Duration::milliseconds(123);
        let tag = compact_time_tag(UnixNanos::from(datetime));
        assert_eq!(tag, "145843123");
    }
}
