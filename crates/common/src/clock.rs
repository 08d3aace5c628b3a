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

//! Real-time and static `Clock` implementations.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use followtrader_core::{
    UnixNanos,
    datetime::{nanos_to_millis, nanos_to_secs},
};

/// Provides the current time to engine components.
pub trait Clock: Debug {
    /// Returns the current date and time as a timezone-aware `DateTime<UTC>`.
    fn utc_now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.timestamp_ns().as_i64())
    }

    /// Returns the current UNIX timestamp in nanoseconds (ns).
    fn timestamp_ns(&self) -> UnixNanos;

    /// Returns the current UNIX timestamp in milliseconds (ms).
    fn timestamp_ms(&self) -> u64 {
        nanos_to_millis(self.timestamp_ns().as_u64())
    }

    /// Returns the current UNIX timestamp in seconds.
    fn timestamp(&self) -> f64 {
        nanos_to_secs(self.timestamp_ns().as_u64())
    }
}

/// A static test clock.
///
/// Stores the current timestamp internally which can be advanced.
#[derive(Clone, Copy, Debug, Default)]
pub struct TestClock {
    time: UnixNanos,
}

impl TestClock {
    /// Creates a new [`TestClock`] instance at UNIX epoch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time: UnixNanos::new(0),
        }
    }

    /// Sets the internal clock to the given time.
    pub fn set_time(&mut self, to_time_ns: UnixNanos) {
        self.time = to_time_ns;
    }

    /// Advances the internal clock to the given time.
    ///
    /// # Panics
    ///
    /// Panics if `to_time_ns` is less than the current internal time.
    pub fn advance_time(&mut self, to_time_ns: UnixNanos) {
        assert!(
            to_time_ns >= self.time,
            "`to_time_ns` {to_time_ns} was < `self.time` {}",
            self.time
        );
        self.time = to_time_ns;
    }
}

impl Clock for TestClock {
    fn timestamp_ns(&self) -> UnixNanos {
        self.time
    }
}

/// A real-time clock which reads system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveClock;

impl LiveClock {
    /// Creates a new [`LiveClock`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for LiveClock {
    fn timestamp_ns(&self) -> UnixNanos {
        UnixNanos::from(Utc::now())
    }
}
