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

//! Event messages which drive the follow engine.

use std::fmt::Display;

use followtrader_core::UnixNanos;
use followtrader_model::{
    data::QuoteTick,
    reports::{FillReport, OrderStatusReport, PositionStatusReport},
};
use serde::{Deserialize, Serialize};
use ustr::Ustr;

/// Represents a time event occurring at the event timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEvent {
    /// The event name, identifying the nature or purpose of the event.
    pub name: Ustr,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

impl TimeEvent {
    /// Creates a new [`TimeEvent`] instance.
    #[must_use]
    pub const fn new(name: Ustr, ts_event: UnixNanos) -> Self {
        Self { name, ts_event }
    }
}

impl Display for TimeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeEvent(name={}, ts_event={})",
            self.name, self.ts_event
        )
    }
}

/// Represents the event types consumed by the follow engine.
#[derive(Clone, Debug, PartialEq)]
pub enum FollowEvent {
    /// A top-of-book quote update from the market data feed.
    Quote(QuoteTick),
    /// An order status update from a trading gateway.
    Order(OrderStatusReport),
    /// A fill from a trading gateway.
    Fill(FillReport),
    /// A position snapshot from a trading gateway.
    Position(PositionStatusReport),
    /// A periodic time event from the host timer.
    Time(TimeEvent),
}

impl Display for FollowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quote(quote) => write!(f, "{quote}"),
            Self::Order(report) => write!(f, "{report}"),
            Self::Fill(report) => write!(f, "{report}"),
            Self::Position(report) => write!(f, "{report}"),
            Self::Time(event) => write!(f, "{event}"),
        }
    }
}
