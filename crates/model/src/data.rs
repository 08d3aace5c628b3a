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

//! Market data types for the trading domain model.

use std::fmt::Display;

use derive_builder::Builder;
use followtrader_core::{
    UnixNanos,
    correctness::{FAILED, check_non_negative_f64, check_predicate_true},
};
use serde::{Deserialize, Serialize};

use crate::identifiers::InstrumentId;

/// Represents a single quote tick in a market.
///
/// Carries the top-of-book bid and ask together with the daily price limit band, which
/// venues publish on every tick and which stays fixed for the session.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Builder)]
#[serde(tag = "type")]
pub struct QuoteTick {
    /// The quotes instrument ID.
    pub instrument_id: InstrumentId,
    /// The top-of-book bid price.
    pub bid_price: f64,
    /// The top-of-book ask price.
    pub ask_price: f64,
    /// The upper price limit for the session.
    pub limit_up: f64,
    /// The lower price limit for the session.
    pub limit_down: f64,
    /// UNIX timestamp (nanoseconds) when the quote event occurred.
    pub ts_event: UnixNanos,
}

impl QuoteTick {
    /// Creates a new [`QuoteTick`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any price is negative, NaN or infinite.
    /// - `limit_down` exceeds `limit_up`.
    pub fn new_checked(
        instrument_id: InstrumentId,
        bid_price: f64,
        ask_price: f64,
        limit_up: f64,
        limit_down: f64,
        ts_event: UnixNanos,
    ) -> anyhow::Result<Self> {
        check_non_negative_f64(bid_price, stringify!(bid_price))?;
        check_non_negative_f64(ask_price, stringify!(ask_price))?;
        check_non_negative_f64(limit_up, stringify!(limit_up))?;
        check_non_negative_f64(limit_down, stringify!(limit_down))?;
        check_predicate_true(
            limit_down <= limit_up,
            "`limit_down` exceeded `limit_up` for quote",
        )?;
        Ok(Self {
            instrument_id,
            bid_price,
            ask_price,
            limit_up,
            limit_down,
            ts_event,
        })
    }

    /// Creates a new [`QuoteTick`] instance.
    ///
    /// # Panics
    ///
    /// Panics if any price is invalid or `limit_down` exceeds `limit_up`.
    pub fn new(
        instrument_id: InstrumentId,
        bid_price: f64,
        ask_price: f64,
        limit_up: f64,
        limit_down: f64,
        ts_event: UnixNanos,
    ) -> Self {
        Self::new_checked(
            instrument_id,
            bid_price,
            ask_price,
            limit_up,
            limit_down,
            ts_event,
        )
        .expect(FAILED)
    }
}

impl Display for QuoteTick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.instrument_id, self.bid_price, self.ask_price, self.ts_event,
        )
    }
}
