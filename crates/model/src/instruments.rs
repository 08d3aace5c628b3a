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

//! Instrument (contract) definitions provided by trading venues.

use std::fmt::Display;

use followtrader_core::correctness::{FAILED, check_positive_f64};
use serde::{Deserialize, Serialize};

use crate::identifiers::InstrumentId;

/// Represents a tradable contract definition.
///
/// Definitions arrive through the connectivity gateway once an instrument becomes known;
/// an instrument without a definition cannot be priced or traded.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Contract {
    /// The contracts instrument ID.
    pub instrument_id: InstrumentId,
    /// The minimum price increment.
    pub price_tick: f64,
    /// The contract multiplier (value of one point of price movement).
    pub size: f64,
}

impl Contract {
    /// Creates a new [`Contract`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `price_tick` or `size` is not positive.
    pub fn new_checked(
        instrument_id: InstrumentId,
        price_tick: f64,
        size: f64,
    ) -> anyhow::Result<Self> {
        check_positive_f64(price_tick, stringify!(price_tick))?;
        check_positive_f64(size, stringify!(size))?;
        Ok(Self {
            instrument_id,
            price_tick,
            size,
        })
    }

    /// Creates a new [`Contract`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `price_tick` or `size` is not positive.
    pub fn new(instrument_id: InstrumentId, price_tick: f64, size: f64) -> Self {
        Self::new_checked(instrument_id, price_tick, size).expect(FAILED)
    }
}

impl Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Contract(instrument_id={}, price_tick={}, size={})",
            self.instrument_id, self.price_tick, self.size,
        )
    }
}
