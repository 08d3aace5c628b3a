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

//! The order request command sent to a trading client.

use std::fmt::Display;

use derive_builder::Builder;
use followtrader_core::correctness::{FAILED, check_positive_u64, check_predicate_true};
use serde::{Deserialize, Serialize};

use crate::{
    enums::{Direction, Offset, OrderType},
    identifiers::InstrumentId,
};

/// Sentinel price requesting the most marketable limit price available (the band edge).
pub const MARKET_PRICE: f64 = -1.0;

/// Represents an order request to be submitted through a trading client.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Builder)]
#[serde(tag = "type")]
pub struct OrderRequest {
    /// The instrument to trade.
    pub instrument_id: InstrumentId,
    /// The direction of the order.
    pub direction: Direction,
    /// The position offset instruction.
    pub offset: Offset,
    /// The order type.
    pub order_type: OrderType,
    /// The limit price, `0.0` for "price the request from the book", or [`MARKET_PRICE`].
    pub price: f64,
    /// The order volume in contracts.
    pub volume: u64,
}

impl OrderRequest {
    /// Creates a new [`OrderRequest`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `price` is negative (other than the [`MARKET_PRICE`] sentinel), NaN or infinite.
    /// - `volume` is zero.
    pub fn new_checked(
        instrument_id: InstrumentId,
        direction: Direction,
        offset: Offset,
        order_type: OrderType,
        price: f64,
        volume: u64,
    ) -> anyhow::Result<Self> {
        check_predicate_true(
            price.is_finite() && (price >= 0.0 || price == MARKET_PRICE),
            "`price` was not non-negative or the MARKET_PRICE sentinel",
        )?;
        check_positive_u64(volume, stringify!(volume))?;
        Ok(Self {
            instrument_id,
            direction,
            offset,
            order_type,
            price,
            volume,
        })
    }

    /// Creates a new [`OrderRequest`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `price` is invalid or `volume` is zero.
    pub fn new(
        instrument_id: InstrumentId,
        direction: Direction,
        offset: Offset,
        order_type: OrderType,
        price: f64,
        volume: u64,
    ) -> Self {
        Self::new_checked(instrument_id, direction, offset, order_type, price, volume)
            .expect(FAILED)
    }

    /// Returns the request with the direction flipped and [`Direction::Net`] left unchanged.
    #[must_use]
    pub const fn inverse(mut self) -> Self {
        self.direction = self.direction.opposite();
        self
    }

    /// Returns the request re-tagged with the given offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the request with the given limit price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Returns the request with the given volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }
}

impl Display for OrderRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OrderRequest(instrument_id={}, direction={}, offset={}, type={}, price={}, volume={})",
            self.instrument_id, self.direction, self.offset, self.order_type, self.price, self.volume,
        )
    }
}
