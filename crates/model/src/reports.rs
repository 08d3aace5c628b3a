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

//! Execution state reports flowing in from trading venues.

use std::fmt::Display;

use derive_builder::Builder;
use followtrader_core::UnixNanos;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{Direction, Offset, OrderStatus},
    identifiers::{ClientId, InstrumentId, OrderId, TradeId},
};

/// Represents a fill (execution) report for a single trade.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Builder)]
#[serde(tag = "type")]
pub struct FillReport {
    /// The venue-assigned trade match ID.
    pub trade_id: TradeId,
    /// The order ID the fill belongs to.
    pub order_id: OrderId,
    /// The client (gateway/account) the fill arrived from.
    pub client_id: ClientId,
    /// The instrument the fill is for.
    pub instrument_id: InstrumentId,
    /// The fill direction.
    pub direction: Direction,
    /// The position offset instruction of the filled order.
    pub offset: Offset,
    /// The fill price.
    pub price: f64,
    /// The fill volume in contracts.
    pub volume: u64,
    /// UNIX timestamp (nanoseconds) when the fill occurred at the venue.
    pub ts_event: UnixNanos,
}

impl Display for FillReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FillReport(trade_id={}, client_id={}, instrument_id={}, direction={}, offset={}, price={}, volume={})",
            self.trade_id,
            self.client_id,
            self.instrument_id,
            self.direction,
            self.offset,
            self.price,
            self.volume,
        )
    }
}

/// Represents an order state report for a single order.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(tag = "type")]
pub struct OrderStatusReport {
    /// The gateway-assigned order ID.
    pub order_id: OrderId,
    /// The client (gateway/account) the report arrived from.
    pub client_id: ClientId,
    /// The instrument the order is for.
    pub instrument_id: InstrumentId,
    /// The order status at the venue.
    pub status: OrderStatus,
}

impl OrderStatusReport {
    /// Returns whether the reported order is still working or in-flight at the venue.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl Display for OrderStatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OrderStatusReport(order_id={}, client_id={}, instrument_id={}, status={})",
            self.order_id, self.client_id, self.instrument_id, self.status,
        )
    }
}

/// Represents a position state snapshot for one side of an instrument.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(tag = "type")]
pub struct PositionStatusReport {
    /// The client (gateway/account) the snapshot arrived from.
    pub client_id: ClientId,
    /// The instrument the position is for.
    pub instrument_id: InstrumentId,
    /// The side of the position (venues report long and short sides separately).
    pub direction: Direction,
    /// The position volume in contracts.
    pub volume: u64,
}

impl Display for PositionStatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PositionStatusReport(client_id={}, instrument_id={}, direction={}, volume={})",
            self.client_id, self.instrument_id, self.direction, self.volume,
        )
    }
}
