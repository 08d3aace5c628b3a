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

//! The trading client abstraction the engine drives its gateways through.

use std::fmt::Debug;

use followtrader_model::{
    identifiers::{ClientId, InstrumentId, OrderId},
    instruments::Contract,
    orders::OrderRequest,
    reports::OrderStatusReport,
};

/// Routes engine commands to the trading gateways and answers reference queries.
///
/// One implementation fronts every connected gateway; commands carry the client ID
/// of the account they are for. All methods are synchronous from the engine's point
/// of view, with results arriving back asynchronously as events.
pub trait TradingClient: Debug {
    /// Subscribes to market data for the instrument on behalf of the client.
    ///
    /// Returns `false` if the subscription could not be placed (unknown
    /// instrument or disconnected gateway).
    fn subscribe(&self, client_id: &ClientId, instrument_id: &InstrumentId) -> bool;

    /// Sends the order request through the client's gateway.
    ///
    /// Returns the gateway-assigned order ID, or `None` when the gateway
    /// rejected the request outright.
    fn send_order(&self, client_id: &ClientId, request: &OrderRequest) -> Option<OrderId>;

    /// Requests cancellation of the order at its venue.
    fn cancel_order(&self, order_id: &OrderId);

    /// Returns the contract definition for the instrument (if known).
    fn contract(&self, instrument_id: &InstrumentId) -> Option<Contract>;

    /// Returns the working orders across all gateways, optionally for one instrument.
    fn active_orders(&self, instrument_id: Option<&InstrumentId>) -> Vec<OrderStatusReport>;

    /// Expands an order request into the gateway-native requests for its venue.
    ///
    /// Venues that distinguish closing today's position from closing yesterday's
    /// may turn one request into several; `lock_mode` asks the gateway to avoid
    /// touching overnight volume. An empty result means the request cannot be
    /// expressed at the venue.
    fn convert_order_request(&self, request: &OrderRequest, lock_mode: bool) -> Vec<OrderRequest>;
}
