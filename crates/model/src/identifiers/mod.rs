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

//! Identifiers for the trading domain model.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[macro_use]
mod macros;

pub mod client_id;
pub mod instrument_id;
pub mod order_id;
pub mod symbol;
pub mod trade_id;
pub mod venue;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use crate::identifiers::{
    client_id::ClientId, instrument_id::InstrumentId, order_id::OrderId, symbol::Symbol,
    trade_id::TradeId, venue::Venue,
};

impl_from_str_for_identifier!(client_id::ClientId);
impl_from_str_for_identifier!(order_id::OrderId);
impl_from_str_for_identifier!(symbol::Symbol);
impl_from_str_for_identifier!(trade_id::TradeId);
impl_from_str_for_identifier!(venue::Venue);

impl_serialization_for_identifier!(client_id::ClientId);
impl_serialization_for_identifier!(order_id::OrderId);
impl_serialization_for_identifier!(symbol::Symbol);
impl_serialization_for_identifier!(trade_id::TradeId);
impl_serialization_for_identifier!(venue::Venue);

impl_as_ref_for_identifier!(client_id::ClientId);
impl_as_ref_for_identifier!(order_id::OrderId);
impl_as_ref_for_identifier!(symbol::Symbol);
impl_as_ref_for_identifier!(trade_id::TradeId);
impl_as_ref_for_identifier!(venue::Venue);
