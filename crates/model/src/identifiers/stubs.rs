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

//! Default implementations and fixture functions to provide stub identifiers for testing.

use rstest::fixture;

use crate::identifiers::{ClientId, InstrumentId, OrderId, TradeId};

// ---- ClientId ----

#[fixture]
pub fn client_id_source() -> ClientId {
    ClientId::from("CTP_A")
}

#[fixture]
pub fn client_id_target() -> ClientId {
    ClientId::from("CTP_B")
}

// ---- InstrumentId ----

#[fixture]
pub fn instrument_id_rb_shfe() -> InstrumentId {
    InstrumentId::from("rb2001.SHFE")
}

#[fixture]
pub fn instrument_id_if_cffex() -> InstrumentId {
    InstrumentId::from("IF2312.CFFEX")
}

// ---- TradeId ----

#[fixture]
pub fn trade_id() -> TradeId {
    TradeId::from("CTP_A.100001")
}

// ---- OrderId ----

#[fixture]
pub fn order_id() -> OrderId {
    OrderId::from("CTP_B.200001")
}
