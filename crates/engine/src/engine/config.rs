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

use followtrader_core::correctness::{check_positive_u64, check_predicate_true};
use followtrader_model::{
    enums::OrderType,
    identifiers::{ClientId, InstrumentId},
};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Provides a configuration for `FollowEngine` instances.
///
/// This is also the operator settings document persisted between sessions, so
/// every field has a default and partial documents deserialize cleanly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowEngineConfig {
    /// The client ID of the account being mirrored.
    pub source_client: ClientId,
    /// The client ID of the account receiving follow orders.
    pub target_client: ClientId,
    /// The maximum age in seconds for a source fill to still be followed.
    pub filter_trade_timeout_secs: u64,
    /// The timer ticks a working follow order may go unreported before cancellation.
    pub cancel_order_timeout_ticks: u32,
    /// The volume multiplier applied to source fills.
    pub multiplier: u64,
    /// The price ticks added toward the far side when converting prices.
    pub tick_add: u32,
    /// If source directions are inverted on the target account.
    pub inverse: bool,
    /// The order type for follow orders.
    pub order_type: OrderType,
    /// The global maximum volume per order.
    pub single_max: u64,
    /// Per-product maximum volumes, keyed by product root.
    pub single_max_by_product: IndexMap<String, u64>,
    /// The instruments followed in intraday (lock) mode.
    pub intraday_instruments: IndexSet<InstrumentId>,
    /// The instruments excluded from following.
    pub blocked_instruments: IndexSet<InstrumentId>,
    /// The timer ticks between full position delta broadcasts.
    pub refresh_pos_ticks: u32,
    /// The hour of day (inclusive) from which stopping archives the session.
    pub archive_start_hour: u32,
    /// The hour of day (exclusive) until which stopping archives the session.
    pub archive_end_hour: u32,
}

impl Default for FollowEngineConfig {
    /// Creates a new default [`FollowEngineConfig`] instance.
    fn default() -> Self {
        Self {
            source_client: ClientId::from("CTP"),
            target_client: ClientId::from("RPC"),
            filter_trade_timeout_secs: 60,
            cancel_order_timeout_ticks: 10,
            multiplier: 1,
            tick_add: 10,
            inverse: false,
            order_type: OrderType::Limit,
            single_max: 1000,
            single_max_by_product: IndexMap::from([
                ("IF".to_string(), 20),
                ("IC".to_string(), 20),
                ("IH".to_string(), 20),
            ]),
            intraday_instruments: IndexSet::new(),
            blocked_instruments: IndexSet::new(),
            refresh_pos_ticks: 5,
            archive_start_hour: 15,
            archive_end_hour: 21,
        }
    }
}

impl FollowEngineConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any volume parameter is zero or an archive hour is
    /// outside `0..24`.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_positive_u64(self.multiplier, stringify!(multiplier))?;
        check_positive_u64(self.single_max, stringify!(single_max))?;
        for (product, cap) in &self.single_max_by_product {
            check_positive_u64(*cap, product)?;
        }
        check_predicate_true(
            self.archive_start_hour < 24 && self.archive_end_hour < 24,
            "archive hours must be within 0..24",
        )?;
        Ok(())
    }

    /// Returns whether the instrument is followed in intraday (lock) mode.
    #[must_use]
    pub fn is_intraday(&self, instrument_id: &InstrumentId) -> bool {
        self.intraday_instruments.contains(instrument_id)
    }

    /// Returns whether the instrument is excluded from following.
    #[must_use]
    pub fn is_blocked(&self, instrument_id: &InstrumentId) -> bool {
        self.blocked_instruments.contains(instrument_id)
    }
}
