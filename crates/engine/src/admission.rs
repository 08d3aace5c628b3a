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

//! Trade-id registry and admission control for inbound fills.
//!
//! Every trade id seen during a session, from either account, is recorded exactly once in the
//! registry regardless of the admission outcome. Membership is permanent for the session, which
//! makes re-delivery after a gateway reconnect idempotent. The secondary `followed` map records
//! the fan-out from one source trade to the target orders it produced, and is what survives a
//! process restart.

use ahash::AHashSet;
use followtrader_model::identifiers::{OrderId, TradeId};
use indexmap::IndexMap;
use thiserror::Error;

/// The reason a source fill was refused admission.
///
/// Admission errors are logged and dropped, never retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// The trade id was already registered this session (re-push on reconnect).
    #[error("trade {trade_id} is a duplicate push")]
    Duplicate {
        /// The offending trade ID.
        trade_id: TradeId,
    },
    /// The instrument is on the operator-maintained skip list.
    #[error("trade {trade_id} is for a blocked instrument")]
    BlockedInstrument {
        /// The offending trade ID.
        trade_id: TradeId,
    },
    /// The fill is older than the freshness window (replay after a long reconnect).
    #[error("trade {trade_id} is outside the follow freshness window")]
    Stale {
        /// The offending trade ID.
        trade_id: TradeId,
    },
    /// The trade was already followed in a previous run (restart-safe re-delivery).
    #[error("trade {trade_id} was already followed")]
    AlreadyFollowed {
        /// The offending trade ID.
        trade_id: TradeId,
    },
}

/// Registry of every trade id processed plus the source-trade to target-orders fan-out map.
#[derive(Debug, Default)]
pub struct TradeIdRegistry {
    trade_ids: AHashSet<TradeId>,
    followed: IndexMap<TradeId, Vec<OrderId>>,
    follow_orders: AHashSet<OrderId>,
}

impl TradeIdRegistry {
    /// Creates a new empty [`TradeIdRegistry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the trade id, returning `false` if it was already registered.
    pub fn register(&mut self, trade_id: TradeId) -> bool {
        self.trade_ids.insert(trade_id)
    }

    /// Returns whether the trade id has been registered.
    #[must_use]
    pub fn contains(&self, trade_id: &TradeId) -> bool {
        self.trade_ids.contains(trade_id)
    }

    /// Runs the admission checks for a source fill, in canonical order.
    ///
    /// The id is registered first and exactly once, so a duplicate short-circuits
    /// before any other check can double-count it. The `blocked` and `stale`
    /// verdicts are supplied by the caller: they depend on operator configuration
    /// and clock state which do not belong to the registry.
    ///
    /// # Errors
    ///
    /// Returns the first matching [`AdmissionError`], checked in the order
    /// duplicate, blocked instrument, stale, already followed.
    pub fn admit(
        &mut self,
        trade_id: TradeId,
        blocked: bool,
        stale: bool,
    ) -> Result<(), AdmissionError> {
        if !self.register(trade_id) {
            return Err(AdmissionError::Duplicate { trade_id });
        }
        if blocked {
            return Err(AdmissionError::BlockedInstrument { trade_id });
        }
        if stale {
            return Err(AdmissionError::Stale { trade_id });
        }
        if self.is_followed(&trade_id) {
            return Err(AdmissionError::AlreadyFollowed { trade_id });
        }
        Ok(())
    }

    /// Returns whether the source trade already has follow orders recorded.
    #[must_use]
    pub fn is_followed(&self, trade_id: &TradeId) -> bool {
        self.followed.contains_key(trade_id)
    }

    /// Returns whether the order id belongs to a follow order placed by this engine.
    #[must_use]
    pub fn is_follow_order(&self, order_id: &OrderId) -> bool {
        self.follow_orders.contains(order_id)
    }

    /// Records the target orders produced by following the given source trade.
    pub fn record_followed(&mut self, trade_id: TradeId, order_ids: Vec<OrderId>) {
        self.follow_orders.extend(order_ids.iter().copied());
        self.followed.insert(trade_id, order_ids);
    }

    /// Returns the source-trade to target-orders fan-out map.
    #[must_use]
    pub const fn followed(&self) -> &IndexMap<TradeId, Vec<OrderId>> {
        &self.followed
    }

    /// Returns all registered trade ids, sorted for deterministic persistence.
    #[must_use]
    pub fn trade_ids(&self) -> Vec<TradeId> {
        let mut ids: Vec<TradeId> = self.trade_ids.iter().copied().collect();
        ids.sort_unstable_by_key(|id| id.inner());
        ids
    }

    /// Returns the number of registered trade ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trade_ids.len()
    }

    /// Returns whether no trade ids have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trade_ids.is_empty()
    }

    /// Restores the registry from persisted state.
    pub fn restore(&mut self, trade_ids: Vec<TradeId>, followed: IndexMap<TradeId, Vec<OrderId>>) {
        self.trade_ids = trade_ids.into_iter().collect();
        self.trade_ids.extend(followed.keys().copied());
        self.follow_orders = followed.values().flatten().copied().collect();
        self.followed = followed;
    }

    /// Clears the session-scoped records at the daily archive boundary.
    pub fn clear_followed(&mut self) {
        self.trade_ids.clear();
        self.followed.clear();
        self.follow_orders.clear();
    }
}
