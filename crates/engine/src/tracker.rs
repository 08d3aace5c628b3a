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

//! Staleness tracking for working follow orders.
//!
//! Every active follow order carries a tick counter which is reset whenever the venue reports
//! the order still alive. An order whose counter outruns the configured timeout is overdue and
//! gets a cancel request; the counter then restarts so an ineffective cancel is retried a full
//! timeout later rather than on every subsequent tick.

use followtrader_model::identifiers::OrderId;
use indexmap::IndexMap;

/// Tick counters for the follow orders currently working at the venue.
#[derive(Debug, Default)]
pub struct ActiveOrderTracker {
    counters: IndexMap<OrderId, u32>,
}

impl ActiveOrderTracker {
    /// Creates a new empty [`ActiveOrderTracker`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking the order, resetting its counter if already tracked.
    pub fn track(&mut self, order_id: OrderId) {
        self.counters.insert(order_id, 0);
    }

    /// Stops tracking the order.
    pub fn untrack(&mut self, order_id: &OrderId) {
        self.counters.swap_remove(order_id);
    }

    /// Returns whether the order is being tracked.
    #[must_use]
    pub fn is_tracked(&self, order_id: &OrderId) -> bool {
        self.counters.contains_key(order_id)
    }

    /// Returns the number of tracked orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Returns whether no orders are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Advances all counters by one tick, returning the orders now overdue.
    ///
    /// An order is overdue once its counter exceeds `threshold`; its counter is
    /// reset to zero on collection while all others advance by one.
    pub fn on_tick(&mut self, threshold: u32) -> Vec<OrderId> {
        let mut overdue = Vec::new();
        for (order_id, counter) in &mut self.counters {
            if *counter > threshold {
                overdue.push(*order_id);
                *counter = 0;
            } else {
                *counter += 1;
            }
        }
        overdue
    }
}
