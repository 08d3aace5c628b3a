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

//! FIFO queue for order requests awaiting a first quote.
//!
//! A follow order cannot be priced until the target venue has shown at least one quote for the
//! instrument. Requests arriving before that are parked here and re-examined on every timer
//! tick; entries that never become priceable stay queued rather than being silently dropped.

use std::collections::VecDeque;

use followtrader_model::{identifiers::TradeId, orders::OrderRequest};

/// An order request parked until its instrument becomes priceable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingDispatch {
    /// The source trade that produced the request.
    pub trade_id: TradeId,
    /// The translated request awaiting dispatch.
    pub request: OrderRequest,
}

/// The queue of order requests awaiting dispatch, in arrival order.
#[derive(Debug, Default)]
pub struct DispatchQueue {
    entries: VecDeque<PendingDispatch>,
}

impl DispatchQueue {
    /// Creates a new empty [`DispatchQueue`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a request at the back of the queue.
    pub fn enqueue(&mut self, trade_id: TradeId, request: OrderRequest) {
        self.entries.push_back(PendingDispatch { trade_id, request });
    }

    /// Removes and returns all parked entries in arrival order.
    ///
    /// The caller re-enqueues whatever it still cannot dispatch, which preserves
    /// the relative order of the survivors.
    pub fn take_all(&mut self) -> VecDeque<PendingDispatch> {
        std::mem::take(&mut self.entries)
    }

    /// Returns the number of parked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use followtrader_model::{
        enums::{Direction, Offset, OrderType},
        identifiers::{InstrumentId, stubs::*},
    };
    use rstest::rstest;

    use super::*;

    fn request(instrument_id: InstrumentId, volume: u64) -> OrderRequest {
        OrderRequest::new(
            instrument_id,
            Direction::Long,
            Offset::Open,
            OrderType::Limit,
            4000.0,
            volume,
        )
    }

    #[rstest]
    fn test_take_all_preserves_arrival_order(instrument_id_rb_shfe: InstrumentId) {
        let mut queue = DispatchQueue::new();
        queue.enqueue(TradeId::from("CTP_A.1"), request(instrument_id_rb_shfe, 1));
        queue.enqueue(TradeId::from("CTP_A.2"), request(instrument_id_rb_shfe, 2));
        queue.enqueue(TradeId::from("CTP_A.3"), request(instrument_id_rb_shfe, 3));

        let entries = queue.take_all();

        assert!(queue.is_empty());
        let volumes: Vec<u64> = entries.iter().map(|entry| entry.request.volume).collect();
        assert_eq!(volumes, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_reenqueue_after_take_keeps_relative_order(instrument_id_rb_shfe: InstrumentId) {
        let mut queue = DispatchQueue::new();
        queue.enqueue(TradeId::from("CTP_A.1"), request(instrument_id_rb_shfe, 1));
        queue.enqueue(TradeId::from("CTP_A.2"), request(instrument_id_rb_shfe, 2));

        for entry in queue.take_all() {
            // Simulate neither entry being dispatchable yet
            queue.enqueue(entry.trade_id, entry.request);
        }

        assert_eq!(queue.len(), 2);
        let entries = queue.take_all();
        assert_eq!(entries[0].trade_id, TradeId::from("CTP_A.1"));
        assert_eq!(entries[1].trade_id, TradeId::from("CTP_A.2"));
    }
}
