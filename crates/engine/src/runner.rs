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

//! The single-threaded event loop feeding a [`FollowEngine`].
//!
//! Host processes push inbound events onto the runner from their gateway callbacks and
//! timer, then call [`FollowRunner::drain`] to process them strictly in arrival order.
//! A handler failure is logged and the loop moves on; one poisoned event must not stall
//! the stream behind it.

use std::collections::VecDeque;

use followtrader_common::messages::FollowEvent;

use crate::engine::FollowEngine;

/// Feeds queued events through a [`FollowEngine`] one at a time.
#[derive(Debug)]
pub struct FollowRunner {
    engine: FollowEngine,
    queue: VecDeque<FollowEvent>,
}

impl FollowRunner {
    /// Creates a new [`FollowRunner`] instance wrapping the engine.
    #[must_use]
    pub const fn new(engine: FollowEngine) -> Self {
        Self {
            engine,
            queue: VecDeque::new(),
        }
    }

    /// Returns the wrapped engine.
    #[must_use]
    pub const fn engine(&self) -> &FollowEngine {
        &self.engine
    }

    /// Returns the wrapped engine mutably.
    pub const fn engine_mut(&mut self) -> &mut FollowEngine {
        &mut self.engine
    }

    /// Enqueues an inbound event.
    pub fn push(&mut self, event: FollowEvent) {
        self.queue.push_back(event);
    }

    /// Processes every queued event in arrival order, returning the number processed.
    ///
    /// Handler errors are logged and do not stop the drain.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.queue.pop_front() {
            count += 1;
            if let Err(e) = self.engine.on_event(event.clone()) {
                log::error!("Error processing {event}: {e:?}");
            }
        }
        count
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use chrono::{TimeZone, Utc};
    use followtrader_common::{
        clock::TestClock,
        messages::{FollowEvent, TimeEvent},
    };
    use followtrader_core::UnixNanos;
    use followtrader_model::{
        data::QuoteTick,
        identifiers::{ClientId, InstrumentId, OrderId},
        instruments::Contract,
        orders::OrderRequest,
        reports::OrderStatusReport,
    };
    use rstest::rstest;
    use ustr::Ustr;

    use super::FollowRunner;
    use crate::{
        client::TradingClient,
        emitter::NoopEmitter,
        engine::{FollowEngine, config::FollowEngineConfig},
        store::InMemoryStore,
    };

    #[derive(Debug)]
    struct IdleClient;

    impl TradingClient for IdleClient {
        fn subscribe(&self, _client_id: &ClientId, _instrument_id: &InstrumentId) -> bool {
            true
        }

        fn send_order(&self, _client_id: &ClientId, _request: &OrderRequest) -> Option<OrderId> {
            None
        }

        fn cancel_order(&self, _order_id: &OrderId) {}

        fn contract(&self, _instrument_id: &InstrumentId) -> Option<Contract> {
            None
        }

        fn active_orders(&self, _instrument_id: Option<&InstrumentId>) -> Vec<OrderStatusReport> {
            Vec::new()
        }

        fn convert_order_request(
            &self,
            request: &OrderRequest,
            _lock_mode: bool,
        ) -> Vec<OrderRequest> {
            vec![*request]
        }
    }

    fn runner_with_store(store: Rc<InMemoryStore>, clock: TestClock) -> FollowRunner {
        let engine = FollowEngine::new(
            FollowEngineConfig::default(),
            Rc::new(RefCell::new(clock)),
            Rc::new(IdleClient),
            store,
            Rc::new(NoopEmitter),
        );
        FollowRunner::new(engine)
    }

    fn quote_event() -> FollowEvent {
        FollowEvent::Quote(QuoteTick::new(
            InstrumentId::from("rb2001.SHFE"),
            3500.0,
            3501.0,
            3800.0,
            3200.0,
            UnixNanos::from(1),
        ))
    }

    fn timer_event() -> FollowEvent {
        FollowEvent::Time(TimeEvent::new(Ustr::from("TICK"), UnixNanos::from(1)))
    }

    #[rstest]
    fn test_drain_processes_all_queued_events() {
        let mut runner = runner_with_store(Rc::new(InMemoryStore::new()), TestClock::new());
        runner.push(quote_event());
        runner.push(quote_event());
        runner.push(timer_event());

        assert_eq!(runner.drain(), 3);
        assert_eq!(runner.drain(), 0);
    }

    #[rstest]
    fn test_drain_continues_past_handler_errors() {
        let store = Rc::new(InMemoryStore::new());
        store.set_fail_saves(true);
        // Inside the default archive window, so the timer event hits the store.
        let mut clock = TestClock::new();
        let afternoon = Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 0).unwrap();
        clock.set_time(UnixNanos::from(afternoon));

        let mut runner = runner_with_store(store.clone(), clock);
        runner.push(timer_event());
        runner.push(quote_event());

        assert_eq!(runner.drain(), 2);

        // The runner keeps going once the store recovers.
        store.set_fail_saves(false);
        runner.push(timer_event());
        assert_eq!(runner.drain(), 1);
        assert_eq!(store.archives().len(), 1);
    }
}
