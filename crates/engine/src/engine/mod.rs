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

//! The trade following engine.
//!
//! The [`FollowEngine`] mirrors fills from a source account onto a target account and keeps the
//! two reconciled. Inbound venue events arrive through [`FollowEngine::on_event`], strictly one
//! at a time; outbound commands go through the [`TradingClient`] boundary; persistence goes
//! through the [`FollowStore`] boundary. All sharing is single-threaded via `Rc`.

pub mod config;


use std::{cell::RefCell, fmt::Debug, rc::Rc};

use ahash::AHashSet;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use followtrader_common::{
    clock::Clock,
    logging::{CMD, EVT, RECV, RPT, SEND},
    messages::FollowEvent,
};
use followtrader_core::{
    UnixNanos,
    correctness::check_positive_u64,
    datetime::{at_time_of_day, compact_time_tag, in_hour_window},
};
use followtrader_model::{
    data::QuoteTick,
    enums::{Direction, Offset, OrderType},
    identifiers::{ClientId, InstrumentId, TradeId},
    orders::{MARKET_PRICE, OrderRequest},
    reports::{FillReport, OrderStatusReport, PositionStatusReport},
};
use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    admission::TradeIdRegistry,
    book::{PositionBook, PositionDelta},
    client::TradingClient,
    emitter::FollowEmitter,
    engine::config::FollowEngineConfig,
    pricing::PriceCache,
    queue::DispatchQueue,
    splitter,
    store::{FollowState, FollowStore},
    tracker::ActiveOrderTracker,
    translate,
};

/// The trade id prefix marking engine-generated reconciliation orders.
pub const SYNC_ID_PREFIX: &str = "SYNC_";

/// The reason a reconciliation operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The engine is not following.
    #[error("engine is not active")]
    Inactive,
    /// The position book has no record for the instrument.
    #[error("no position record for {instrument_id}")]
    UnknownInstrument {
        /// The unknown instrument ID.
        instrument_id: InstrumentId,
    },
    /// The operation only applies to intraday-locked instruments.
    #[error("{instrument_id} is not followed intraday")]
    NotIntraday {
        /// The offending instrument ID.
        instrument_id: InstrumentId,
    },
    /// The requested close volume is zero or above the hedged volume.
    #[error("volume {volume} exceeds closable hedged volume {hedged}")]
    ExceedsHedge {
        /// The requested close volume.
        volume: u64,
        /// The hedged volume actually closable.
        hedged: u64,
    },
}

/// Mirrors fills from a source account onto a target account and reconciles the two.
pub struct FollowEngine {
    clock: Rc<RefCell<dyn Clock>>,
    client: Rc<dyn TradingClient>,
    store: Rc<dyn FollowStore>,
    emitter: Rc<dyn FollowEmitter>,
    config: FollowEngineConfig,
    registry: TradeIdRegistry,
    book: PositionBook,
    prices: PriceCache,
    queue: DispatchQueue,
    tracker: ActiveOrderTracker,
    subscribed: AHashSet<InstrumentId>,
    is_active: bool,
    archived: bool,
    refresh_counter: u32,
    sync_seq: u64,
}

impl Debug for FollowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(FollowEngine)).finish()
    }
}

impl FollowEngine {
    /// Creates a new [`FollowEngine`] instance.
    pub fn new(
        config: FollowEngineConfig,
        clock: Rc<RefCell<dyn Clock>>,
        client: Rc<dyn TradingClient>,
        store: Rc<dyn FollowStore>,
        emitter: Rc<dyn FollowEmitter>,
    ) -> Self {
        Self {
            clock,
            client,
            store,
            emitter,
            config,
            registry: TradeIdRegistry::new(),
            book: PositionBook::new(),
            prices: PriceCache::new(),
            queue: DispatchQueue::new(),
            tracker: ActiveOrderTracker::new(),
            subscribed: AHashSet::new(),
            is_active: false,
            archived: false,
            refresh_counter: 0,
            sync_seq: 0,
        }
    }

    /// Loads the persisted session state into the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the state document cannot be read or parsed.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let state = self.store.load_state()?;
        self.restore_state(state);
        log::info!(
            "Initialized: {} trade ids, {} followed, {} positions",
            self.registry.len(),
            self.registry.followed().len(),
            self.book.len(),
        );
        Ok(())
    }

    /// Returns whether the engine is following.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &FollowEngineConfig {
        &self.config
    }

    /// Returns the position book.
    #[must_use]
    pub const fn book(&self) -> &PositionBook {
        &self.book
    }

    /// Returns the position delta for the instrument (if found).
    #[must_use]
    pub fn delta(&self, instrument_id: &InstrumentId) -> Option<PositionDelta> {
        self.book
            .delta(instrument_id, self.config.multiplier, self.config.inverse)
    }

    /// Returns the position deltas for every instrument in the book.
    #[must_use]
    pub fn deltas(&self) -> Vec<PositionDelta> {
        self.book
            .instruments()
            .iter()
            .filter_map(|instrument_id| self.delta(instrument_id))
            .collect()
    }

    /// Returns the closable hedged volume per intraday instrument.
    #[must_use]
    pub fn hedged_volumes(&self) -> IndexMap<InstrumentId, u64> {
        self.book
            .hedged_volumes(|instrument_id| self.config.is_intraday(instrument_id))
    }

    // -- CONTROL ---------------------------------------------------------------------------------

    /// Starts following.
    ///
    /// # Errors
    ///
    /// Returns an error if already following, if the source and target client
    /// IDs coincide, or if the configuration is invalid.
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.is_active {
            anyhow::bail!("Already following");
        }
        if self.config.source_client == self.config.target_client {
            anyhow::bail!("Source and target clients must differ");
        }
        self.config.validate()?;
        self.is_active = true;
        self.archived = false;
        log::info!(
            "Following started: {} -> {}",
            self.config.source_client,
            self.config.target_client,
        );
        Ok(())
    }

    /// Stops following.
    ///
    /// Cancels the target account's working orders, saves the settings, sweeps
    /// flat and no-longer-known positions, and archives the session when inside
    /// the post-close window (otherwise just persists it).
    ///
    /// # Errors
    ///
    /// Returns an error if not following or if persistence fails.
    pub fn stop(&mut self) -> anyhow::Result<()> {
        if !self.is_active {
            anyhow::bail!("Not following");
        }
        self.is_active = false;
        self.cancel_all_orders(None);
        self.store.save_settings(&self.config)?;
        self.sweep_positions();
        let now = self.clock.borrow().utc_now();
        if !self.archived
            && in_hour_window(
                now,
                self.config.archive_start_hour,
                self.config.archive_end_hour,
            )
        {
            self.archive_and_clear(now.date_naive())?;
        } else {
            self.persist_state()?;
        }
        log::info!("Following stopped");
        Ok(())
    }

    /// Sets the source and target client IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if currently following or if the IDs coincide.
    pub fn set_clients(
        &mut self,
        source_client: ClientId,
        target_client: ClientId,
    ) -> anyhow::Result<()> {
        if self.is_active {
            anyhow::bail!("Cannot change clients while following");
        }
        if source_client == target_client {
            anyhow::bail!("Source and target clients must differ");
        }
        self.config.source_client = source_client;
        self.config.target_client = target_client;
        log::info!("Clients set: source={source_client}, target={target_client}");
        Ok(())
    }

    /// Sets the follow volume multiplier.
    ///
    /// # Errors
    ///
    /// Returns an error if `multiplier` is zero.
    pub fn set_multiplier(&mut self, multiplier: u64) -> anyhow::Result<()> {
        check_positive_u64(multiplier, stringify!(multiplier))?;
        self.config.multiplier = multiplier;
        Ok(())
    }

    /// Sets the price padding in ticks.
    pub const fn set_tick_add(&mut self, tick_add: u32) {
        self.config.tick_add = tick_add;
    }

    /// Sets whether source directions are inverted on the target account.
    pub const fn set_inverse(&mut self, inverse: bool) {
        self.config.inverse = inverse;
    }

    /// Sets the order type for follow orders.
    pub const fn set_order_type(&mut self, order_type: OrderType) {
        self.config.order_type = order_type;
    }

    /// Sets the timer ticks before an unreported working order is cancelled.
    pub const fn set_cancel_order_timeout_ticks(&mut self, ticks: u32) {
        self.config.cancel_order_timeout_ticks = ticks;
    }

    /// Sets the freshness window for source fills, in seconds.
    pub const fn set_filter_trade_timeout_secs(&mut self, secs: u64) {
        self.config.filter_trade_timeout_secs = secs;
    }

    /// Adds the instrument to the blocked list, returning `false` if already present.
    pub fn block_instrument(&mut self, instrument_id: InstrumentId) -> bool {
        let inserted = self.config.blocked_instruments.insert(instrument_id);
        if inserted {
            log::info!("Blocked {instrument_id}");
        }
        inserted
    }

    /// Removes the instrument from the blocked list, returning `false` if absent.
    pub fn unblock_instrument(&mut self, instrument_id: &InstrumentId) -> bool {
        let removed = self.config.blocked_instruments.shift_remove(instrument_id);
        if removed {
            log::info!("Unblocked {instrument_id}");
        }
        removed
    }

    /// Cancels the target account's working orders, optionally for one instrument.
    pub fn cancel_all_orders(&self, instrument_id: Option<&InstrumentId>) {
        for report in self.client.active_orders(instrument_id) {
            if report.client_id == self.config.target_client {
                log::info!("{SEND}{CMD} cancel {}", report.order_id);
                self.client.cancel_order(&report.order_id);
            }
        }
    }

    // -- EVENT HANDLERS --------------------------------------------------------------------------

    /// Processes one inbound event.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler fails (persistence or dispatch); the event
    /// itself is never re-processed.
    pub fn on_event(&mut self, event: FollowEvent) -> anyhow::Result<()> {
        match event {
            FollowEvent::Quote(quote) => {
                self.on_quote(&quote);
                Ok(())
            }
            FollowEvent::Order(report) => {
                self.on_order(&report);
                Ok(())
            }
            FollowEvent::Fill(fill) => self.on_fill(fill),
            FollowEvent::Position(report) => {
                self.on_position(&report);
                Ok(())
            }
            FollowEvent::Time(_) => self.on_timer(),
        }
    }

    fn on_quote(&mut self, quote: &QuoteTick) {
        self.prices.apply(quote);
    }

    fn on_order(&mut self, report: &OrderStatusReport) {
        if report.client_id == self.config.source_client {
            return;
        }
        if !self.registry.is_follow_order(&report.order_id) {
            return;
        }
        log::debug!("{RECV}{RPT} {report}");
        if report.is_active() {
            self.tracker.track(report.order_id);
        } else {
            self.tracker.untrack(&report.order_id);
        }
    }

    fn on_position(&mut self, report: &PositionStatusReport) {
        if report.client_id != self.config.source_client {
            return;
        }
        log::debug!("{RECV}{RPT} {report}");
        self.subscribe_once(report.instrument_id);
        self.book.apply_source_position(report);
    }

    fn on_fill(&mut self, fill: FillReport) -> anyhow::Result<()> {
        if !self.is_active {
            if self.registry.register(fill.trade_id) {
                log::debug!("Fill {} registered while inactive, not followed", fill.trade_id);
            }
            return Ok(());
        }
        if fill.client_id == self.config.source_client {
            return self.on_source_fill(&fill);
        }
        if fill.client_id == self.config.target_client {
            if !self.registry.register(fill.trade_id) {
                log::debug!("Fill {} already registered, skipping", fill.trade_id);
                return Ok(());
            }
            return self.on_target_fill(&fill);
        }
        if self.registry.register(fill.trade_id) {
            log::debug!("Fill {} from client {} ignored", fill.trade_id, fill.client_id);
        }
        Ok(())
    }

    fn on_source_fill(&mut self, fill: &FillReport) -> anyhow::Result<()> {
        let blocked = self.config.is_blocked(&fill.instrument_id);
        let stale = self.is_stale_fill(fill);
        if let Err(e) = self.registry.admit(fill.trade_id, blocked, stale) {
            log::info!("{RECV}{EVT} {fill} not followed: {e}");
            return Ok(());
        }
        log::info!("{RECV}{EVT} {fill}");
        let Some(request) = translate::translate_fill(fill, &self.config, &self.book) else {
            return Ok(());
        };
        self.dispatch(fill.trade_id, request)
    }

    fn on_target_fill(&mut self, fill: &FillReport) -> anyhow::Result<()> {
        if !self.registry.is_follow_order(&fill.order_id) {
            log::debug!("Fill {} not from a follow order, ignoring", fill.trade_id);
            return Ok(());
        }
        log::info!("{RECV}{EVT} {fill}");
        if self.book.apply_target_trade(fill).is_none() {
            log::warn!("Fill {} unclassifiable, book unchanged", fill.trade_id);
            return Ok(());
        }
        self.persist_state()?;
        self.emit_delta(&fill.instrument_id);
        log::info!("Position {} updated", fill.instrument_id);
        Ok(())
    }

    fn on_timer(&mut self) -> anyhow::Result<()> {
        self.drain_queue()?;
        self.cancel_overdue_orders();
        self.refresh_positions();
        self.archive_if_post_close()
    }

    // -- DISPATCH --------------------------------------------------------------------------------

    fn dispatch(&mut self, trade_id: TradeId, request: OrderRequest) -> anyhow::Result<()> {
        if self.prices.is_ready(&request.instrument_id) {
            self.price_and_send(trade_id, request)
        } else {
            self.subscribe_once(request.instrument_id);
            self.queue.enqueue(trade_id, request);
            log::info!(
                "No quote for {} yet, queued trade {trade_id} ({} queued)",
                request.instrument_id,
                self.queue.len(),
            );
            Ok(())
        }
    }

    fn price_and_send(&mut self, trade_id: TradeId, request: OrderRequest) -> anyhow::Result<()> {
        let Some(contract) = self.client.contract(&request.instrument_id) else {
            log::warn!(
                "No contract for {}, dropping trade {trade_id}",
                request.instrument_id,
            );
            return Ok(());
        };
        let Some(price) = self.prices.convert_price(
            &request.instrument_id,
            request.direction,
            request.price,
            request.order_type,
            self.config.tick_add,
            contract.price_tick,
        ) else {
            self.queue.enqueue(trade_id, request);
            return Ok(());
        };
        let request = request.with_price(price);

        let lock_mode = self.config.is_intraday(&request.instrument_id);
        let converted = self.client.convert_order_request(&request, lock_mode);
        if converted.is_empty() {
            log::warn!("Gateway cannot express {request}, dropping trade {trade_id}");
            return Ok(());
        }

        let cap = splitter::effective_cap(
            &request.instrument_id.symbol,
            &self.config.single_max_by_product,
            self.config.single_max,
        );
        let mut order_ids = Vec::new();
        for converted_request in &converted {
            for piece in splitter::split(converted_request, cap) {
                match self.client.send_order(&self.config.target_client, &piece) {
                    Some(order_id) => {
                        log::info!("{SEND}{CMD} {piece} order_id={order_id}");
                        order_ids.push(order_id);
                    }
                    None => log::warn!("Send rejected for {piece}"),
                }
            }
        }
        if order_ids.is_empty() {
            return Ok(());
        }

        self.registry.record_followed(trade_id, order_ids);
        self.persist_state()?;
        let action = if trade_id.as_str().starts_with(SYNC_ID_PREFIX) {
            "Sync"
        } else {
            "Follow"
        };
        log::info!("{action} orders placed for trade {trade_id}");
        Ok(())
    }

    fn subscribe_once(&mut self, instrument_id: InstrumentId) {
        if self.subscribed.contains(&instrument_id) {
            return;
        }
        if self
            .client
            .subscribe(&self.config.source_client, &instrument_id)
        {
            self.subscribed.insert(instrument_id);
            log::info!("Subscribed to {instrument_id}");
        } else {
            log::warn!("Subscription to {instrument_id} failed");
        }
    }

    fn drain_queue(&mut self) -> anyhow::Result<()> {
        let mut pending = self.queue.take_all();
        while let Some(entry) = pending.pop_front() {
            if !self.prices.is_ready(&entry.request.instrument_id) {
                self.queue.enqueue(entry.trade_id, entry.request);
                continue;
            }
            if let Err(e) = self.price_and_send(entry.trade_id, entry.request) {
                for rest in pending {
                    self.queue.enqueue(rest.trade_id, rest.request);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn cancel_overdue_orders(&mut self) {
        for order_id in self.tracker.on_tick(self.config.cancel_order_timeout_ticks) {
            log::info!("Order {order_id} unreported beyond timeout, cancelling");
            self.client.cancel_order(&order_id);
        }
    }

    fn refresh_positions(&mut self) {
        if self.refresh_counter > self.config.refresh_pos_ticks {
            for instrument_id in self.book.instruments() {
                self.emit_delta(&instrument_id);
            }
            self.refresh_counter = 0;
        }
        self.refresh_counter += 1;
    }

    fn archive_if_post_close(&mut self) -> anyhow::Result<()> {
        if self.archived {
            return Ok(());
        }
        let now = self.clock.borrow().utc_now();
        if in_hour_window(
            now,
            self.config.archive_start_hour,
            self.config.archive_end_hour,
        ) {
            self.archive_and_clear(now.date_naive())?;
        }
        Ok(())
    }

    // -- RECONCILIATION --------------------------------------------------------------------------

    /// Opens position on the target account wherever it is underweight.
    ///
    /// Working orders for the instrument are cancelled first.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] precondition failure, or an error from dispatch
    /// or persistence.
    pub fn sync_open(&mut self, instrument_id: &InstrumentId) -> anyhow::Result<()> {
        let (long_delta, short_delta) = self.sync_deltas(instrument_id)?;
        self.cancel_all_orders(Some(instrument_id));
        if long_delta > 0 {
            self.buy(*instrument_id, long_delta as u64, 0.0)?;
        } else {
            log::info!("Open sync {instrument_id}: long leg needs nothing");
        }
        if short_delta > 0 {
            self.short(*instrument_id, short_delta as u64, 0.0)?;
        } else {
            log::info!("Open sync {instrument_id}: short leg needs nothing");
        }
        Ok(())
    }

    /// Closes position on the target account wherever it is overweight.
    ///
    /// Working orders for the instrument are cancelled first.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] precondition failure, or an error from dispatch
    /// or persistence.
    pub fn sync_close(&mut self, instrument_id: &InstrumentId) -> anyhow::Result<()> {
        let (long_delta, short_delta) = self.sync_deltas(instrument_id)?;
        self.cancel_all_orders(Some(instrument_id));
        if long_delta < 0 {
            self.sell(*instrument_id, long_delta.unsigned_abs(), 0.0)?;
        } else {
            log::info!("Close sync {instrument_id}: long leg needs nothing");
        }
        if short_delta < 0 {
            self.cover(*instrument_id, short_delta.unsigned_abs(), 0.0)?;
        } else {
            log::info!("Close sync {instrument_id}: short leg needs nothing");
        }
        Ok(())
    }

    /// Fully reconciles the instrument, opening and closing as needed.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] precondition failure, or an error from dispatch
    /// or persistence.
    pub fn sync(&mut self, instrument_id: &InstrumentId) -> anyhow::Result<()> {
        let (long_delta, short_delta) = self.sync_deltas(instrument_id)?;
        if long_delta == 0 && short_delta == 0 {
            log::info!("Position {instrument_id} already synchronized");
            return Ok(());
        }
        self.sync_open(instrument_id)?;
        self.sync_close(instrument_id)
    }

    /// Reconciles every instrument in the book, continuing past per-instrument failures.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Inactive`] when the engine is not following.
    pub fn sync_all(&mut self) -> anyhow::Result<()> {
        self.check_active()?;
        for instrument_id in self.book.instruments() {
            if let Err(e) = self.sync(&instrument_id) {
                log::error!("Sync failed for {instrument_id}: {e:?}");
            }
        }
        Ok(())
    }

    /// Reconciles the net exposure of an intraday instrument with opening orders.
    ///
    /// With `is_basic` the full net delta is closed at marketable prices and the
    /// intentional divergence is reset to zero afterwards; otherwise the residual
    /// beyond `basic_delta` is reconciled at chased limit prices.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] precondition failure, or an error from dispatch
    /// or persistence.
    pub fn sync_net(&mut self, instrument_id: &InstrumentId, is_basic: bool) -> anyhow::Result<()> {
        self.check_active()?;
        let delta = self.known_delta(instrument_id)?;
        if !self.config.is_intraday(instrument_id) {
            return Err(SyncError::NotIntraday {
                instrument_id: *instrument_id,
            }
            .into());
        }
        let residual = if is_basic {
            delta.net_delta
        } else {
            delta.net_delta - delta.basic_delta
        };
        if residual == 0 {
            log::info!("Net position {instrument_id} already synchronized");
        } else {
            self.cancel_all_orders(Some(instrument_id));
            let price = if is_basic { MARKET_PRICE } else { 0.0 };
            if residual > 0 {
                self.buy(*instrument_id, residual as u64, price)?;
            } else {
                self.short(*instrument_id, residual.unsigned_abs(), price)?;
            }
        }
        if is_basic && self.book.set_basic_delta(instrument_id, 0) {
            self.persist_state()?;
        }
        Ok(())
    }

    /// Declares the instrument's current net divergence intentional.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] precondition failure or a persistence error.
    pub fn mark_basic_delta(&mut self, instrument_id: &InstrumentId) -> anyhow::Result<()> {
        let delta = self.known_delta(instrument_id)?;
        if !self.config.is_intraday(instrument_id) {
            return Err(SyncError::NotIntraday {
                instrument_id: *instrument_id,
            }
            .into());
        }
        self.book.set_basic_delta(instrument_id, delta.net_delta);
        self.persist_state()?;
        log::info!(
            "Marked basic delta {} for {instrument_id}",
            delta.net_delta,
        );
        Ok(())
    }

    /// Closes `volume` of the instrument's hedged position with a sell and a cover.
    ///
    /// Both orders go out at marketable prices. The spread cost makes this an
    /// explicit operator decision rather than an automatic cleanup.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] precondition failure, or an error from dispatch
    /// or persistence.
    pub fn close_hedged(&mut self, instrument_id: &InstrumentId, volume: u64) -> anyhow::Result<()> {
        self.check_active()?;
        let Some(position) = self.book.get(instrument_id) else {
            return Err(SyncError::UnknownInstrument {
                instrument_id: *instrument_id,
            }
            .into());
        };
        let hedged = position.target_long.min(position.target_short);
        if volume == 0 || volume > hedged {
            return Err(SyncError::ExceedsHedge { volume, hedged }.into());
        }
        self.sell(*instrument_id, volume, MARKET_PRICE)?;
        self.cover(*instrument_id, volume, MARKET_PRICE)?;
        log::info!("Hedged close of {volume} submitted for {instrument_id}");
        Ok(())
    }

    /// Closes the full hedged volume of every intraday instrument carrying one.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Inactive`] when the engine is not following.
    pub fn close_all_hedged(&mut self) -> anyhow::Result<()> {
        self.check_active()?;
        let hedged = self.hedged_volumes();
        if hedged.is_empty() {
            log::info!("No hedged volume to close");
            return Ok(());
        }
        for (instrument_id, volume) in hedged {
            if let Err(e) = self.close_hedged(&instrument_id, volume) {
                log::error!("Hedged close failed for {instrument_id}: {e:?}");
            }
        }
        Ok(())
    }

    const fn check_active(&self) -> Result<(), SyncError> {
        if self.is_active {
            Ok(())
        } else {
            Err(SyncError::Inactive)
        }
    }

    fn sync_deltas(&self, instrument_id: &InstrumentId) -> Result<(i64, i64), SyncError> {
        self.check_active()?;
        self.book
            .leg_deltas(instrument_id, self.config.multiplier, self.config.inverse)
            .ok_or(SyncError::UnknownInstrument {
                instrument_id: *instrument_id,
            })
    }

    fn known_delta(&self, instrument_id: &InstrumentId) -> Result<PositionDelta, SyncError> {
        self.delta(instrument_id)
            .ok_or(SyncError::UnknownInstrument {
                instrument_id: *instrument_id,
            })
    }

    fn buy(&mut self, instrument_id: InstrumentId, volume: u64, price: f64) -> anyhow::Result<()> {
        let request = OrderRequest::new_checked(
            instrument_id,
            Direction::Long,
            Offset::Open,
            OrderType::Limit,
            price,
            volume,
        )?;
        self.send_sync_order(request)
    }

    fn short(&mut self, instrument_id: InstrumentId, volume: u64, price: f64) -> anyhow::Result<()> {
        let request = OrderRequest::new_checked(
            instrument_id,
            Direction::Short,
            Offset::Open,
            OrderType::Limit,
            price,
            volume,
        )?;
        self.send_sync_order(request)
    }

    fn sell(&mut self, instrument_id: InstrumentId, volume: u64, price: f64) -> anyhow::Result<()> {
        let request = OrderRequest::new_checked(
            instrument_id,
            Direction::Short,
            Offset::Close,
            OrderType::Limit,
            price,
            volume,
        )?;
        self.send_sync_order(request)
    }

    fn cover(&mut self, instrument_id: InstrumentId, volume: u64, price: f64) -> anyhow::Result<()> {
        let request = OrderRequest::new_checked(
            instrument_id,
            Direction::Long,
            Offset::Close,
            OrderType::Limit,
            price,
            volume,
        )?;
        self.send_sync_order(request)
    }

    fn send_sync_order(&mut self, request: OrderRequest) -> anyhow::Result<()> {
        let trade_id = self.next_sync_id();
        log::info!("Sync {request} as trade {trade_id}");
        self.dispatch(trade_id, request)
    }

    // Sync fills must carry a trade id or they would be dropped as venue
    // artifacts and never reach the position book.
    fn next_sync_id(&mut self) -> TradeId {
        self.sync_seq += 1;
        let tag = compact_time_tag(UnixNanos::from(self.current_time()));
        TradeId::new(format!("{SYNC_ID_PREFIX}{tag}_{}", self.sync_seq))
    }

    // -- INTERNAL --------------------------------------------------------------------------------

    /// Returns the current time, preferring fresh venue time over the wall clock.
    fn current_time(&self) -> DateTime<Utc> {
        let wall = self.clock.borrow().utc_now();
        if let Some(ts) = self.prices.last_venue_time() {
            let venue = ts.to_datetime_utc();
            let age = wall.signed_duration_since(venue);
            if age <= TimeDelta::seconds(self.config.filter_trade_timeout_secs as i64) {
                return venue;
            }
        }
        wall
    }

    fn is_stale_fill(&self, fill: &FillReport) -> bool {
        let now = self.current_time();
        let fill_time = at_time_of_day(now, fill.ts_event.to_datetime_utc().time());
        now.signed_duration_since(fill_time)
            > TimeDelta::seconds(self.config.filter_trade_timeout_secs as i64)
    }

    fn sweep_positions(&mut self) {
        let client = &self.client;
        self.book.sweep(|instrument_id, position| {
            !position.is_flat() && client.contract(instrument_id).is_some()
        });
    }

    fn archive_and_clear(&mut self, date: NaiveDate) -> anyhow::Result<()> {
        let state = self.snapshot_state();
        self.store.archive_state(date, &state)?;
        self.registry.clear_followed();
        self.persist_state()?;
        self.archived = true;
        log::info!("Archived session state for {date}");
        Ok(())
    }

    fn snapshot_state(&self) -> FollowState {
        FollowState {
            trade_ids: self.registry.trade_ids(),
            followed: self.registry.followed().clone(),
            positions: self.book.snapshot(),
        }
    }

    fn persist_state(&self) -> anyhow::Result<()> {
        self.store.save_state(&self.snapshot_state())
    }

    fn restore_state(&mut self, state: FollowState) {
        self.registry.restore(state.trade_ids, state.followed);
        self.book.restore(state.positions);
    }

    fn emit_delta(&self, instrument_id: &InstrumentId) {
        if let Some(delta) = self.delta(instrument_id) {
            self.emitter.emit_delta(&delta);
        }
    }
}
