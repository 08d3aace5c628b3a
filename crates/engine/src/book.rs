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

//! The per-instrument position book tracking both accounts side by side.
//!
//! The book holds four volumes per instrument: long and short legs for the source account and
//! for the target account. Source legs are overwritten from position snapshots (the source
//! gateway is authoritative for its own account), while target legs are mutated incrementally
//! from the target account's own fills. All reconciliation math reads from this book.

use std::fmt::Display;

use followtrader_model::{
    enums::{Direction, TradeClass},
    identifiers::InstrumentId,
    reports::{FillReport, PositionStatusReport},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The paired holdings of both accounts in a single instrument.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentPosition {
    /// The source account long volume.
    pub source_long: u64,
    /// The source account short volume.
    pub source_short: u64,
    /// The target account long volume.
    pub target_long: u64,
    /// The target account short volume.
    pub target_short: u64,
    /// The operator-declared intentional divergence, in net terms.
    pub basic_delta: i64,
}

impl InstrumentPosition {
    /// Returns the source account net volume (long minus short).
    #[must_use]
    pub const fn source_net(&self) -> i64 {
        self.source_long as i64 - self.source_short as i64
    }

    /// Returns the target account net volume (long minus short).
    #[must_use]
    pub const fn target_net(&self) -> i64 {
        self.target_long as i64 - self.target_short as i64
    }

    /// Returns whether all four volumes are zero.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.source_long == 0
            && self.source_short == 0
            && self.target_long == 0
            && self.target_short == 0
    }
}

/// A point-in-time comparison of both accounts in one instrument.
///
/// Deltas are *source minus target* after applying the follow multiplier (and the
/// inversion swap when configured), so a positive delta means the target account
/// is underweight on that leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDelta {
    /// The instrument ID for the comparison.
    pub instrument_id: InstrumentId,
    /// The source account long volume.
    pub source_long: u64,
    /// The source account short volume.
    pub source_short: u64,
    /// The target account long volume.
    pub target_long: u64,
    /// The target account short volume.
    pub target_short: u64,
    /// The long leg divergence (scaled source minus target).
    pub long_delta: i64,
    /// The short leg divergence (scaled source minus target).
    pub short_delta: i64,
    /// The net divergence (long delta minus short delta).
    pub net_delta: i64,
    /// The operator-declared intentional divergence, in net terms.
    pub basic_delta: i64,
}

impl Display for PositionDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PositionDelta(instrument_id={}, source={}/{}, target={}/{}, long_delta={}, short_delta={}, net_delta={}, basic_delta={})",
            self.instrument_id,
            self.source_long,
            self.source_short,
            self.target_long,
            self.target_short,
            self.long_delta,
            self.short_delta,
            self.net_delta,
            self.basic_delta,
        )
    }
}

/// The position book for all instruments seen this session.
///
/// Insertion order is preserved so broadcasts and persistence are deterministic.
#[derive(Debug, Default)]
pub struct PositionBook {
    positions: IndexMap<InstrumentId, InstrumentPosition>,
}

impl PositionBook {
    /// Creates a new empty [`PositionBook`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position record for the instrument (if found).
    #[must_use]
    pub fn get(&self, instrument_id: &InstrumentId) -> Option<&InstrumentPosition> {
        self.positions.get(instrument_id)
    }

    /// Returns whether the book holds a record for the instrument.
    #[must_use]
    pub fn contains(&self, instrument_id: &InstrumentId) -> bool {
        self.positions.contains_key(instrument_id)
    }

    /// Returns all instrument IDs in the book, in insertion order.
    #[must_use]
    pub fn instruments(&self) -> Vec<InstrumentId> {
        self.positions.keys().copied().collect()
    }

    /// Returns the number of instruments in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the record for the instrument, inserting a flat one if absent.
    pub fn ensure(&mut self, instrument_id: InstrumentId) -> &mut InstrumentPosition {
        self.positions.entry(instrument_id).or_default()
    }

    /// Overwrites one source leg from a position snapshot.
    ///
    /// Returns `false` when the report carries [`Direction::Net`], which the
    /// source gateway emits for instruments it nets internally and which cannot
    /// be attributed to a leg.
    pub fn apply_source_position(&mut self, report: &PositionStatusReport) -> bool {
        let position = self.ensure(report.instrument_id);
        match report.direction {
            Direction::Long => position.source_long = report.volume,
            Direction::Short => position.source_short = report.volume,
            Direction::Net => return false,
        }
        true
    }

    /// Applies a target account fill to the target legs.
    ///
    /// Closing volume is subtracted with saturation: a drop below zero means the
    /// book had drifted from the venue, and the next snapshot reconciles it.
    /// Returns `None` when the fill's direction and offset do not classify.
    pub fn apply_target_trade(&mut self, fill: &FillReport) -> Option<TradeClass> {
        let class = TradeClass::of(fill.direction, fill.offset)?;
        let position = self.ensure(fill.instrument_id);
        match class {
            TradeClass::OpenLong => position.target_long += fill.volume,
            TradeClass::OpenShort => position.target_short += fill.volume,
            TradeClass::CloseLong => {
                position.target_long = position.target_long.saturating_sub(fill.volume);
            }
            TradeClass::CloseShort => {
                position.target_short = position.target_short.saturating_sub(fill.volume);
            }
        }
        Some(class)
    }

    /// Returns the `(long_delta, short_delta)` pair for the instrument (if found).
    ///
    /// Source legs are scaled by `multiplier` before comparison. With `inverse`
    /// the source legs are swapped, so the target mirrors the opposite side.
    #[must_use]
    pub fn leg_deltas(
        &self,
        instrument_id: &InstrumentId,
        multiplier: u64,
        inverse: bool,
    ) -> Option<(i64, i64)> {
        let position = self.positions.get(instrument_id)?;
        let (source_long, source_short) = if inverse {
            (position.source_short, position.source_long)
        } else {
            (position.source_long, position.source_short)
        };
        let long_delta = source_long as i64 * multiplier as i64 - position.target_long as i64;
        let short_delta = source_short as i64 * multiplier as i64 - position.target_short as i64;
        Some((long_delta, short_delta))
    }

    /// Returns the net divergence for the instrument (if found).
    #[must_use]
    pub fn net_delta(
        &self,
        instrument_id: &InstrumentId,
        multiplier: u64,
        inverse: bool,
    ) -> Option<i64> {
        self.leg_deltas(instrument_id, multiplier, inverse)
            .map(|(long_delta, short_delta)| long_delta - short_delta)
    }

    /// Builds the full [`PositionDelta`] comparison for the instrument (if found).
    #[must_use]
    pub fn delta(
        &self,
        instrument_id: &InstrumentId,
        multiplier: u64,
        inverse: bool,
    ) -> Option<PositionDelta> {
        let position = self.positions.get(instrument_id)?;
        let (long_delta, short_delta) = self.leg_deltas(instrument_id, multiplier, inverse)?;
        Some(PositionDelta {
            instrument_id: *instrument_id,
            source_long: position.source_long,
            source_short: position.source_short,
            target_long: position.target_long,
            target_short: position.target_short,
            long_delta,
            short_delta,
            net_delta: long_delta - short_delta,
            basic_delta: position.basic_delta,
        })
    }

    /// Sets the intentional divergence for the instrument, returning `false` if absent.
    pub fn set_basic_delta(&mut self, instrument_id: &InstrumentId, basic_delta: i64) -> bool {
        match self.positions.get_mut(instrument_id) {
            Some(position) => {
                position.basic_delta = basic_delta;
                true
            }
            None => false,
        }
    }

    /// Retains only the records for which the predicate returns `true`.
    pub fn sweep<F>(&mut self, mut retain: F)
    where
        F: FnMut(&InstrumentId, &InstrumentPosition) -> bool,
    {
        self.positions.retain(|id, position| retain(id, position));
    }

    /// Returns the closable hedged volume per instrument passing the predicate.
    ///
    /// The hedged volume is the smaller of the target legs; instruments where
    /// either leg is zero carry no hedge and are skipped.
    #[must_use]
    pub fn hedged_volumes<F>(&self, mut include: F) -> IndexMap<InstrumentId, u64>
    where
        F: FnMut(&InstrumentId) -> bool,
    {
        self.positions
            .iter()
            .filter(|(id, _)| include(id))
            .filter_map(|(id, position)| {
                let hedged = position.target_long.min(position.target_short);
                (hedged > 0).then_some((*id, hedged))
            })
            .collect()
    }

    /// Returns a copy of all records for persistence.
    #[must_use]
    pub fn snapshot(&self) -> IndexMap<InstrumentId, InstrumentPosition> {
        self.positions.clone()
    }

    /// Replaces all records from persisted state.
    pub fn restore(&mut self, positions: IndexMap<InstrumentId, InstrumentPosition>) {
        self.positions = positions;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use followtrader_core::UnixNanos;
    use followtrader_model::{
        enums::Offset,
        identifiers::{ClientId, OrderId, TradeId, stubs::*},
        reports::FillReportBuilder,
    };
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn book() -> PositionBook {
        PositionBook::new()
    }

    fn snapshot(
        instrument_id: InstrumentId,
        direction: Direction,
        volume: u64,
    ) -> PositionStatusReport {
        PositionStatusReport {
            client_id: ClientId::from("CTP_A"),
            instrument_id,
            direction,
            volume,
        }
    }

    fn target_fill(
        instrument_id: InstrumentId,
        direction: Direction,
        offset: Offset,
        volume: u64,
    ) -> FillReport {
        FillReportBuilder::default()
            .trade_id(TradeId::from("CTP_B.1"))
            .order_id(OrderId::from("CTP_B.1"))
            .client_id(ClientId::from("CTP_B"))
            .instrument_id(instrument_id)
            .direction(direction)
            .offset(offset)
            .price(4000.0)
            .volume(volume)
            .ts_event(UnixNanos::default())
            .build()
            .unwrap()
    }

    #[rstest]
    fn test_source_snapshot_overwrites_leg(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        assert!(book.apply_source_position(&snapshot(instrument_id_rb_shfe, Direction::Long, 10)));
        assert!(book.apply_source_position(&snapshot(instrument_id_rb_shfe, Direction::Long, 4)));
        assert!(book.apply_source_position(&snapshot(instrument_id_rb_shfe, Direction::Short, 2)));

        let position = book.get(&instrument_id_rb_shfe).unwrap();
        assert_eq!(position.source_long, 4);
        assert_eq!(position.source_short, 2);
    }

    #[rstest]
    fn test_source_net_snapshot_ignored(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        assert!(!book.apply_source_position(&snapshot(instrument_id_rb_shfe, Direction::Net, 7)));

        // The record is still created so later snapshots land on it
        let position = book.get(&instrument_id_rb_shfe).unwrap();
        assert_eq!(position.source_long, 0);
        assert_eq!(position.source_short, 0);
    }

    #[rstest]
    #[case(Direction::Long, Offset::Open, 5, 5, 0)]
    #[case(Direction::Short, Offset::Open, 5, 0, 5)]
    fn test_target_open_fills_add(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
        #[case] direction: Direction,
        #[case] offset: Offset,
        #[case] volume: u64,
        #[case] expected_long: u64,
        #[case] expected_short: u64,
    ) {
        let class = book.apply_target_trade(&target_fill(
            instrument_id_rb_shfe,
            direction,
            offset,
            volume,
        ));

        assert!(class.is_some());
        let position = book.get(&instrument_id_rb_shfe).unwrap();
        assert_eq!(position.target_long, expected_long);
        assert_eq!(position.target_short, expected_short);
    }

    #[rstest]
    fn test_target_close_fills_subtract(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        book.apply_target_trade(&target_fill(
            instrument_id_rb_shfe,
            Direction::Long,
            Offset::Open,
            5,
        ));
        let class = book.apply_target_trade(&target_fill(
            instrument_id_rb_shfe,
            Direction::Short,
            Offset::Close,
            3,
        ));

        assert_eq!(class, Some(TradeClass::CloseLong));
        assert_eq!(book.get(&instrument_id_rb_shfe).unwrap().target_long, 2);
    }

    #[rstest]
    fn test_target_close_saturates_at_zero(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        book.apply_target_trade(&target_fill(
            instrument_id_rb_shfe,
            Direction::Short,
            Offset::CloseToday,
            3,
        ));

        assert_eq!(book.get(&instrument_id_rb_shfe).unwrap().target_long, 0);
    }

    #[rstest]
    fn test_target_net_fill_unclassified(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        let class = book.apply_target_trade(&target_fill(
            instrument_id_rb_shfe,
            Direction::Net,
            Offset::Open,
            3,
        ));

        assert!(class.is_none());
    }

    #[rstest]
    fn test_leg_deltas_with_multiplier(mut book: PositionBook, instrument_id_rb_shfe: InstrumentId) {
        let position = book.ensure(instrument_id_rb_shfe);
        position.source_long = 10;
        position.source_short = 4;
        position.target_long = 18;
        position.target_short = 8;

        assert_eq!(
            book.leg_deltas(&instrument_id_rb_shfe, 2, false),
            Some((2, 0))
        );
    }

    #[rstest]
    fn test_leg_deltas_inverse_swaps_source(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        let position = book.ensure(instrument_id_rb_shfe);
        position.source_long = 10;
        position.source_short = 4;
        position.target_long = 4;
        position.target_short = 10;

        assert_eq!(
            book.leg_deltas(&instrument_id_rb_shfe, 1, true),
            Some((0, 0))
        );
    }

    #[rstest]
    fn test_net_delta_equals_leg_difference(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        let position = book.ensure(instrument_id_rb_shfe);
        position.source_long = 10;
        position.source_short = 3;
        position.target_long = 2;
        position.target_short = 1;

        let (long_delta, short_delta) = book.leg_deltas(&instrument_id_rb_shfe, 1, false).unwrap();
        assert_eq!(
            book.net_delta(&instrument_id_rb_shfe, 1, false),
            Some(long_delta - short_delta)
        );
    }

    #[rstest]
    fn test_delta_unknown_instrument(book: PositionBook, instrument_id_rb_shfe: InstrumentId) {
        assert!(book.delta(&instrument_id_rb_shfe, 1, false).is_none());
    }

    #[rstest]
    fn test_delta_carries_basic_delta(mut book: PositionBook, instrument_id_rb_shfe: InstrumentId) {
        book.ensure(instrument_id_rb_shfe).source_long = 5;
        assert!(book.set_basic_delta(&instrument_id_rb_shfe, -3));

        let delta = book.delta(&instrument_id_rb_shfe, 1, false).unwrap();
        assert_eq!(delta.long_delta, 5);
        assert_eq!(delta.net_delta, 5);
        assert_eq!(delta.basic_delta, -3);
    }

    #[rstest]
    fn test_set_basic_delta_unknown_instrument(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        assert!(!book.set_basic_delta(&instrument_id_rb_shfe, 1));
    }

    #[rstest]
    fn test_sweep_retains_matching_records(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
        instrument_id_if_cffex: InstrumentId,
    ) {
        book.ensure(instrument_id_rb_shfe).source_long = 5;
        book.ensure(instrument_id_if_cffex);

        book.sweep(|_, position| !position.is_flat());

        assert!(book.contains(&instrument_id_rb_shfe));
        assert!(!book.contains(&instrument_id_if_cffex));
    }

    #[rstest]
    fn test_hedged_volumes_takes_smaller_leg(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
        instrument_id_if_cffex: InstrumentId,
    ) {
        let rb = book.ensure(instrument_id_rb_shfe);
        rb.target_long = 5;
        rb.target_short = 3;
        let if_pos = book.ensure(instrument_id_if_cffex);
        if_pos.target_long = 2;
        if_pos.target_short = 0;

        let hedged = book.hedged_volumes(|_| true);

        assert_eq!(hedged.len(), 1);
        assert_eq!(hedged.get(&instrument_id_rb_shfe), Some(&3));
    }

    #[rstest]
    fn test_hedged_volumes_respects_predicate(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        let position = book.ensure(instrument_id_rb_shfe);
        position.target_long = 5;
        position.target_short = 3;

        assert!(book.hedged_volumes(|_| false).is_empty());
    }

    #[rstest]
    fn test_snapshot_restore_round_trip(
        mut book: PositionBook,
        instrument_id_rb_shfe: InstrumentId,
    ) {
        book.ensure(instrument_id_rb_shfe).source_long = 7;

        let mut restored = PositionBook::new();
        restored.restore(book.snapshot());

        assert_eq!(restored.get(&instrument_id_rb_shfe).unwrap().source_long, 7);
    }
}
