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

//! Quote caching and aggressive limit price conversion.
//!
//! Follow orders chase the source fill rather than rest at its exact price, so the requested
//! price is padded by a configurable number of price ticks toward the far side of the book and
//! then clamped into the session's limit band. Prices can only be converted once at least one
//! quote for the instrument has been seen.

use ahash::AHashMap;
use followtrader_core::UnixNanos;
use followtrader_model::{
    data::QuoteTick,
    enums::{Direction, OrderType},
    identifiers::InstrumentId,
    orders::MARKET_PRICE,
};

#[derive(Clone, Copy, Debug)]
struct PriceBand {
    limit_up: f64,
    limit_down: f64,
}

#[derive(Clone, Copy, Debug)]
struct BestQuote {
    bid_price: f64,
    ask_price: f64,
}

/// A cache of the latest top-of-book quotes and session limit bands per instrument.
#[derive(Debug, Default)]
pub struct PriceCache {
    bands: AHashMap<InstrumentId, PriceBand>,
    quotes: AHashMap<InstrumentId, BestQuote>,
    last_event_time: Option<UnixNanos>,
}

impl PriceCache {
    /// Creates a new empty [`PriceCache`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a quote tick to the cache.
    ///
    /// The limit band is captured from the first tick of the session only (venues
    /// keep it fixed for the day), while the best bid and ask track every tick.
    pub fn apply(&mut self, quote: &QuoteTick) {
        self.bands.entry(quote.instrument_id).or_insert(PriceBand {
            limit_up: quote.limit_up,
            limit_down: quote.limit_down,
        });
        self.quotes.insert(
            quote.instrument_id,
            BestQuote {
                bid_price: quote.bid_price,
                ask_price: quote.ask_price,
            },
        );
        self.last_event_time = Some(quote.ts_event);
    }

    /// Returns whether a quote for the instrument has been seen.
    #[must_use]
    pub fn is_ready(&self, instrument_id: &InstrumentId) -> bool {
        self.quotes.contains_key(instrument_id) && self.bands.contains_key(instrument_id)
    }

    /// Returns the venue timestamp of the most recent quote tick (if any).
    #[must_use]
    pub const fn last_venue_time(&self) -> Option<UnixNanos> {
        self.last_event_time
    }

    /// Converts a requested price into an aggressive limit price inside the band.
    ///
    /// A requested price of zero starts from the far touch (ask for buys, bid for
    /// sells); market orders and the market sentinel price go straight to the band
    /// edge. Everything else is padded by `tick_add` price ticks toward the far
    /// side and clamped into the band. Returns `None` when no quote has been seen
    /// for the instrument or the direction is [`Direction::Net`].
    #[must_use]
    pub fn convert_price(
        &self,
        instrument_id: &InstrumentId,
        direction: Direction,
        requested: f64,
        order_type: OrderType,
        tick_add: u32,
        price_tick: f64,
    ) -> Option<f64> {
        let band = self.bands.get(instrument_id)?;
        let quote = self.quotes.get(instrument_id)?;

        // Feeds occasionally push a one-sided book with garbage on the empty side
        let ask = quote.ask_price.min(band.limit_up);
        let bid = if quote.bid_price > band.limit_up {
            band.limit_down
        } else {
            quote.bid_price
        };

        let base = if requested == 0.0 {
            match direction {
                Direction::Long => ask,
                Direction::Short => bid,
                Direction::Net => return None,
            }
        } else {
            requested
        };

        if order_type == OrderType::Market || requested == MARKET_PRICE {
            return match direction {
                Direction::Long => Some(band.limit_up),
                Direction::Short => Some(band.limit_down),
                Direction::Net => None,
            };
        }

        let padding = f64::from(tick_add) * price_tick;
        match direction {
            Direction::Long => Some((base + padding).clamp(band.limit_down, band.limit_up)),
            Direction::Short => Some((base - padding).clamp(band.limit_down, band.limit_up)),
            Direction::Net => None,
        }
    }
}
