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

//! Volume capping for outbound order requests.
//!
//! Venues enforce a maximum volume per order, often tighter for index products, so a single
//! follow decision may have to go out as several child orders. Splitting happens after price
//! conversion so every child carries the same limit price.

use followtrader_model::{identifiers::Symbol, orders::OrderRequest};
use indexmap::IndexMap;

/// Returns the per-order volume cap for the symbol.
///
/// The product root is looked up in `product_caps` and falls back to the global
/// `single_max`; a product cap can only tighten the global one, never widen it.
#[must_use]
pub fn effective_cap(
    symbol: &Symbol,
    product_caps: &IndexMap<String, u64>,
    single_max: u64,
) -> u64 {
    product_caps
        .get(symbol.root())
        .copied()
        .unwrap_or(single_max)
        .min(single_max)
}

/// Splits the request into child requests of at most `cap` volume each.
///
/// Full-cap children come first with any remainder last. A cap of zero disables
/// splitting and returns the request unchanged.
#[must_use]
pub fn split(request: &OrderRequest, cap: u64) -> Vec<OrderRequest> {
    if cap == 0 || request.volume <= cap {
        return vec![*request];
    }
    let full = request.volume / cap;
    let remainder = request.volume % cap;
    let mut children = Vec::with_capacity(full as usize + usize::from(remainder > 0));
    for _ in 0..full {
        children.push(request.with_volume(cap));
    }
    if remainder > 0 {
        children.push(request.with_volume(remainder));
    }
    children
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

    fn caps() -> IndexMap<String, u64> {
        IndexMap::from([("IF".to_string(), 20), ("IC".to_string(), 5000)])
    }

    #[rstest]
    fn test_effective_cap_uses_product_cap(instrument_id_if_cffex: InstrumentId) {
        assert_eq!(
            effective_cap(&instrument_id_if_cffex.symbol, &caps(), 1000),
            20
        );
    }

    #[rstest]
    fn test_effective_cap_falls_back_to_global(instrument_id_rb_shfe: InstrumentId) {
        assert_eq!(
            effective_cap(&instrument_id_rb_shfe.symbol, &caps(), 1000),
            1000
        );
    }

    #[rstest]
    fn test_product_cap_cannot_widen_global() {
        let symbol = Symbol::new("IC2406");
        assert_eq!(effective_cap(&symbol, &caps(), 1000), 1000);
    }

    #[rstest]
    fn test_split_below_cap_is_identity(instrument_id_if_cffex: InstrumentId) {
        let req = request(instrument_id_if_cffex, 15);
        assert_eq!(split(&req, 20), vec![req]);
    }

    #[rstest]
    fn test_split_full_pieces_then_remainder(instrument_id_if_cffex: InstrumentId) {
        let req = request(instrument_id_if_cffex, 45);

        let children = split(&req, 20);

        let volumes: Vec<u64> = children.iter().map(|child| child.volume).collect();
        assert_eq!(volumes, vec![20, 20, 5]);
        assert!(children.iter().all(|child| child.price == req.price));
        assert!(children.iter().all(|child| child.direction == req.direction));
    }

    #[rstest]
    fn test_split_exact_multiple_has_no_remainder(instrument_id_if_cffex: InstrumentId) {
        let req = request(instrument_id_if_cffex, 40);

        let volumes: Vec<u64> = split(&req, 20).iter().map(|child| child.volume).collect();
        assert_eq!(volumes, vec![20, 20]);
    }

    #[rstest]
    fn test_zero_cap_disables_splitting(instrument_id_if_cffex: InstrumentId) {
        let req = request(instrument_id_if_cffex, 45);
        assert_eq!(split(&req, 0), vec![req]);
    }
}
