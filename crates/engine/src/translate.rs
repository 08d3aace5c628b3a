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

//! Translation of admitted source fills into target order requests.
//!
//! A source fill becomes at most one order request: the volume is scaled by the follow
//! multiplier, the direction is optionally inverted, and closing fills are either re-tagged as
//! opens (intraday instruments, which the gateway locks instead of closing) or validated and
//! clamped against the target account's actual closable volume.

use followtrader_model::{
    enums::{Direction, Offset},
    orders::OrderRequest,
    reports::FillReport,
};

use crate::{book::PositionBook, engine::config::FollowEngineConfig};

/// Translates an admitted source fill into a target order request.
///
/// Returns `None` when the fill cannot be followed; each drop is logged.
#[must_use]
pub fn translate_fill(
    fill: &FillReport,
    config: &FollowEngineConfig,
    book: &PositionBook,
) -> Option<OrderRequest> {
    if fill.offset == Offset::None {
        log::warn!("Fill {} carries no offset, not following", fill.trade_id);
        return None;
    }
    if fill.direction == Direction::Net {
        log::warn!("Fill {} carries net direction, not following", fill.trade_id);
        return None;
    }

    let mut request = match OrderRequest::new_checked(
        fill.instrument_id,
        fill.direction,
        fill.offset,
        config.order_type,
        fill.price,
        fill.volume * config.multiplier,
    ) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Cannot build follow request for fill {}: {e}", fill.trade_id);
            return None;
        }
    };

    if config.inverse {
        request = request.inverse();
    }
    if request.offset.is_open() {
        return Some(request);
    }
    if config.is_intraday(&fill.instrument_id) {
        // Intraday instruments lock with an opposing open instead of closing
        return Some(request.with_offset(Offset::Open));
    }
    validate_close(request.with_offset(Offset::Close), book)
}

/// Checks a closing request against the target account's closable volume.
///
/// The gateway re-derives today/yesterday splits itself, so the offset arrives
/// here normalized to plain [`Offset::Close`].
fn validate_close(request: OrderRequest, book: &PositionBook) -> Option<OrderRequest> {
    let Some(position) = book.get(&request.instrument_id) else {
        log::warn!(
            "No position record for {}, dropping close follow",
            request.instrument_id,
        );
        return None;
    };
    let closable = match request.direction {
        Direction::Long => position.target_short,
        Direction::Short => position.target_long,
        Direction::Net => return None,
    };
    if closable == 0 {
        log::warn!(
            "Target account has nothing to close in {}, dropping close follow",
            request.instrument_id,
        );
        return None;
    }
    Some(request.with_volume(request.volume.min(closable)))
}
