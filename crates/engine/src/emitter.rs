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

//! Outbound channel for position delta broadcasts.

use std::fmt::Debug;

use crate::book::PositionDelta;

/// Receives position delta broadcasts for downstream consumers.
///
/// The engine pushes a delta whenever a tracked position changes and again on the
/// periodic refresh, so a consumer always converges on the current state even if
/// it missed earlier broadcasts.
pub trait FollowEmitter: Debug {
    /// Publishes a position delta.
    fn emit_delta(&self, delta: &PositionDelta);
}

/// A [`FollowEmitter`] that discards all broadcasts, for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEmitter;

impl FollowEmitter for NoopEmitter {
    fn emit_delta(&self, _delta: &PositionDelta) {}
}
