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

//! The trading domain model for [FollowTrader](https://nautechsystems.io).
//!
//! The `followtrader-model` crate defines the value types shared by every component of the
//! mirroring engine:
//!
//! - Identifiers backed by interned strings (`Symbol`, `Venue`, `InstrumentId`, `TradeId`,
//!   `OrderId`, `ClientId`).
//! - Enumerations for direction, offset, order type, order status and trade classification.
//! - Market data (`QuoteTick` carrying top-of-book quotes and the daily limit band).
//! - Venue-inbound reports (`FillReport`, `OrderStatusReport`, `PositionStatusReport`).
//! - The outbound `OrderRequest` command and `Contract` metadata.
//!
//! # Feature flags
//!
//! - `stubs`: Enables the [rstest](https://docs.rs/rstest) fixture stubs for testing.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

#[macro_use]
mod macros;

pub mod data;
pub mod enums;
pub mod identifiers;
pub mod instruments;
pub mod orders;
pub mod reports;
