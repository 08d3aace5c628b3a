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

//! The follow-and-reconcile engine for [FollowTrader](https://nautechsystems.io).
//!
//! The `followtrader-engine` crate mirrors fills from a source account onto a target account in
//! near real time, scaling volume by a multiplier, optionally inverting direction, and
//! continuously reconciling the two accounts' positions so that they converge even after
//! disconnects, restarts, or partial fills.
//!
//! The engine is organized leaf-first:
//!
//! - [`admission`]: trade-id registry and admission control for inbound fills.
//! - [`translate`]: source fill to target order-request translation.
//! - [`pricing`]: price-band capture and limit-price conversion.
//! - [`splitter`]: order decomposition under per-product volume caps.
//! - [`queue`]: FIFO dispatch queue for requests awaiting price data.
//! - [`tracker`]: tick-count based timeout tracking of working orders.
//! - [`book`]: per-instrument position records and derived deltas.
//! - [`engine`]: the event handlers, control surface, and reconciliation operations.
//! - [`runner`]: the single-threaded event loop with per-event fault isolation.
//!
//! The connectivity, persistence, and broadcast boundaries are traits ([`client`], [`store`],
//! [`emitter`]) implemented by the host process.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod admission;
pub mod book;
pub mod client;
pub mod emitter;
pub mod engine;
pub mod pricing;
pub mod queue;
pub mod runner;
pub mod splitter;
pub mod store;
pub mod tracker;
pub mod translate;
