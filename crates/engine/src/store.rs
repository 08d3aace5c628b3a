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

//! Persistence for operator settings and follow session state.
//!
//! Two JSON documents survive a restart: the operator settings (which double as the engine
//! configuration) and the session state holding the trade-id registry, the follow map and the
//! position book. At the end of a trading day the state document is archived under a dated
//! filename instead of being carried into the next session.

use std::{
    cell::{Cell, RefCell},
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::NaiveDate;
use followtrader_model::identifiers::{InstrumentId, OrderId, TradeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{book::InstrumentPosition, engine::config::FollowEngineConfig};

/// The filename for the operator settings document.
pub const SETTINGS_FILENAME: &str = "follow_trading_settings.json";
/// The filename for the session state document.
pub const STATE_FILENAME: &str = "follow_trading_state.json";
/// The folder name for archived session state documents.
pub const ARCHIVE_FOLDER: &str = "follow_history";

/// The persisted follow session state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowState {
    /// Every trade ID registered this session.
    pub trade_ids: Vec<TradeId>,
    /// The source-trade to target-orders fan-out map.
    pub followed: IndexMap<TradeId, Vec<OrderId>>,
    /// The position book records.
    pub positions: IndexMap<InstrumentId, InstrumentPosition>,
}

/// Loads and saves the engine's persistent documents.
pub trait FollowStore: Debug {
    /// Loads the operator settings, or defaults when none were saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings document exists but cannot be read or parsed.
    fn load_settings(&self) -> anyhow::Result<FollowEngineConfig>;

    /// Saves the operator settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_settings(&self, config: &FollowEngineConfig) -> anyhow::Result<()>;

    /// Loads the session state, or an empty state when none was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a state document exists but cannot be read or parsed.
    fn load_state(&self) -> anyhow::Result<FollowState>;

    /// Saves the session state.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_state(&self, state: &FollowState) -> anyhow::Result<()>;

    /// Archives the session state under the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive document cannot be written.
    fn archive_state(&self, date: NaiveDate, state: &FollowState) -> anyhow::Result<()>;
}

/// A [`FollowStore`] backed by pretty-printed JSON files in a directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a new [`JsonFileStore`] instance rooted at the given directory.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create file {}", path.display()))?;
        serde_json::to_writer_pretty(file, value)
            .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
        Ok(())
    }

    fn read_json<T>(path: &Path) -> anyhow::Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !path.exists() {
            return Ok(None);
        }
        // Identifiers deserialize from borrowed strings, so read to memory first
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
        Ok(Some(value))
    }
}

impl FollowStore for JsonFileStore {
    fn load_settings(&self) -> anyhow::Result<FollowEngineConfig> {
        Ok(Self::read_json(&self.dir.join(SETTINGS_FILENAME))?.unwrap_or_default())
    }

    fn save_settings(&self, config: &FollowEngineConfig) -> anyhow::Result<()> {
        Self::write_json(&self.dir.join(SETTINGS_FILENAME), config)
    }

    fn load_state(&self) -> anyhow::Result<FollowState> {
        Ok(Self::read_json(&self.dir.join(STATE_FILENAME))?.unwrap_or_default())
    }

    fn save_state(&self, state: &FollowState) -> anyhow::Result<()> {
        Self::write_json(&self.dir.join(STATE_FILENAME), state)
    }

    fn archive_state(&self, date: NaiveDate, state: &FollowState) -> anyhow::Result<()> {
        let filename = format!("{}_{STATE_FILENAME}", date.format("%Y%m%d"));
        Self::write_json(&self.dir.join(ARCHIVE_FOLDER).join(filename), state)
    }
}

/// A [`FollowStore`] holding everything in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    settings: RefCell<Option<FollowEngineConfig>>,
    state: RefCell<FollowState>,
    archives: RefCell<Vec<(NaiveDate, FollowState)>>,
    fail_saves: Cell<bool>,
}

impl InMemoryStore {
    /// Creates a new empty [`InMemoryStore`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail, to exercise error paths.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Returns the archived states in archival order.
    #[must_use]
    pub fn archives(&self) -> Vec<(NaiveDate, FollowState)> {
        self.archives.borrow().clone()
    }

    fn check_writable(&self) -> anyhow::Result<()> {
        if self.fail_saves.get() {
            anyhow::bail!("store unavailable")
        }
        Ok(())
    }
}

impl FollowStore for InMemoryStore {
    fn load_settings(&self) -> anyhow::Result<FollowEngineConfig> {
        Ok(self.settings.borrow().clone().unwrap_or_default())
    }

    fn save_settings(&self, config: &FollowEngineConfig) -> anyhow::Result<()> {
        self.check_writable()?;
        *self.settings.borrow_mut() = Some(config.clone());
        Ok(())
    }

    fn load_state(&self) -> anyhow::Result<FollowState> {
        Ok(self.state.borrow().clone())
    }

    fn save_state(&self, state: &FollowState) -> anyhow::Result<()> {
        self.check_writable()?;
        *self.state.borrow_mut() = state.clone();
        Ok(())
    }

    fn archive_state(&self, date: NaiveDate, state: &FollowState) -> anyhow::Result<()> {
        self.check_writable()?;
        self.archives.borrow_mut().push((date, state.clone()));
        Ok(())
    }
}
