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

//! The logging framework for FollowTrader systems.

use std::{
    env,
    io::{self, Write},
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// The tag for inbound messages.
pub const RECV: &str = "<--";
/// The tag for outbound messages.
pub const SEND: &str = "-->";
/// The tag for command messages.
pub const CMD: &str = "[CMD]";
/// The tag for event messages.
pub const EVT: &str = "[EVT]";
/// The tag for report messages.
pub const RPT: &str = "[RPT]";

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Returns whether the core logger is enabled.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::Relaxed)
}

/// A logger which writes timestamped lines to stderr.
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    /// Creates a new [`Logger`] instance with the given maximum level.
    #[must_use]
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.9fZ");
        let line = format!(
            "{timestamp} [{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
        if record.level() == Level::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn flush(&self) {
        io::stdout().flush().ok();
        io::stderr().flush().ok();
    }
}

/// Initialize logging.
///
/// The maximum level can be overridden via the `RUST_LOG` environment variable.
///
/// # Safety
///
/// Should only be called once during an applications run, ideally at the
/// beginning of the run.
///
/// # Errors
///
/// Returns an error if a global logger was already installed, or if the
/// `RUST_LOG` value cannot be parsed.
pub fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    let level = match env::var("RUST_LOG") {
        Ok(v) => LevelFilter::from_str(&v)
            .map_err(|e| anyhow::anyhow!("Invalid `RUST_LOG` value '{v}': {e}"))?,
        Err(_) => level,
    };

    log::set_boxed_logger(Box::new(Logger::new(level)))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    log::set_max_level(level);
    LOGGING_INITIALIZED.store(true, Ordering::Relaxed);
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(LevelFilter::Info, Level::Debug, false)]
    #[case(LevelFilter::Info, Level::Info, true)]
    #[case(LevelFilter::Info, Level::Error, true)]
    #[case(LevelFilter::Off, Level::Error, false)]
    fn test_logger_enabled(
        #[case] max_level: LevelFilter,
        #[case] level: Level,
        #[case] expected: bool,
    ) {
        let logger = Logger::new(max_level);
        let metadata = Metadata::builder().level(level).target("engine").build();
        assert_eq!(logger.enabled(&metadata), expected);
    }
}
