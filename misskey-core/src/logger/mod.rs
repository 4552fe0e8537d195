// Blindodon - An accessibility-first Mastodon client
// Copyright (C) 2025 Blindodon Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Logging system for the Misskey core
//!
//! Provides structured logging with console and rolling file output
//! and configurable verbosity levels.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logger configuration
pub struct LoggerConfig {
    /// Log directory path
    pub log_dir: PathBuf,
    /// Log file prefix
    pub file_prefix: String,
    /// Maximum log level
    pub level: Level,
    /// Whether to log to console
    pub console_output: bool,
    /// Whether to log to file
    pub file_output: bool,
    /// Log rotation strategy
    pub rotation: Rotation,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let log_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Blindodon")
            .join("logs");

        Self {
            log_dir,
            file_prefix: "misskey-core".to_string(),
            level: Level::INFO,
            console_output: true,
            file_output: true,
            rotation: Rotation::DAILY,
        }
    }
}

impl LoggerConfig {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        format!("misskey_core={},blindodon={}", self.level, self.level)
    }
}

/// Main logger struct
pub struct Logger;

impl Logger {
    /// Initialize the logging system with default configuration
    pub fn init() -> Result<()> {
        Self::init_with_config(LoggerConfig::default())
    }

    /// Initialize the logging system with custom configuration
    pub fn init_with_config(config: LoggerConfig) -> Result<()> {
        if config.file_output {
            std::fs::create_dir_all(&config.log_dir).with_context(|| {
                format!("Failed to create log directory {}", config.log_dir.display())
            })?;
        }

        // RUST_LOG takes precedence over the configured level
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

        let file_layer = config.file_output.then(|| {
            let file_appender = RollingFileAppender::new(
                config.rotation.clone(),
                &config.log_dir,
                &config.file_prefix,
            );

            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .json()
        });

        let console_layer = config.console_output.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_span_events(FmtSpan::CLOSE)
        });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(())
    }
}

/// Macro for logging decode outcomes
#[macro_export]
macro_rules! log_decode {
    ($kind:expr, $result:expr) => {
        match $result {
            Ok(_) => tracing::debug!(
                target: "misskey_core::decode",
                kind = %$kind,
                "Payload decoded"
            ),
            Err(e) => tracing::debug!(
                target: "misskey_core::decode",
                kind = %$kind,
                error = %e,
                "Payload rejected"
            ),
        }
    };
}

/// Macro for logging cache writes and reads
#[macro_export]
macro_rules! log_cache {
    (stored, $kind:expr, $id:expr) => {
        tracing::debug!(
            target: "misskey_core::cache",
            op = "stored",
            kind = %$kind,
            id = %$id,
            "Entity cached"
        )
    };
    (hit, $kind:expr, $id:expr) => {
        tracing::trace!(
            target: "misskey_core::cache",
            op = "hit",
            kind = %$kind,
            id = %$id,
            "Cache hit"
        )
    };
    (miss, $kind:expr, $id:expr) => {
        tracing::trace!(
            target: "misskey_core::cache",
            op = "miss",
            kind = %$kind,
            id = %$id,
            "Cache miss"
        )
    };
}
