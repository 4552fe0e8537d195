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

//! Misskey Core - entity inspection tool for Blindodon
//!
//! Decodes Misskey entity payloads, reports anything malformed, and can
//! store the decoded snapshots in the local entity cache.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use misskey_core::decode::{decode_any_value, AnyEntity, EntityKind};
use misskey_core::logger::{Logger, LoggerConfig};
use misskey_core::models::NotificationBody;
use misskey_core::{CacheConfig, EntityCache};
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, warn, Level};

#[derive(Parser)]
#[command(name = "misskey-core", version, about = "Inspect and cache Misskey entity payloads")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: Level,

    /// Only log to the console
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode payload files ("-" for stdin) and print one line per entity
    Decode {
        /// Entity kind of the payloads, e.g. "note" or "notification"
        #[arg(long, short)]
        kind: EntityKind,

        /// Check embedded objects against their id fields
        #[arg(long)]
        strict: bool,

        /// Store decoded entities in the cache
        #[arg(long)]
        cache: bool,

        /// Cache database path
        #[arg(long)]
        db: Option<PathBuf>,

        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// List the entity kinds understood by `decode`
    Kinds,

    /// Show how many entities of each kind are cached
    Stats {
        /// Cache database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Logger::init_with_config(LoggerConfig {
        level: cli.log_level,
        file_output: !cli.no_log_file,
        ..LoggerConfig::default()
    })?;

    info!("Misskey Core starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Command::Decode {
            kind,
            strict,
            cache,
            db,
            inputs,
        } => {
            let cache = if cache {
                Some(open_cache(db).await?)
            } else {
                None
            };
            run_decode(kind, strict, cache.as_ref(), &inputs).await
        }
        Command::Kinds => {
            for kind in EntityKind::ALL {
                println!("{}", kind);
            }
            Ok(())
        }
        Command::Stats { db } => run_stats(&open_cache(db).await?).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }

    result
}

async fn open_cache(db: Option<PathBuf>) -> Result<EntityCache> {
    let mut config = CacheConfig::default();
    if let Some(path) = db {
        config.db_path = path;
    }
    EntityCache::open(config).await
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input))
    }
}

/// Entities decoded from one input, and how many payloads were rejected
#[derive(Debug, Default)]
struct DecodeReport {
    entities: Vec<AnyEntity>,
    failures: usize,
}

/// Decode one input, which may hold a single entity or an array of them
fn decode_payload(input: &str, payload: &str, kind: EntityKind, strict: bool) -> DecodeReport {
    let mut report = DecodeReport::default();

    let values = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items,
        Ok(value) => vec![value],
        Err(e) => {
            warn!("{}: malformed JSON: {}", input, e);
            report.failures += 1;
            return report;
        }
    };

    for value in values {
        let checked = decode_any_value(kind, value).and_then(|entity| {
            if strict {
                entity.check()?;
            }
            Ok(entity)
        });

        match checked {
            Ok(entity) => report.entities.push(entity),
            Err(e) => {
                warn!("{}: {}", input, e);
                report.failures += 1;
            }
        }
    }

    report
}

async fn run_decode(
    kind: EntityKind,
    strict: bool,
    cache: Option<&EntityCache>,
    inputs: &[String],
) -> Result<()> {
    let mut failures = 0usize;

    for input in inputs {
        let payload = read_input(input).await?;
        let report = decode_payload(input, &payload, kind, strict);
        failures += report.failures;

        for entity in &report.entities {
            println!("{}", summarize(entity));

            if let Some(cache) = cache {
                store(cache, entity).await?;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} payload(s) failed to decode", failures);
    }

    Ok(())
}

async fn store(cache: &EntityCache, entity: &AnyEntity) -> Result<()> {
    match entity {
        AnyEntity::Note(note) => {
            cache.put_note(note).await?;
        }
        AnyEntity::Notification(notification) => {
            cache.put(notification).await?;
            if let Some(actor) = notification.actor() {
                cache.put(actor).await?;
            }
            if let Some(note) = notification.note() {
                cache.put_note(note).await?;
            }
        }
        AnyEntity::MessagingMessage(message) => {
            cache.put_message(message).await?;
        }
        AnyEntity::Page(page) => {
            cache.put_page(page).await?;
        }
        AnyEntity::PageEvent(event) => cache.put(&event.user).await?,
        AnyEntity::User(user) => cache.put(user).await?,
        AnyEntity::MeDetailed(me) => cache.put(me).await?,
        AnyEntity::DriveFile(file) => cache.put(file).await?,
        other => debug!("{} entities are not cached", other.kind()),
    }
    Ok(())
}

async fn run_stats(cache: &EntityCache) -> Result<()> {
    for kind in EntityKind::ALL {
        let count = cache.count(kind).await?;
        if count > 0 {
            println!("{:<18} {}", kind.as_str(), count);
        }
    }
    Ok(())
}

/// One-line description of a decoded entity
fn summarize(entity: &AnyEntity) -> String {
    match entity {
        AnyEntity::Note(note) => format!(
            "note {} by {} [{}] {} reaction(s): {}",
            note.id,
            note.user.acct(),
            note.visibility.as_str(),
            note.reaction_count(),
            preview(note.cw.as_deref().or(note.text.as_deref()).unwrap_or(""))
        ),
        AnyEntity::Notification(n) => match &n.body {
            NotificationBody::App { body, .. } => {
                format!("notification {} app: {}", n.id, preview(body))
            }
            _ => match n.actor() {
                Some(actor) => format!("notification {} {} from {}", n.id, n.kind(), actor.acct()),
                None => format!("notification {} {}", n.id, n.kind()),
            },
        },
        AnyEntity::User(user) => format!("user {} {} ({})", user.id, user.acct(), user.name),
        AnyEntity::MeDetailed(me) => format!(
            "me {} {} with {} muted word group(s)",
            me.user.id,
            me.user.acct(),
            me.muted_words.groups().len()
        ),
        AnyEntity::DriveFile(file) => {
            format!("driveFile {} {} {} ({} bytes)", file.id, file.name, file.mime_type, file.size)
        }
        AnyEntity::MessagingMessage(m) => format!(
            "messagingMessage {} from {}: {}",
            m.id,
            m.user.acct(),
            preview(m.text.as_deref().unwrap_or(""))
        ),
        AnyEntity::InstanceMetadata(meta) => format!(
            "instanceMetadata {} emoji categories, {} ads",
            meta.emoji_categories().len(),
            meta.ads.len()
        ),
        AnyEntity::ServerInfo(info) => format!(
            "serverInfo {} {} x{} fs {:.1}% used",
            info.machine,
            info.cpu.model,
            info.cpu.cores,
            info.fs.usage_ratio() * 100.0
        ),
        AnyEntity::Stats(stats) => format!(
            "stats {} notes ({} local), {} users ({} local), {} instances",
            stats.notes_count,
            stats.original_notes_count,
            stats.users_count,
            stats.original_users_count,
            stats.instances
        ),
        AnyEntity::Page(page) => format!("page {} \"{}\" by {}", page.id, page.title, page.user.acct()),
        AnyEntity::PageEvent(event) => {
            format!("pageEvent {} on page {} by {}", event.event, event.page_id, event.user.acct())
        }
    }
}

/// First line of a text, shortened for display
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 60;

    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > MAX_CHARS {
        let cut: String = line.chars().take(MAX_CHARS).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
