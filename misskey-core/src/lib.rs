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

//! Misskey Core - entity layer for Blindodon's Misskey support
//!
//! Typed models for the JSON entities a Misskey server exchanges with its
//! clients, together with decoding, muted-word filtering and a local
//! SQLite cache for received snapshots.

pub mod cache;
pub mod decode;
pub mod error;
pub mod filter;
pub mod logger;
pub mod models;

pub use cache::{CacheConfig, EntityCache};
pub use decode::{decode, decode_any, decode_with, AnyEntity, DecodeOptions, EntityKind, Schema};
pub use error::EntityError;
pub use filter::MutedWords;
