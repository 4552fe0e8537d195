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

//! Instance-level metadata, server info and statistics

use serde::{Deserialize, Serialize};

use super::Id;

/// Instance configuration snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceMetadata {
    /// Custom emoji entries (only the category is described here)
    pub emojis: Vec<EmojiCategory>,

    /// Advertisement slots
    pub ads: Vec<Ad>,
}

impl InstanceMetadata {
    /// Distinct emoji categories, in first-seen order
    pub fn emoji_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for emoji in &self.emojis {
            if !categories.contains(&emoji.category.as_str()) {
                categories.push(&emoji.category);
            }
        }
        categories
    }

    /// Ads configured for a placement
    pub fn ads_for_place<'a>(&'a self, place: &'a str) -> impl Iterator<Item = &'a Ad> + 'a {
        self.ads.iter().filter(move |ad| ad.place == place)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmojiCategory {
    pub category: String,
}

/// An advertisement slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: Id,
    /// Relative weight of this ad
    pub ratio: f64,
    /// Placement key, e.g. "square" or "horizontal"
    pub place: String,
    /// Link target
    pub url: String,
    pub image_url: String,
}

/// Host machine descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    pub machine: String,
    pub cpu: Cpu,
    pub mem: Mem,
    pub fs: Fs,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cpu {
    pub model: String,
    pub cores: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mem {
    /// Total memory in bytes
    pub total: u64,
}

/// Filesystem usage in bytes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fs {
    pub total: u64,
    pub used: u64,
}

impl Fs {
    pub fn free(&self) -> u64 {
        self.total.saturating_sub(self.used)
    }

    /// Fraction of the filesystem in use, 0.0 when the total is unknown
    pub fn usage_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64
        }
    }
}

/// Aggregate instance counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// All notes known to the instance
    pub notes_count: u64,
    /// Notes created locally
    pub original_notes_count: u64,
    pub users_count: u64,
    pub original_users_count: u64,
    /// Federated instances
    pub instances: u64,
    /// Bytes of media stored for local users
    pub drive_usage_local: u64,
    /// Bytes of cached remote media
    pub drive_usage_remote: u64,
}

impl Stats {
    pub fn remote_notes_count(&self) -> u64 {
        self.notes_count.saturating_sub(self.original_notes_count)
    }

    pub fn remote_users_count(&self) -> u64 {
        self.users_count.saturating_sub(self.original_users_count)
    }

    pub fn drive_usage_total(&self) -> u64 {
        self.drive_usage_local.saturating_add(self.drive_usage_remote)
    }
}
