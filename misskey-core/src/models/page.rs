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

//! Page model for user-authored block documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::reference::resolve;
use super::{DriveFile, Entity, Id, Ref, User};

/// An open-ended record, used for page blocks and variables
pub type Record = Map<String, Value>;

/// A page authored by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique identifier
    pub id: Id,

    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::models::timestamp")]
    pub updated_at: DateTime<Utc>,

    /// The owner
    pub user_id: Id,
    pub user: User,

    /// Content blocks
    pub content: Vec<Record>,

    /// Variable definitions used by the blocks
    pub variables: Vec<Record>,

    pub title: String,

    /// URL slug
    pub name: String,

    pub summary: Option<String>,

    pub hide_title_when_pinned: bool,
    pub align_center: bool,

    /// Font family, e.g. "serif" or "sans-serif"
    pub font: String,

    /// Embedded AiScript source
    pub script: String,

    pub eye_catching_image_id: Option<Id>,
    pub eye_catching_image: Option<DriveFile>,

    #[serde(default)]
    pub attached_files: Value,

    pub liked_count: u64,

    /// Whether the viewer liked the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
}

impl Page {
    /// The cover image, embedded or by id
    pub fn eye_catching_image_ref(&self) -> Option<Ref<'_, DriveFile>> {
        resolve(
            self.eye_catching_image.as_ref(),
            self.eye_catching_image_id.as_ref(),
        )
    }

    /// Top-level blocks of the given block type
    pub fn blocks_of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.content
            .iter()
            .filter(move |block| block_type(block) == Some(kind))
    }
}

/// The `type` key of a block, if it is a string
pub fn block_type(block: &Record) -> Option<&str> {
    block.get("type").and_then(Value::as_str)
}

impl Entity for Page {
    fn id(&self) -> &Id {
        &self.id
    }

    fn owner_id(&self) -> Option<&Id> {
        Some(&self.user_id)
    }
}

/// A signal raised by interactive page content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageEvent {
    pub page_id: Id,

    /// Event name
    pub event: String,

    /// Event payload
    #[serde(default)]
    pub var: Value,

    pub user_id: Id,
    pub user: User,
}
