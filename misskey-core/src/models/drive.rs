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

//! Drive file model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, Id};

/// A file stored in a user's drive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Unique identifier
    pub id: Id,

    /// When the file was uploaded
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Marked as sensitive (NSFW)
    pub is_sensitive: bool,

    /// Original filename
    pub name: String,

    pub thumbnail_url: String,
    pub url: String,

    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,

    /// Size in bytes
    pub size: u64,

    /// MD5 checksum of the content
    pub md5: String,

    /// Blurhash placeholder
    pub blurhash: String,

    /// Type-specific properties
    pub properties: DriveFileProperties,
}

impl DriveFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl Entity for DriveFile {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// Open property bag of a drive file
///
/// Every key is kept exactly as received. The image keys Misskey fills in
/// (`width`, `height`, `orientation`, `avgColor`) have typed accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DriveFileProperties(pub Map<String, Value>);

impl DriveFileProperties {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Width in pixels
    pub fn width(&self) -> Option<u32> {
        self.pixels("width")
    }

    /// Height in pixels
    pub fn height(&self) -> Option<u32> {
        self.pixels("height")
    }

    /// Width and height, when both are known
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width()?, self.height()?))
    }

    /// EXIF orientation
    pub fn orientation(&self) -> Option<u8> {
        self.get("orientation")
            .and_then(Value::as_u64)
            .and_then(|o| u8::try_from(o).ok())
    }

    pub fn avg_color(&self) -> Option<&str> {
        self.get("avgColor").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A whole, non-negative pixel count; `1920.0` is accepted
    fn pixels(&self, key: &str) -> Option<u32> {
        let value = self.get(key)?;
        if let Some(n) = value.as_u64() {
            return u32::try_from(n).ok();
        }
        let n = value.as_f64()?;
        (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
    }
}
