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

//! User model representing a Misskey account

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Acct, Entity, Id};
use crate::filter::MutedWords;

/// Coarse presence reported by the server
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Online,
    Active,
    Offline,
    Unknown,
}

/// A custom emoji usable in names and note text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomEmoji {
    /// Shortcode without surrounding colons
    pub name: String,
    pub url: String,
}

/// A Misskey user as embedded in notes, notifications and messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Id,

    /// Username (without host)
    pub username: String,

    /// Host of a remote user, `None` for local users
    pub host: Option<String>,

    /// Display name
    pub name: String,

    /// Presence state
    pub online_status: OnlineStatus,

    /// URL to the user's avatar image
    pub avatar_url: String,

    /// Blurhash placeholder for the avatar
    pub avatar_blurhash: String,

    /// Custom emoji used in the display name
    pub emojis: Vec<CustomEmoji>,
}

impl User {
    /// Full handle of this user
    pub fn acct(&self) -> Acct {
        Acct::new(self.username.clone(), self.host.clone())
    }

    pub fn is_local(&self) -> bool {
        self.host.is_none()
    }
}

impl Entity for User {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// The signed-in user's own profile, including private settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeDetailed {
    #[serde(flatten)]
    pub user: User,

    pub avatar_id: Id,
    pub banner_id: Id,

    /// Automatically accept follow requests from followed users
    pub auto_accept_followed: bool,

    /// Ask search engines not to index the profile
    pub no_crawle: bool,

    /// Listed in the user directory
    pub is_explorable: bool,

    pub hide_online_status: bool,

    /// Muted word groups
    pub muted_words: MutedWords,

    /// Any other owner-only keys sent by the server
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for MeDetailed {
    fn id(&self) -> &Id {
        &self.user.id
    }
}
