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

//! Chat message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::resolve;
use super::{DriveFile, Entity, Id, Ref, User};

/// A direct or group chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagingMessage {
    /// Unique identifier
    pub id: Id,

    /// When this message was sent
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Attached file
    pub file: Option<DriveFile>,
    pub file_id: Option<Id>,

    /// Whether the recipient has read the message
    pub is_read: bool,

    /// Users who have read the message (group chats)
    pub reads: Vec<Id>,

    pub text: Option<String>,

    /// The sender
    pub user: User,
    pub user_id: Id,

    // Shape of the group context is still provisional upstream.
    pub group_id: Id,
}

impl MessagingMessage {
    /// The attached file, embedded or by id
    pub fn file_ref(&self) -> Option<Ref<'_, DriveFile>> {
        resolve(self.file.as_ref(), self.file_id.as_ref())
    }

    /// Whether the given user has read this message
    pub fn is_read_by(&self, user_id: &Id) -> bool {
        self.reads.contains(user_id)
    }
}

impl Entity for MessagingMessage {
    fn id(&self) -> &Id {
        &self.id
    }

    fn owner_id(&self) -> Option<&Id> {
        Some(&self.user_id)
    }
}
