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

//! Notification model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, Id, Note, User};
use crate::error::EntityError;

/// A notification from Misskey
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier
    pub id: Id,

    /// When this notification was created
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Whether this notification has been read
    pub is_read: bool,

    /// Type-specific payload, discriminated by the `type` key
    #[serde(flatten)]
    pub body: NotificationBody,
}

/// Payload of a notification, keyed by its `type`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationBody {
    /// Someone reacted to your note
    Reaction(ReactionActivity),
    /// Someone replied to your note
    Reply(NoteActivity),
    /// Someone renoted your note
    Renote(NoteActivity),
    /// Someone quoted your note
    Quote(NoteActivity),
    /// Someone mentioned you
    Mention(NoteActivity),
    /// Someone voted in your poll
    PollVote(NoteActivity),
    /// Someone followed you
    Follow(UserActivity),
    /// Your follow request was accepted
    FollowRequestAccepted(UserActivity),
    /// Someone requested to follow you
    ReceiveFollowRequest(UserActivity),
    /// You were invited to a group. The payload is not settled upstream,
    /// so whatever arrives is kept as-is.
    GroupInvited(Map<String, Value>),
    /// Alert generated by an app or the server
    App { body: String, icon: String },
}

/// A user acting on one of your notes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteActivity {
    pub user: User,
    pub user_id: Id,
    pub note: Note,
}

/// A reaction on one of your notes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReactionActivity {
    /// The reaction symbol
    pub reaction: String,
    pub user: User,
    pub user_id: Id,
    pub note: Note,
}

/// A user acting on you directly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub user: User,
    pub user_id: Id,
}

/// Type of notification, without payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    Reaction,
    Reply,
    Renote,
    Quote,
    Mention,
    PollVote,
    Follow,
    FollowRequestAccepted,
    ReceiveFollowRequest,
    GroupInvited,
    App,
}

impl NotificationType {
    /// Every notification type, in declaration order
    pub const ALL: [NotificationType; 11] = [
        NotificationType::Reaction,
        NotificationType::Reply,
        NotificationType::Renote,
        NotificationType::Quote,
        NotificationType::Mention,
        NotificationType::PollVote,
        NotificationType::Follow,
        NotificationType::FollowRequestAccepted,
        NotificationType::ReceiveFollowRequest,
        NotificationType::GroupInvited,
        NotificationType::App,
    ];

    /// Wire tag of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Reaction => "reaction",
            NotificationType::Reply => "reply",
            NotificationType::Renote => "renote",
            NotificationType::Quote => "quote",
            NotificationType::Mention => "mention",
            NotificationType::PollVote => "pollVote",
            NotificationType::Follow => "follow",
            NotificationType::FollowRequestAccepted => "followRequestAccepted",
            NotificationType::ReceiveFollowRequest => "receiveFollowRequest",
            NotificationType::GroupInvited => "groupInvited",
            NotificationType::App => "app",
        }
    }

    /// Whether notifications of this type carry a note
    pub fn has_note(&self) -> bool {
        matches!(
            self,
            NotificationType::Reaction
                | NotificationType::Reply
                | NotificationType::Renote
                | NotificationType::Quote
                | NotificationType::Mention
                | NotificationType::PollVote
        )
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EntityError::UnknownValue {
                what: "notification type",
                value: s.to_string(),
            })
    }
}

impl NotificationBody {
    pub fn kind(&self) -> NotificationType {
        match self {
            NotificationBody::Reaction(_) => NotificationType::Reaction,
            NotificationBody::Reply(_) => NotificationType::Reply,
            NotificationBody::Renote(_) => NotificationType::Renote,
            NotificationBody::Quote(_) => NotificationType::Quote,
            NotificationBody::Mention(_) => NotificationType::Mention,
            NotificationBody::PollVote(_) => NotificationType::PollVote,
            NotificationBody::Follow(_) => NotificationType::Follow,
            NotificationBody::FollowRequestAccepted(_) => NotificationType::FollowRequestAccepted,
            NotificationBody::ReceiveFollowRequest(_) => NotificationType::ReceiveFollowRequest,
            NotificationBody::GroupInvited(_) => NotificationType::GroupInvited,
            NotificationBody::App { .. } => NotificationType::App,
        }
    }
}

impl Notification {
    pub fn kind(&self) -> NotificationType {
        self.body.kind()
    }

    /// The user who triggered the notification, and their id
    fn actor_pair(&self) -> Option<(&User, &Id)> {
        match &self.body {
            NotificationBody::Reaction(a) => Some((&a.user, &a.user_id)),
            NotificationBody::Reply(a)
            | NotificationBody::Renote(a)
            | NotificationBody::Quote(a)
            | NotificationBody::Mention(a)
            | NotificationBody::PollVote(a) => Some((&a.user, &a.user_id)),
            NotificationBody::Follow(a)
            | NotificationBody::FollowRequestAccepted(a)
            | NotificationBody::ReceiveFollowRequest(a) => Some((&a.user, &a.user_id)),
            NotificationBody::GroupInvited(_) | NotificationBody::App { .. } => None,
        }
    }

    /// The user who triggered the notification
    pub fn actor(&self) -> Option<&User> {
        self.actor_pair().map(|(user, _)| user)
    }

    pub fn actor_id(&self) -> Option<&Id> {
        self.actor_pair().map(|(_, id)| id)
    }

    /// The note the notification is about
    pub fn note(&self) -> Option<&Note> {
        match &self.body {
            NotificationBody::Reaction(a) => Some(&a.note),
            NotificationBody::Reply(a)
            | NotificationBody::Renote(a)
            | NotificationBody::Quote(a)
            | NotificationBody::Mention(a)
            | NotificationBody::PollVote(a) => Some(&a.note),
            _ => None,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &Id {
        &self.id
    }
}
