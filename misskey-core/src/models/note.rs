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

//! Note model representing a Misskey post

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::resolve;
use super::{CustomEmoji, DriveFile, Entity, Id, Ref, User};

/// Visibility level for a note
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Everyone, listed on public timelines
    Public,
    /// Everyone, kept off public timelines
    Home,
    /// Followers only
    Followers,
    /// Only the specified recipients
    Specified,
}

impl Visibility {
    pub const ALL: [Visibility; 4] = [
        Visibility::Public,
        Visibility::Home,
        Visibility::Followers,
        Visibility::Specified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Home => "home",
            Visibility::Followers => "followers",
            Visibility::Specified => "specified",
        }
    }
}

/// A poll attached to a note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    /// `None` for polls that never close
    #[serde(with = "crate::models::timestamp::option")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Whether more than one choice can be voted
    pub multiple: bool,

    pub choices: Vec<PollChoice>,
}

impl Poll {
    pub fn total_votes(&self) -> u64 {
        self.choices.iter().map(|c| c.votes).sum()
    }

    /// Whether the viewer voted for any choice
    pub fn has_voted(&self) -> bool {
        self.choices.iter().any(|c| c.is_voted)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A single choice in a poll
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollChoice {
    /// Whether the viewer voted for this choice
    pub is_voted: bool,
    pub text: String,
    pub votes: u64,
}

/// A Misskey note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: Id,

    /// When this note was created
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Body text (MFM)
    pub text: Option<String>,

    /// Content warning text
    pub cw: Option<String>,

    /// The author
    pub user: User,
    pub user_id: Id,

    /// The note this replies to, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<Box<Note>>,
    pub reply_id: Id,

    /// The renoted or quoted note, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renote: Option<Box<Note>>,
    pub renote_id: Id,

    /// Attached files
    pub files: Vec<DriveFile>,
    pub file_ids: Vec<Id>,

    pub visibility: Visibility,

    /// The viewer's own reaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_reaction: Option<String>,

    /// Reaction symbol to count
    pub reactions: BTreeMap<String, u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,

    /// Custom emoji used in the text
    pub emojis: Vec<CustomEmoji>,
}

impl Note {
    /// The reply target, embedded or by id
    pub fn reply_ref(&self) -> Option<Ref<'_, Note>> {
        resolve(self.reply.as_deref(), Some(&self.reply_id))
    }

    /// The renote target, embedded or by id
    pub fn renote_ref(&self) -> Option<Ref<'_, Note>> {
        resolve(self.renote.as_deref(), Some(&self.renote_id))
    }

    /// Attached files; embedded objects first, then ids with no embedded object
    pub fn file_refs(&self) -> impl Iterator<Item = Ref<'_, DriveFile>> {
        let embedded = self.files.len();
        self.files
            .iter()
            .map(Ref::Full)
            .chain(self.file_ids.iter().skip(embedded).map(Ref::Id))
    }

    /// A renote with nothing added to it
    pub fn is_pure_renote(&self) -> bool {
        self.renote_ref().is_some()
            && self.text.is_none()
            && self.cw.is_none()
            && self.file_ids.is_empty()
            && self.files.is_empty()
            && self.poll.is_none()
    }

    /// A renote with added commentary
    pub fn is_quote(&self) -> bool {
        self.renote_ref().is_some() && !self.is_pure_renote()
    }

    pub fn reaction_count(&self) -> u64 {
        self.reactions.values().sum()
    }
}

impl Entity for Note {
    fn id(&self) -> &Id {
        &self.id
    }

    fn owner_id(&self) -> Option<&Id> {
        Some(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note_json() -> serde_json::Value {
        json!({
            "id": "n1",
            "createdAt": "2023-05-01T12:00:00.000Z",
            "text": null,
            "cw": null,
            "user": {
                "id": "u1",
                "username": "alice",
                "host": null,
                "name": "Alice",
                "onlineStatus": "online",
                "avatarUrl": "https://example.com/a.png",
                "avatarBlurhash": "LEHV6nWB2yk8",
                "emojis": []
            },
            "userId": "u1",
            "replyId": "",
            "renoteId": "n0",
            "files": [],
            "fileIds": [],
            "visibility": "public",
            "reactions": {},
            "emojis": []
        })
    }

    #[test]
    fn bare_renote_is_pure() {
        let note: Note = serde_json::from_value(note_json()).unwrap();
        assert!(note.is_pure_renote());
        assert!(!note.is_quote());
        assert!(note.reply_ref().is_none());

        let renote = note.renote_ref().unwrap();
        assert!(!renote.is_full());
        assert_eq!(renote.id(), "n0");
    }

    #[test]
    fn renote_with_text_is_quote() {
        let mut value = note_json();
        value["text"] = json!("look at this");
        let note: Note = serde_json::from_value(value).unwrap();
        assert!(note.is_quote());
    }

    #[test]
    fn file_refs_fall_back_to_ids() {
        let mut value = note_json();
        value["fileIds"] = json!(["f1", "f2"]);
        let note: Note = serde_json::from_value(value).unwrap();

        let ids: Vec<&str> = note.file_refs().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
    }

    #[test]
    fn poll_counts_and_expiry() {
        let poll = Poll {
            expires_at: Some("2023-05-02T00:00:00Z".parse().unwrap()),
            multiple: false,
            choices: vec![
                PollChoice { is_voted: false, text: "a".into(), votes: 2 },
                PollChoice { is_voted: true, text: "b".into(), votes: 5 },
            ],
        };

        assert_eq!(poll.total_votes(), 7);
        assert!(poll.has_voted());
        assert!(!poll.is_expired("2023-05-01T00:00:00Z".parse().unwrap()));
        assert!(poll.is_expired("2023-05-02T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn visibility_rejects_unknown_value() {
        assert!(serde_json::from_str::<Visibility>("\"unlisted\"").is_err());
        for v in Visibility::ALL {
            let encoded = serde_json::to_string(&v).unwrap();
            assert_eq!(encoded, format!("\"{}\"", v.as_str()));
        }
    }
}
