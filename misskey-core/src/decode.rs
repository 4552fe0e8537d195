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

//! Decoding raw JSON payloads into entities
//!
//! Every entity record implements [`Schema`], which ties it to an
//! [`EntityKind`]. Decoding maps serde failures onto [`EntityError`] and can
//! optionally check that embedded objects agree with their companion id
//! fields.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EntityError;
use crate::log_decode;
use crate::models::{
    DriveFile, Entity, Id, InstanceMetadata, MeDetailed, MessagingMessage, Note, Notification,
    Page, PageEvent, ServerInfo, Stats, User,
};

/// Kind of entity a payload describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    User,
    MeDetailed,
    DriveFile,
    Note,
    Notification,
    MessagingMessage,
    InstanceMetadata,
    ServerInfo,
    Stats,
    Page,
    PageEvent,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::User,
        EntityKind::MeDetailed,
        EntityKind::DriveFile,
        EntityKind::Note,
        EntityKind::Notification,
        EntityKind::MessagingMessage,
        EntityKind::InstanceMetadata,
        EntityKind::ServerInfo,
        EntityKind::Stats,
        EntityKind::Page,
        EntityKind::PageEvent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::MeDetailed => "meDetailed",
            EntityKind::DriveFile => "driveFile",
            EntityKind::Note => "note",
            EntityKind::Notification => "notification",
            EntityKind::MessagingMessage => "messagingMessage",
            EntityKind::InstanceMetadata => "instanceMetadata",
            EntityKind::ServerInfo => "serverInfo",
            EntityKind::Stats => "stats",
            EntityKind::Page => "page",
            EntityKind::PageEvent => "pageEvent",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EntityError::UnknownKind(s.to_string()))
    }
}

/// A record with a known wire shape
pub trait Schema: DeserializeOwned + Serialize {
    const KIND: EntityKind;
}

macro_rules! schema {
    ($($ty:ident),* $(,)?) => {
        $(impl Schema for $ty {
            const KIND: EntityKind = EntityKind::$ty;
        })*
    };
}

schema!(
    User,
    MeDetailed,
    DriveFile,
    Note,
    Notification,
    MessagingMessage,
    InstanceMetadata,
    ServerInfo,
    Stats,
    Page,
    PageEvent,
);

/// Decoding behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Run [`Consistency::check`] after decoding
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Decode a JSON payload into an entity
pub fn decode<T: Schema>(payload: &str) -> Result<T, EntityError> {
    let result = serde_json::from_str::<T>(payload).map_err(|e| EntityError::from_json(T::KIND, e));
    log_decode!(T::KIND, &result);
    result
}

/// Decode an already parsed JSON value into an entity
pub fn decode_value<T: Schema>(value: Value) -> Result<T, EntityError> {
    let result = serde_json::from_value::<T>(value).map_err(|e| EntityError::from_json(T::KIND, e));
    log_decode!(T::KIND, &result);
    result
}

/// Decode a JSON array of entities
pub fn decode_list<T: Schema>(payload: &str) -> Result<Vec<T>, EntityError> {
    let result =
        serde_json::from_str::<Vec<T>>(payload).map_err(|e| EntityError::from_json(T::KIND, e));
    log_decode!(T::KIND, &result);
    result
}

/// Decode with options, checking consistency when strict
pub fn decode_with<T: Schema + Consistency>(
    options: DecodeOptions,
    payload: &str,
) -> Result<T, EntityError> {
    let entity = decode::<T>(payload)?;
    if options.strict {
        entity.check()?;
    }
    Ok(entity)
}

/// Any decoded entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyEntity {
    User(User),
    MeDetailed(MeDetailed),
    DriveFile(DriveFile),
    Note(Note),
    Notification(Notification),
    MessagingMessage(MessagingMessage),
    InstanceMetadata(InstanceMetadata),
    ServerInfo(ServerInfo),
    Stats(Stats),
    Page(Page),
    PageEvent(PageEvent),
}

impl AnyEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyEntity::User(_) => EntityKind::User,
            AnyEntity::MeDetailed(_) => EntityKind::MeDetailed,
            AnyEntity::DriveFile(_) => EntityKind::DriveFile,
            AnyEntity::Note(_) => EntityKind::Note,
            AnyEntity::Notification(_) => EntityKind::Notification,
            AnyEntity::MessagingMessage(_) => EntityKind::MessagingMessage,
            AnyEntity::InstanceMetadata(_) => EntityKind::InstanceMetadata,
            AnyEntity::ServerInfo(_) => EntityKind::ServerInfo,
            AnyEntity::Stats(_) => EntityKind::Stats,
            AnyEntity::Page(_) => EntityKind::Page,
            AnyEntity::PageEvent(_) => EntityKind::PageEvent,
        }
    }

    /// Identifier of the entity, for kinds that carry one
    pub fn id(&self) -> Option<&Id> {
        match self {
            AnyEntity::User(e) => Some(e.id()),
            AnyEntity::MeDetailed(e) => Some(e.id()),
            AnyEntity::DriveFile(e) => Some(e.id()),
            AnyEntity::Note(e) => Some(e.id()),
            AnyEntity::Notification(e) => Some(e.id()),
            AnyEntity::MessagingMessage(e) => Some(e.id()),
            AnyEntity::Page(e) => Some(e.id()),
            AnyEntity::InstanceMetadata(_)
            | AnyEntity::ServerInfo(_)
            | AnyEntity::Stats(_)
            | AnyEntity::PageEvent(_) => None,
        }
    }

    /// Check embedded objects against their id fields
    pub fn check(&self) -> Result<(), EntityError> {
        match self {
            AnyEntity::Note(e) => e.check(),
            AnyEntity::Notification(e) => e.check(),
            AnyEntity::MessagingMessage(e) => e.check(),
            AnyEntity::Page(e) => e.check(),
            AnyEntity::PageEvent(e) => e.check(),
            _ => Ok(()),
        }
    }
}

macro_rules! dispatch {
    ($kind:expr, $decode:ident, $input:expr) => {
        match $kind {
            EntityKind::User => AnyEntity::User($decode($input)?),
            EntityKind::MeDetailed => AnyEntity::MeDetailed($decode($input)?),
            EntityKind::DriveFile => AnyEntity::DriveFile($decode($input)?),
            EntityKind::Note => AnyEntity::Note($decode($input)?),
            EntityKind::Notification => AnyEntity::Notification($decode($input)?),
            EntityKind::MessagingMessage => AnyEntity::MessagingMessage($decode($input)?),
            EntityKind::InstanceMetadata => AnyEntity::InstanceMetadata($decode($input)?),
            EntityKind::ServerInfo => AnyEntity::ServerInfo($decode($input)?),
            EntityKind::Stats => AnyEntity::Stats($decode($input)?),
            EntityKind::Page => AnyEntity::Page($decode($input)?),
            EntityKind::PageEvent => AnyEntity::PageEvent($decode($input)?),
        }
    };
}

/// Decode a payload whose kind is only known at runtime
pub fn decode_any(kind: EntityKind, payload: &str) -> Result<AnyEntity, EntityError> {
    Ok(dispatch!(kind, decode, payload))
}

/// Decode a parsed value whose kind is only known at runtime
pub fn decode_any_value(kind: EntityKind, value: Value) -> Result<AnyEntity, EntityError> {
    Ok(dispatch!(kind, decode_value, value))
}

/// Agreement between embedded snapshots and their companion id fields
pub trait Consistency {
    fn check(&self) -> Result<(), EntityError>;
}

fn expect_same(
    kind: EntityKind,
    field: &'static str,
    expected: &Id,
    found: &Id,
) -> Result<(), EntityError> {
    if expected == found {
        Ok(())
    } else {
        Err(EntityError::Inconsistent {
            kind,
            field,
            expected: expected.clone(),
            found: found.clone(),
        })
    }
}

impl Consistency for Note {
    fn check(&self) -> Result<(), EntityError> {
        let kind = EntityKind::Note;
        expect_same(kind, "userId", &self.user_id, &self.user.id)?;

        if let Some(reply) = &self.reply {
            expect_same(kind, "replyId", &self.reply_id, &reply.id)?;
            reply.check()?;
        }
        if let Some(renote) = &self.renote {
            expect_same(kind, "renoteId", &self.renote_id, &renote.id)?;
            renote.check()?;
        }

        // Embedded files line up with the leading ids; extra ids are id-only.
        let missing = Id::default();
        for (i, file) in self.files.iter().enumerate() {
            let id = self.file_ids.get(i).unwrap_or(&missing);
            expect_same(kind, "fileIds", id, &file.id)?;
        }

        Ok(())
    }
}

impl Consistency for Notification {
    fn check(&self) -> Result<(), EntityError> {
        if let (Some(user), Some(user_id)) = (self.actor(), self.actor_id()) {
            expect_same(EntityKind::Notification, "userId", user_id, &user.id)?;
        }
        match self.note() {
            Some(note) => note.check(),
            None => Ok(()),
        }
    }
}

impl Consistency for MessagingMessage {
    fn check(&self) -> Result<(), EntityError> {
        let kind = EntityKind::MessagingMessage;
        expect_same(kind, "userId", &self.user_id, &self.user.id)?;
        if let Some(file) = &self.file {
            let file_id = self.file_id.clone().unwrap_or_default();
            expect_same(kind, "fileId", &file_id, &file.id)?;
        }
        Ok(())
    }
}

impl Consistency for Page {
    fn check(&self) -> Result<(), EntityError> {
        let kind = EntityKind::Page;
        expect_same(kind, "userId", &self.user_id, &self.user.id)?;
        if let Some(image) = &self.eye_catching_image {
            let image_id = self.eye_catching_image_id.clone().unwrap_or_default();
            expect_same(kind, "eyeCatchingImageId", &image_id, &image.id)?;
        }
        Ok(())
    }
}

impl Consistency for PageEvent {
    fn check(&self) -> Result<(), EntityError> {
        expect_same(EntityKind::PageEvent, "userId", &self.user_id, &self.user.id)
    }
}
