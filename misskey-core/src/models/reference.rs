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

//! Identifiers and object-or-identifier references

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of an entity instance
///
/// Identifiers are issued by the server. They are compared by value and never
/// generated or validated locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Wrap an identifier received from the server
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A record that carries its own identifier
pub trait Entity {
    fn id(&self) -> &Id;

    /// The user that authored or owns this entity, if any
    fn owner_id(&self) -> Option<&Id> {
        None
    }
}

/// A relation that may be populated with the full object or only its identifier
///
/// Payloads carry both an embedded snapshot and a companion id field
/// (`reply` / `replyId`). A `Ref` borrows whichever of the two is available.
#[derive(Debug, PartialEq)]
pub enum Ref<'a, T> {
    /// The embedded snapshot
    Full(&'a T),
    /// Only the identifier
    Id(&'a Id),
}

impl<'a, T: Entity> Ref<'a, T> {
    /// Identifier of the referenced entity, whichever form is held
    pub fn id(&self) -> &'a Id {
        match self {
            Ref::Full(entity) => entity.id(),
            Ref::Id(id) => *id,
        }
    }

    /// Drop the embedded snapshot and keep only the identifier
    pub fn to_id_only(&self) -> Ref<'a, T> {
        Ref::Id(self.id())
    }

    /// The embedded snapshot, if any
    pub fn full(&self) -> Option<&'a T> {
        match self {
            Ref::Full(entity) => Some(*entity),
            Ref::Id(_) => None,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Ref::Full(_))
    }
}

impl<T> Clone for Ref<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ref<'_, T> {}

/// Pick the embedded object if present, otherwise a non-empty companion id
pub(crate) fn resolve<'a, T>(full: Option<&'a T>, id: Option<&'a Id>) -> Option<Ref<'a, T>> {
    match (full, id) {
        (Some(entity), _) => Some(Ref::Full(entity)),
        (None, Some(id)) if !id.is_empty() => Some(Ref::Id(id)),
        _ => None,
    }
}
