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

//! Error types for decoding and checking entities

use serde_json::error::Category;
use thiserror::Error;

use crate::decode::EntityKind;
use crate::models::Id;

/// Errors raised while turning payloads into entities
#[derive(Debug, Error)]
pub enum EntityError {
    /// The payload is not well-formed JSON
    #[error("malformed {kind} payload: {source}")]
    Syntax {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    /// A closed enumeration or the notification tag held an unknown value
    #[error("unknown variant in {kind} payload: {message}")]
    UnknownVariant { kind: EntityKind, message: String },

    /// A required field was absent
    #[error("{kind} payload is missing field `{field}`")]
    MissingField { kind: EntityKind, field: String },

    /// A field had the wrong type or an unparseable value
    #[error("invalid {kind} payload: {message}")]
    InvalidField { kind: EntityKind, message: String },

    /// An embedded object disagrees with its companion id field
    #[error("{kind} field `{field}` holds {found}, expected {expected}")]
    Inconsistent {
        kind: EntityKind,
        field: &'static str,
        expected: Id,
        found: Id,
    },

    #[error("invalid acct: {0:?}")]
    InvalidAcct(String),

    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("unknown {what}: {value}")]
    UnknownValue { what: &'static str, value: String },
}

impl EntityError {
    /// Sort a serde_json failure into the matching variant
    pub fn from_json(kind: EntityKind, err: serde_json::Error) -> Self {
        if err.classify() != Category::Data {
            return EntityError::Syntax { kind, source: err };
        }

        let message = err.to_string();
        if let Some(field) = quoted_after(&message, "missing field `") {
            EntityError::MissingField {
                kind,
                field: field.to_string(),
            }
        } else if message.starts_with("unknown variant") {
            EntityError::UnknownVariant { kind, message }
        } else {
            EntityError::InvalidField { kind, message }
        }
    }

    /// Entity kind the error was raised for, if any
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            EntityError::Syntax { kind, .. }
            | EntityError::UnknownVariant { kind, .. }
            | EntityError::MissingField { kind, .. }
            | EntityError::InvalidField { kind, .. }
            | EntityError::Inconsistent { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Text between `prefix` and the next backtick
fn quoted_after<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = &message[message.find(prefix)? + prefix.len()..];
    rest.find('`').map(|end| &rest[..end])
}
