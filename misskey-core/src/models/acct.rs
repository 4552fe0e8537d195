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

//! Account handles in `@username@host` form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// A user handle, with the host omitted for local users
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Acct {
    pub username: String,
    pub host: Option<String>,
}

impl Acct {
    /// Build a handle; the host is stored lowercased
    pub fn new(username: impl Into<String>, host: Option<String>) -> Self {
        Self {
            username: username.into(),
            host: host.map(|h| h.to_lowercase()),
        }
    }

    /// Parse `@alice`, `alice`, `@alice@example.com` or `alice@example.com`
    pub fn parse(input: &str) -> Result<Self, EntityError> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);

        let mut parts = body.split('@');
        let username = parts.next().unwrap_or_default();
        let host = parts.next();

        if parts.next().is_some() {
            return Err(EntityError::InvalidAcct(input.to_string()));
        }
        if username.is_empty() {
            return Err(EntityError::InvalidAcct(input.to_string()));
        }

        match host {
            Some("") => Err(EntityError::InvalidAcct(input.to_string())),
            Some(host) => Ok(Self::new(username, Some(host.to_string()))),
            None => Ok(Self::new(username, None)),
        }
    }

    pub fn is_local(&self) -> bool {
        self.host.is_none()
    }
}

impl FromStr for Acct {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Acct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "@{}@{}", self.username, host),
            None => write!(f, "@{}", self.username),
        }
    }
}
