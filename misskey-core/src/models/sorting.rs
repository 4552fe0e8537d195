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

//! Query selectors: user sort order and origin scope

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// Field a user listing is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Follower,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort directive for user listings
///
/// A `+` prefix puts the largest or most recent value first, `-` the
/// smallest or oldest, matching how the server orders the users listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserSorting {
    #[serde(rename = "+follower")]
    MostFollowers,
    #[serde(rename = "-follower")]
    FewestFollowers,
    #[serde(rename = "+createdAt")]
    NewestFirst,
    #[serde(rename = "-createdAt")]
    OldestFirst,
    #[serde(rename = "+updatedAt")]
    RecentlyUpdatedFirst,
    #[serde(rename = "-updatedAt")]
    LeastRecentlyUpdatedFirst,
}

impl UserSorting {
    pub const ALL: [UserSorting; 6] = [
        UserSorting::MostFollowers,
        UserSorting::FewestFollowers,
        UserSorting::NewestFirst,
        UserSorting::OldestFirst,
        UserSorting::RecentlyUpdatedFirst,
        UserSorting::LeastRecentlyUpdatedFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserSorting::MostFollowers => "+follower",
            UserSorting::FewestFollowers => "-follower",
            UserSorting::NewestFirst => "+createdAt",
            UserSorting::OldestFirst => "-createdAt",
            UserSorting::RecentlyUpdatedFirst => "+updatedAt",
            UserSorting::LeastRecentlyUpdatedFirst => "-updatedAt",
        }
    }

    pub fn field(&self) -> SortField {
        match self {
            UserSorting::MostFollowers | UserSorting::FewestFollowers => SortField::Follower,
            UserSorting::NewestFirst | UserSorting::OldestFirst => SortField::CreatedAt,
            UserSorting::RecentlyUpdatedFirst | UserSorting::LeastRecentlyUpdatedFirst => {
                SortField::UpdatedAt
            }
        }
    }

    /// Order the server applies to the field
    pub fn direction(&self) -> SortDirection {
        if self.as_str().starts_with('+') {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

impl fmt::Display for UserSorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserSorting {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserSorting::ALL
            .into_iter()
            .find(|sorting| sorting.as_str() == s)
            .ok_or_else(|| EntityError::UnknownValue {
                what: "user sorting",
                value: s.to_string(),
            })
    }
}

/// Which users or notes a listing covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OriginType {
    /// Local and remote
    #[default]
    Combined,
    Local,
    Remote,
}

impl OriginType {
    pub const ALL: [OriginType; 3] = [OriginType::Combined, OriginType::Local, OriginType::Remote];

    pub fn as_str(&self) -> &'static str {
        match self {
            OriginType::Combined => "combined",
            OriginType::Local => "local",
            OriginType::Remote => "remote",
        }
    }
}

impl fmt::Display for OriginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginType {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OriginType::ALL
            .into_iter()
            .find(|origin| origin.as_str() == s)
            .ok_or_else(|| EntityError::UnknownValue {
                what: "origin",
                value: s.to_string(),
            })
    }
}
