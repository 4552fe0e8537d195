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

//! Muted word filtering
//!
//! A user's muted words are a list of groups. Every token of a group must
//! appear for the group to match, and any matching group mutes the text.

use serde::{Deserialize, Serialize};

use crate::models::Note;

/// Muted word groups from the user's settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MutedWords(pub Vec<Vec<String>>);

impl MutedWords {
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        Self(groups)
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.0
    }

    /// True when no group has a usable token
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|group| tokens(group).next().is_none())
    }

    /// The first group that matches the text
    pub fn first_match(&self, text: &str) -> Option<&[String]> {
        let haystack = text.to_lowercase();
        self.0
            .iter()
            .find(|group| group_matches(group, &haystack))
            .map(Vec::as_slice)
    }

    pub fn is_muted(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// Whether the note's text or content warning, or those of the
    /// note it renotes, are muted
    pub fn matches_note(&self, note: &Note) -> bool {
        let own = [note.text.as_deref(), note.cw.as_deref()];
        let renoted = note
            .renote
            .as_deref()
            .map(|r| [r.text.as_deref(), r.cw.as_deref()])
            .unwrap_or_default();

        own.into_iter()
            .chain(renoted)
            .flatten()
            .any(|text| self.is_muted(text))
    }
}

impl From<Vec<Vec<String>>> for MutedWords {
    fn from(groups: Vec<Vec<String>>) -> Self {
        Self(groups)
    }
}

/// Trimmed, non-empty tokens of a group
fn tokens(group: &[String]) -> impl Iterator<Item = &str> {
    group.iter().map(|t| t.trim()).filter(|t| !t.is_empty())
}

fn group_matches(group: &[String], haystack: &str) -> bool {
    let mut seen = false;
    for token in tokens(group) {
        seen = true;
        if !haystack.contains(&token.to_lowercase()) {
            return false;
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(groups: &[&[&str]]) -> MutedWords {
        MutedWords::new(
            groups
                .iter()
                .map(|g| g.iter().map(|t| t.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn group_requires_every_token() {
        let muted = words(&[&["spoiler", "finale"]]);
        assert!(muted.is_muted("No SPOILER for the finale please"));
        assert!(!muted.is_muted("no spoilers here"));
    }

    #[test]
    fn any_group_mutes() {
        let muted = words(&[&["crypto"], &["election", "poll"]]);
        assert!(muted.is_muted("buy crypto now"));
        assert!(muted.is_muted("Election poll results"));
        assert!(!muted.is_muted("election night"));
        assert_eq!(muted.first_match("crypto").unwrap(), ["crypto".to_string()]);
    }

    #[test]
    fn blank_groups_are_ignored() {
        let muted = words(&[&[], &["  ", ""]]);
        assert!(muted.is_empty());
        assert!(!muted.is_muted("anything at all"));
    }

    #[test]
    fn serializes_as_nested_lists() {
        let muted = words(&[&["a", "b"], &["c"]]);
        assert_eq!(
            serde_json::to_value(&muted).unwrap(),
            serde_json::json!([["a", "b"], ["c"]])
        );
    }
}
