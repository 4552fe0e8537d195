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

//! Serde helpers for ISO 8601 timestamps
//!
//! Timestamps are written with millisecond precision and a `Z` suffix, the
//! form Misskey produces with `Date.toISOString()`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer)
}

/// Same format for nullable timestamps
pub mod option {
    use super::*;

    pub fn serialize<S>(at: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match at {
            Some(at) => super::serialize(at, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "crate::models::timestamp")]
        at: DateTime<Utc>,
        #[serde(with = "crate::models::timestamp::option")]
        until: Option<DateTime<Utc>>,
    }

    #[test]
    fn keeps_millisecond_precision() {
        for input in [
            json!({ "at": "2023-05-01T12:00:00.000Z", "until": null }),
            json!({ "at": "2023-05-01T12:00:00.250Z", "until": "2023-05-02T00:00:00.000Z" }),
        ] {
            let stamped: Stamped = serde_json::from_value(input.clone()).unwrap();
            assert_eq!(serde_json::to_value(&stamped).unwrap(), input);
        }
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let stamped: Stamped =
            serde_json::from_value(json!({ "at": "2023-05-01T21:00:00+09:00", "until": null }))
                .unwrap();
        assert_eq!(
            serde_json::to_value(&stamped).unwrap()["at"],
            json!("2023-05-01T12:00:00.000Z")
        );
    }
}
