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

//! Shared JSON fixtures for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn user(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "host": null,
        "name": username.to_uppercase(),
        "onlineStatus": "active",
        "avatarUrl": format!("https://misskey.example/avatars/{id}.webp"),
        "avatarBlurhash": "y0PZ@ZVs",
        "emojis": []
    })
}

pub fn drive_file(id: &str) -> Value {
    json!({
        "id": id,
        "createdAt": "2023-04-30T08:15:00.000Z",
        "isSensitive": false,
        "name": "sunset.jpg",
        "thumbnailUrl": format!("https://misskey.example/files/thumbnail-{id}.webp"),
        "url": format!("https://misskey.example/files/{id}.jpg"),
        "type": "image/jpeg",
        "size": 482113,
        "md5": "0cc175b9c0f1b6a831c399e269772661",
        "blurhash": "LKO2?U%2Tw=w]~RBVZRi};RPxuwH",
        "properties": { "width": 1920, "height": 1080 }
    })
}

pub fn note(id: &str, author: Value) -> Value {
    let user_id = author["id"].clone();
    json!({
        "id": id,
        "createdAt": "2023-05-01T12:00:00.000Z",
        "text": "hello fediverse",
        "cw": null,
        "user": author,
        "userId": user_id,
        "replyId": "",
        "renoteId": "",
        "files": [],
        "fileIds": [],
        "visibility": "public",
        "reactions": {},
        "emojis": []
    })
}

pub fn notification(id: &str, tag: &str, body: Value) -> Value {
    let mut value = json!({
        "id": id,
        "createdAt": "2023-05-01T13:00:00.000Z",
        "isRead": false,
        "type": tag
    });
    if let (Some(target), Some(extra)) = (value.as_object_mut(), body.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    value
}
