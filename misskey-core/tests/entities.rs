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

//! Wire-shape tests for Misskey entities

mod common;

use misskey_core::decode::{decode, decode_value, decode_with, Consistency, DecodeOptions};
use misskey_core::models::{
    DriveFile, Id, MeDetailed, MessagingMessage, Note, Notification, NotificationBody,
    NotificationType, OnlineStatus, Page, PageEvent, Visibility,
};
use misskey_core::{EntityError, EntityKind};
use serde_json::{json, Value};

fn note_with_file() -> Value {
    let mut note = common::note("9f2k1", common::user("u1", "alice"));
    note["visibility"] = json!("home");
    note["files"] = json!([common::drive_file("f1")]);
    note["fileIds"] = json!(["f1"]);
    note["reactions"] = json!({ "👍": 3 });
    note
}

#[test]
fn home_note_round_trips_losslessly() {
    let input = note_with_file();
    let note: Note = decode_value(input.clone()).unwrap();

    assert_eq!(note.visibility, Visibility::Home);
    assert!(note.reply.is_none());
    assert!(note.reply_id.is_empty());
    assert!(note.reply_ref().is_none());
    assert_eq!(note.files.len(), 1);
    assert_eq!(note.files[0].properties.dimensions(), Some((1920, 1080)));
    assert_eq!(note.reactions.get("👍"), Some(&3));
    assert!(note.my_reaction.is_none());

    let output = serde_json::to_value(&note).unwrap();
    assert_eq!(output, input);

    let object = output.as_object().unwrap();
    assert!(!object.contains_key("myReaction"));
    assert!(!object.contains_key("reply"));
    assert!(!object.contains_key("poll"));

    let again: Note = serde_json::from_value(output).unwrap();
    assert_eq!(again, note);
}

#[test]
fn viewer_reaction_is_kept() {
    let mut input = note_with_file();
    input["myReaction"] = json!(":blobcat:");
    let note: Note = decode_value(input).unwrap();
    assert_eq!(note.my_reaction.as_deref(), Some(":blobcat:"));

    let output = serde_json::to_value(&note).unwrap();
    assert_eq!(output["myReaction"], json!(":blobcat:"));
}

#[test]
fn timestamps_keep_millisecond_precision() {
    let mut input = note_with_file();
    input["createdAt"] = json!("2023-05-01T12:34:56.789Z");
    input["poll"] = json!({
        "expiresAt": "2023-05-08T12:34:56.000Z",
        "multiple": false,
        "choices": [{ "isVoted": false, "text": "yes", "votes": 1 }]
    });

    let note: Note = decode_value(input.clone()).unwrap();
    let output = serde_json::to_value(&note).unwrap();

    assert_eq!(output["createdAt"], json!("2023-05-01T12:34:56.789Z"));
    assert_eq!(output["files"][0]["createdAt"], json!("2023-04-30T08:15:00.000Z"));
    assert_eq!(output["poll"]["expiresAt"], json!("2023-05-08T12:34:56.000Z"));
    assert_eq!(output, input);
}

#[test]
fn file_properties_are_kept_verbatim() {
    let mut input = note_with_file();
    input["files"][0]["properties"] = json!({
        "width": 1920.0,
        "height": 1080,
        "orientation": null,
        "avgColor": "rgb(40,36,51)"
    });

    let note: Note = decode_value(input.clone()).unwrap();
    let properties = &note.files[0].properties;
    assert_eq!(properties.dimensions(), Some((1920, 1080)));
    assert_eq!(properties.orientation(), None);
    assert_eq!(properties.avg_color(), Some("rgb(40,36,51)"));

    let output = serde_json::to_value(&note).unwrap();
    assert_eq!(output["files"][0]["properties"]["orientation"], Value::Null);
    assert_eq!(output, input);
}

#[test]
fn embedded_reply_reduces_to_its_id() {
    let mut input = common::note("n2", common::user("u2", "bob"));
    input["reply"] = common::note("n1", common::user("u1", "alice"));
    input["replyId"] = json!("n1");

    let note: Note = decode_value(input).unwrap();
    let reply = note.reply_ref().unwrap();
    assert!(reply.is_full());

    let id_only = reply.to_id_only();
    assert!(id_only.full().is_none());
    assert_eq!(id_only.id(), &note.reply_id);
    assert_eq!(id_only.id(), "n1");

    note.check().unwrap();
}

#[test]
fn identifiers_share_one_type() {
    fn is_id(_: &Id) {}

    let note: Note = decode_value(note_with_file()).unwrap();
    is_id(&note.id);
    is_id(&note.user.id);
    is_id(&note.user_id);
    is_id(&note.reply_id);
    is_id(&note.renote_id);
    is_id(&note.file_ids[0]);
    is_id(&note.files[0].id);

    let file: DriveFile = decode_value(common::drive_file("f9")).unwrap();
    is_id(&file.id);
}

#[test]
fn every_notification_tag_decodes() {
    let actor = || common::user("u7", "dave");
    let target = || common::note("n7", common::user("u1", "alice"));

    let cases = vec![
        ("reaction", json!({ "reaction": "⭐", "user": actor(), "userId": "u7", "note": target() })),
        ("reply", json!({ "user": actor(), "userId": "u7", "note": target() })),
        ("renote", json!({ "user": actor(), "userId": "u7", "note": target() })),
        ("quote", json!({ "user": actor(), "userId": "u7", "note": target() })),
        ("mention", json!({ "user": actor(), "userId": "u7", "note": target() })),
        ("pollVote", json!({ "user": actor(), "userId": "u7", "note": target() })),
        ("follow", json!({ "user": actor(), "userId": "u7" })),
        ("followRequestAccepted", json!({ "user": actor(), "userId": "u7" })),
        ("receiveFollowRequest", json!({ "user": actor(), "userId": "u7" })),
        ("groupInvited", json!({})),
        ("app", json!({ "body": "Welcome!", "icon": "https://misskey.example/icon.png" })),
    ];
    assert_eq!(cases.len(), NotificationType::ALL.len());

    for (i, (tag, body)) in cases.into_iter().enumerate() {
        let payload = common::notification(&format!("x{i}"), tag, body);
        let n: Notification = decode_value(payload)
            .unwrap_or_else(|e| panic!("{tag} failed to decode: {e}"));

        assert_eq!(n.kind().as_str(), tag);
        assert_eq!(n.kind(), NotificationType::ALL[i]);
        assert_eq!(n.kind().has_note(), n.note().is_some());

        let output = serde_json::to_value(&n).unwrap();
        assert_eq!(output["type"], json!(tag));
        assert_eq!(output["id"], json!(format!("x{i}")));

        if n.actor().is_some() {
            assert_eq!(n.actor_id().unwrap(), "u7");
            n.check().unwrap();
        }
    }
}

#[test]
fn reaction_notification_exposes_symbol() {
    let payload = common::notification(
        "r1",
        "reaction",
        json!({
            "reaction": "🎉",
            "user": common::user("u3", "erin"),
            "userId": "u3",
            "note": common::note("n3", common::user("u1", "alice"))
        }),
    );
    let n: Notification = decode_value(payload).unwrap();

    match &n.body {
        NotificationBody::Reaction(activity) => {
            assert_eq!(activity.reaction, "🎉");
            assert_eq!(activity.note.id, "n3");
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert_eq!(n.actor().unwrap().username, "erin");
}

#[test]
fn undocumented_notification_tag_is_rejected() {
    let payload = common::notification(
        "z",
        "favourite",
        json!({ "user": common::user("u1", "alice"), "userId": "u1" }),
    );
    let err = decode::<Notification>(&payload.to_string()).unwrap_err();
    assert!(
        matches!(err, EntityError::UnknownVariant { kind: EntityKind::Notification, .. }),
        "got {err:?}"
    );
}

#[test]
fn notification_without_tag_is_rejected() {
    let mut payload = common::notification("z", "follow", json!({}));
    payload.as_object_mut().unwrap().remove("type");
    assert!(decode::<Notification>(&payload.to_string()).is_err());
}

#[test]
fn closed_enums_reject_outsiders() {
    let mut note = note_with_file();
    note["visibility"] = json!("unlisted");
    assert!(matches!(
        decode_value::<Note>(note).unwrap_err(),
        EntityError::UnknownVariant { .. }
    ));

    assert!(serde_json::from_value::<OnlineStatus>(json!("away")).is_err());
    for status in ["online", "active", "offline", "unknown"] {
        assert!(serde_json::from_value::<OnlineStatus>(json!(status)).is_ok());
    }
}

#[test]
fn detailed_profile_keeps_unknown_keys() {
    let mut me = common::user("u1", "alice");
    let extra = json!({
        "avatarId": "f1",
        "bannerId": "f2",
        "autoAcceptFollowed": true,
        "noCrawle": false,
        "isExplorable": true,
        "hideOnlineStatus": false,
        "mutedWords": [["spoiler", "finale"], ["crypto"]],
        "twoFactorEnabled": true,
        "injectFeaturedNote": false
    });
    for (k, v) in extra.as_object().unwrap() {
        me[k] = v.clone();
    }

    let profile: MeDetailed = decode_value(me.clone()).unwrap();
    assert_eq!(profile.user.username, "alice");
    assert_eq!(profile.avatar_id, "f1");
    assert!(profile.muted_words.is_muted("crypto winter"));
    assert_eq!(profile.extra.get("twoFactorEnabled"), Some(&json!(true)));
    assert!(!profile.extra.contains_key("username"));

    let output = serde_json::to_value(&profile).unwrap();
    assert_eq!(output, me);
}

#[test]
fn strict_mode_flags_mismatched_files() {
    let mut input = note_with_file();
    input["fileIds"] = json!(["f2"]);
    let payload = input.to_string();

    assert!(decode_with::<Note>(DecodeOptions::default(), &payload).is_ok());
    match decode_with::<Note>(DecodeOptions::strict(), &payload).unwrap_err() {
        EntityError::Inconsistent { field, expected, found, .. } => {
            assert_eq!(field, "fileIds");
            assert_eq!(expected, "f2");
            assert_eq!(found, "f1");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn messaging_message_tracks_readers() {
    let message: MessagingMessage = decode_value(json!({
        "id": "m1",
        "createdAt": "2023-05-02T09:00:00.000Z",
        "file": null,
        "fileId": "f5",
        "isRead": false,
        "reads": ["u2", "u3"],
        "text": "see attached",
        "user": common::user("u1", "alice"),
        "userId": "u1",
        "groupId": "g1"
    }))
    .unwrap();

    assert!(message.is_read_by(&Id::from("u3")));
    assert!(!message.is_read_by(&Id::from("u9")));

    let file = message.file_ref().unwrap();
    assert!(!file.is_full());
    assert_eq!(file.id(), "f5");

    let output = serde_json::to_value(&message).unwrap();
    assert_eq!(output["file"], Value::Null);
}

#[test]
fn page_keeps_open_blocks() {
    let page: Page = decode_value(json!({
        "id": "p1",
        "createdAt": "2023-05-03T10:00:00.000Z",
        "updatedAt": "2023-05-03T11:00:00.000Z",
        "userId": "u1",
        "user": common::user("u1", "alice"),
        "content": [
            { "id": "b1", "type": "text", "text": "Hello" },
            { "id": "b2", "type": "image", "fileId": "f1" },
            { "id": "b3", "type": "text", "text": "Bye" }
        ],
        "variables": [],
        "title": "My page",
        "name": "my-page",
        "summary": null,
        "hideTitleWhenPinned": false,
        "alignCenter": true,
        "font": "sans-serif",
        "script": "",
        "eyeCatchingImageId": null,
        "eyeCatchingImage": null,
        "attachedFiles": [],
        "likedCount": 4
    }))
    .unwrap();

    assert_eq!(page.blocks_of_type("text").count(), 2);
    assert!(page.eye_catching_image_ref().is_none());
    assert!(page.is_liked.is_none());
    page.check().unwrap();

    let output = serde_json::to_value(&page).unwrap();
    assert!(output.get("isLiked").is_none());
    assert_eq!(output["content"][1]["fileId"], json!("f1"));
}

#[test]
fn page_event_carries_arbitrary_payload() {
    let event: PageEvent = decode_value(json!({
        "pageId": "p1",
        "event": "submit",
        "var": { "answers": [1, 2, 3] },
        "userId": "u2",
        "user": common::user("u2", "bob")
    }))
    .unwrap();

    assert_eq!(event.var["answers"][2], json!(3));
}

#[test]
fn muted_words_reach_into_renotes() {
    let profile_words = misskey_core::MutedWords::new(vec![vec!["finale".into()]]);

    let mut inner = common::note("n1", common::user("u1", "alice"));
    inner["text"] = json!("The FINALE was wild");
    let mut outer = common::note("n2", common::user("u2", "bob"));
    outer["text"] = Value::Null;
    outer["renote"] = inner;
    outer["renoteId"] = json!("n1");

    let note: Note = decode_value(outer).unwrap();
    assert!(note.is_pure_renote());
    assert!(profile_words.matches_note(&note));

    let plain: Note = decode_value(common::note("n3", common::user("u1", "alice"))).unwrap();
    assert!(!profile_words.matches_note(&plain));
}

#[test]
fn user_handle_matches_parsed_handle() {
    let mut input = common::user("u5", "carol");
    input["host"] = json!("Misskey.Example");
    let user: misskey_core::models::User = decode_value(input).unwrap();

    let acct = user.acct();
    assert_eq!(acct.to_string(), "@carol@misskey.example");
    assert_eq!(acct.to_string().parse::<misskey_core::models::Acct>().unwrap(), acct);
    assert_eq!(user.host.as_deref(), Some("Misskey.Example"));
}
