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

//! Data models for Misskey entities
//!
//! These models mirror the JSON shapes exchanged with a Misskey server,
//! including users, notes, notifications, chat messages and pages.

mod acct;
mod drive;
mod instance;
mod messaging;
mod note;
mod notification;
mod page;
mod reference;
mod sorting;
mod timestamp;
mod user;

pub use acct::*;
pub use drive::*;
pub use instance::*;
pub use messaging::*;
pub use note::*;
pub use notification::*;
pub use page::*;
pub use reference::{Entity, Id, Ref};
pub use sorting::*;
pub use user::*;
