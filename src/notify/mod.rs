// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Result notifications.
//!
//! The [`NotificationDispatcher`] turns a classified outcome into a
//! [`NotificationPayload`] (headline, body, one "Check the status" action) and
//! posts it on a single well-known channel of a [`NotificationSurface`].

pub mod dispatcher;
pub mod payload;
pub mod surface;

pub use dispatcher::{NotificationDispatcher, DOWNLOAD_NOTIFICATION_ID};
pub use payload::{DetailView, NotificationAction, NotificationChannel, NotificationPayload};
pub use surface::{MessageSink, NotificationSurface, NotificationTray};
