// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Outbound presentation surfaces: notification center and toasts.

use std::collections::BTreeMap;

use super::payload::{NotificationChannel, NotificationPayload};

/// A platform notification center.
pub trait NotificationSurface {
    /// Create the channel if it does not exist yet. Must be idempotent.
    fn ensure_channel(&mut self, channel: &NotificationChannel);

    /// Show a notification. A payload with the same channel and id as a
    /// visible one replaces it.
    fn post(&mut self, payload: NotificationPayload);
}

/// Short-lived user message ("toast").
pub trait MessageSink {
    fn show_message(&mut self, message: &str);
}

/// In-process notification center.
///
/// Keeps one visible entry per (channel, id), like a platform tray does.
#[derive(Debug, Default)]
pub struct NotificationTray {
    channels: BTreeMap<String, NotificationChannel>,
    visible: BTreeMap<(String, u32), NotificationPayload>,
    posted: usize,
}

impl NotificationTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channels(&self) -> impl Iterator<Item = &NotificationChannel> {
        self.channels.values()
    }

    /// Notifications currently shown, ordered by channel then id.
    pub fn visible(&self) -> impl Iterator<Item = &NotificationPayload> {
        self.visible.values()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Total number of `post` calls, replaced entries included.
    pub fn posted_count(&self) -> usize {
        self.posted
    }

    /// Dismiss a notification, as the platform does on an auto-cancel tap.
    pub fn dismiss(&mut self, channel_id: &str, id: u32) -> Option<NotificationPayload> {
        self.visible.remove(&(channel_id.to_string(), id))
    }
}

impl NotificationSurface for NotificationTray {
    fn ensure_channel(&mut self, channel: &NotificationChannel) {
        self.channels
            .entry(channel.id.clone())
            .or_insert_with(|| channel.clone());
    }

    fn post(&mut self, payload: NotificationPayload) {
        if !self.channels.contains_key(&payload.channel_id) {
            tracing::warn!(channel = %payload.channel_id, "notification posted to unknown channel, dropped");
            return;
        }
        self.posted += 1;
        self.visible
            .insert((payload.channel_id.clone(), payload.id), payload);
    }
}
