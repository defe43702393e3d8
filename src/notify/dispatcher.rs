// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Builds and posts the result notification for a classified outcome.

use super::payload::{NotificationChannel, NotificationPayload};
use super::surface::NotificationSurface;
use crate::download::types::TransferOutcome;

/// Id used for every download notification in replace mode.
pub const DOWNLOAD_NOTIFICATION_ID: u32 = 0;

#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    channel: NotificationChannel,
    replace_previous: bool,
    last_id: u32,
}

impl NotificationDispatcher {
    /// `replace_previous`: reuse [`DOWNLOAD_NOTIFICATION_ID`] so each result
    /// replaces the last one. Otherwise every dispatch gets a fresh id.
    pub fn new(channel: NotificationChannel, replace_previous: bool) -> Self {
        Self {
            channel,
            replace_previous,
            last_id: DOWNLOAD_NOTIFICATION_ID,
        }
    }

    pub fn channel(&self) -> &NotificationChannel {
        &self.channel
    }

    /// Post the notification for `outcome`, setting up the channel first.
    /// Returns the notification id used.
    pub fn dispatch<N: NotificationSurface + ?Sized>(
        &mut self,
        surface: &mut N,
        outcome: &TransferOutcome,
    ) -> u32 {
        surface.ensure_channel(&self.channel);

        let id = self.next_id();
        let payload = NotificationPayload::for_outcome(&self.channel.id, id, outcome);
        tracing::info!(
            channel = %self.channel.id,
            id,
            status = %outcome.status,
            title = %payload.title,
            "posting download notification"
        );
        surface.post(payload);
        id
    }

    fn next_id(&mut self) -> u32 {
        if self.replace_previous {
            return DOWNLOAD_NOTIFICATION_ID;
        }
        // Skip the id reserved for replace mode when wrapping
        self.last_id = self.last_id.wrapping_add(1).max(1);
        self.last_id
    }
}
