// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Notification payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::download::types::{OutcomeStatus, TransferOutcome};

/// Label of the single action attached to every download notification.
pub const CHECK_STATUS_ACTION: &str = "Check the status";

/// The channel download notifications are posted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl NotificationChannel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: "Download results".to_string(),
        }
    }
}

/// Details shown when the notification action is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailView {
    pub file_name: String,
    pub description: String,
    pub status: OutcomeStatus,
}

impl DetailView {
    pub fn from_outcome(outcome: &TransferOutcome) -> Self {
        Self {
            file_name: outcome.title.clone(),
            description: outcome.description.clone(),
            status: outcome.status,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// One `Key: value` line per field.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("File name: {}", self.file_name),
            format!("Description: {}", self.description),
            format!("Status: {}", self.status_label()),
        ]
    }
}

/// Tappable action on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    details: DetailView,
}

impl NotificationAction {
    pub fn check_status(details: DetailView) -> Self {
        Self {
            label: CHECK_STATUS_ACTION.to_string(),
            details,
        }
    }

    /// Open the details view. Each call gets its own copy.
    pub fn invoke(&self) -> DetailView {
        self.details.clone()
    }
}

/// A fully built notification, ready to post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub channel_id: String,
    pub id: u32,
    pub title: String,
    pub body: String,
    pub action: NotificationAction,
    /// Dismiss when the action is invoked
    pub auto_cancel: bool,
    pub posted_at: DateTime<Utc>,
}

impl NotificationPayload {
    /// Build the payload for one outcome. Every field is owned, so two
    /// payloads never share text.
    pub fn for_outcome(channel_id: &str, id: u32, outcome: &TransferOutcome) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            id,
            title: headline(outcome),
            body: body(outcome),
            action: NotificationAction::check_status(DetailView::from_outcome(outcome)),
            auto_cancel: true,
            posted_at: Utc::now(),
        }
    }
}

fn headline(outcome: &TransferOutcome) -> String {
    let name = if outcome.title.trim().is_empty() {
        "requested".to_string()
    } else {
        outcome.title.clone()
    };
    match outcome.status {
        OutcomeStatus::Success => format!("The {} file is downloaded successfully", name),
        OutcomeStatus::Failure => format!("The {} file is not downloaded properly", name),
        OutcomeStatus::Unknown => format!("The {} file finished with an unknown status", name),
    }
}

fn body(outcome: &TransferOutcome) -> String {
    if outcome.description.trim().is_empty() {
        format!("Status: {}", outcome.status.label())
    } else {
        format!("{} (Status: {})", outcome.description, outcome.status.label())
    }
}
