// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Recording test doubles shared by the integration tests.

#![allow(dead_code)]

use loadapp::download::{completion_channel, CompletionEvent, CompletionSender, CompletionSubscription};
use loadapp::{
    Frame, MessageSink, NotificationChannel, NotificationPayload, NotificationSurface,
    NotificationTray, RenderSurface, RequestId, SubmissionError, TransferClient, TransferRequest,
};

/// Transfer client that records submissions and hands out sequential ids.
#[derive(Default)]
pub struct RecordingClient {
    pub submitted: Vec<TransferRequest>,
    pub reject_next: Option<SubmissionError>,
    sender: Option<CompletionSender>,
    next_id: u64,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ids at `first` instead of 1.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next_id: first.saturating_sub(1),
            ..Self::default()
        }
    }

    /// Raise a completion on the subscribed channel.
    pub fn complete(&self, id: RequestId, status: i32, title: &str, description: &str) -> bool {
        match &self.sender {
            Some(sender) => sender.emit(CompletionEvent {
                id,
                status,
                title: Some(title.to_string()),
                description: Some(description.to_string()),
            }),
            None => false,
        }
    }
}

impl TransferClient for RecordingClient {
    fn submit(&mut self, request: &TransferRequest) -> Result<RequestId, SubmissionError> {
        if let Some(err) = self.reject_next.take() {
            return Err(err);
        }
        self.submitted.push(request.clone());
        self.next_id += 1;
        Ok(RequestId(self.next_id))
    }

    fn subscribe_completion(&mut self) -> CompletionSubscription {
        let (sender, subscription) = completion_channel();
        self.sender = Some(sender);
        subscription
    }
}

/// Frontend that records every frame, toast and notification.
#[derive(Default)]
pub struct RecordingFrontend {
    pub frames: Vec<Frame>,
    pub toasts: Vec<String>,
    pub tray: NotificationTray,
    pub ensure_calls: usize,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &Frame {
        self.frames.last().expect("no frame drawn")
    }
}

impl RenderSurface for RecordingFrontend {
    fn draw(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}

impl NotificationSurface for RecordingFrontend {
    fn ensure_channel(&mut self, channel: &NotificationChannel) {
        self.ensure_calls += 1;
        self.tray.ensure_channel(channel);
    }

    fn post(&mut self, payload: NotificationPayload) {
        self.tray.post(payload);
    }
}

impl MessageSink for RecordingFrontend {
    fn show_message(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }
}
