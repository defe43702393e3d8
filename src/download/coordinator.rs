// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Download coordination.
//!
//! Owns the correlator, the button and the dispatcher, and runs the flow:
//! click -> Loading -> submit/track id -> (ticks) -> matching completion ->
//! classify -> Completed -> toast + notification.
//!
//! Everything runs on the caller's event loop. Each method finishes its state
//! updates before returning, so a completion handled on the next turn never
//! sees a half-submitted request.
//!
//! The coordinator subscribes to the client's completions when it is built
//! and holds that subscription until [`DownloadCoordinator::shutdown`] or drop.

use std::time::Instant;

use super::classifier::classify_event;
use super::client::{CompletionSubscription, TransferClient};
use super::correlator::RequestCorrelator;
use super::types::{CompletionEvent, RequestId, Selection, TransferOutcome};
use crate::button::{LoadingButton, RenderSurface};
use crate::config::AppConfig;
use crate::error::BeginError;
use crate::notify::{MessageSink, NotificationDispatcher, NotificationSurface};

/// Toast shown when the tracked download completes.
pub const COMPLETED_TOAST: &str = "Download Completed";

/// Everything the coordinator paints or shows.
pub trait Frontend: RenderSurface + NotificationSurface + MessageSink {}

impl<T: RenderSurface + NotificationSurface + MessageSink> Frontend for T {}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// The request went out and is now tracked
    Submitted(RequestId),
    /// A download is already running; the click was ignored
    Busy,
}

/// Result of handling a completion signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionDisposition {
    /// Not the tracked request (stale or superseded)
    Ignored,
    /// Classified, shown and notified
    Delivered(TransferOutcome),
}

pub struct DownloadCoordinator<C: TransferClient, F: Frontend> {
    client: C,
    frontend: F,
    correlator: RequestCorrelator,
    button: LoadingButton,
    dispatcher: NotificationDispatcher,
    completions: CompletionSubscription,
}

impl<C: TransferClient, F: Frontend> DownloadCoordinator<C, F> {
    pub fn new(client: C, frontend: F, config: &AppConfig) -> Self {
        let button = LoadingButton::new(config.labels.clone(), config.animation_timing());
        let dispatcher =
            NotificationDispatcher::new(config.notification_channel(), config.replace_notifications);
        Self::with_parts(client, frontend, button, dispatcher)
    }

    pub fn with_parts(
        mut client: C,
        mut frontend: F,
        button: LoadingButton,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        let completions = client.subscribe_completion();
        frontend.draw(&button.frame());
        Self {
            client,
            frontend,
            correlator: RequestCorrelator::new(),
            button,
            dispatcher,
            completions,
        }
    }

    /// Wait for the engine's next completion signal. `None` once the engine
    /// side is gone or the subscription was released.
    pub async fn next_completion(&mut self) -> Option<CompletionEvent> {
        self.completions.recv().await
    }

    /// Whether completions are still being listened for.
    pub fn is_listening(&self) -> bool {
        self.completions.is_active()
    }

    /// Handle a click on the download button.
    ///
    /// Validation failures toast and leave the button alone. Submission
    /// failures toast and put the button back to the idle look it had.
    pub fn begin_transfer(
        &mut self,
        selection: &Selection,
        now: Instant,
    ) -> Result<BeginOutcome, BeginError> {
        if self.button.is_loading() {
            return Ok(BeginOutcome::Busy);
        }

        let request = match selection.to_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "selection rejected");
                let err = BeginError::from(e);
                self.frontend.show_message(&err.toast());
                return Err(err);
            }
        };

        let previous = self.button.idle_look().unwrap_or_default();
        if !self.button.begin(now) {
            return Ok(BeginOutcome::Busy);
        }
        self.redraw();

        match self.correlator.submit(&mut self.client, &request) {
            Ok(id) => {
                tracing::info!(%id, title = %request.title, url = %request.source_url, "download started");
                Ok(BeginOutcome::Submitted(id))
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %request.source_url, "submission failed");
                self.button.revert(previous, now);
                self.redraw();
                let err = BeginError::from(e);
                self.frontend.show_message(&err.toast());
                Err(err)
            }
        }
    }

    /// Handle a completion signal from the transfer engine.
    pub fn handle_completion(&mut self, event: CompletionEvent, now: Instant) -> CompletionDisposition {
        if !self.correlator.matches(event.id) {
            tracing::debug!(id = %event.id, tracked = ?self.correlator.current(), "ignoring stale completion");
            return CompletionDisposition::Ignored;
        }
        self.correlator.clear();

        let outcome = classify_event(&event);
        tracing::info!(id = %event.id, status = %outcome.status, "download completed");

        self.button.complete(now);
        self.redraw();
        self.frontend.show_message(COMPLETED_TOAST);
        self.dispatcher.dispatch(&mut self.frontend, &outcome);

        CompletionDisposition::Delivered(outcome)
    }

    /// Advance the loading animation and redraw. `None` when idle.
    pub fn on_tick(&mut self, now: Instant) -> Option<f32> {
        let phase = self.button.tick(now)?;
        self.redraw();
        Some(phase)
    }

    /// When the event loop should call [`Self::on_tick`] next.
    pub fn next_animation_deadline(&self) -> Option<Instant> {
        self.button.next_deadline()
    }

    pub fn button(&self) -> &LoadingButton {
        &self.button
    }

    pub fn correlator(&self) -> &RequestCorrelator {
        &self.correlator
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// True when the button is loading exactly when a request is tracked.
    pub fn is_consistent(&self) -> bool {
        self.button.is_loading() == self.correlator.current().is_some()
    }

    /// Tear down: cancel the animation, release the completion listener and
    /// hand back the parts.
    pub fn shutdown(mut self, now: Instant) -> (C, F) {
        self.button.shutdown(now);
        self.completions.release();
        if let Some(id) = self.correlator.clear() {
            tracing::debug!(%id, "shutting down with a download in flight");
        }
        (self.client, self.frontend)
    }

    fn redraw(&mut self) {
        let frame = self.button.frame();
        self.frontend.draw(&frame);
    }
}
