// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! loadapp - pick a file, download it, watch the button, get notified.
//!
//! One download at a time: a click turns the button into a loading animation,
//! the request goes to a transfer engine, and when the engine reports back the
//! result is classified, the button shows it and a notification is posted.
//!
//! # Core Modules
//!
//! - [`download`] - Request correlation, result classification, coordination
//! - [`button`] - Ready/Loading/Completed state machine and its animation
//! - [`notify`] - Result notifications and their details view
//! - [`config`] - `~/.loadapp/config.json`
//! - [`terminal`] - Terminal frontend used by the CLI
//! - [`error`] - Error taxonomy and toast formatting

pub mod button;
pub mod config;
pub mod download;
pub mod error;
pub mod notify;
pub mod terminal;

// Re-export commonly used types
pub use button::{ButtonLabels, ButtonState, Frame, IdleLook, LoadingButton, RenderSurface};
pub use config::AppConfig;
pub use download::{
    classify, BeginOutcome, CompletionDisposition, CompletionEvent, CompletionSubscription,
    DownloadCoordinator, Frontend, HttpTransferClient, OutcomeStatus, RequestCorrelator, RequestId,
    Resource, Selection, TransferClient, TransferOutcome, TransferRequest,
};
pub use error::{BeginError, ConfigError, SubmissionError, ValidationError};
pub use notify::{
    DetailView, MessageSink, NotificationChannel, NotificationDispatcher, NotificationPayload,
    NotificationSurface, NotificationTray,
};
pub use terminal::TerminalFrontend;
