// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Download Coordination for loadapp
//!
//! This module ties one download request to its eventual result:
//! - Submitting a request and tracking the id the engine hands back
//! - Matching asynchronous completion signals to the tracked request
//! - Classifying the result and driving the button and notification
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐  submit   ┌─────────────────┐
//! │ DownloadCoordinator  │──────────▶│ TransferClient  │
//! │  ├ RequestCorrelator │           │ (HTTP, tokio)   │
//! │  ├ LoadingButton     │◀──────────│                 │
//! │  └ Dispatcher        │ completion└─────────────────┘
//! └──────────┬───────────┘
//!            ▼
//!   Frontend (render / notify / toast)
//! ```
//!
//! Exactly one request is tracked at a time. Completions for anything else
//! are ignored.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Instant;
//! use loadapp::config::AppConfig;
//! use loadapp::download::{DownloadCoordinator, HttpTransferClient, Resource, Selection};
//! use loadapp::terminal::TerminalFrontend;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load()?;
//! let client = HttpTransferClient::new(config.resolved_download_dir());
//! let mut coordinator = DownloadCoordinator::new(client, TerminalFrontend::new(), &config);
//!
//! coordinator.begin_transfer(&Selection::Preset(Resource::Glide), Instant::now())?;
//! if let Some(event) = coordinator.next_completion().await {
//!     coordinator.handle_completion(event, Instant::now());
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod client;
pub mod coordinator;
pub mod correlator;
pub mod types;

// Re-export commonly used items
pub use classifier::{classify, classify_event};
pub use client::{
    completion_channel, CompletionSender, CompletionSubscription, HttpTransferClient, TransferClient,
};
pub use coordinator::{BeginOutcome, CompletionDisposition, DownloadCoordinator, Frontend};
pub use correlator::RequestCorrelator;
pub use types::{
    CompletionEvent, OutcomeStatus, RequestId, Resource, Selection, TransferOutcome, TransferRequest,
    STATUS_FAILED, STATUS_SUCCESSFUL,
};
