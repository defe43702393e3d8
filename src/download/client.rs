// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Transfer engine boundary.
//!
//! [`TransferClient`] is what the coordinator talks to: `submit` hands back an
//! id right away and the result arrives later as a [`CompletionEvent`] on the
//! channel behind a [`CompletionSubscription`]. [`HttpTransferClient`] is the
//! reqwest-backed engine used by the CLI.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use url::Url;

use super::types::{CompletionEvent, RequestId, TransferRequest, STATUS_FAILED, STATUS_SUCCESSFUL};
use crate::error::SubmissionError;

/// An engine that accepts transfer requests and reports their completion.
pub trait TransferClient {
    /// Queue a request. Must not block; the result is reported later.
    fn submit(&mut self, request: &TransferRequest) -> Result<RequestId, SubmissionError>;

    /// Open the completion channel. Dropping the subscription releases it.
    fn subscribe_completion(&mut self) -> CompletionSubscription;
}

/// Sending half of the completion channel, held by the engine.
#[derive(Debug, Clone)]
pub struct CompletionSender {
    tx: mpsc::UnboundedSender<CompletionEvent>,
}

impl CompletionSender {
    /// Deliver an event. Returns false if nobody is listening any more.
    pub fn emit(&self, event: CompletionEvent) -> bool {
        let id = event.id;
        match self.tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(%id, "completion dropped, listener released");
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Scoped listener for completion events.
///
/// Acquired once per engine lifetime; the channel is closed when this is
/// dropped, on every exit path.
#[derive(Debug)]
pub struct CompletionSubscription {
    rx: Option<mpsc::UnboundedReceiver<CompletionEvent>>,
}

impl CompletionSubscription {
    /// A subscription that never yields anything.
    pub fn detached() -> Self {
        Self { rx: None }
    }

    /// Wait for the next completion. `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<CompletionEvent> {
        match self.rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Non-blocking poll, for callers driving their own loop.
    pub fn try_recv(&mut self) -> Option<CompletionEvent> {
        self.rx.as_mut().and_then(|rx| rx.try_recv().ok())
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }

    /// Release the listener now instead of at drop.
    pub fn release(&mut self) {
        if let Some(mut rx) = self.rx.take() {
            rx.close();
            tracing::debug!("completion listener released");
        }
    }
}

impl Drop for CompletionSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Create a linked sender/subscription pair.
pub fn completion_channel() -> (CompletionSender, CompletionSubscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CompletionSender { tx }, CompletionSubscription { rx: Some(rx) })
}

/// Transfer engine that streams HTTP(S) downloads into a directory.
///
/// Needs to be used from inside a tokio runtime; each submission spawns one
/// task on the current runtime.
pub struct HttpTransferClient {
    http: reqwest::Client,
    download_dir: PathBuf,
    next_id: u64,
    sender: Option<CompletionSender>,
}

impl HttpTransferClient {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            download_dir: download_dir.into(),
            next_id: 0,
            sender: None,
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    fn destination(&self, url: &Url, id: RequestId) -> PathBuf {
        let name = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or("download");
        self.download_dir.join(format!("{}-{}", id.0, name))
    }
}

impl TransferClient for HttpTransferClient {
    fn submit(&mut self, request: &TransferRequest) -> Result<RequestId, SubmissionError> {
        let sender = match &self.sender {
            Some(sender) if !sender.is_closed() => sender.clone(),
            _ => return Err(SubmissionError::EngineUnavailable),
        };

        let url = Url::parse(&request.source_url)
            .map_err(|e| SubmissionError::Rejected(format!("{}: {}", request.source_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SubmissionError::Rejected(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| SubmissionError::EngineUnavailable)?;

        self.next_id += 1;
        let id = RequestId(self.next_id);
        let dest = self.destination(&url, id);
        let http = self.http.clone();
        let title = request.title.clone();
        let description = request.description.clone();

        tracing::info!(%id, url = %url, dest = %dest.display(), "transfer submitted");

        runtime.spawn(async move {
            // Dropped without `keep` on failure and when the runtime is torn
            // down mid-transfer
            let partial = PartialFile::new(dest);
            let status = match fetch(&http, url, partial.path()).await {
                Ok(bytes) => {
                    tracing::info!(%id, bytes, "transfer finished");
                    partial.keep();
                    STATUS_SUCCESSFUL
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "transfer failed");
                    drop(partial);
                    STATUS_FAILED
                }
            };
            sender.emit(CompletionEvent {
                id,
                status,
                title: Some(title),
                description: Some(description),
            });
        });

        Ok(id)
    }

    fn subscribe_completion(&mut self) -> CompletionSubscription {
        let (sender, subscription) = completion_channel();
        if self.sender.replace(sender).is_some() {
            tracing::debug!("replacing previous completion listener");
        }
        subscription
    }
}

/// Destination file that is deleted on drop unless [`PartialFile::keep`] is
/// called.
struct PartialFile {
    path: PathBuf,
    keep: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed partial download"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "could not remove partial download"),
        }
    }
}

async fn fetch(http: &reqwest::Client, url: Url, dest: &Path) -> anyhow::Result<u64> {
    let response = http.get(url).send().await?.error_for_status()?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(dest).await?;

    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}
