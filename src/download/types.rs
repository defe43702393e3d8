// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Download types shared by the correlator, classifier and coordinator.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationError;

/// Platform status code for a transfer that finished successfully.
pub const STATUS_SUCCESSFUL: i32 = 8;

/// Platform status code for a transfer that failed for good.
pub const STATUS_FAILED: i32 = 16;

/// Opaque token handed back by the transfer engine for each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What gets handed to the transfer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Display title (also used as the notification title)
    pub title: String,
    /// Human-readable description
    pub description: String,
    /// Where to fetch the bytes from
    pub source_url: String,
}

impl TransferRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            source_url: source_url.into(),
        }
    }
}

/// Raw completion signal raised by the transfer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub id: RequestId,
    pub status: i32,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Normalized result of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Success,
    Failure,
    Unknown,
}

impl OutcomeStatus {
    /// Short label shown in notifications and the details view.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "Success",
            OutcomeStatus::Failure => "Fail",
            OutcomeStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified outcome of one completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub status: OutcomeStatus,
    pub title: String,
    pub description: String,
}

/// The fixed set of predefined downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Glide,
    LoadApp,
    Retrofit,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Glide, Resource::LoadApp, Resource::Retrofit];

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Glide => "Glide",
            Resource::LoadApp => "LoadApp",
            Resource::Retrofit => "Retrofit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Resource::Glide => "Glide - Image Loading Library by BumpTech",
            Resource::LoadApp => "LoadApp - Current repository by Udacity",
            Resource::Retrofit => "Retrofit - Type-safe HTTP client for Android and Java by Square, Inc",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Resource::Glide => "https://github.com/bumptech/glide/archive/master.zip",
            Resource::LoadApp => {
                "https://github.com/udacity/nd940-c3-advanced-android-programming-project-starter/archive/master.zip"
            }
            Resource::Retrofit => "https://github.com/square/retrofit/archive/master.zip",
        }
    }

    pub fn request(&self) -> TransferRequest {
        TransferRequest::new(self.title(), self.description(), self.url())
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// What the user picked before pressing the button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Preset(Resource),
    Custom(String),
}

impl Selection {
    /// Turn the selection into a request, or say why it can't be one.
    pub fn to_request(&self) -> Result<TransferRequest, ValidationError> {
        match self {
            Selection::None => Err(ValidationError::NoSelection),
            Selection::Preset(resource) => Ok(resource.request()),
            Selection::Custom(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Err(ValidationError::EmptyUrl);
                }
                if !is_valid_url(raw) {
                    return Err(ValidationError::InvalidUrl(raw.to_string()));
                }
                Ok(TransferRequest::new("Custom", "Your custom URL", raw))
            }
        }
    }
}

/// Well-formed http(s) URL with a host.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
