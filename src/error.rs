// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error taxonomy for loadapp.
//!
//! Nothing here is fatal to the process:
//!
//! - [`ValidationError`] - the selection could not become a request. Shown as a
//!   toast, no state change, nothing submitted.
//! - [`SubmissionError`] - the transfer engine refused the request. Shown as a
//!   toast, the button returns to its idle look.
//! - [`ConfigError`] - the config file could not be read or holds bad values.
//!
//! Stale completions and unknown status codes are not errors at all; they are
//! handled by the coordinator and the classifier respectively.

use std::path::PathBuf;
use thiserror::Error;

/// The selection could not be turned into a transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select the file to download")]
    NoSelection,

    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("Not valid URL")]
    InvalidUrl(String),
}

/// The transfer engine refused a request before dispatching it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Download rejected: {0}")]
    Rejected(String),

    #[error("Download service unavailable")]
    EngineUnavailable,
}

/// Anything `begin_transfer` can report back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeginError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Errors loading or validating [`crate::config::AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find home directory")]
    NoHome,

    #[error("Failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Shape a toast message: the headline, optionally followed by a short hint.
///
/// ```
/// use loadapp::error::format_toast;
///
/// assert_eq!(format_toast("Not valid URL", None), "Not valid URL");
/// assert_eq!(
///     format_toast("Not valid URL", Some("use http:// or https://")),
///     "Not valid URL (use http:// or https://)"
/// );
/// ```
pub fn format_toast(title: &str, hint: Option<&str>) -> String {
    match hint {
        Some(hint) if !hint.trim().is_empty() => format!("{} ({})", title, hint.trim()),
        _ => title.to_string(),
    }
}

impl BeginError {
    /// Text for the transient user message.
    pub fn toast(&self) -> String {
        match self {
            BeginError::Validation(ValidationError::InvalidUrl(_)) => {
                format_toast(&self.to_string(), Some("use http:// or https://"))
            }
            other => other.to_string(),
        }
    }
}
