// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Maps raw transfer metadata to an outcome.

use super::types::{CompletionEvent, OutcomeStatus, TransferOutcome, STATUS_FAILED, STATUS_SUCCESSFUL};

/// Classify a status snapshot. Never fails: unknown codes become
/// [`OutcomeStatus::Unknown`] and missing text becomes an empty string.
pub fn classify(status_code: i32, title: Option<&str>, description: Option<&str>) -> TransferOutcome {
    let status = match status_code {
        STATUS_SUCCESSFUL => OutcomeStatus::Success,
        STATUS_FAILED => OutcomeStatus::Failure,
        other => {
            tracing::debug!(status_code = other, "unrecognized transfer status");
            OutcomeStatus::Unknown
        }
    };

    TransferOutcome {
        status,
        title: title.unwrap_or_default().to_string(),
        description: description.unwrap_or_default().to_string(),
    }
}

/// Classify the metadata carried by a completion event.
pub fn classify_event(event: &CompletionEvent) -> TransferOutcome {
    classify(event.status, event.title.as_deref(), event.description.as_deref())
}
