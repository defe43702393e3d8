// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Request correlation.
//!
//! Tracks the single outstanding request and decides whether a completion
//! signal belongs to it. A new submission overwrites the tracked id, so the
//! completion of a superseded request no longer matches.

use super::client::TransferClient;
use super::types::{RequestId, TransferRequest};
use crate::error::SubmissionError;

#[derive(Debug, Default)]
pub struct RequestCorrelator {
    current: Option<RequestId>,
}

impl RequestCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit through `client` and track the returned id.
    ///
    /// The id is stored before this returns, so a completion handled on the
    /// next turn of the event loop always sees it. On error nothing is stored
    /// and any previously tracked id is left alone.
    pub fn submit<C: TransferClient + ?Sized>(
        &mut self,
        client: &mut C,
        request: &TransferRequest,
    ) -> Result<RequestId, SubmissionError> {
        let id = client.submit(request)?;
        if let Some(previous) = self.current.replace(id) {
            tracing::debug!(%previous, current = %id, "superseding tracked request");
        }
        Ok(id)
    }

    /// True iff `id` is the tracked request.
    pub fn matches(&self, id: RequestId) -> bool {
        self.current == Some(id)
    }

    /// Stop tracking, returning what was tracked.
    pub fn clear(&mut self) -> Option<RequestId> {
        self.current.take()
    }

    pub fn current(&self) -> Option<RequestId> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::client::CompletionSubscription;

    /// Hands out ids from a script; `None` means reject.
    struct ScriptedClient {
        ids: Vec<Option<u64>>,
        calls: usize,
    }

    impl TransferClient for ScriptedClient {
        fn submit(&mut self, _request: &TransferRequest) -> Result<RequestId, SubmissionError> {
            let next = self.ids[self.calls];
            self.calls += 1;
            next.map(RequestId)
                .ok_or_else(|| SubmissionError::Rejected("scripted".into()))
        }

        fn subscribe_completion(&mut self) -> CompletionSubscription {
            CompletionSubscription::detached()
        }
    }

    fn request() -> TransferRequest {
        TransferRequest::new("glide.zip", "Glide", "https://example.com/glide.zip")
    }

    #[test]
    fn test_matches_only_tracked_id() {
        let mut client = ScriptedClient { ids: vec![Some(7)], calls: 0 };
        let mut correlator = RequestCorrelator::new();

        let id = correlator.submit(&mut client, &request()).unwrap();
        assert_eq!(id, RequestId(7));
        assert!(correlator.matches(RequestId(7)));
        assert!(!correlator.matches(RequestId(3)));
    }

    #[test]
    fn test_second_submission_supersedes_first() {
        let mut client = ScriptedClient { ids: vec![Some(1), Some(2)], calls: 0 };
        let mut correlator = RequestCorrelator::new();

        correlator.submit(&mut client, &request()).unwrap();
        correlator.submit(&mut client, &request()).unwrap();

        assert!(!correlator.matches(RequestId(1)));
        assert!(correlator.matches(RequestId(2)));
    }

    #[test]
    fn test_failed_submission_stores_nothing() {
        let mut client = ScriptedClient { ids: vec![None], calls: 0 };
        let mut correlator = RequestCorrelator::new();

        assert!(correlator.submit(&mut client, &request()).is_err());
        assert_eq!(correlator.current(), None);
    }

    #[test]
    fn test_clear_stops_matching() {
        let mut client = ScriptedClient { ids: vec![Some(4)], calls: 0 };
        let mut correlator = RequestCorrelator::new();
        correlator.submit(&mut client, &request()).unwrap();

        assert_eq!(correlator.clear(), Some(RequestId(4)));
        assert!(!correlator.matches(RequestId(4)));
    }
}
