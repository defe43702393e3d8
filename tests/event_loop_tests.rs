// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Completion delivery through the coordinator's subscription.

mod common;

use std::time::Instant;

use common::{RecordingClient, RecordingFrontend};
use loadapp::download::{BeginOutcome, CompletionDisposition, STATUS_SUCCESSFUL};
use loadapp::{AppConfig, ButtonState, DownloadCoordinator, RequestId, Resource, Selection, TransferClient};

type Coordinator = DownloadCoordinator<RecordingClient, RecordingFrontend>;

fn coordinator() -> Coordinator {
    DownloadCoordinator::new(RecordingClient::new(), RecordingFrontend::new(), &AppConfig::default())
}

#[tokio::test]
async fn test_completion_arrives_through_subscription() {
    let mut coordinator = coordinator();
    assert!(coordinator.is_listening());

    let begun = coordinator.begin_transfer(&Selection::Preset(Resource::LoadApp), Instant::now());
    assert_eq!(begun, Ok(BeginOutcome::Submitted(RequestId(1))));

    // A stale signal first, then the real one
    assert!(coordinator.client().complete(RequestId(40), STATUS_SUCCESSFUL, "old.zip", "Old"));
    assert!(coordinator.client().complete(RequestId(1), STATUS_SUCCESSFUL, "LoadApp", "Starter"));

    let first = coordinator.next_completion().await.expect("stale event");
    assert_eq!(
        coordinator.handle_completion(first, Instant::now()),
        CompletionDisposition::Ignored
    );
    assert_eq!(coordinator.button().state(), ButtonState::Loading);

    let second = coordinator.next_completion().await.expect("matching event");
    assert!(matches!(
        coordinator.handle_completion(second, Instant::now()),
        CompletionDisposition::Delivered(_)
    ));
    assert_eq!(coordinator.button().state(), ButtonState::COMPLETED);
    assert_eq!(coordinator.frontend().tray.posted_count(), 1);
}

#[tokio::test]
async fn test_shutdown_releases_subscription() {
    let mut coordinator = coordinator();
    coordinator
        .begin_transfer(&Selection::Preset(Resource::Glide), Instant::now())
        .unwrap();

    let (client, _frontend) = coordinator.shutdown(Instant::now());
    assert!(!client.complete(RequestId(1), STATUS_SUCCESSFUL, "a", "b"));
}

#[tokio::test]
async fn test_dropped_subscription_closes_channel() {
    let mut client = RecordingClient::new();
    {
        let _completions = client.subscribe_completion();
        assert!(client.complete(RequestId(1), STATUS_SUCCESSFUL, "a", "b"));
    }
    assert!(!client.complete(RequestId(2), STATUS_SUCCESSFUL, "a", "b"));
}

#[tokio::test]
async fn test_released_subscription_stops_delivery() {
    let mut client = RecordingClient::new();
    let mut completions = client.subscribe_completion();
    assert!(completions.is_active());

    completions.release();
    assert!(!completions.is_active());
    assert!(!client.complete(RequestId(1), STATUS_SUCCESSFUL, "a", "b"));
    assert_eq!(completions.recv().await, None);
}
