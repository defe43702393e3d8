// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Button states and labels.

use serde::{Deserialize, Serialize};

/// Which idle look to show. Purely cosmetic: both accept a new download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdleLook {
    /// Nothing downloaded yet
    #[default]
    Ready,
    /// The last download just finished
    Completed,
}

/// State of the download button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonState {
    /// Accepts a click
    Idle(IdleLook),
    /// Busy; clicks are ignored and the progress animation runs
    Loading,
}

impl ButtonState {
    pub const READY: ButtonState = ButtonState::Idle(IdleLook::Ready);
    pub const COMPLETED: ButtonState = ButtonState::Idle(IdleLook::Completed);

    pub fn is_loading(&self) -> bool {
        matches!(self, ButtonState::Loading)
    }

    pub fn accepts_click(&self) -> bool {
        !self.is_loading()
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::READY
    }
}

impl std::fmt::Display for ButtonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ButtonState::Idle(IdleLook::Ready) => write!(f, "ready"),
            ButtonState::Idle(IdleLook::Completed) => write!(f, "completed"),
            ButtonState::Loading => write!(f, "loading"),
        }
    }
}

/// Label text per state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonLabels {
    #[serde(default = "default_ready_label")]
    pub ready: String,
    #[serde(default = "default_loading_label")]
    pub loading: String,
    #[serde(default = "default_completed_label")]
    pub completed: String,
}

fn default_ready_label() -> String {
    "Download".to_string()
}

fn default_loading_label() -> String {
    "We are loading".to_string()
}

fn default_completed_label() -> String {
    "Download complete".to_string()
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            ready: default_ready_label(),
            loading: default_loading_label(),
            completed: default_completed_label(),
        }
    }
}

impl ButtonLabels {
    pub fn for_state(&self, state: ButtonState) -> &str {
        match state {
            ButtonState::Idle(IdleLook::Ready) => &self.ready,
            ButtonState::Idle(IdleLook::Completed) => &self.completed,
            ButtonState::Loading => &self.loading,
        }
    }
}
