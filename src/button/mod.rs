// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Download Button
//!
//! A single control with three looks:
//!
//! ```text
//!   Ready ──click──▶ Loading ──matched completion──▶ Completed
//!     ▲                 │  ▲                              │
//!     └──submit failed──┘  └────────────click─────────────┘
//! ```
//!
//! Ready and Completed are one idle state with a cosmetic tag, so the
//! transition logic exists once. While loading, a cooperative tick schedule
//! advances the animation phase; leaving Loading cancels it.

pub mod animation;
pub mod machine;
pub mod render;
pub mod state;

pub use animation::{AnimationSummary, AnimationTiming, LoadingAnimation};
pub use machine::LoadingButton;
pub use render::{Frame, RenderSurface};
pub use state::{ButtonLabels, ButtonState, IdleLook};
