// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Frame derivation for the download button.
//!
//! A [`Frame`] is a pure function of the state, its label and (while loading)
//! the animation phase. Drawing the same frame twice paints the same thing.

use std::f32::consts::TAU;

use serde::Serialize;

use super::state::{ButtonState, IdleLook};

/// Width of the text-mode fill bar, in cells.
pub const BAR_WIDTH: usize = 20;

/// Everything needed to paint the button once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub state: ButtonState,
    pub label: String,
    /// Fraction of the button background that is filled, 0.0..=1.0
    pub fill_extent: f32,
    /// Animation phase while loading
    pub progress: Option<f32>,
}

impl Frame {
    /// Derive the frame. `phase` is ignored unless `state` is loading.
    pub fn new(state: ButtonState, label: impl Into<String>, phase: f32) -> Self {
        let (fill_extent, progress) = match state {
            ButtonState::Idle(IdleLook::Ready) => (0.0, None),
            ButtonState::Idle(IdleLook::Completed) => (1.0, None),
            ButtonState::Loading => {
                let phase = phase.clamp(0.0, 1.0);
                (phase, Some(phase))
            }
        };
        Self {
            state,
            label: label.into(),
            fill_extent,
            progress,
        }
    }

    /// Sweep of the progress arc in radians (`2π × phase`).
    pub fn arc_sweep(&self) -> Option<f32> {
        self.progress.map(|p| TAU * p)
    }

    /// Plain-text rendering, e.g. `[██████░░░░░░░░░░░░░░] ◔ We are loading`.
    pub fn to_line(&self) -> String {
        let filled = ((self.fill_extent * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
        let mut line = String::with_capacity(BAR_WIDTH * 3 + self.label.len() + 8);
        line.push('[');
        line.extend(std::iter::repeat('█').take(filled));
        line.extend(std::iter::repeat('░').take(BAR_WIDTH - filled));
        line.push(']');
        if let Some(sweep) = self.arc_sweep() {
            line.push(' ');
            line.push(arc_glyph(sweep));
        }
        line.push(' ');
        line.push_str(&self.label);
        line
    }
}

/// Quarter-step pie glyph for an arc sweep.
fn arc_glyph(sweep: f32) -> char {
    const GLYPHS: [char; 4] = ['○', '◔', '◑', '◕'];
    let quarter = ((sweep / TAU) * 4.0).floor() as usize;
    GLYPHS[quarter.min(GLYPHS.len() - 1)]
}

/// Where frames get painted.
pub trait RenderSurface {
    fn draw(&mut self, frame: &Frame);
}
