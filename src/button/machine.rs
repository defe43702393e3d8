// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The download button's state machine.

use std::time::Instant;

use super::animation::{AnimationSummary, AnimationTiming, LoadingAnimation};
use super::render::Frame;
use super::state::{ButtonLabels, ButtonState, IdleLook};

/// Ready/Loading/Completed button with its loading animation.
///
/// The animation schedule lives exactly as long as the loading state: it is
/// created on entering Loading and cancelled on every way out, including
/// [`LoadingButton::shutdown`] and drop.
#[derive(Debug)]
pub struct LoadingButton {
    state: ButtonState,
    labels: ButtonLabels,
    timing: AnimationTiming,
    animation: Option<LoadingAnimation>,
    last_run: Option<AnimationSummary>,
}

impl LoadingButton {
    pub fn new(labels: ButtonLabels, timing: AnimationTiming) -> Self {
        Self {
            state: ButtonState::READY,
            labels,
            timing,
            animation: None,
            last_run: None,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// The idle look currently shown, if idle.
    pub fn idle_look(&self) -> Option<IdleLook> {
        match self.state {
            ButtonState::Idle(look) => Some(look),
            ButtonState::Loading => None,
        }
    }

    /// Idle -> Loading. Returns false (and changes nothing) while busy.
    #[must_use]
    pub fn begin(&mut self, now: Instant) -> bool {
        if self.is_loading() {
            tracing::debug!("button busy, click ignored");
            return false;
        }
        tracing::debug!(from = %self.state, "button -> loading");
        self.state = ButtonState::Loading;
        self.animation = Some(LoadingAnimation::start(self.timing, now));
        true
    }

    /// Loading -> Completed. Returns false if not loading.
    pub fn complete(&mut self, now: Instant) -> bool {
        self.leave_loading(IdleLook::Completed, now)
    }

    /// Loading -> the given idle look, used when a submission fails.
    pub fn revert(&mut self, look: IdleLook, now: Instant) -> bool {
        self.leave_loading(look, now)
    }

    /// Advance the animation. `None` when not loading.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.animation.as_mut().map(|animation| animation.tick(now))
    }

    /// When the animation next wants a tick. `None` when not loading.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.animation.as_ref().map(LoadingAnimation::next_deadline)
    }

    /// Current animation phase; 0.0 whenever not loading.
    pub fn phase(&self) -> f32 {
        self.animation.as_ref().map_or(0.0, LoadingAnimation::phase)
    }

    /// Ticks recorded by the running animation.
    pub fn ticks(&self) -> u64 {
        self.animation.as_ref().map_or(0, LoadingAnimation::ticks)
    }

    /// Summary of the most recently cancelled animation.
    pub fn last_run(&self) -> Option<AnimationSummary> {
        self.last_run
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The frame for the current state and phase.
    pub fn frame(&self) -> Frame {
        Frame::new(self.state, self.labels.for_state(self.state), self.phase())
    }

    /// Cancel any running animation without changing the visible state.
    pub fn shutdown(&mut self, now: Instant) {
        if let Some(animation) = self.animation.take() {
            let summary = animation.cancel(now);
            tracing::debug!(ticks = summary.ticks, "animation cancelled on teardown");
            self.last_run = Some(summary);
        }
    }

    fn leave_loading(&mut self, look: IdleLook, now: Instant) -> bool {
        if !self.is_loading() {
            return false;
        }
        if let Some(animation) = self.animation.take() {
            let summary = animation.cancel(now);
            tracing::debug!(ticks = summary.ticks, ran_for = ?summary.ran_for, "animation cancelled");
            self.last_run = Some(summary);
        }
        self.state = ButtonState::Idle(look);
        tracing::debug!(to = %self.state, "button left loading");
        true
    }
}

impl Default for LoadingButton {
    fn default() -> Self {
        Self::new(ButtonLabels::default(), AnimationTiming::default())
    }
}

impl Drop for LoadingButton {
    fn drop(&mut self) {
        self.shutdown(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn button() -> LoadingButton {
        LoadingButton::new(
            ButtonLabels::default(),
            AnimationTiming {
                tick_interval: Duration::from_millis(10),
                cycle: Duration::from_millis(100),
            },
        )
    }

    #[test]
    fn test_full_cycle() {
        let now = Instant::now();
        let mut button = button();
        assert_eq!(button.state(), ButtonState::READY);

        assert!(button.begin(now));
        assert_eq!(button.state(), ButtonState::Loading);
        assert!(button.is_animating());

        assert!(button.complete(now + Duration::from_millis(30)));
        assert_eq!(button.state(), ButtonState::COMPLETED);
        assert!(!button.is_animating());

        // Completed behaves like ready for the next click
        assert!(button.begin(now + Duration::from_millis(40)));
        assert_eq!(button.state(), ButtonState::Loading);
    }

    #[test]
    fn test_clicks_ignored_while_loading() {
        let now = Instant::now();
        let mut button = button();
        assert!(button.begin(now));
        button.tick(now + Duration::from_millis(10));

        assert!(!button.begin(now + Duration::from_millis(15)));
        assert_eq!(button.state(), ButtonState::Loading);
        // The running animation was not restarted
        assert_eq!(button.ticks(), 1);
    }

    #[test]
    fn test_immediate_completion_records_zero_ticks() {
        let now = Instant::now();
        let mut button = button();
        assert!(button.begin(now));
        assert!(button.complete(now));

        assert!(!button.is_animating());
        assert_eq!(button.next_deadline(), None);
        assert_eq!(button.last_run().map(|r| r.ticks), Some(0));
    }

    #[test]
    fn test_phase_resets_on_leaving_loading() {
        let now = Instant::now();
        let mut button = button();
        assert!(button.begin(now));
        let phase = button.tick(now + Duration::from_millis(55)).unwrap();
        assert!(phase > 0.0);
        assert!(button.frame().progress.is_some());

        button.complete(now + Duration::from_millis(60));
        assert_eq!(button.phase(), 0.0);
        assert_eq!(button.tick(now + Duration::from_millis(70)), None);
        assert_eq!(button.frame().progress, None);
    }

    #[test]
    fn test_complete_and_revert_need_loading() {
        let now = Instant::now();
        let mut button = button();
        assert!(!button.complete(now));
        assert!(!button.revert(IdleLook::Ready, now));
        assert_eq!(button.state(), ButtonState::READY);
    }

    #[test]
    fn test_revert_restores_previous_look() {
        let now = Instant::now();
        let mut button = button();
        assert!(button.begin(now));
        button.complete(now);
        assert!(button.begin(now));
        assert!(button.revert(IdleLook::Completed, now));
        assert_eq!(button.state(), ButtonState::COMPLETED);
    }

    #[test]
    fn test_shutdown_cancels_animation() {
        let now = Instant::now();
        let mut button = button();
        assert!(button.begin(now));
        button.shutdown(now);
        assert!(!button.is_animating());
        assert_eq!(button.next_deadline(), None);
    }

    #[test]
    fn test_frame_is_stable() {
        let now = Instant::now();
        let mut button = button();
        assert!(button.begin(now));
        button.tick(now + Duration::from_millis(20));
        assert_eq!(button.frame(), button.frame());
        assert_eq!(button.frame().label, "We are loading");
    }
}
