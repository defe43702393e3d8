// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tick schedule for the loading animation.
//!
//! There is no background timer. The owner asks for [`LoadingAnimation::next_deadline`],
//! sleeps until then on its own event loop and calls [`LoadingAnimation::tick`].
//! Cancelling consumes the schedule, so a cancelled animation cannot tick again.

use std::time::{Duration, Instant};

/// Tick period and sweep duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub tick_interval: Duration,
    pub cycle: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            cycle: Duration::from_millis(2000),
        }
    }
}

/// What a finished (cancelled) run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSummary {
    pub ticks: u64,
    pub ran_for: Duration,
}

/// A running schedule. Exists only while the button is loading.
#[derive(Debug)]
pub struct LoadingAnimation {
    timing: AnimationTiming,
    started: Instant,
    next_due: Instant,
    ticks: u64,
    phase: f32,
}

impl LoadingAnimation {
    pub fn start(timing: AnimationTiming, now: Instant) -> Self {
        Self {
            timing,
            started: now,
            next_due: now + timing.tick_interval,
            ticks: 0,
            phase: 0.0,
        }
    }

    /// When the next tick is due.
    pub fn next_deadline(&self) -> Instant {
        self.next_due
    }

    /// Advance to `now`. Returns the new phase.
    ///
    /// A late tick does not replay the ticks it missed; the next one is
    /// scheduled a full interval from now.
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.ticks += 1;
        self.phase = self.phase_at(now);
        self.next_due += self.timing.tick_interval;
        if self.next_due <= now {
            self.next_due = now + self.timing.tick_interval;
        }
        self.phase
    }

    /// Current phase in [0.0, 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Stop the schedule.
    pub fn cancel(self, now: Instant) -> AnimationSummary {
        AnimationSummary {
            ticks: self.ticks,
            ran_for: now.saturating_duration_since(self.started),
        }
    }

    fn phase_at(&self, now: Instant) -> f32 {
        let cycle = self.timing.cycle.as_secs_f64();
        if cycle <= 0.0 {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let phase = (elapsed / cycle).fract() as f32;
        // f64 -> f32 can round 0.99999999 up to 1.0
        if phase >= 1.0 {
            0.0
        } else {
            phase
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> AnimationTiming {
        AnimationTiming {
            tick_interval: Duration::from_millis(100),
            cycle: Duration::from_millis(1000),
        }
    }

    #[test]
    fn test_starts_at_zero() {
        let now = Instant::now();
        let animation = LoadingAnimation::start(timing(), now);
        assert_eq!(animation.phase(), 0.0);
        assert_eq!(animation.ticks(), 0);
        assert_eq!(animation.next_deadline(), now + Duration::from_millis(100));
    }

    #[test]
    fn test_phase_follows_elapsed_time() {
        let now = Instant::now();
        let mut animation = LoadingAnimation::start(timing(), now);

        let phase = animation.tick(now + Duration::from_millis(250));
        assert!((phase - 0.25).abs() < 1e-4, "phase was {}", phase);

        // Wraps around for the next sweep
        let phase = animation.tick(now + Duration::from_millis(1500));
        assert!((phase - 0.5).abs() < 1e-4, "phase was {}", phase);
        assert_eq!(animation.ticks(), 2);
    }

    #[test]
    fn test_phase_stays_below_one() {
        let now = Instant::now();
        let mut animation = LoadingAnimation::start(timing(), now);
        for ms in (0..5000).step_by(7) {
            let phase = animation.tick(now + Duration::from_millis(ms));
            assert!((0.0..1.0).contains(&phase), "phase {} at {}ms", phase, ms);
        }
    }

    #[test]
    fn test_late_tick_reschedules_from_now() {
        let now = Instant::now();
        let mut animation = LoadingAnimation::start(timing(), now);
        let late = now + Duration::from_millis(750);
        animation.tick(late);
        assert_eq!(animation.next_deadline(), late + Duration::from_millis(100));
    }

    #[test]
    fn test_on_time_ticks_keep_cadence() {
        let now = Instant::now();
        let mut animation = LoadingAnimation::start(timing(), now);
        let first = animation.next_deadline();
        animation.tick(first);
        assert_eq!(animation.next_deadline(), now + Duration::from_millis(200));
    }

    #[test]
    fn test_cancel_reports_ticks() {
        let now = Instant::now();
        let mut animation = LoadingAnimation::start(timing(), now);
        animation.tick(now + Duration::from_millis(100));
        let summary = animation.cancel(now + Duration::from_millis(150));
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.ran_for, Duration::from_millis(150));
    }
}
