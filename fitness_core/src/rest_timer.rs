//! Rest timer state machine.
//!
//! The timer has no internal thread. The caller delivers one `tick()` per
//! elapsed second and the timer reports what happened.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Alerting -> Idle
//!           ^  |         |
//!           +--+ re-arm  +-- dismiss (from any state) -> Idle
//! ```
//!
//! Pending work (the countdown and the alert grace window) lives inside the
//! current phase, so leaving a phase drops whatever it had scheduled.

use serde::Serialize;

/// Coarse timer state, as shown to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Alerting,
}

/// Timer phase including the work it still owes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { remaining: u32, total: u32 },
    Alerting { total: u32, grace_remaining: u32 },
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Countdown (re)started
    Armed { total_seconds: u32 },
    /// Countdown hit zero; play the completion cue
    Alert,
    /// Grace window elapsed; hide the timer
    Closed,
    /// User closed the timer early
    Dismissed,
}

/// Countdown shown between sets
#[derive(Debug, Clone)]
pub struct RestTimer {
    phase: Phase,
    grace_seconds: u32,
}

impl RestTimer {
    /// Create an idle timer whose alert phase lasts `grace_seconds` ticks
    pub fn new(grace_seconds: u32) -> Self {
        Self {
            phase: Phase::Idle,
            grace_seconds,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle,
            Phase::Running { .. } => TimerState::Running,
            Phase::Alerting { .. } => TimerState::Alerting,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn remaining_seconds(&self) -> u32 {
        match self.phase {
            Phase::Running { remaining, .. } => remaining,
            Phase::Idle | Phase::Alerting { .. } => 0,
        }
    }

    /// Duration of the current countdown, 0 when idle
    pub fn total_seconds(&self) -> u32 {
        match self.phase {
            Phase::Running { total, .. } | Phase::Alerting { total, .. } => total,
            Phase::Idle => 0,
        }
    }

    /// 0.0 .. 100.0 share of the countdown already elapsed.
    pub fn progress_percent(&self) -> f64 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Alerting { .. } => 100.0,
            Phase::Running { remaining, total } => {
                if total == 0 {
                    return 100.0;
                }
                f64::from(total - remaining) / f64::from(total) * 100.0
            }
        }
    }

    /// Remaining time as `m:ss`
    pub fn display(&self) -> String {
        let remaining = self.remaining_seconds();
        format!("{}:{:02}", remaining / 60, remaining % 60)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state(),
            is_active: self.is_active(),
            remaining_seconds: self.remaining_seconds(),
            total_seconds: self.total_seconds(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a countdown of `seconds`, replacing whatever was pending
    pub fn arm(&mut self, seconds: u32) -> TimerEvent {
        if seconds == 0 {
            tracing::debug!("Rest timer armed with zero duration, alerting immediately");
            self.phase = Phase::Alerting {
                total: 0,
                grace_remaining: self.grace_seconds,
            };
            return TimerEvent::Alert;
        }

        if let Phase::Running { remaining, .. } = self.phase {
            tracing::debug!("Rest timer restarted with {}s left on previous countdown", remaining);
        }

        self.phase = Phase::Running {
            remaining: seconds,
            total: seconds,
        };
        TimerEvent::Armed {
            total_seconds: seconds,
        }
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running { remaining, total } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    tracing::debug!("Rest timer finished ({}s)", total);
                    self.phase = Phase::Alerting {
                        total,
                        grace_remaining: self.grace_seconds,
                    };
                    Some(TimerEvent::Alert)
                } else {
                    self.phase = Phase::Running { remaining, total };
                    None
                }
            }
            Phase::Alerting {
                total,
                grace_remaining,
            } => {
                if grace_remaining <= 1 {
                    self.phase = Phase::Idle;
                    Some(TimerEvent::Closed)
                } else {
                    self.phase = Phase::Alerting {
                        total,
                        grace_remaining: grace_remaining - 1,
                    };
                    None
                }
            }
        }
    }

    /// Close the timer immediately, cancelling the countdown or grace window
    pub fn dismiss(&mut self) -> Option<TimerEvent> {
        if self.phase == Phase::Idle {
            return None;
        }
        tracing::debug!("Rest timer dismissed with {}s remaining", self.remaining_seconds());
        self.phase = Phase::Idle;
        Some(TimerEvent::Dismissed)
    }
}

/// Serializable view of the timer observables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub is_active: bool,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut RestTimer, n: u32) -> Vec<TimerEvent> {
        (0..n).filter_map(|_| timer.tick()).collect()
    }

    #[test]
    fn test_starts_idle() {
        let mut timer = RestTimer::new(3);
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(!timer.is_active());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.dismiss(), None);
    }

    #[test]
    fn test_full_cycle_with_grace_window() {
        let mut timer = RestTimer::new(3);
        assert_eq!(timer.arm(30), TimerEvent::Armed { total_seconds: 30 });
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 30);

        let events = run_ticks(&mut timer, 29);
        assert!(events.is_empty());
        assert_eq!(timer.remaining_seconds(), 1);

        assert_eq!(timer.tick(), Some(TimerEvent::Alert));
        assert_eq!(timer.state(), TimerState::Alerting);
        assert!(timer.is_active());

        assert!(run_ticks(&mut timer, 2).is_empty());
        assert_eq!(timer.state(), TimerState::Alerting);
        assert_eq!(timer.tick(), Some(TimerEvent::Closed));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_dismiss_mid_countdown_skips_alert() {
        let mut timer = RestTimer::new(3);
        timer.arm(30);
        run_ticks(&mut timer, 18);
        assert_eq!(timer.remaining_seconds(), 12);

        assert_eq!(timer.dismiss(), Some(TimerEvent::Dismissed));
        assert_eq!(timer.state(), TimerState::Idle);

        // Nothing left to fire
        assert!(run_ticks(&mut timer, 40).is_empty());
    }

    #[test]
    fn test_dismiss_during_alert_cancels_grace() {
        let mut timer = RestTimer::new(3);
        timer.arm(1);
        assert_eq!(timer.tick(), Some(TimerEvent::Alert));
        assert_eq!(timer.dismiss(), Some(TimerEvent::Dismissed));
        assert!(run_ticks(&mut timer, 5).is_empty());
    }

    #[test]
    fn test_rearm_while_running_resets() {
        let mut timer = RestTimer::new(3);
        timer.arm(30);
        run_ticks(&mut timer, 20);
        assert_eq!(timer.remaining_seconds(), 10);

        timer.arm(90);
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 90);
        assert_eq!(timer.total_seconds(), 90);

        // The old countdown would have finished by now
        assert!(run_ticks(&mut timer, 10).is_empty());
        assert_eq!(timer.remaining_seconds(), 80);
    }

    #[test]
    fn test_rearm_while_alerting_returns_to_running() {
        let mut timer = RestTimer::new(3);
        timer.arm(1);
        timer.tick();
        assert_eq!(timer.state(), TimerState::Alerting);

        timer.arm(30);
        assert_eq!(timer.state(), TimerState::Running);
        assert!(run_ticks(&mut timer, 3).is_empty());
    }

    #[test]
    fn test_zero_duration_alerts_immediately() {
        let mut timer = RestTimer::new(3);
        assert_eq!(timer.arm(0), TimerEvent::Alert);
        assert_eq!(timer.state(), TimerState::Alerting);
        assert_eq!(run_ticks(&mut timer, 3), vec![TimerEvent::Closed]);
    }

    #[test]
    fn test_zero_grace_closes_on_next_tick() {
        let mut timer = RestTimer::new(0);
        timer.arm(2);
        assert_eq!(run_ticks(&mut timer, 3), vec![TimerEvent::Alert, TimerEvent::Closed]);
    }

    #[test]
    fn test_display_and_progress() {
        let mut timer = RestTimer::new(3);
        assert_eq!(timer.progress_percent(), 0.0);

        timer.arm(90);
        assert_eq!(timer.display(), "1:30");
        run_ticks(&mut timer, 45);
        assert_eq!(timer.display(), "0:45");
        assert!((timer.progress_percent() - 50.0).abs() < f64::EPSILON);

        let snap = timer.snapshot();
        assert_eq!(snap.state, TimerState::Running);
        assert_eq!(snap.remaining_seconds, 45);
        assert_eq!(snap.total_seconds, 90);
    }
}
