//! Workout session controller.
//!
//! A `WorkoutSession` owns everything that lives for one pass through a
//! routine: the completion ledger, the abs-limit rule and the rest timer.
//! Derived values (locks, progress) are recomputed from the ledger on every
//! call.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::abs_limit::AbsLimitRule;
use crate::config::{Config, TimerConfig};
use crate::rest_timer::{RestTimer, TimerEvent, TimerSnapshot};
use crate::{
    get_default_catalog, CompletionLedger, Error, Exercise, RepTarget, Result, Routine,
    RoutineKind,
};

/// What `toggle_set` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Set went from open to done; the rest timer was armed
    Completed(TimerEvent),
    /// Set went from done to open
    Uncompleted,
    /// Exercise is locked by the abs-limit rule; nothing changed
    Locked,
}

/// Which exercises a progress figure covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressScope {
    All,
    /// Everything not marked optional
    Required,
    Exercises(Vec<String>),
}

impl ProgressScope {
    fn includes(&self, exercise: &Exercise) -> bool {
        match self {
            ProgressScope::All => true,
            ProgressScope::Required => !exercise.optional,
            ProgressScope::Exercises(names) => names.iter().any(|n| *n == exercise.name),
        }
    }
}

/// Render-ready state of one exercise card
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseStatus {
    pub name: String,
    pub set_count: usize,
    pub rep_target: RepTarget,
    pub sets: Vec<bool>,
    pub completed_sets: usize,
    pub percent: u32,
    pub abs: bool,
    pub locked: bool,
}

/// Serializable view of a whole session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub routine: RoutineKind,
    pub title: String,
    pub started_at: DateTime<Utc>,
    pub progress: u32,
    pub required_progress: u32,
    pub abs_rule: Option<String>,
    pub exercises: Vec<ExerciseStatus>,
    pub timer: TimerSnapshot,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Figures reported when a session is left
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub routine: RoutineKind,
    pub progress: u32,
    pub completed_sets: usize,
    pub total_sets: usize,
    pub elapsed: Duration,
}

pub struct WorkoutSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    routine: Routine,
    ledger: CompletionLedger,
    abs_rule: Option<AbsLimitRule>,
    timer: RestTimer,
    timer_config: TimerConfig,
}

impl WorkoutSession {
    pub fn new(routine: &Routine, config: &Config) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            routine: routine.clone(),
            ledger: CompletionLedger::new(),
            abs_rule: AbsLimitRule::from_config(routine, &config.abs_limit),
            timer: RestTimer::new(config.timer.alert_grace_seconds),
            timer_config: config.timer.clone(),
        };

        tracing::info!(
            "Started {} session {} ({} exercises, {} sets)",
            routine.kind,
            session.id,
            routine.exercises.len(),
            routine.total_sets()
        );
        session
    }

    /// Start a session on one of the built-in routines
    pub fn start(kind: RoutineKind, config: &Config) -> Result<Self> {
        let routine = get_default_catalog()
            .routine(kind)
            .ok_or_else(|| Error::UnknownRoutine(kind.to_string()))?;
        Ok(Self::new(routine, config))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    pub fn timer(&self) -> &RestTimer {
        &self.timer
    }

    pub fn abs_rule(&self) -> Option<&AbsLimitRule> {
        self.abs_rule.as_ref()
    }

    // ── Derived state ────────────────────────────────────────────────

    pub fn is_locked(&self, name: &str) -> bool {
        self.abs_rule
            .as_ref()
            .map(|rule| rule.is_locked(name, &self.routine, &self.ledger))
            .unwrap_or(false)
    }

    /// Abs membership as the lock rule sees it; catalog tags when the rule is off
    fn is_abs_member(&self, exercise: &Exercise) -> bool {
        self.abs_rule
            .as_ref()
            .map_or_else(|| exercise.is_abs(), |rule| rule.is_member(&exercise.name))
    }

    /// `round(100 * completed / total)` over the scoped exercises; 0 for an empty scope
    pub fn progress_percentage(&self, scope: &ProgressScope) -> u32 {
        let (completed, total) = self.set_totals(scope);
        if total == 0 {
            return 0;
        }
        (100.0 * completed as f64 / total as f64).round() as u32
    }

    fn set_totals(&self, scope: &ProgressScope) -> (usize, usize) {
        self.routine
            .exercises
            .iter()
            .filter(|ex| scope.includes(ex))
            .fold((0, 0), |(completed, total), ex| {
                (
                    completed + self.ledger.completed_sets(&ex.name),
                    total + ex.set_count,
                )
            })
    }

    fn status_of(&self, exercise: &Exercise) -> ExerciseStatus {
        let sets = self
            .ledger
            .entry(&exercise.name)
            .map(<[bool]>::to_vec)
            .unwrap_or_else(|| vec![false; exercise.set_count]);
        let completed_sets = sets.iter().filter(|done| **done).count();
        let percent = (100.0 * completed_sets as f64 / exercise.set_count.max(1) as f64).round();

        ExerciseStatus {
            name: exercise.name.clone(),
            set_count: exercise.set_count,
            rep_target: exercise.rep_target.clone(),
            sets,
            completed_sets,
            percent: percent as u32,
            abs: self.is_abs_member(exercise),
            locked: self.is_locked(&exercise.name),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Show one exercise card, creating its ledger entry on first render
    pub fn render_exercise(&mut self, name: &str) -> Result<ExerciseStatus> {
        let exercise = self
            .routine
            .exercise(name)
            .ok_or_else(|| Error::UnknownExercise(name.to_string()))?;
        self.ledger.ensure(exercise);
        Ok(self.status_of(exercise))
    }

    /// Render every card in routine order
    pub fn render_all(&mut self) -> Vec<ExerciseStatus> {
        for exercise in &self.routine.exercises {
            self.ledger.ensure(exercise);
        }
        self.routine
            .exercises
            .iter()
            .map(|ex| self.status_of(ex))
            .collect()
    }

    /// Flip one set; completing a set arms the short rest countdown
    pub fn toggle_set(&mut self, name: &str, set_index: usize) -> Result<ToggleOutcome> {
        let exercise = self
            .routine
            .exercise(name)
            .ok_or_else(|| Error::UnknownExercise(name.to_string()))?;

        if set_index >= exercise.set_count {
            return Err(Error::SetOutOfRange {
                exercise: name.to_string(),
                index: set_index,
                set_count: exercise.set_count,
            });
        }

        if let Some(rule) = &self.abs_rule {
            if rule.is_locked(name, &self.routine, &self.ledger) {
                tracing::debug!("Ignored toggle on locked exercise '{}'", name);
                return Ok(ToggleOutcome::Locked);
            }
        }

        let done = self.ledger.toggle(exercise, set_index);
        tracing::debug!("Toggled '{}' set {} -> {}", name, set_index + 1, done);

        if done {
            let event = self.timer.arm(self.timer_config.set_rest_seconds);
            Ok(ToggleOutcome::Completed(event))
        } else {
            Ok(ToggleOutcome::Uncompleted)
        }
    }

    /// Explicit "rest" action: arm the long countdown
    pub fn start_rest(&mut self) -> TimerEvent {
        tracing::debug!("Long rest requested");
        self.timer.arm(self.timer_config.long_rest_seconds)
    }

    pub fn dismiss_timer(&mut self) -> Option<TimerEvent> {
        self.timer.dismiss()
    }

    /// Deliver one elapsed second to the rest timer
    pub fn tick(&mut self) -> Option<TimerEvent> {
        self.timer.tick()
    }

    /// Clear every set of every exercise; the timer is left alone
    pub fn reset_all(&mut self) {
        self.ledger.reset(&self.routine.exercises);
        tracing::info!("Reset all sets for session {}", self.id);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            routine: self.routine.kind,
            title: self.routine.title.clone(),
            started_at: self.started_at,
            progress: self.progress_percentage(&ProgressScope::All),
            required_progress: self.progress_percentage(&ProgressScope::Required),
            abs_rule: self.abs_rule.as_ref().map(AbsLimitRule::describe),
            exercises: self
                .routine
                .exercises
                .iter()
                .map(|ex| self.status_of(ex))
                .collect(),
            timer: self.timer.snapshot(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let (completed_sets, total_sets) = self.set_totals(&ProgressScope::All);
        SessionSummary {
            routine: self.routine.kind,
            progress: self.progress_percentage(&ProgressScope::All),
            completed_sets,
            total_sets,
            elapsed: Utc::now() - self.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest_timer::TimerState;

    fn lower() -> WorkoutSession {
        WorkoutSession::start(RoutineKind::Lower, &Config::default()).unwrap()
    }

    fn complete_exercise(session: &mut WorkoutSession, name: &str) {
        let set_count = session.routine().exercise(name).unwrap().set_count;
        for set in 0..set_count {
            if !session.ledger().is_set_complete(name, set) {
                session.toggle_set(name, set).unwrap();
            }
        }
    }

    #[test]
    fn test_squats_scenario() {
        crate::logging::init_test();
        let mut session = lower();

        let outcome = session.toggle_set("Squats", 0).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Completed(TimerEvent::Armed { total_seconds: 30 })
        );
        assert_eq!(session.ledger().entry("Squats").unwrap(), &[true, false, false]);
        assert_eq!(session.timer().state(), TimerState::Running);
        assert_eq!(session.timer().remaining_seconds(), 30);

        session.dismiss_timer();
        let outcome = session.toggle_set("Squats", 0).unwrap();
        assert_eq!(outcome, ToggleOutcome::Uncompleted);
        assert_eq!(session.ledger().entry("Squats").unwrap(), &[false, false, false]);
        assert!(!session.timer().is_active());
    }

    #[test]
    fn test_uncompleting_never_rearms() {
        let mut session = lower();
        session.toggle_set("RDL", 1).unwrap();
        for _ in 0..10 {
            session.tick();
        }
        assert_eq!(session.timer().remaining_seconds(), 20);

        session.toggle_set("RDL", 1).unwrap();
        // Countdown keeps going untouched
        assert_eq!(session.timer().remaining_seconds(), 20);
    }

    #[test]
    fn test_completing_while_running_restarts_countdown() {
        let mut session = lower();
        session.start_rest();
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.timer().remaining_seconds(), 85);

        session.toggle_set("Squats", 0).unwrap();
        assert_eq!(session.timer().remaining_seconds(), 30);
        assert_eq!(session.timer().total_seconds(), 30);
    }

    #[test]
    fn test_start_rest_uses_long_duration() {
        let mut session = lower();
        assert_eq!(session.start_rest(), TimerEvent::Armed { total_seconds: 90 });
        assert_eq!(session.timer().display(), "1:30");
    }

    #[test]
    fn test_invalid_toggles_are_errors() {
        let mut session = lower();
        assert!(matches!(
            session.toggle_set("Bench Press", 0),
            Err(Error::UnknownExercise(_))
        ));
        match session.toggle_set("Leg Extensions DB", 2) {
            Err(Error::SetOutOfRange { index, set_count, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(set_count, 2);
            }
            other => panic!("Expected SetOutOfRange, got {:?}", other),
        }
        assert!(session.ledger().is_empty());
        assert!(!session.timer().is_active());
    }

    #[test]
    fn test_progress_bounds() {
        let mut session = WorkoutSession::start(RoutineKind::Upper, &Config::default()).unwrap();
        assert_eq!(session.progress_percentage(&ProgressScope::All), 0);

        session.render_all();
        assert_eq!(session.progress_percentage(&ProgressScope::All), 0);

        let names: Vec<String> = session
            .routine()
            .exercises
            .iter()
            .map(|e| e.name.clone())
            .collect();
        for name in &names {
            complete_exercise(&mut session, name);
        }
        assert_eq!(session.progress_percentage(&ProgressScope::All), 100);
    }

    #[test]
    fn test_progress_rounds_and_scopes() {
        let mut session = WorkoutSession::start(RoutineKind::Upper, &Config::default()).unwrap();
        session.toggle_set("Shoulder Press", 0).unwrap();

        // 1 of 30 sets
        assert_eq!(session.progress_percentage(&ProgressScope::All), 3);

        let scope = ProgressScope::Exercises(vec!["Shoulder Press".into()]);
        assert_eq!(session.progress_percentage(&scope), 33);

        let empty = ProgressScope::Exercises(vec![]);
        assert_eq!(session.progress_percentage(&empty), 0);
    }

    #[test]
    fn test_required_scope_skips_optional() {
        let mut routine = get_default_catalog()
            .routine(RoutineKind::Upper)
            .unwrap()
            .clone();
        routine.exercises.truncate(2);
        routine.exercises[1].optional = true;

        let mut session = WorkoutSession::new(&routine, &Config::default());
        complete_exercise(&mut session, "Shoulder Press");

        assert_eq!(session.progress_percentage(&ProgressScope::Required), 100);
        assert_eq!(session.progress_percentage(&ProgressScope::All), 50);
    }

    #[test]
    fn test_abs_lock_blocks_fourth_exercise() {
        let mut session = lower();
        for name in ["Dumbbell Crunch", "Dumbbell Leg Raises", "Russian Twists"] {
            complete_exercise(&mut session, name);
        }
        session.dismiss_timer();

        assert!(session.is_locked("Cable Crunches with Dumbbell"));
        assert_eq!(
            session.toggle_set("Cable Crunches with Dumbbell", 0).unwrap(),
            ToggleOutcome::Locked
        );
        assert!(!session.ledger().is_set_complete("Cable Crunches with Dumbbell", 0));
        assert!(!session.timer().is_active());

        // A completed abs exercise can still be unchecked, which lifts the lock
        assert!(!session.is_locked("Russian Twists"));
        session.toggle_set("Russian Twists", 2).unwrap();
        assert!(!session.is_locked("Cable Crunches with Dumbbell"));
        assert!(matches!(
            session.toggle_set("Cable Crunches with Dumbbell", 0).unwrap(),
            ToggleOutcome::Completed(_)
        ));
    }

    #[test]
    fn test_abs_rule_can_be_disabled() {
        let mut config = Config::default();
        config.abs_limit.enabled = false;
        let mut session = WorkoutSession::start(RoutineKind::Lower, &config).unwrap();

        for name in ["Dumbbell Crunch", "Dumbbell Leg Raises", "Russian Twists"] {
            complete_exercise(&mut session, name);
        }
        assert!(session.abs_rule().is_none());
        assert!(!session.is_locked("Cable Crunches with Dumbbell"));
    }

    #[test]
    fn test_render_creates_entries_lazily() {
        let mut session = lower();
        assert!(session.ledger().entry("Calf Raise").is_none());

        let status = session.render_exercise("Calf Raise").unwrap();
        assert_eq!(status.sets, vec![false, false, false]);
        assert_eq!(status.completed_sets, 0);
        assert_eq!(session.ledger().len(), 1);

        let all = session.render_all();
        assert_eq!(all.len(), 10);
        assert_eq!(session.ledger().len(), 10);
    }

    #[test]
    fn test_exercise_status_reports_lock_and_percent() {
        let mut session = lower();
        session.toggle_set("Leg Extensions DB", 0).unwrap();
        let status = session.render_exercise("Leg Extensions DB").unwrap();
        assert_eq!(status.percent, 50);
        assert!(!status.abs);

        for name in ["Dumbbell Crunch", "Dumbbell Leg Raises", "Russian Twists"] {
            complete_exercise(&mut session, name);
        }
        let locked = session.render_exercise("Cable Crunches with Dumbbell").unwrap();
        assert!(locked.abs);
        assert!(locked.locked);
    }

    #[test]
    fn test_configured_members_drive_abs_flag() {
        let mut config = Config::default();
        config.abs_limit.cap = 1;
        config.abs_limit.members = vec!["Squats".into(), "RDL".into()];
        let mut session = WorkoutSession::start(RoutineKind::Lower, &config).unwrap();

        complete_exercise(&mut session, "Squats");
        let rdl = session.render_exercise("RDL").unwrap();
        assert!(rdl.abs);
        assert!(rdl.locked);

        let crunch = session.render_exercise("Dumbbell Crunch").unwrap();
        assert!(!crunch.abs);
        assert!(!crunch.locked);
    }

    #[test]
    fn test_reset_all_keeps_timer() {
        let mut session = lower();
        session.toggle_set("Squats", 0).unwrap();
        session.toggle_set("RDL", 2).unwrap();

        session.reset_all();
        assert_eq!(session.progress_percentage(&ProgressScope::All), 0);
        assert_eq!(session.ledger().entry("Squats").unwrap(), &[false, false, false]);
        assert!(session.timer().is_active());
    }

    #[test]
    fn test_snapshot_json() {
        let mut session = lower();
        session.toggle_set("Squats", 0).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.routine, RoutineKind::Lower);
        assert_eq!(snapshot.exercises.len(), 10);
        assert_eq!(
            snapshot.abs_rule.as_deref(),
            Some("Choose 3 from 4 abs exercises")
        );

        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["routine"], "lower");
        assert_eq!(value["timer"]["state"], "running");
        assert_eq!(value["exercises"][0]["sets"][0], true);
    }

    #[test]
    fn test_summary_counts_sets() {
        let mut session = lower();
        session.toggle_set("Squats", 0).unwrap();
        session.toggle_set("Squats", 1).unwrap();

        let summary = session.summary();
        assert_eq!(summary.completed_sets, 2);
        assert_eq!(summary.total_sets, 29);
        assert_eq!(summary.progress, 7);
    }
}
