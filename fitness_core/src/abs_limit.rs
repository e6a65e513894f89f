//! Abs-limit rule: cap how many abs exercises a session may complete.
//!
//! Once `cap` abs exercises are fully complete, every other abs exercise is
//! locked. Exercises that are already fully complete stay unlocked so they
//! can still be unchecked. The rule holds no state of its own; every query
//! reads the live ledger.

use crate::config::AbsLimitConfig;
use crate::{CompletionLedger, Routine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsLimitRule {
    cap: usize,
    members: Vec<String>,
}

impl AbsLimitRule {
    pub fn new(cap: usize, members: Vec<String>) -> Self {
        Self { cap, members }
    }

    /// Build the rule for `routine`, or `None` when disabled
    ///
    /// Membership comes from the config when it lists names, otherwise from
    /// the routine's abs tags.
    pub fn from_config(routine: &Routine, config: &AbsLimitConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        let members = if config.members.is_empty() {
            routine.abs_members()
        } else {
            config.members.clone()
        };

        if members.is_empty() {
            return None;
        }

        Some(Self::new(config.cap, members))
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Abs members whose every declared set is done
    pub fn completed_members<'a>(
        &'a self,
        routine: &Routine,
        ledger: &CompletionLedger,
    ) -> Vec<&'a str> {
        self.members
            .iter()
            .filter(|name| {
                routine
                    .exercise(name)
                    .map(|ex| ledger.is_fully_complete(ex))
                    .unwrap_or(false)
            })
            .map(String::as_str)
            .collect()
    }

    pub fn is_locked(&self, name: &str, routine: &Routine, ledger: &CompletionLedger) -> bool {
        if !self.is_member(name) {
            return false;
        }

        let completed = self.completed_members(routine, ledger);
        completed.len() >= self.cap && !completed.iter().any(|done| *done == name)
    }

    /// Banner shown on locked exercises, e.g. "Choose 3 from 4 abs exercises"
    pub fn describe(&self) -> String {
        format!(
            "Choose {} from {} abs exercises",
            self.cap,
            self.members.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Exercise, ExerciseGroup, RepTarget, RoutineKind};

    fn core_routine() -> Routine {
        let abs = |name: &str| {
            Exercise::new(name, 2, RepTarget::Count(10)).with_group(ExerciseGroup::Abs)
        };
        Routine {
            kind: RoutineKind::Lower,
            title: "Core".into(),
            focus: "Abs".into(),
            exercises: vec![
                Exercise::new("Squats", 2, RepTarget::Count(10)),
                abs("Crunch"),
                abs("Leg Raise"),
                abs("Twist"),
                abs("Plank"),
            ],
            warm_up: vec![],
            tutorial_url: None,
        }
    }

    fn complete(ledger: &mut CompletionLedger, routine: &Routine, name: &str) {
        let ex = routine.exercise(name).unwrap();
        for set in 0..ex.set_count {
            if !ledger.is_set_complete(name, set) {
                ledger.toggle(ex, set);
            }
        }
    }

    fn rule(routine: &Routine) -> AbsLimitRule {
        AbsLimitRule::from_config(routine, &AbsLimitConfig::default()).unwrap()
    }

    #[test]
    fn test_members_from_tags() {
        let routine = core_routine();
        let rule = rule(&routine);
        assert_eq!(rule.cap(), 3);
        assert_eq!(rule.members().len(), 4);
        assert!(!rule.is_member("Squats"));
        assert_eq!(rule.describe(), "Choose 3 from 4 abs exercises");
    }

    #[test]
    fn test_fourth_locks_after_three_complete() {
        let routine = core_routine();
        let rule = rule(&routine);
        let mut ledger = CompletionLedger::new();

        complete(&mut ledger, &routine, "Crunch");
        complete(&mut ledger, &routine, "Leg Raise");
        assert!(!rule.is_locked("Plank", &routine, &ledger));

        complete(&mut ledger, &routine, "Twist");
        assert!(rule.is_locked("Plank", &routine, &ledger));

        // Completed members stay unlocked
        assert!(!rule.is_locked("Crunch", &routine, &ledger));
        assert!(!rule.is_locked("Twist", &routine, &ledger));
        // Non-members are never locked
        assert!(!rule.is_locked("Squats", &routine, &ledger));
    }

    #[test]
    fn test_partial_progress_does_not_count() {
        let routine = core_routine();
        let rule = rule(&routine);
        let mut ledger = CompletionLedger::new();

        complete(&mut ledger, &routine, "Crunch");
        complete(&mut ledger, &routine, "Leg Raise");
        ledger.toggle(routine.exercise("Twist").unwrap(), 0);

        assert_eq!(rule.completed_members(&routine, &ledger).len(), 2);
        assert!(!rule.is_locked("Plank", &routine, &ledger));
    }

    #[test]
    fn test_unlocks_when_a_member_drops_below_full() {
        let routine = core_routine();
        let rule = rule(&routine);
        let mut ledger = CompletionLedger::new();

        for name in ["Crunch", "Leg Raise", "Twist"] {
            complete(&mut ledger, &routine, name);
        }
        assert!(rule.is_locked("Plank", &routine, &ledger));

        ledger.toggle(routine.exercise("Twist").unwrap(), 1);
        assert!(!rule.is_locked("Plank", &routine, &ledger));
    }

    #[test]
    fn test_disabled_or_untagged_yields_no_rule() {
        let routine = core_routine();
        let disabled = AbsLimitConfig {
            enabled: false,
            ..AbsLimitConfig::default()
        };
        assert!(AbsLimitRule::from_config(&routine, &disabled).is_none());

        let mut untagged = core_routine();
        for ex in &mut untagged.exercises {
            ex.group = None;
        }
        assert!(AbsLimitRule::from_config(&untagged, &AbsLimitConfig::default()).is_none());
    }

    #[test]
    fn test_configured_members_override_tags() {
        let routine = core_routine();
        let config = AbsLimitConfig {
            enabled: true,
            cap: 1,
            members: vec!["Crunch".into(), "Squats".into()],
        };
        let rule = AbsLimitRule::from_config(&routine, &config).unwrap();
        let mut ledger = CompletionLedger::new();

        complete(&mut ledger, &routine, "Crunch");
        assert!(rule.is_locked("Squats", &routine, &ledger));
        assert!(!rule.is_locked("Twist", &routine, &ledger));
    }
}
