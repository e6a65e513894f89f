//! Screen navigation: routine selection and the active workout.
//!
//! Picking a routine creates a fresh `WorkoutSession`; going back to the
//! selection screen drops it. Nothing survives a round trip.

use crate::session::{SessionSummary, WorkoutSession};
use crate::{Catalog, Config, Error, Result, RoutineKind};

pub enum Screen {
    Selection,
    Workout(Box<WorkoutSession>),
}

pub struct Navigator<'c> {
    catalog: &'c Catalog,
    config: Config,
    screen: Screen,
}

impl<'c> Navigator<'c> {
    pub fn new(catalog: &'c Catalog, config: Config) -> Self {
        Self {
            catalog,
            config,
            screen: Screen::Selection,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Start a workout, replacing any session already in progress
    pub fn select(&mut self, kind: RoutineKind) -> Result<&mut WorkoutSession> {
        let catalog = self.catalog;
        let routine = catalog
            .routine(kind)
            .ok_or_else(|| Error::UnknownRoutine(kind.to_string()))?;

        if let Screen::Workout(previous) = &self.screen {
            tracing::info!("Discarding session {} for new selection", previous.id());
        }

        self.screen = Screen::Workout(Box::new(WorkoutSession::new(routine, &self.config)));
        self.session_mut()
    }

    /// Return to routine selection, discarding the session
    pub fn back(&mut self) -> Option<SessionSummary> {
        match std::mem::replace(&mut self.screen, Screen::Selection) {
            Screen::Workout(session) => {
                let summary = session.summary();
                tracing::info!(
                    "Left session {} at {}% ({}/{} sets)",
                    session.id(),
                    summary.progress,
                    summary.completed_sets,
                    summary.total_sets
                );
                Some(summary)
            }
            Screen::Selection => None,
        }
    }

    pub fn session(&self) -> Option<&WorkoutSession> {
        match &self.screen {
            Screen::Workout(session) => Some(&**session),
            Screen::Selection => None,
        }
    }

    pub fn session_mut(&mut self) -> Result<&mut WorkoutSession> {
        match &mut self.screen {
            Screen::Workout(session) => Ok(&mut **session),
            Screen::Selection => Err(Error::NoActiveSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;

    #[test]
    fn test_starts_on_selection() {
        let catalog = build_default_catalog();
        let mut nav = Navigator::new(&catalog, Config::default());
        assert!(matches!(nav.screen(), Screen::Selection));
        assert!(nav.session().is_none());
        assert!(matches!(nav.session_mut(), Err(Error::NoActiveSession)));
        assert!(nav.back().is_none());
    }

    #[test]
    fn test_back_discards_session_state() {
        let catalog = build_default_catalog();
        let mut nav = Navigator::new(&catalog, Config::default());

        let session = nav.select(RoutineKind::Upper).unwrap();
        session.toggle_set("Hammer Curls", 0).unwrap();
        let first_id = session.id();

        let summary = nav.back().unwrap();
        assert_eq!(summary.routine, RoutineKind::Upper);
        assert_eq!(summary.completed_sets, 1);
        assert!(nav.session().is_none());

        let session = nav.select(RoutineKind::Upper).unwrap();
        assert_ne!(session.id(), first_id);
        assert!(session.ledger().is_empty());
        assert!(!session.timer().is_active());
    }

    #[test]
    fn test_reselect_replaces_session() {
        let catalog = build_default_catalog();
        let mut nav = Navigator::new(&catalog, Config::default());

        nav.select(RoutineKind::Upper).unwrap();
        let session = nav.select(RoutineKind::Lower).unwrap();
        assert_eq!(session.routine().kind, RoutineKind::Lower);
    }

    #[test]
    fn test_missing_routine_is_an_error() {
        let mut catalog = build_default_catalog();
        catalog.routines.retain(|r| r.kind == RoutineKind::Upper);
        let mut nav = Navigator::new(&catalog, Config::default());

        assert!(matches!(
            nav.select(RoutineKind::Lower),
            Err(Error::UnknownRoutine(_))
        ));
    }
}
