//! Default catalog of workout routines.
//!
//! This module provides the built-in upper and lower body routines.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all sessions
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> Catalog {
    Catalog {
        routines: vec![upper_body(), lower_body()],
    }
}

fn reps(n: u32) -> RepTarget {
    RepTarget::Count(n)
}

fn range(s: &str) -> RepTarget {
    RepTarget::Text(s.into())
}

fn drill(name: &str, instruction: &str) -> WarmUpDrill {
    WarmUpDrill {
        name: name.into(),
        instruction: instruction.into(),
    }
}

fn upper_body() -> Routine {
    let exercises = [
        "Shoulder Press",
        "Arnold Press/Lateral Raise",
        "Overhead Triceps Extension",
        "Skull Crusher",
        "Alternating Bicep Curl",
        "Hammer Curls",
        "Dumbbell Bent Over Row",
        "Reverse Fly",
        "Forearm Twist",
        "Dumbbell Shrug",
    ]
    .into_iter()
    .map(|name| Exercise::new(name, 3, reps(12)))
    .collect();

    Routine {
        kind: RoutineKind::Upper,
        title: "Upper Body Routine".into(),
        focus: "Shoulders, Biceps & Triceps".into(),
        exercises,
        warm_up: Vec::new(),
        tutorial_url: None,
    }
}

fn lower_body() -> Routine {
    let exercises = vec![
        // Main compounds
        Exercise::new("Squats", 3, range("8-12")),
        Exercise::new("RDL", 3, range("8-12")),
        // Glutes
        Exercise::new("Glute Bridges", 3, range("12-15")),
        Exercise::new("Leg Extensions DB", 2, range("12-15")),
        Exercise::new("Side Leg Raise", 3, range("15-20")),
        Exercise::new("Calf Raise", 3, range("12-15")),
        // Core finisher: pick 3 of 4
        Exercise::new("Dumbbell Crunch", 3, range("10-12")).with_group(ExerciseGroup::Abs),
        Exercise::new("Dumbbell Leg Raises", 3, range("12-15")).with_group(ExerciseGroup::Abs),
        Exercise::new("Russian Twists", 3, range("20 (10 each side)"))
            .with_group(ExerciseGroup::Abs),
        Exercise::new("Cable Crunches with Dumbbell", 3, range("12-15"))
            .with_group(ExerciseGroup::Abs),
    ];

    let warm_up = vec![
        WarmUpSection {
            title: "Dynamic Stretching".into(),
            drills: vec![
                drill("Leg Swings", "10 reps each leg, forward and backward."),
                drill("Hip Circles", "10 reps clockwise and counterclockwise."),
                drill("Walking Lunges", "10 lunges per leg."),
            ],
        },
        WarmUpSection {
            title: "Activation Exercises".into(),
            drills: vec![
                drill("Bodyweight Squats", "2 sets of 12 reps."),
                drill("Hip Bridges", "2 sets of 12 reps."),
                drill("Plank with Shoulder Taps", "2 sets of 15 taps (each side)."),
            ],
        },
        WarmUpSection {
            title: "Stretching".into(),
            drills: vec![
                drill("Hamstring Stretch", "Hold for 30 seconds each leg."),
                drill("Quad Stretch", "Hold for 30 seconds each leg."),
                drill("Calf Stretch", "Hold for 30 seconds each leg."),
            ],
        },
    ];

    Routine {
        kind: RoutineKind::Lower,
        title: "Lower Body + Core".into(),
        focus: "Glutes, Legs & Core".into(),
        exercises,
        warm_up,
        tutorial_url: Some("https://www.youtube.com/watch?v=QLkLKfL_7F0".into()),
    }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.routines.is_empty() {
            errors.push("Catalog has no routines".to_string());
        }

        let mut kinds = HashSet::new();
        for routine in &self.routines {
            if !kinds.insert(routine.kind) {
                errors.push(format!("Routine '{}' defined more than once", routine.kind));
            }
            if routine.exercises.is_empty() {
                errors.push(format!("Routine '{}' has no exercises", routine.kind));
            }

            let mut names = HashSet::new();
            for exercise in &routine.exercises {
                if exercise.name.trim().is_empty() {
                    errors.push(format!("Routine '{}' has an exercise with empty name", routine.kind));
                }
                if !names.insert(exercise.name.as_str()) {
                    errors.push(format!(
                        "Routine '{}': duplicate exercise '{}'",
                        routine.kind, exercise.name
                    ));
                }
                if exercise.set_count == 0 {
                    errors.push(format!(
                        "Routine '{}': exercise '{}' has zero sets",
                        routine.kind, exercise.name
                    ));
                }
            }
        }

        errors
    }
}
