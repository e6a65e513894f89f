//! Core domain types for fitrack.
//!
//! This module defines the static data a workout session is built from:
//! - Exercises and their rep targets
//! - Routines (ordered exercise lists plus warm-up material)
//! - The routine catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ============================================================================
// Exercise Types
// ============================================================================

/// Tag grouping exercises that share a completion policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseGroup {
    /// Interchangeable core work, subject to the abs-limit rule
    Abs,
}

/// Repetition target shown next to the set count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RepTarget {
    Count(u32),
    Text(String),
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Count(n) => write!(f, "{}", n),
            RepTarget::Text(s) => f.write_str(s),
        }
    }
}

/// A single exercise within a routine (e.g., "Squats", 3 × 8-12)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub set_count: usize,
    pub rep_target: RepTarget,
    #[serde(default)]
    pub group: Option<ExerciseGroup>,
    /// Optional exercises are left out of the "required" progress scope
    #[serde(default)]
    pub optional: bool,
}

impl Exercise {
    /// Required exercise with no group tag
    pub fn new(name: impl Into<String>, set_count: usize, rep_target: RepTarget) -> Self {
        Self {
            name: name.into(),
            set_count,
            rep_target,
            group: None,
            optional: false,
        }
    }

    pub fn with_group(mut self, group: ExerciseGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn is_abs(&self) -> bool {
        self.group == Some(ExerciseGroup::Abs)
    }
}

// ============================================================================
// Routine Types
// ============================================================================

/// Which routine the user picked on the selection screen
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoutineKind {
    Upper,
    Lower,
}

impl RoutineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutineKind::Upper => "upper",
            RoutineKind::Lower => "lower",
        }
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" | "upper_body" | "u" => Ok(RoutineKind::Upper),
            "lower" | "lower_body" | "l" => Ok(RoutineKind::Lower),
            other => Err(Error::UnknownRoutine(other.to_string())),
        }
    }
}

/// A titled block of warm-up drills (e.g., "Dynamic Stretching")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WarmUpSection {
    pub title: String,
    pub drills: Vec<WarmUpDrill>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WarmUpDrill {
    pub name: String,
    pub instruction: String,
}

/// A complete routine definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Routine {
    pub kind: RoutineKind,
    pub title: String,
    pub focus: String,
    pub exercises: Vec<Exercise>,
    pub warm_up: Vec<WarmUpSection>,
    pub tutorial_url: Option<String>,
}

impl Routine {
    /// Look up an exercise by its (routine-unique) name
    pub fn exercise(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name == name)
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.set_count).sum()
    }

    /// Names of every abs-tagged exercise, in routine order
    pub fn abs_members(&self) -> Vec<String> {
        self.exercises
            .iter()
            .filter(|e| e.is_abs())
            .map(|e| e.name.clone())
            .collect()
    }
}

// ============================================================================
// Catalog Type
// ============================================================================

/// All routines offered on the selection screen
#[derive(Clone, Debug)]
pub struct Catalog {
    pub routines: Vec<Routine>,
}

impl Catalog {
    pub fn routine(&self, kind: RoutineKind) -> Option<&Routine> {
        self.routines.iter().find(|r| r.kind == kind)
    }
}
