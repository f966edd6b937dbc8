//! Guided exercise listings.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseCategory {
    Breathing,
    MindfulnessGame,
    SleepRelaxation,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 3] = [
        ExerciseCategory::Breathing,
        ExerciseCategory::MindfulnessGame,
        ExerciseCategory::SleepRelaxation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ExerciseCategory::Breathing => "Breathing Exercises",
            ExerciseCategory::MindfulnessGame => "Mindfulness Games",
            ExerciseCategory::SleepRelaxation => "Pre-Sleep Relaxation",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ExerciseCategory::Breathing => "Take a moment to relax and focus on your breathing",
            ExerciseCategory::MindfulnessGame => "Fun activities to improve your mental wellness",
            ExerciseCategory::SleepRelaxation => "Wind down before bed",
        }
    }
}

/// One listed exercise. Sessions without a fixed length have no duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub category: ExerciseCategory,
    pub minutes: Option<u32>,
    pub description: &'static str,
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minutes {
            Some(minutes) => write!(f, "{} ({} min)", self.name, minutes),
            None => write!(f, "{} ({})", self.name, self.description),
        }
    }
}

const CATALOG: &[Exercise] = &[
    Exercise {
        name: "4-7-8 Breathing",
        category: ExerciseCategory::Breathing,
        minutes: Some(5),
        description: "Inhale for 4, hold for 7, exhale for 8",
    },
    Exercise {
        name: "Box Breathing",
        category: ExerciseCategory::Breathing,
        minutes: Some(4),
        description: "Equal counts in, hold, out, hold",
    },
    Exercise {
        name: "Deep Belly Breathing",
        category: ExerciseCategory::Breathing,
        minutes: Some(6),
        description: "Slow breaths from the diaphragm",
    },
    Exercise {
        name: "Mindful Coloring",
        category: ExerciseCategory::MindfulnessGame,
        minutes: Some(10),
        description: "Color at your own pace",
    },
    Exercise {
        name: "Memory Match",
        category: ExerciseCategory::MindfulnessGame,
        minutes: Some(5),
        description: "Find the matching pairs",
    },
    Exercise {
        name: "Calm Puzzle",
        category: ExerciseCategory::MindfulnessGame,
        minutes: Some(8),
        description: "A slow, untimed puzzle",
    },
    Exercise {
        name: "Sleep Meditation",
        category: ExerciseCategory::SleepRelaxation,
        minutes: Some(15),
        description: "Guided session",
    },
    Exercise {
        name: "Sleep Sounds",
        category: ExerciseCategory::SleepRelaxation,
        minutes: None,
        description: "Ambient nature sounds",
    },
];

/// Lists exercises, optionally restricted to one category.
pub fn exercises(category: Option<ExerciseCategory>) -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|exercise| category.map_or(true, |c| exercise.category == c))
        .collect()
}
