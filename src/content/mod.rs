//! Static wellness content: daily tips, sleep tips and guided exercises.

pub mod exercises;

pub use exercises::{exercises, Exercise, ExerciseCategory};

use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// General wellness tips, grouped loosely by theme.
pub const WELLNESS_TIPS: &[&str] = &[
    // General wellness
    "Take a 5-minute breathing break every hour",
    "Drink water regularly throughout the day",
    "Step outside for some fresh air",
    "Practice gratitude - write 3 things you're thankful for",
    "Stretch your body for better circulation",
    "Connect with a friend or family member",
    "Listen to calming music",
    "Take a short walk to clear your mind",
    // Study
    "Take regular study breaks using the Pomodoro technique",
    "Create a dedicated study space free from distractions",
    "Break large tasks into smaller, manageable chunks",
    "Reward yourself after completing study goals",
    "Study in natural light when possible",
    // Mental health
    "It's okay to ask for help when you need it",
    "Celebrate small victories and progress",
    "Practice self-compassion during difficult times",
    "Set healthy boundaries with work and study",
    "Limit social media use before bedtime",
    // Physical
    "Get at least 7-9 hours of sleep each night",
    "Eat regular, balanced meals throughout the day",
    "Exercise for at least 20 minutes daily",
    "Limit caffeine intake, especially in the evening",
    "Practice good posture while studying or working",
    // Mindfulness
    "Focus on the present moment",
    "Notice five things around you right now",
    "Take three deep breaths before starting a task",
    "Practice body scan meditation before sleep",
    "Express your feelings through journaling",
];

pub const SLEEP_TIPS: &[&str] = &[
    "Maintain a consistent sleep schedule",
    "Avoid screens 1 hour before bed",
    "Keep your bedroom cool and dark",
    "Limit caffeine after 2 PM",
    "Try relaxation exercises before sleep",
];

/// The tip for a calendar day: the same all day, different on most days.
///
/// ```
/// use chrono::NaiveDate;
/// use wellspring::content::{tip_of_the_day, WELLNESS_TIPS};
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(tip_of_the_day(day), WELLNESS_TIPS[5]);
/// ```
pub fn tip_of_the_day(date: NaiveDate) -> &'static str {
    WELLNESS_TIPS[date.day() as usize % WELLNESS_TIPS.len()]
}

/// A uniformly chosen tip.
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WELLNESS_TIPS[rng.random_range(0..WELLNESS_TIPS.len())]
}
