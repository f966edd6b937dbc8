//! Read-side operations built on top of the repositories.
//!
//! Nothing in here touches the store: each function takes the entries it
//! needs and returns a derived value.

pub mod analytics;
pub mod chat;

pub use analytics::{
    age_in_days, insights, journal_streak, mood_frequencies, mood_summary, sleep_analytics,
    sleep_goal_progress, Insight, InsightCategory, MoodFrequencies, MoodSummary, SleepStats,
};
pub use chat::reply;
