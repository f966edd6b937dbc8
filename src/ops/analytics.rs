//! Derived views over journal and sleep history.
//!
//! Every function here is pure: it reads the slice it is given (plus an
//! explicit "now" where time matters) and returns a fresh value. Nothing is
//! cached or stored, so results can be recomputed on every screen refresh and
//! tested without a store.
//!
//! - Mood frequencies and windowed mood summaries
//! - Heuristic insight messages over the most recent entries
//! - Sleep averages, best night and goal progress
//! - Journaling streaks

use crate::constants::{
    ANXIOUS_CAUTION_THRESHOLD, CALM_TREND_THRESHOLD, HAPPY_TREND_THRESHOLD, INSIGHT_WINDOW,
    MILESTONE_ENTRY_COUNT, SAD_SUPPORT_THRESHOLD,
};
use crate::journal_core::{Mood, MoodEntry, SleepEntry};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Per-mood entry counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodFrequencies {
    /// One slot for every known mood, zero when unused.
    pub counts: BTreeMap<Mood, usize>,
    /// Entries whose stored mood is outside the known set.
    pub unrecognized: usize,
}

impl MoodFrequencies {
    pub fn count(&self, mood: Mood) -> usize {
        self.counts.get(&mood).copied().unwrap_or(0)
    }

    /// Sum of the known-mood counts.
    pub fn recognized_total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Counts entries per mood.
///
/// Every known mood starts at zero. Entries with an unrecognized mood are
/// left out of `counts` and tallied in `unrecognized` instead.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use wellspring::journal_core::{Mood, MoodEntry};
/// use wellspring::ops::analytics::mood_frequencies;
///
/// let entry = |id, mood: Mood| MoodEntry {
///     id,
///     mood: mood.into(),
///     text: "note".to_string(),
///     date: Utc::now(),
///     has_audio: false,
/// };
/// let entries = vec![entry(1, Mood::Happy), entry(2, Mood::Happy), entry(3, Mood::Sad)];
///
/// let frequencies = mood_frequencies(&entries);
/// assert_eq!(frequencies.count(Mood::Happy), 2);
/// assert_eq!(frequencies.count(Mood::Calm), 0);
/// assert_eq!(frequencies.recognized_total(), 3);
/// ```
pub fn mood_frequencies(entries: &[MoodEntry]) -> MoodFrequencies {
    let mut counts: BTreeMap<Mood, usize> = Mood::ALL.iter().map(|&mood| (mood, 0)).collect();
    let mut unrecognized = 0;

    for entry in entries {
        match entry.mood.known() {
            Some(mood) => *counts.entry(mood).or_insert(0) += 1,
            None => unrecognized += 1,
        }
    }

    MoodFrequencies {
        counts,
        unrecognized,
    }
}

/// Mood statistics over a trailing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodSummary {
    /// Entries inside the period, including unrecognized moods.
    pub total: usize,
    pub counts: BTreeMap<Mood, usize>,
    /// The most frequent known mood; ties go to the mood declared first.
    pub most_common: Option<Mood>,
}

/// Summarizes moods of the entries at most `period_days` old.
pub fn mood_summary(entries: &[MoodEntry], period_days: i64, now: DateTime<Utc>) -> MoodSummary {
    let recent: Vec<MoodEntry> = entries
        .iter()
        .filter(|entry| age_in_days(now, entry.date) <= period_days)
        .cloned()
        .collect();

    let frequencies = mood_frequencies(&recent);
    let most_common = Mood::ALL
        .iter()
        .copied()
        .filter(|&mood| frequencies.count(mood) > 0)
        .fold(None, |best: Option<Mood>, mood| match best {
            Some(current) if frequencies.count(current) >= frequencies.count(mood) => {
                Some(current)
            }
            _ => Some(mood),
        });

    MoodSummary {
        total: recent.len(),
        counts: frequencies.counts,
        most_common,
    }
}

/// The kind of observation an [`Insight`] makes.
///
/// Insights are emitted in a fixed display order that does not rank severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightCategory {
    PositiveTrend,
    Caution,
    SupportSuggestion,
    Milestone,
    StartPrompt,
    Encouragement,
}

/// A short message derived from recent mood history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub message: String,
}

impl Insight {
    fn new(category: InsightCategory, message: impl Into<String>) -> Self {
        Insight {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Generates insight messages from the most recent entries.
///
/// Mood thresholds are checked against the last seven entries (fewer if the
/// journal is shorter); the milestone counts the whole journal. Messages come
/// out in this order:
///
/// | condition                       | category           |
/// |---------------------------------|--------------------|
/// | happy ≥ 4 in window             | positive trend     |
/// | calm ≥ 3 in window              | positive trend     |
/// | anxious ≥ 3 in window           | caution            |
/// | sad ≥ 4 in window               | support suggestion |
/// | ≥ 7 entries overall             | milestone          |
///
/// An empty journal yields only a prompt to start journaling; a journal that
/// triggers nothing yields one general encouragement.
pub fn insights(entries: &[MoodEntry]) -> Vec<Insight> {
    if entries.is_empty() {
        return vec![Insight::new(
            InsightCategory::StartPrompt,
            "Start journaling to discover insights about your mood patterns.",
        )];
    }

    let window_start = entries.len().saturating_sub(INSIGHT_WINDOW);
    let window = mood_frequencies(&entries[window_start..]);
    let mut found = Vec::new();

    if window.count(Mood::Happy) >= HAPPY_TREND_THRESHOLD {
        found.push(Insight::new(
            InsightCategory::PositiveTrend,
            "You've been feeling happy a lot lately. Keep doing what brings you joy!",
        ));
    }
    if window.count(Mood::Calm) >= CALM_TREND_THRESHOLD {
        found.push(Insight::new(
            InsightCategory::PositiveTrend,
            "You've had several calm days recently. Your mindfulness practice is paying off.",
        ));
    }
    if window.count(Mood::Anxious) >= ANXIOUS_CAUTION_THRESHOLD {
        found.push(Insight::new(
            InsightCategory::Caution,
            "Anxiety has come up several times lately. A breathing exercise might help you reset.",
        ));
    }
    if window.count(Mood::Sad) >= SAD_SUPPORT_THRESHOLD {
        found.push(Insight::new(
            InsightCategory::SupportSuggestion,
            "You've been feeling down often. Consider reaching out to a friend or a counselor.",
        ));
    }
    if entries.len() >= MILESTONE_ENTRY_COUNT {
        found.push(Insight::new(
            InsightCategory::Milestone,
            format!(
                "You've written {} journal entries. Consistency is a great habit!",
                entries.len()
            ),
        ));
    }

    if found.is_empty() {
        found.push(Insight::new(
            InsightCategory::Encouragement,
            "Keep journaling! Patterns will become clearer as you add more entries.",
        ));
    }
    found
}

/// Sleep statistics over a trailing period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepStats {
    /// Mean hours, rounded to one decimal.
    pub average: f64,
    /// Longest night, rounded to one decimal.
    pub best: f64,
    /// Number of nights in the period.
    pub total: usize,
}

/// Averages the sleep entries at most `period_days` old.
///
/// Age is the floor of whole days between `now` and the entry's timestamp, so
/// anything logged in the last 24 hours is 0 days old. Returns all zeros when
/// no entry falls inside the period.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use wellspring::journal_core::SleepEntry;
/// use wellspring::ops::analytics::sleep_analytics;
///
/// let now = Utc::now();
/// let night = |id, hours, age_days| SleepEntry {
///     id,
///     hours,
///     quality: "Good".to_string(),
///     date: now.date_naive(),
///     timestamp: now - Duration::days(age_days),
/// };
///
/// let stats = sleep_analytics(&[night(1, 6.0, 0), night(2, 8.0, 1)], 7, now);
/// assert_eq!((stats.average, stats.best, stats.total), (7.0, 8.0, 2));
///
/// let empty = sleep_analytics(&[], 7, now);
/// assert_eq!((empty.average, empty.best, empty.total), (0.0, 0.0, 0));
/// ```
pub fn sleep_analytics(entries: &[SleepEntry], period_days: i64, now: DateTime<Utc>) -> SleepStats {
    let hours: Vec<f64> = entries
        .iter()
        .filter(|entry| age_in_days(now, entry.timestamp) <= period_days)
        .map(|entry| entry.hours)
        .collect();

    if hours.is_empty() {
        return SleepStats {
            average: 0.0,
            best: 0.0,
            total: 0,
        };
    }

    let sum: f64 = hours.iter().sum();
    let best = hours.iter().copied().fold(f64::MIN, f64::max);

    SleepStats {
        average: round_one_decimal(sum / hours.len() as f64),
        best: round_one_decimal(best),
        total: hours.len(),
    }
}

/// Percentage of the nightly goal reached by `average`, capped at 100.
pub fn sleep_goal_progress(average: f64, goal_hours: f64) -> u8 {
    if goal_hours <= 0.0 || !average.is_finite() {
        return 0;
    }
    ((average / goal_hours) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Counts consecutive calendar days with at least one entry.
///
/// The run ends today, or yesterday when nothing has been written yet today,
/// so an unbroken streak is not reset first thing in the morning.
pub fn journal_streak(entries: &[MoodEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|entry| entry.date.date_naive()).collect();

    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Whole days elapsed from `then` to `now`, rounded down.
///
/// Entries from the future have a negative age.
pub fn age_in_days(now: DateTime<Utc>, then: DateTime<Utc>) -> i64 {
    (now - then).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::MoodLabel;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
    }

    fn entry(id: i64, mood: Mood, date: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            id,
            mood: mood.into(),
            text: format!("entry {}", id),
            date,
            has_audio: false,
        }
    }

    fn journal(moods: &[Mood]) -> Vec<MoodEntry> {
        let start = fixed_now() - Duration::days(moods.len() as i64);
        moods
            .iter()
            .enumerate()
            .map(|(i, &mood)| entry(i as i64 + 1, mood, start + Duration::days(i as i64)))
            .collect()
    }

    fn night(id: i64, hours: f64, timestamp: DateTime<Utc>) -> SleepEntry {
        SleepEntry {
            id,
            hours,
            quality: "Good".to_string(),
            date: timestamp.date_naive(),
            timestamp,
        }
    }

    fn categories(found: &[Insight]) -> Vec<InsightCategory> {
        found.iter().map(|insight| insight.category).collect()
    }

    #[test]
    fn test_mood_frequencies_initializes_every_mood() {
        let frequencies = mood_frequencies(&[]);
        assert_eq!(frequencies.counts.len(), Mood::ALL.len());
        assert!(frequencies.counts.values().all(|&count| count == 0));
        assert_eq!(frequencies.unrecognized, 0);
    }

    #[test]
    fn test_mood_frequencies_flags_unrecognized() {
        let mut entries = journal(&[Mood::Happy, Mood::Calm, Mood::Happy]);
        let mut odd = entry(99, Mood::Happy, fixed_now());
        odd.mood = MoodLabel::Unrecognized("ecstatic".to_string());
        entries.push(odd);

        let frequencies = mood_frequencies(&entries);
        assert_eq!(frequencies.count(Mood::Happy), 2);
        assert_eq!(frequencies.count(Mood::Calm), 1);
        assert_eq!(frequencies.unrecognized, 1);
        assert_eq!(frequencies.recognized_total(), 3);
    }

    #[test]
    fn test_mood_frequencies_is_idempotent() {
        let entries = journal(&[Mood::Sad, Mood::Anxious, Mood::Sad, Mood::Energetic]);
        assert_eq!(mood_frequencies(&entries), mood_frequencies(&entries));
    }

    #[test]
    fn test_insights_empty_journal_prompts_to_start() {
        let found = insights(&[]);
        assert_eq!(categories(&found), vec![InsightCategory::StartPrompt]);
    }

    #[test]
    fn test_insights_without_trigger_encourages() {
        let found = insights(&journal(&[Mood::Happy, Mood::Sad, Mood::Neutral]));
        assert_eq!(categories(&found), vec![InsightCategory::Encouragement]);
    }

    #[test]
    fn test_insights_happy_trend() {
        let found = insights(&journal(&[
            Mood::Happy,
            Mood::Sad,
            Mood::Happy,
            Mood::Neutral,
            Mood::Happy,
            Mood::Happy,
        ]));
        assert_eq!(categories(&found), vec![InsightCategory::PositiveTrend]);
        assert!(found[0].message.contains("happy"));
    }

    #[test]
    fn test_insights_use_only_last_seven_entries() {
        // Four happy entries, but the oldest falls outside the window
        let found = insights(&journal(&[
            Mood::Happy,
            Mood::Happy,
            Mood::Happy,
            Mood::Happy,
            Mood::Sad,
            Mood::Sad,
            Mood::Neutral,
            Mood::Energetic,
        ]));
        assert_eq!(categories(&found), vec![InsightCategory::Milestone]);
        assert!(found[0].message.contains("8 journal entries"));
    }

    #[test]
    fn test_insights_emit_in_table_order() {
        let found = insights(&journal(&[
            Mood::Calm,
            Mood::Anxious,
            Mood::Calm,
            Mood::Anxious,
            Mood::Calm,
            Mood::Anxious,
            Mood::Neutral,
        ]));
        assert_eq!(
            categories(&found),
            vec![
                InsightCategory::PositiveTrend,
                InsightCategory::Caution,
                InsightCategory::Milestone,
            ]
        );
    }

    #[test]
    fn test_insights_support_suggestion() {
        let found = insights(&journal(&[Mood::Sad, Mood::Sad, Mood::Sad, Mood::Sad]));
        assert_eq!(categories(&found), vec![InsightCategory::SupportSuggestion]);
    }

    #[test]
    fn test_sleep_analytics_boundary_cases() {
        let now = fixed_now();
        let empty = sleep_analytics(&[], 7, now);
        assert_eq!(
            empty,
            SleepStats {
                average: 0.0,
                best: 0.0,
                total: 0
            }
        );

        let entries = vec![night(1, 6.0, now), night(2, 8.0, now - Duration::days(1))];
        assert_eq!(
            sleep_analytics(&entries, 7, now),
            SleepStats {
                average: 7.0,
                best: 8.0,
                total: 2
            }
        );
    }

    #[test]
    fn test_sleep_analytics_filters_by_whole_days() {
        let now = fixed_now();
        let entries = vec![
            night(1, 5.0, now - Duration::minutes(1)),
            night(2, 7.0, now - Duration::hours(23) - Duration::minutes(59)),
            night(3, 9.0, now - Duration::days(7) - Duration::hours(23)),
            night(4, 4.0, now - Duration::days(8)),
        ];

        let stats = sleep_analytics(&entries, 7, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.best, 9.0);
        assert_eq!(stats.average, 7.0);

        let today_only = sleep_analytics(&entries, 0, now);
        assert_eq!(today_only.total, 2);
        assert_eq!(today_only.average, 6.0);
    }

    #[test]
    fn test_sleep_analytics_rounds_to_one_decimal() {
        let now = fixed_now();
        let entries = vec![night(1, 7.25, now), night(2, 6.0, now), night(3, 8.13, now)];
        let stats = sleep_analytics(&entries, 7, now);
        assert_eq!(stats.average, 7.1);
        assert_eq!(stats.best, 8.1);
    }

    #[test]
    fn test_age_in_days_floors() {
        let now = fixed_now();
        assert_eq!(age_in_days(now, now), 0);
        assert_eq!(age_in_days(now, now - Duration::hours(23)), 0);
        assert_eq!(age_in_days(now, now - Duration::hours(24)), 1);
        assert_eq!(age_in_days(now, now + Duration::hours(1)), -1);
    }

    #[test]
    fn test_mood_summary_period_and_ties() {
        let now = fixed_now();
        let entries = vec![
            entry(1, Mood::Sad, now - Duration::days(20)),
            entry(2, Mood::Calm, now - Duration::days(3)),
            entry(3, Mood::Happy, now - Duration::days(2)),
            entry(4, Mood::Calm, now - Duration::days(1)),
            entry(5, Mood::Happy, now),
        ];

        let week = mood_summary(&entries, 7, now);
        assert_eq!(week.total, 4);
        assert_eq!(week.counts[&Mood::Happy], 2);
        assert_eq!(week.counts[&Mood::Sad], 0);
        // Happy and calm tie; happy is declared first
        assert_eq!(week.most_common, Some(Mood::Happy));

        let month = mood_summary(&entries, 30, now);
        assert_eq!(month.total, 5);

        let nothing = mood_summary(&[], 7, now);
        assert_eq!(nothing.most_common, None);
    }

    #[test]
    fn test_journal_streak() {
        let now = fixed_now();
        let today = now.date_naive();
        let entries = vec![
            entry(1, Mood::Calm, now - Duration::days(5)),
            entry(2, Mood::Calm, now - Duration::days(2)),
            entry(3, Mood::Calm, now - Duration::days(1)),
            entry(4, Mood::Happy, now - Duration::days(1)),
        ];

        // Nothing yet today: the run ending yesterday still counts
        assert_eq!(journal_streak(&entries, today), 2);

        let mut with_today = entries.clone();
        with_today.push(entry(5, Mood::Happy, now));
        assert_eq!(journal_streak(&with_today, today), 3);

        assert_eq!(journal_streak(&entries, today + Duration::days(2)), 0);
        assert_eq!(journal_streak(&[], today), 0);
    }

    #[test]
    fn test_sleep_goal_progress() {
        assert_eq!(sleep_goal_progress(7.2, 8.0), 90);
        assert_eq!(sleep_goal_progress(9.0, 8.0), 100);
        assert_eq!(sleep_goal_progress(0.0, 8.0), 0);
        assert_eq!(sleep_goal_progress(7.0, 0.0), 0);
    }
}
