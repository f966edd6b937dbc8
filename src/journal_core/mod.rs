//! Core entry model without I/O operations.
//!
//! This module contains the record shapes persisted by wellspring (mood
//! journal entries and sleep entries), the closed set of moods, and the pure
//! validation and identifier rules applied before anything is written.

use crate::errors::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of moods a journal entry can carry.
///
/// The declaration order is significant: it is the order used when moods are
/// listed and when ties between equally frequent moods are broken.
///
/// # Examples
///
/// ```
/// use wellspring::journal_core::Mood;
///
/// let mood: Mood = "Happy".parse().unwrap();
/// assert_eq!(mood, Mood::Happy);
/// assert_eq!(mood.to_string(), "happy");
/// assert!("grumpy".parse::<Mood>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Sad,
    Anxious,
    Energetic,
}

impl Mood {
    /// Every mood, in declaration order.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Sad,
        Mood::Anxious,
        Mood::Energetic,
    ];

    /// The lowercase name used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Energetic => "energetic",
        }
    }

    /// The emoji shown next to the mood in listings.
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Anxious => "😰",
            Mood::Energetic => "⚡",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownMood(s.trim().to_string()))
    }
}

/// The mood stored on a journal entry as it was read back.
///
/// Entries created by this crate always hold a `Known` mood. `Unrecognized`
/// preserves a stored value outside the known set verbatim, so that such an
/// entry survives a load/save cycle instead of being dropped or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoodLabel {
    Known(Mood),
    Unrecognized(String),
}

impl MoodLabel {
    /// Returns the mood if it belongs to the known set.
    pub fn known(&self) -> Option<Mood> {
        match self {
            MoodLabel::Known(mood) => Some(*mood),
            MoodLabel::Unrecognized(_) => None,
        }
    }
}

impl From<Mood> for MoodLabel {
    fn from(mood: Mood) -> Self {
        MoodLabel::Known(mood)
    }
}

impl From<String> for MoodLabel {
    fn from(raw: String) -> Self {
        match raw.parse::<Mood>() {
            Ok(mood) => MoodLabel::Known(mood),
            Err(_) => MoodLabel::Unrecognized(raw),
        }
    }
}

impl From<MoodLabel> for String {
    fn from(label: MoodLabel) -> Self {
        match label {
            MoodLabel::Known(mood) => mood.as_str().to_string(),
            MoodLabel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodLabel::Known(mood) => write!(f, "{}", mood),
            MoodLabel::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// A single mood journal entry.
///
/// Entries are created only through
/// [`JournalRepository::append`](crate::journal::JournalRepository::append)
/// and never change afterwards. The serialized form uses camelCase field
/// names (`hasAudio`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: i64,
    pub mood: MoodLabel,
    #[serde(default, alias = "content")]
    pub text: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub has_audio: bool,
}

impl MoodEntry {
    /// Returns the first `max_chars` characters of the text, with an
    /// ellipsis when the text was cut.
    ///
    /// ```
    /// use chrono::Utc;
    /// use wellspring::journal_core::{Mood, MoodEntry};
    ///
    /// let entry = MoodEntry {
    ///     id: 1,
    ///     mood: Mood::Happy.into(),
    ///     text: "Had a great day today with friends".to_string(),
    ///     date: Utc::now(),
    ///     has_audio: false,
    /// };
    /// assert_eq!(entry.preview(15), "Had a great day...");
    /// ```
    pub fn preview(&self, max_chars: usize) -> String {
        let trimmed = self.text.trim();
        if trimmed.chars().count() <= max_chars {
            return trimmed.to_string();
        }
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

/// A single night of logged sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub id: i64,
    pub hours: f64,
    pub quality: String,
    /// The night the entry describes.
    pub date: NaiveDate,
    /// When the entry was logged; analytics age entries by this instant.
    pub timestamp: DateTime<Utc>,
}

/// Validates the content of a new journal entry.
///
/// Fails with `MissingMood` when no mood was chosen, and with `EmptyContent`
/// when the text is blank and no audio is attached. No other rule applies:
/// there is no length limit and the text is stored as given.
///
/// # Examples
///
/// ```
/// use wellspring::errors::ValidationError;
/// use wellspring::journal_core::{validate_mood_entry, Mood};
///
/// assert_eq!(validate_mood_entry(None, "x", false), Err(ValidationError::MissingMood));
/// assert_eq!(
///     validate_mood_entry(Some(Mood::Happy), "   ", false),
///     Err(ValidationError::EmptyContent)
/// );
/// assert_eq!(validate_mood_entry(Some(Mood::Happy), "", true), Ok(Mood::Happy));
/// ```
pub fn validate_mood_entry(
    mood: Option<Mood>,
    text: &str,
    has_audio: bool,
) -> Result<Mood, ValidationError> {
    let mood = mood.ok_or(ValidationError::MissingMood)?;
    if text.trim().is_empty() && !has_audio {
        return Err(ValidationError::EmptyContent);
    }
    Ok(mood)
}

/// Validates a logged sleep duration.
pub fn validate_sleep_entry(hours: f64) -> Result<f64, ValidationError> {
    if hours.is_finite() && hours > 0.0 {
        Ok(hours)
    } else {
        Err(ValidationError::InvalidSleepHours(hours))
    }
}

/// Returns the identifier derived from a creation instant: milliseconds
/// since the Unix epoch.
pub fn make_id(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}

/// Returns a timestamp-derived identifier that is strictly greater than
/// `last_id`.
///
/// Two entries created within the same millisecond would otherwise share an
/// id; the second one is bumped to `last_id + 1` instead.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wellspring::journal_core::{make_id, next_id};
///
/// let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
/// assert_eq!(next_id(now, None), make_id(now));
/// assert_eq!(next_id(now, Some(make_id(now))), make_id(now) + 1);
/// ```
pub fn next_id(now: DateTime<Utc>, last_id: Option<i64>) -> i64 {
    let candidate = make_id(now);
    match last_id {
        Some(last) if candidate <= last => last.saturating_add(1),
        _ => candidate,
    }
}
