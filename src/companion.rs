//! The boundary object a user interface talks to.
//!
//! `Companion` wires the repositories, the audio references and the analytics
//! together over one shared store. Screens call it; it never calls back.

use crate::audio::{AudioCapability, AudioReferences, AudioSession};
use crate::errors::{AppError, AppResult};
use crate::journal::{JournalRepository, SleepRepository};
use crate::journal_core::{Mood, MoodEntry, SleepEntry};
use crate::ops::analytics::{self, Insight, MoodFrequencies, MoodSummary, SleepStats};
use crate::store::SharedStore;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

/// Source of the current instant.
pub type Clock = fn() -> DateTime<Utc>;

/// A data problem found and recovered from while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    /// The list under `key` could not be parsed and was replaced by an empty
    /// one. The raw value was copied to `quarantined_as` when present.
    CorruptStore {
        key: String,
        quarantined_as: Option<String>,
    },
    /// An entry carries a mood outside the known set.
    UnrecognizedMood { id: i64, value: String },
}

/// Result of hydrating the repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub entries: Vec<MoodEntry>,
    pub sleep_entries: Vec<SleepEntry>,
    pub issues: Vec<LoadIssue>,
}

/// Facade over the journal, the sleep log and the audio references.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wellspring::journal_core::Mood;
/// use wellspring::store::MemoryStore;
/// use wellspring::Companion;
///
/// let mut companion = Companion::new(Arc::new(MemoryStore::new()));
/// companion.load_all()?;
/// companion.create_entry(Some(Mood::Happy), "Passed the exam", None)?;
///
/// assert_eq!(companion.list_entries().len(), 1);
/// assert_eq!(companion.mood_frequencies().count(Mood::Happy), 1);
/// # Ok::<(), wellspring::AppError>(())
/// ```
pub struct Companion {
    journal: JournalRepository,
    sleep: SleepRepository,
    audio: AudioReferences,
    clock: Clock,
}

impl Companion {
    pub fn new(store: SharedStore) -> Self {
        Self::with_clock(store, Utc::now)
    }

    /// Creates a companion that reads the time from `clock`.
    pub fn with_clock(store: SharedStore, clock: Clock) -> Self {
        Companion {
            journal: JournalRepository::new(store.clone()),
            sleep: SleepRepository::new(store.clone()),
            audio: AudioReferences::new(store),
            clock,
        }
    }

    /// Hydrates both repositories from the store.
    ///
    /// Corrupt lists are quarantined and replaced by empty ones; they, and
    /// any unrecognized moods, are reported in the outcome rather than as
    /// errors.
    ///
    /// # Errors
    ///
    /// Only store read or quarantine write failures are returned.
    pub fn load_all(&mut self) -> AppResult<LoadOutcome> {
        let now = (self.clock)();
        let mut issues = Vec::new();

        match self.journal.load() {
            Ok(_) => {}
            Err(AppError::CorruptStore { key, source }) => {
                warn!("Journal list is corrupt, starting empty: {}", source);
                let quarantined_as = self.journal.quarantine_corrupt(now)?;
                issues.push(LoadIssue::CorruptStore {
                    key,
                    quarantined_as,
                });
            }
            Err(e) => return Err(e),
        }

        match self.sleep.load() {
            Ok(_) => {}
            Err(AppError::CorruptStore { key, source }) => {
                warn!("Sleep log is corrupt, starting empty: {}", source);
                let quarantined_as = self.sleep.quarantine_corrupt(now)?;
                issues.push(LoadIssue::CorruptStore {
                    key,
                    quarantined_as,
                });
            }
            Err(e) => return Err(e),
        }

        for (id, value) in self.journal.unrecognized_moods() {
            warn!("Entry {} has unrecognized mood '{}'", id, value);
            issues.push(LoadIssue::UnrecognizedMood { id, value });
        }

        info!(
            "Loaded {} journal entries and {} sleep entries ({} issues)",
            self.journal.entries().len(),
            self.sleep.entries().len(),
            issues.len()
        );

        Ok(LoadOutcome {
            entries: self.journal.entries().to_vec(),
            sleep_entries: self.sleep.entries().to_vec(),
            issues,
        })
    }

    /// Saves a new journal entry and returns the updated journal.
    ///
    /// Fails with `AppError::Journal` until [`load_all`](Self::load_all) has
    /// succeeded.
    pub fn create_entry(
        &mut self,
        mood: Option<Mood>,
        text: &str,
        audio_locator: Option<&str>,
    ) -> AppResult<Vec<MoodEntry>> {
        let now = (self.clock)();
        self.journal.append(mood, text, audio_locator, now)
    }

    /// The journal in creation order.
    pub fn list_entries(&self) -> &[MoodEntry] {
        self.journal.entries()
    }

    pub fn mood_frequencies(&self) -> MoodFrequencies {
        analytics::mood_frequencies(self.journal.entries())
    }

    pub fn insights(&self) -> Vec<Insight> {
        analytics::insights(self.journal.entries())
    }

    pub fn mood_summary(&self, period_days: i64) -> MoodSummary {
        analytics::mood_summary(self.journal.entries(), period_days, (self.clock)())
    }

    /// Consecutive days with an entry, ending today or yesterday.
    pub fn streak(&self) -> u32 {
        let today: NaiveDate = (self.clock)().date_naive();
        analytics::journal_streak(self.journal.entries(), today)
    }

    /// Locator of the audio attached to entry `id`.
    ///
    /// `None` covers both entries without audio and entries whose locator
    /// was never written.
    pub fn audio_locator_for(&self, id: i64) -> AppResult<Option<String>> {
        self.audio.resolve(id)
    }

    /// Starts playing the audio attached to entry `id`.
    ///
    /// Returns `false` when the entry has no resolvable audio.
    ///
    /// # Errors
    ///
    /// `AppError::Journal` if no entry has that id, `AppError::Audio` if the
    /// capability refuses to play.
    pub fn play_entry_audio<C: AudioCapability>(
        &self,
        session: &mut AudioSession<C>,
        id: i64,
    ) -> AppResult<bool> {
        let entry = self
            .journal
            .entries()
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::Journal(format!("No journal entry with id {}", id)))?;

        if !entry.has_audio {
            return Ok(false);
        }

        match self.audio.resolve(id)? {
            Some(locator) => {
                session.play(&locator)?;
                Ok(true)
            }
            None => {
                warn!("Entry {} is marked with audio but has no locator", id);
                Ok(false)
            }
        }
    }

    /// Logs a night of sleep and returns the updated log.
    ///
    /// Like [`create_entry`](Self::create_entry), requires a prior
    /// [`load_all`](Self::load_all).
    pub fn log_sleep(
        &mut self,
        hours: f64,
        quality: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<SleepEntry>> {
        let now = (self.clock)();
        self.sleep.append(hours, quality, date, now)
    }

    pub fn list_sleep(&self) -> &[SleepEntry] {
        self.sleep.entries()
    }

    pub fn sleep_stats(&self, period_days: i64) -> SleepStats {
        analytics::sleep_analytics(self.sleep.entries(), period_days, (self.clock)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::session::fake::FakeCapability;
    use crate::constants::{MOOD_ENTRIES_KEY, SLEEP_ENTRIES_KEY};
    use crate::store::{KeyValueStore, MemoryStore};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
    }

    fn companion(store: Arc<MemoryStore>) -> Companion {
        Companion::with_clock(store, fixed_now)
    }

    #[test]
    fn test_load_all_on_empty_store() {
        let mut companion = companion(Arc::new(MemoryStore::new()));
        let outcome = companion.load_all().unwrap();
        assert!(outcome.entries.is_empty());
        assert!(outcome.sleep_entries.is_empty());
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_load_all_quarantines_corrupt_lists() {
        let store = Arc::new(MemoryStore::new());
        store.set(MOOD_ENTRIES_KEY, "garbage").unwrap();
        store.set(SLEEP_ENTRIES_KEY, "[1,").unwrap();

        let mut companion = companion(store.clone());
        let outcome = companion.load_all().unwrap();
        assert!(outcome.entries.is_empty());

        let millis = fixed_now().timestamp_millis();
        assert_eq!(
            outcome.issues,
            vec![
                LoadIssue::CorruptStore {
                    key: MOOD_ENTRIES_KEY.to_string(),
                    quarantined_as: Some(format!("mood_entries.corrupt.{}", millis)),
                },
                LoadIssue::CorruptStore {
                    key: SLEEP_ENTRIES_KEY.to_string(),
                    quarantined_as: Some(format!("sleep_entries.corrupt.{}", millis)),
                },
            ]
        );

        // The next save replaces the corrupt list, the quarantined copy survives
        companion
            .create_entry(Some(Mood::Calm), "fresh start", None)
            .unwrap();
        assert_eq!(
            store
                .get(&format!("mood_entries.corrupt.{}", millis))
                .unwrap(),
            Some("garbage".to_string())
        );
    }

    #[test]
    fn test_load_all_reports_unrecognized_moods() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                MOOD_ENTRIES_KEY,
                r#"[{"id":7,"mood":"wistful","text":"hm","date":"2024-01-10T08:00:00Z","hasAudio":false}]"#,
            )
            .unwrap();

        let mut companion = companion(store);
        let outcome = companion.load_all().unwrap();
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(
            outcome.issues,
            vec![LoadIssue::UnrecognizedMood {
                id: 7,
                value: "wistful".to_string()
            }]
        );
        assert_eq!(companion.mood_frequencies().unrecognized, 1);
        assert_eq!(companion.mood_frequencies().recognized_total(), 0);
    }

    #[test]
    fn test_entry_with_audio_resolves_locator() {
        let mut companion = companion(Arc::new(MemoryStore::new()));
        companion.load_all().unwrap();

        let entries = companion
            .create_entry(Some(Mood::Sad), "", Some("file:///voice/1.m4a"))
            .unwrap();
        let id = entries[0].id;

        assert_eq!(
            companion.audio_locator_for(id).unwrap(),
            Some("file:///voice/1.m4a".to_string())
        );
        assert_eq!(companion.audio_locator_for(id + 1).unwrap(), None);
    }

    #[test]
    fn test_play_entry_audio() {
        let mut companion = companion(Arc::new(MemoryStore::new()));
        companion.load_all().unwrap();
        let with_audio = companion
            .create_entry(Some(Mood::Calm), "", Some("file:///voice/2.m4a"))
            .unwrap()[0]
            .id;
        let without_audio = companion
            .create_entry(Some(Mood::Calm), "text only", None)
            .unwrap()[1]
            .id;

        let (capability, events) = FakeCapability::new();
        let mut session = AudioSession::new(capability);

        assert!(companion.play_entry_audio(&mut session, with_audio).unwrap());
        assert!(!companion
            .play_entry_audio(&mut session, without_audio)
            .unwrap());
        assert!(matches!(
            companion.play_entry_audio(&mut session, 1),
            Err(AppError::Journal(_))
        ));
        assert_eq!(*events.borrow(), vec!["play file:///voice/2.m4a"]);
    }

    #[test]
    fn test_sleep_flow() {
        let mut companion = companion(Arc::new(MemoryStore::new()));
        companion.load_all().unwrap();
        companion.log_sleep(6.0, "Restless", None).unwrap();
        companion.log_sleep(8.0, "", None).unwrap();

        let stats = companion.sleep_stats(7);
        assert_eq!((stats.average, stats.best, stats.total), (7.0, 8.0, 2));
        assert_eq!(companion.list_sleep()[1].quality, "Good");
    }

    #[test]
    fn test_streak_and_summary_use_the_clock() {
        let mut companion = companion(Arc::new(MemoryStore::new()));
        companion.load_all().unwrap();
        companion
            .create_entry(Some(Mood::Energetic), "gym", None)
            .unwrap();

        assert_eq!(companion.streak(), 1);
        let summary = companion.mood_summary(7);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.most_common, Some(Mood::Energetic));
    }

    #[test]
    fn test_writes_before_load_all_keep_history() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut companion = companion(store.clone());
            companion.load_all().unwrap();
            companion.create_entry(Some(Mood::Calm), "one", None).unwrap();
            companion.create_entry(Some(Mood::Sad), "two", None).unwrap();
            companion.log_sleep(7.0, "Good", None).unwrap();
        }

        let mut unloaded = companion(store.clone());
        assert!(matches!(
            unloaded.create_entry(Some(Mood::Happy), "three", None),
            Err(AppError::Journal(_))
        ));
        assert!(matches!(
            unloaded.log_sleep(6.0, "Restless", None),
            Err(AppError::Journal(_))
        ));

        let mut reopened = companion(store);
        let outcome = reopened.load_all().unwrap();
        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(outcome.sleep_entries.len(), 1);

        let entries = reopened
            .create_entry(Some(Mood::Happy), "three", None)
            .unwrap();
        assert_eq!(entries.len(), 3);
    }
}
