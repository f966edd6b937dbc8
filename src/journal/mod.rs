//! Journal repositories.
//!
//! A repository owns the canonical in-memory list of one kind of record and
//! is the only path through which that list changes. Every successful append
//! writes the *entire* list back to the store, so the in-memory state always
//! equals the last list that was persisted successfully.
//!
//! A repository refuses to append until it has been hydrated, either by a
//! successful `load` or by quarantining a corrupt list. Appending to an
//! unhydrated list would overwrite the stored history with a single entry.
//!
//! - [`JournalRepository`]: mood journal entries and their audio references
//! - [`SleepRepository`]: logged nights of sleep

pub mod sleep;


pub use sleep::SleepRepository;

use crate::audio::audio_key;
use crate::constants::{CORRUPT_KEY_INFIX, MOOD_ENTRIES_KEY};
use crate::errors::{AppError, AppResult, StoreError};
use crate::journal_core::{next_id, validate_mood_entry, Mood, MoodEntry};
use crate::store::SharedStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Owns the mood journal and its persistence cycle.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::Utc;
/// use wellspring::journal::JournalRepository;
/// use wellspring::journal_core::Mood;
/// use wellspring::store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// let mut journal = JournalRepository::new(store.clone());
/// journal.load()?;
/// journal.append(Some(Mood::Calm), "Slow morning with tea", None, Utc::now())?;
///
/// // A fresh repository over the same store sees the saved entry
/// let mut reopened = JournalRepository::new(store);
/// assert_eq!(reopened.load()?.len(), 1);
/// # Ok::<(), wellspring::AppError>(())
/// ```
pub struct JournalRepository {
    store: SharedStore,
    entries: Vec<MoodEntry>,
    loaded: bool,
}

impl JournalRepository {
    /// Creates an empty repository. Call [`load`](Self::load) to hydrate it.
    pub fn new(store: SharedStore) -> Self {
        JournalRepository {
            store,
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Replaces the in-memory list with the one persisted in the store.
    ///
    /// A missing key yields an empty journal.
    ///
    /// # Errors
    ///
    /// - `AppError::CorruptStore` if the stored value cannot be parsed. The
    ///   in-memory list is left empty and the stored value is not touched.
    /// - `AppError::Persistence` if the store cannot be read.
    ///
    /// After either error the repository is unloaded and `append` fails
    /// until a later `load` succeeds.
    pub fn load(&mut self) -> AppResult<&[MoodEntry]> {
        // Stays empty and unloaded if the stored list cannot be read
        self.entries.clear();
        self.loaded = false;
        self.entries = read_list(&self.store, MOOD_ENTRIES_KEY)?;
        self.loaded = true;

        let unrecognized = self.unrecognized_moods();
        if !unrecognized.is_empty() {
            warn!(
                "Loaded {} journal entries with unrecognized moods",
                unrecognized.len()
            );
        }

        info!("Loaded {} journal entries", self.entries.len());
        Ok(&self.entries)
    }

    /// The current in-memory journal, oldest first.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Whether the in-memory journal reflects the store.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Ids and raw values of loaded entries whose mood is outside the known set.
    pub fn unrecognized_moods(&self) -> Vec<(i64, String)> {
        self.entries
            .iter()
            .filter(|entry| entry.mood.known().is_none())
            .map(|entry| (entry.id, entry.mood.to_string()))
            .collect()
    }

    /// Validates and appends a new entry, then persists the whole journal.
    ///
    /// When `audio_uri` is given (and not blank) the locator is stored under
    /// `audio_<id>` in the same batch as the entry list. The list is written
    /// first; on stores without transactional batches a crash between the two
    /// writes leaves an entry marked `has_audio` whose locator cannot be
    /// resolved, which readers treat as "audio unavailable".
    ///
    /// On such stores a failed locator write also leaves the new entry in the
    /// stored list but not in memory. The next append from this repository
    /// writes the in-memory list and drops that orphaned entry from the
    /// store. Call [`load`](Self::load) after a failed append to keep it.
    ///
    /// Returns the updated journal.
    ///
    /// # Errors
    ///
    /// - `AppError::Journal` if the repository has not been loaded
    /// - `AppError::Validation` before anything is written
    /// - `AppError::Persistence` if the store rejects the write; the
    ///   in-memory journal is unchanged
    pub fn append(
        &mut self,
        mood: Option<Mood>,
        text: &str,
        audio_uri: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<MoodEntry>> {
        ensure_loaded(self.loaded, MOOD_ENTRIES_KEY)?;
        let audio_uri = audio_uri.map(str::trim).filter(|uri| !uri.is_empty());
        let mood = validate_mood_entry(mood, text, audio_uri.is_some())?;

        let last_id = self.entries.iter().map(|entry| entry.id).max();
        let entry = MoodEntry {
            id: next_id(now, last_id),
            mood: mood.into(),
            text: text.to_string(),
            date: now,
            has_audio: audio_uri.is_some(),
        };
        let id = entry.id;

        let mut updated = self.entries.clone();
        updated.push(entry);
        let encoded = encode_list(MOOD_ENTRIES_KEY, &updated)?;

        let audio_pair = audio_uri.map(|uri| (audio_key(id), uri));
        let mut pairs: Vec<(&str, &str)> = vec![(MOOD_ENTRIES_KEY, encoded.as_str())];
        if let Some((key, uri)) = &audio_pair {
            pairs.push((key.as_str(), *uri));
        }

        self.store.set_many(&pairs)?;
        self.entries = updated;

        info!(
            "Saved journal entry {} ({}, audio: {})",
            id,
            mood,
            audio_pair.is_some()
        );
        Ok(self.entries.clone())
    }

    /// Locator of the audio attached to entry `id`, if one was stored.
    pub fn audio_reference(&self, id: i64) -> AppResult<Option<String>> {
        Ok(self.store.get(&audio_key(id))?)
    }

    /// Copies the unparseable journal value to a quarantine key and
    /// continues with an empty, loaded journal.
    ///
    /// See [`quarantine_corrupt`].
    pub fn quarantine_corrupt(&mut self, now: DateTime<Utc>) -> AppResult<Option<String>> {
        let quarantined = quarantine_corrupt(&self.store, MOOD_ENTRIES_KEY, now)?;
        self.entries.clear();
        self.loaded = true;
        Ok(quarantined)
    }
}

/// Fails unless the repository owning `key` has been hydrated.
pub(crate) fn ensure_loaded(loaded: bool, key: &str) -> AppResult<()> {
    if loaded {
        Ok(())
    } else {
        Err(AppError::Journal(format!(
            "{} not loaded, refusing to overwrite stored history",
            key
        )))
    }
}

/// Reads and parses the list stored under `key`.
pub(crate) fn read_list<T: DeserializeOwned>(store: &SharedStore, key: &str) -> AppResult<Vec<T>> {
    let Some(raw) = store.get(key)? else {
        debug!("No value under {}, starting empty", key);
        return Ok(Vec::new());
    };

    serde_json::from_str(&raw).map_err(|source| AppError::CorruptStore {
        key: key.to_string(),
        source,
    })
}

/// Serializes a list for storage under `key`.
pub(crate) fn encode_list<T: Serialize>(key: &str, items: &[T]) -> Result<String, StoreError> {
    serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Copies the raw value under `key` to `<key>.corrupt.<millis>`.
///
/// Recovering from a corrupt list means continuing with an empty one, and the
/// next save would overwrite the unreadable value. Quarantining first keeps
/// the original bytes for later inspection. Returns the quarantine key, or
/// `None` when nothing was stored under `key`.
pub fn quarantine_corrupt(
    store: &SharedStore,
    key: &str,
    now: DateTime<Utc>,
) -> AppResult<Option<String>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    let quarantine_key = format!("{}{}{}", key, CORRUPT_KEY_INFIX, now.timestamp_millis());
    store.set(&quarantine_key, &raw)?;
    warn!("Copied unreadable value of {} to {}", key, quarantine_key);
    Ok(Some(quarantine_key))
}
