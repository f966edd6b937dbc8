//! Sleep log repository.

use super::{encode_list, ensure_loaded, quarantine_corrupt, read_list};
use crate::constants::{DEFAULT_SLEEP_QUALITY, SLEEP_ENTRIES_KEY};
use crate::errors::AppResult;
use crate::journal_core::{next_id, validate_sleep_entry, SleepEntry};
use crate::store::SharedStore;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

/// Owns the sleep log and its persistence cycle.
///
/// Same contract as [`JournalRepository`](super::JournalRepository): append
/// only, full-list writes, in-memory state untouched on failure, no
/// appends before hydration.
pub struct SleepRepository {
    store: SharedStore,
    entries: Vec<SleepEntry>,
    loaded: bool,
}

impl SleepRepository {
    pub fn new(store: SharedStore) -> Self {
        SleepRepository {
            store,
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Replaces the in-memory log with the persisted one.
    ///
    /// # Errors
    ///
    /// `AppError::CorruptStore` if the stored value cannot be parsed, or
    /// `AppError::Persistence` if it cannot be read. Either way the
    /// in-memory log is left empty and unloaded.
    pub fn load(&mut self) -> AppResult<&[SleepEntry]> {
        self.entries.clear();
        self.loaded = false;
        self.entries = read_list(&self.store, SLEEP_ENTRIES_KEY)?;
        self.loaded = true;
        info!("Loaded {} sleep entries", self.entries.len());
        Ok(&self.entries)
    }

    pub fn entries(&self) -> &[SleepEntry] {
        &self.entries
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Logs a night of sleep and persists the whole log.
    ///
    /// `date` defaults to the calendar day of `now`; a blank `quality`
    /// defaults to "Good". Fails with `AppError::Journal` before the log has
    /// been loaded.
    pub fn append(
        &mut self,
        hours: f64,
        quality: &str,
        date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<SleepEntry>> {
        ensure_loaded(self.loaded, SLEEP_ENTRIES_KEY)?;
        let hours = validate_sleep_entry(hours)?;
        let quality = match quality.trim() {
            "" => DEFAULT_SLEEP_QUALITY,
            trimmed => trimmed,
        };

        let last_id = self.entries.iter().map(|entry| entry.id).max();
        let entry = SleepEntry {
            id: next_id(now, last_id),
            hours,
            quality: quality.to_string(),
            date: date.unwrap_or_else(|| now.date_naive()),
            timestamp: now,
        };
        let id = entry.id;

        let mut updated = self.entries.clone();
        updated.push(entry);
        let encoded = encode_list(SLEEP_ENTRIES_KEY, &updated)?;

        self.store.set(SLEEP_ENTRIES_KEY, &encoded)?;
        self.entries = updated;

        info!("Saved sleep entry {} ({} hours)", id, hours);
        Ok(self.entries.clone())
    }

    /// Copies the unparseable sleep log to a quarantine key and continues
    /// with an empty, loaded log.
    pub fn quarantine_corrupt(&mut self, now: DateTime<Utc>) -> AppResult<Option<String>> {
        let quarantined = quarantine_corrupt(&self.store, SLEEP_ENTRIES_KEY, now)?;
        self.entries.clear();
        self.loaded = true;
        Ok(quarantined)
    }
}
