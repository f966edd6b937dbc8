//! Voice-note support.
//!
//! wellspring never touches audio bytes. Recording and playback belong to an
//! external capability (see [`session`]); this module only remembers which
//! locator belongs to which journal entry.
//!
//! Locators are stored one per key, `audio_<entry id>`, separately from the
//! entry list.

pub mod session;

pub use session::{AudioCapability, AudioMode, AudioSession, PlaybackHandle, RecordingHandle};

use crate::constants::AUDIO_KEY_PREFIX;
use crate::errors::AppResult;
use crate::store::SharedStore;
use tracing::debug;

/// Returns the store key holding the locator for entry `id`.
///
/// ```
/// assert_eq!(wellspring::audio::audio_key(1700000000000), "audio_1700000000000");
/// ```
pub fn audio_key(id: i64) -> String {
    format!("{}{}", AUDIO_KEY_PREFIX, id)
}

/// Maps entry ids to audio locators.
pub struct AudioReferences {
    store: SharedStore,
}

impl AudioReferences {
    pub fn new(store: SharedStore) -> Self {
        AudioReferences { store }
    }

    /// Stores `uri` as the locator for entry `id`, replacing any previous one.
    pub fn attach(&self, id: i64, uri: &str) -> AppResult<()> {
        self.store.set(&audio_key(id), uri)?;
        debug!("Attached audio locator to entry {}", id);
        Ok(())
    }

    /// Looks up the locator for entry `id`.
    ///
    /// `None` is a normal answer, including for entries flagged `has_audio`
    /// whose locator write never landed; treat it as "audio unavailable".
    pub fn resolve(&self, id: i64) -> AppResult<Option<String>> {
        Ok(self.store.get(&audio_key(id))?)
    }

    /// Forgets the locator for entry `id`. The audio resource itself is left
    /// to the capability that created it.
    pub fn clear(&self, id: i64) -> AppResult<()> {
        self.store.remove(&audio_key(id))?;
        debug!("Cleared audio locator of entry {}", id);
        Ok(())
    }
}
