//! Scoped access to the external audio capability.
//!
//! The platform owns microphones and speakers. [`AudioCapability`] is the
//! seam through which wellspring asks for them, and [`AudioSession`] enforces
//! the handle discipline: at most one live recording and one live playback,
//! the previous handle released before a new one is acquired, and every
//! handle released when the session is dropped.

use crate::errors::AudioError;
use tracing::{debug, warn};

/// Options passed to the capability before recording or playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    pub allows_recording: bool,
    pub plays_in_silent_mode: bool,
}

impl AudioMode {
    /// Mode used while a voice note is being recorded.
    pub const RECORDING: AudioMode = AudioMode {
        allows_recording: true,
        plays_in_silent_mode: true,
    };

    /// Mode restored once recording stops.
    pub const PLAYBACK: AudioMode = AudioMode {
        allows_recording: false,
        plays_in_silent_mode: true,
    };
}

/// A live recording. Stopping it yields the locator of the saved audio.
pub trait RecordingHandle {
    fn stop(self) -> Result<String, AudioError>;
}

/// A live playback.
pub trait PlaybackHandle {
    fn unload(self) -> Result<(), AudioError>;
}

/// The platform audio service.
pub trait AudioCapability {
    type Recording: RecordingHandle;
    type Playback: PlaybackHandle;

    /// Asks for microphone access; `Ok(false)` means the user declined.
    fn request_permission(&mut self) -> Result<bool, AudioError>;

    fn set_mode(&mut self, mode: AudioMode) -> Result<(), AudioError>;

    fn start_recording(&mut self) -> Result<Self::Recording, AudioError>;

    fn play_from_locator(&mut self, locator: &str) -> Result<Self::Playback, AudioError>;
}

/// Owns at most one recording and one playback handle.
pub struct AudioSession<C: AudioCapability> {
    capability: C,
    recording: Option<C::Recording>,
    playback: Option<C::Playback>,
}

impl<C: AudioCapability> AudioSession<C> {
    pub fn new(capability: C) -> Self {
        AudioSession {
            capability,
            recording: None,
            playback: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Starts a new recording, discarding any recording already in progress.
    ///
    /// # Errors
    ///
    /// `AudioError::PermissionDenied` if microphone access is refused, or
    /// whatever the capability reports (e.g. `DeviceBusy`).
    pub fn start_recording(&mut self) -> Result<(), AudioError> {
        if !self.capability.request_permission()? {
            return Err(AudioError::PermissionDenied);
        }

        if let Some(previous) = self.recording.take() {
            debug!("Discarding unfinished recording before starting a new one");
            if let Err(e) = previous.stop() {
                warn!("Failed to stop previous recording: {}", e);
            }
        }

        self.capability.set_mode(AudioMode::RECORDING)?;
        self.recording = Some(self.capability.start_recording()?);
        debug!("Recording started");
        Ok(())
    }

    /// Stops the current recording and returns its locator.
    pub fn stop_recording(&mut self) -> Result<String, AudioError> {
        let recording = self.recording.take().ok_or(AudioError::NoActiveRecording)?;
        let locator = recording.stop()?;
        self.capability.set_mode(AudioMode::PLAYBACK)?;
        debug!("Recording stopped");
        Ok(locator)
    }

    /// Plays the audio behind `locator`, unloading any previous playback first.
    pub fn play(&mut self, locator: &str) -> Result<(), AudioError> {
        self.stop_playback()?;
        self.playback = Some(self.capability.play_from_locator(locator)?);
        Ok(())
    }

    /// Unloads the current playback, if any.
    pub fn stop_playback(&mut self) -> Result<(), AudioError> {
        match self.playback.take() {
            Some(playback) => playback.unload(),
            None => Ok(()),
        }
    }
}

impl<C: AudioCapability> Drop for AudioSession<C> {
    fn drop(&mut self) {
        if let Some(recording) = self.recording.take() {
            if let Err(e) = recording.stop() {
                warn!("Failed to stop recording on teardown: {}", e);
            }
        }
        if let Some(playback) = self.playback.take() {
            if let Err(e) = playback.unload() {
                warn!("Failed to unload playback on teardown: {}", e);
            }
        }
    }
}
