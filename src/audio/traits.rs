use crate::audio::error::AudioError;

/// Output side of the player. `play` replaces whatever was loaded before.
pub trait PlaybackBackend: Send + Sync {
    fn play(&mut self, url: &str) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn resume(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self);

    /// True once the loaded source has played to its end.
    fn is_finished(&self) -> bool;
}

/// Rejects every play request.
#[derive(Debug, Default)]
pub struct UnavailableBackend;

impl PlaybackBackend for UnavailableBackend {
    fn play(&mut self, _url: &str) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }

    fn pause(&mut self) {}

    fn resume(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }

    fn stop(&mut self) {}

    fn is_finished(&self) -> bool {
        false
    }
}
