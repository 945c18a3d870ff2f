use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Playback rejected: {0}")]
    Rejected(String),

    #[error("Audio playback is not available in this build")]
    Unavailable,
}
