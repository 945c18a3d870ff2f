pub mod controller;
pub mod error;
pub mod source;
pub mod state;
pub mod traits;

#[cfg(feature = "playback")]
pub mod commands;
#[cfg(feature = "playback")]
pub mod playback;
#[cfg(feature = "playback")]
pub mod util;

use tracing::warn;

use crate::audio::{
    source::BlobRegistry,
    traits::{PlaybackBackend, UnavailableBackend},
};

#[cfg(feature = "playback")]
pub fn default_backend(blobs: &BlobRegistry) -> Box<dyn PlaybackBackend> {
    match playback::RodioBackend::spawn(blobs.clone()) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!(error = %e, "audio_output_unavailable");
            Box::new(UnavailableBackend)
        }
    }
}

#[cfg(not(feature = "playback"))]
pub fn default_backend(_blobs: &BlobRegistry) -> Box<dyn PlaybackBackend> {
    warn!("audio_output_not_compiled_in");
    Box::new(UnavailableBackend)
}
