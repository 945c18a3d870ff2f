use flume::Sender;

use crate::audio::error::AudioError;

pub enum EngineCommand {
    Play {
        url: String,
        reply: Sender<Result<(), AudioError>>,
    },
    Pause,
    Resume,
    Stop,
}
