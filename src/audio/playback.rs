use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use flume::{Receiver, RecvTimeoutError, Sender};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, info, warn};

use crate::audio::{
    commands::EngineCommand,
    error::AudioError,
    source::{BlobRegistry, MediaSource},
    traits::PlaybackBackend,
    util::construct_sink,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct PlaybackEngine {
    _stream: OutputStream,
    sink: Sink,
    blobs: BlobRegistry,
}

impl PlaybackEngine {
    fn new(blobs: BlobRegistry) -> Result<Self, AudioError> {
        let (stream, sink) = construct_sink()?;
        Ok(Self {
            _stream: stream,
            sink,
            blobs,
        })
    }

    fn run(self, rx: Receiver<EngineCommand>, finished: Arc<AtomicBool>) {
        let mut active = false;
        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(EngineCommand::Play { url, reply }) => {
                    let result = self.load(&url);
                    if result.is_ok() {
                        active = true;
                        finished.store(false, Ordering::SeqCst);
                    }
                    let _ = reply.send(result);
                }
                Ok(EngineCommand::Pause) => self.sink.pause(),
                Ok(EngineCommand::Resume) => self.sink.play(),
                Ok(EngineCommand::Stop) => {
                    self.sink.stop();
                    active = false;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if active && self.sink.empty() {
                active = false;
                finished.store(true, Ordering::SeqCst);
                debug!("audio_engine_source_finished");
            }
        }
        info!("audio_engine_stopped");
    }

    fn load(&self, url: &str) -> Result<(), AudioError> {
        let source = MediaSource::parse(url);
        let bytes = match self.blobs.local_path(&source)? {
            Some(path) => std::fs::read(&path)
                .map_err(|e| AudioError::SourceNotFound(format!("{}: {e}", path.display())))?,
            None => fetch(url)?,
        };
        let decoder = Decoder::new(Cursor::new(bytes))
            .map_err(|e| AudioError::DecodingError(e.to_string()))?;

        self.sink.stop();
        self.sink.append(decoder);
        self.sink.play();
        Ok(())
    }
}

fn fetch(url: &str) -> Result<Vec<u8>, AudioError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| AudioError::NetworkError(e.to_string()))?;
    let bytes = response
        .bytes()
        .map_err(|e| AudioError::NetworkError(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// `rodio` output running on its own thread, driven over a command channel.
pub struct RodioBackend {
    tx: Sender<EngineCommand>,
    finished: Arc<AtomicBool>,
}

impl RodioBackend {
    pub fn spawn(blobs: BlobRegistry) -> Result<Self, AudioError> {
        let (tx, rx) = flume::unbounded();
        let (ready_tx, ready_rx) = flume::bounded(1);
        let finished = Arc::new(AtomicBool::new(false));
        let engine_finished = finished.clone();

        std::thread::Builder::new()
            .name("lessonbox-audio".into())
            .spawn(move || match PlaybackEngine::new(blobs) {
                Ok(engine) => {
                    let _ = ready_tx.send(Ok(()));
                    engine.run(rx, engine_finished);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })
            .map_err(|e| AudioError::DeviceError(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|e| AudioError::DeviceError(e.to_string()))??;

        info!("audio_engine_started");
        Ok(Self { tx, finished })
    }

    fn send(&self, cmd: EngineCommand) {
        if self.tx.send(cmd).is_err() {
            warn!("audio_engine_gone");
        }
    }
}

impl PlaybackBackend for RodioBackend {
    fn play(&mut self, url: &str) -> Result<(), AudioError> {
        let (reply, reply_rx) = flume::bounded(1);
        self.tx
            .send(EngineCommand::Play {
                url: url.to_string(),
                reply,
            })
            .map_err(|_| AudioError::DeviceError("audio engine stopped".into()))?;
        reply_rx
            .recv()
            .map_err(|_| AudioError::DeviceError("audio engine stopped".into()))?
    }

    fn pause(&mut self) {
        self.send(EngineCommand::Pause);
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.send(EngineCommand::Resume);
        Ok(())
    }

    fn stop(&mut self) {
        self.send(EngineCommand::Stop);
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}
