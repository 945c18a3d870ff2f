use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::audio::error::AudioError;

pub fn construct_sink() -> Result<(OutputStream, Sink), AudioError> {
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| AudioError::DeviceError(e.to_string()))?;
    stream.log_on_drop(false);
    let sink = Sink::connect_new(stream.mixer());

    Ok((stream, sink))
}
