use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::catalog::Track;
use crate::error::{PlayerError, Result};
use crate::transport::{Transport, TransportHandle};

/// Audio output through rodio's mixer.
///
/// Owns the output stream; every loaded track gets its own sink connected to
/// the shared mixer.
pub struct RodioTransport {
    stream: OutputStream,
}

impl RodioTransport {
    pub fn new() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Transport(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a host application.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl Transport for RodioTransport {
    fn load(&self, track: &Track) -> Result<Arc<dyn TransportHandle>> {
        let file = File::open(&track.path)?;

        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlayerError::Transport(format!("failed to decode {:?}: {e}", track.path)))?;
        // Not every decoder knows the total length up front; the session falls
        // back to the cataloged duration, then to enrichment.
        let total = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();

        Ok(Arc::new(RodioHandle { sink, total }))
    }
}

struct RodioHandle {
    sink: Sink,
    total: Option<Duration>,
}

impl TransportHandle for RodioHandle {
    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn seek(&self, to: Duration) -> Result<()> {
        self.sink
            .try_seek(to)
            .map_err(|e| PlayerError::Transport(format!("seek failed: {e}")))
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.total
    }

    fn ended(&self) -> bool {
        self.sink.empty()
    }
}
