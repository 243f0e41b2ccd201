//! Speakers and the on/off edge tracker that drives them.

use std::error::Error;

use rodio::{source::SineWave, OutputStream, OutputStreamHandle, Sink, Source};

/// One period of the tone spans 200 samples at 44.1 kHz.
pub const TONE_HZ: f32 = 44_100.0 / 200.0;
const TONE_VOLUME: f32 = 0.25;

/// Something that can play and stop a fixed tone.
pub trait Speaker {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Continuous sine wave on the default output device.
pub struct Beeper {
    sink: Sink,
    // Dropping the stream closes the device, so it lives as long as the sink.
    _stream: OutputStream,
    _handle: OutputStreamHandle,
}

impl Beeper {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.append(SineWave::new(TONE_HZ).amplify(TONE_VOLUME));
        sink.pause();
        Ok(Self {
            sink,
            _stream: stream,
            _handle: handle,
        })
    }
}

impl Speaker for Beeper {
    fn start(&mut self) {
        self.sink.play();
    }

    fn stop(&mut self) {
        self.sink.pause();
    }
}

/// Speaker that never makes a sound.
#[derive(Default)]
pub struct Silent;

impl Speaker for Silent {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

/// Turns the per-tick "sound timer running" flag into start/stop calls on transitions only.
pub struct Tone {
    speaker: Box<dyn Speaker>,
    playing: bool,
}

impl Tone {
    pub fn new(speaker: Box<dyn Speaker>) -> Self {
        Self {
            speaker,
            playing: false,
        }
    }

    /// Rodio output unless muted.
    pub fn open(mute: bool) -> Result<Self, Box<dyn Error>> {
        if mute {
            return Ok(Self::new(Box::new(Silent)));
        }
        Ok(Self::new(Box::new(Beeper::new()?)))
    }

    pub fn update(&mut self, active: bool) {
        if active && !self.playing {
            self.speaker.start();
        } else if !active && self.playing {
            self.speaker.stop();
        }
        self.playing = active;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}
