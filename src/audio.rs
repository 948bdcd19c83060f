use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

use crate::error::GameError;

const FIRE_VOLUME: f32 = 0.3;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Plays the beam-fire sound effect.
///
/// Silent when no sound is configured or no output device could be opened.
/// A configured sound file that cannot be read is an error.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    fire_sound: Option<Sound>,
}

impl AudioManager {
    /// Creates a manager that never plays anything
    pub fn silent() -> Self {
        Self {
            output: None,
            fire_sound: None,
        }
    }

    /// Loads and buffers the fire sound, then opens the default output device
    pub fn new(fire_sound: Option<&Path>) -> Result<Self, GameError> {
        let Some(path) = fire_sound else {
            return Ok(Self::silent());
        };
        let sound = load_sound(path)?;

        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!(%err, "no audio output device, continuing without sound");
                None
            }
        };
        info!(path = %path.display(), "loaded fire sound");
        Ok(Self {
            output,
            fire_sound: Some(sound),
        })
    }

    pub fn is_audible(&self) -> bool {
        self.output.is_some() && self.fire_sound.is_some()
    }

    /// Plays the fire sound on a detached sink
    pub fn play_fire_sound(&self) {
        let (Some((_, handle)), Some(sound)) = (&self.output, &self.fire_sound) else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(FIRE_VOLUME);
                sink.append(sound.clone());
                sink.detach();
            }
            Err(err) => warn!(%err, "could not play fire sound"),
        }
    }
}

fn load_sound(path: &Path) -> Result<Sound, GameError> {
    let file = File::open(path).map_err(|_| GameError::AssetMissing {
        path: path.to_path_buf(),
    })?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| GameError::AssetDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(source.buffered())
}
