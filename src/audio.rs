//! Sound effects. Real playback needs the `audio` feature; without it the
//! manager keeps the same API and stays silent.

use std::path::Path;

#[cfg(feature = "audio")]
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
#[cfg(feature = "audio")]
use std::{fs::File, io::BufReader};

/// Volume for the player's shots
#[cfg(feature = "audio")]
const FIRE_VOLUME: f32 = 0.05;

/// Audio manager for playing sound effects
#[cfg(feature = "audio")]
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    /// Pre-loaded and buffered fire sound
    fire_sound: Buffered<Decoder<BufReader<File>>>,
}

#[cfg(feature = "audio")]
impl AudioManager {
    /// Opens the default output device and pre-loads the fire sound.
    pub fn new(fire_sound_path: &Path) -> color_eyre::Result<Self> {
        use color_eyre::eyre::WrapErr;

        let (stream, stream_handle) =
            OutputStream::try_default().wrap_err("failed to open audio output")?;
        let file = File::open(fire_sound_path)
            .wrap_err_with(|| format!("failed to open {}", fire_sound_path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .wrap_err_with(|| format!("failed to decode {}", fire_sound_path.display()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            fire_sound: source.buffered(),
        })
    }

    pub fn play_fire_sound(&self) {
        // Playback errors are not worth interrupting the game for
        match Sink::try_new(&self.stream_handle) {
            Ok(sink) => {
                sink.set_volume(FIRE_VOLUME);
                sink.append(self.fire_sound.clone());
                sink.detach();
            }
            Err(err) => log::warn!("Failed to play fire sound: {err}"),
        }
    }
}

/// Silent stand-in used when the crate is built without `audio`
#[cfg(not(feature = "audio"))]
pub struct AudioManager;

#[cfg(not(feature = "audio"))]
impl AudioManager {
    pub fn new(_fire_sound_path: &Path) -> color_eyre::Result<Self> {
        log::info!("Built without the audio feature, sound is disabled");
        Ok(Self)
    }

    pub fn play_fire_sound(&self) {}
}

/// Opens audio if possible; the game runs silently otherwise.
pub fn try_init(fire_sound_path: &Path) -> Option<AudioManager> {
    match AudioManager::new(fire_sound_path) {
        Ok(audio) => Some(audio),
        Err(err) => {
            log::warn!("Continuing without audio: {err:#}");
            None
        }
    }
}
