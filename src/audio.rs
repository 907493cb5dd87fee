use log::debug;

use crate::store::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundId {
    MenuMusic,
    GameMusic,
    Eat,
    DeathBySelf,
    DeathByWall,
}

impl SoundId {
    fn is_music(self) -> bool {
        matches!(self, SoundId::MenuMusic | SoundId::GameMusic)
    }
}

// Fire-and-forget playback seam. The simulation never waits on audio, so a
// backend only needs these three calls.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId, looped: bool);
    fn stop(&mut self, sound: SoundId);
    fn set_volume(&mut self, sound: SoundId, volume: f32);
}

// Headless backend for terminals without a mixer; playback only shows up in
// the log.
#[derive(Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, sound: SoundId, looped: bool) {
        debug!("audio: play {:?} (looped: {})", sound, looped);
    }

    fn stop(&mut self, sound: SoundId) {
        debug!("audio: stop {:?}", sound);
    }

    fn set_volume(&mut self, sound: SoundId, volume: f32) {
        debug!("audio: {:?} volume {:.2}", sound, volume);
    }
}

pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    pub music_volume: u8,
    pub sfx_volume: u8,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, settings: Settings) -> Self {
        let mut manager = AudioManager {
            sink,
            music_volume: settings.music_volume,
            sfx_volume: settings.sfx_volume,
        };
        manager.apply_volumes();
        manager
    }

    pub fn play(&mut self, sound: SoundId) {
        self.sink.play(sound, sound.is_music());
    }

    pub fn stop(&mut self, sound: SoundId) {
        self.sink.stop(sound);
    }

    pub fn set_music_volume(&mut self, volume: u8) {
        self.music_volume = volume.min(100);
        self.apply_volumes();
    }

    pub fn set_sfx_volume(&mut self, volume: u8) {
        self.sfx_volume = volume.min(100);
        self.apply_volumes();
    }

    fn apply_volumes(&mut self) {
        for sound in [SoundId::MenuMusic, SoundId::GameMusic] {
            self.sink.set_volume(sound, self.music_volume as f32 / 100.0);
        }
        for sound in [SoundId::Eat, SoundId::DeathBySelf, SoundId::DeathByWall] {
            self.sink.set_volume(sound, self.sfx_volume as f32 / 100.0);
        }
    }
}
