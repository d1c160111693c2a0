//! Sound effect routing
//!
//! The sim emits `GameEvent`s; this module decides which of them make a sound
//! and how loud. Actual playback belongs to an `AudioSink`.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Actor jumped
    Jump,
    /// Actor hit an obstacle
    Hit,
    /// Obstacle cleared
    Score,
    /// Round ended
    GameOver,
}

impl SoundEffect {
    /// The effect for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(Self::Jump),
            GameEvent::Hit { .. } => Some(Self::Hit),
            GameEvent::Score { .. } => Some(Self::Score),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            GameEvent::TriviaRequested { .. } | GameEvent::TriviaDismissed | GameEvent::Restart => {
                None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Hit => "hit",
            SoundEffect::Score => "score",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn set_music(&mut self, playing: bool, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {:.2}", effect.as_str(), volume);
    }

    fn set_music(&mut self, playing: bool, volume: f32) {
        log::debug!("music playing={} @ {:.2}", playing, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_paused: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        let mut manager = Self {
            sink,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            muted: settings.muted,
            music_paused: false,
        };
        manager.sync_music();
        manager
    }

    fn sync_music(&mut self) {
        let playing = !self.muted && !self.music_paused;
        self.sink.set_music(playing, self.music_volume);
    }

    /// Play whatever sound `event` calls for
    pub fn handle(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }
        if let Some(effect) = SoundEffect::for_event(event) {
            self.sink.play(effect, self.sfx_volume);
        }
    }

    /// Pause or resume background music (sound effects are unaffected)
    pub fn toggle_music(&mut self) {
        self.music_paused = !self.music_paused;
        self.sync_music();
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
