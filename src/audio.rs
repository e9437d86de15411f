//! Audio collaborator interface
//!
//! The simulation only names sound events. Whatever plays them sits behind
//! [`AudioSink`] and is fed fire-and-forget from the host loop.

use serde::{Deserialize, Serialize};

/// Sound effect triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a side or top wall
    WallHit,
    /// Ball hits or breaks a brick
    BrickHit,
    /// Explosive brick goes off
    Explosion,
    /// Ball hits an unbreakable brick
    MetalHit,
    /// Fire ball burns through a brick
    FireHit,
    /// Last ball fell out
    LifeLost,
    LevelComplete,
    GameOver,
    MenuMove,
    MenuSelect,
    /// Bonus collected
    Powerup,
}

impl SoundEffect {
    /// Asset-style name (`paddle_hit`, `wall_hit`, ...)
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::WallHit => "wall_hit",
            SoundEffect::BrickHit => "brick_hit",
            SoundEffect::Explosion => "explosion",
            SoundEffect::MetalHit => "metal_hit",
            SoundEffect::FireHit => "fire_hit",
            SoundEffect::LifeLost => "life_lost",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::GameOver => "game_over",
            SoundEffect::MenuMove => "menu_move",
            SoundEffect::MenuSelect => "menu_select",
            SoundEffect::Powerup => "powerup",
        }
    }
}

/// Something that can play sounds
pub trait AudioSink {
    /// Start playing `effect` at `volume` (0-1). Must not block.
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that drops everything (no audio device)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Sink that writes each trigger to the debug log
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sound {} @ {:.2}", effect.name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        self.sink.play(effect, vol);
    }

    /// Number of effects forwarded to the sink
    pub fn played(&self) -> u64 {
        self.played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_volume_and_mute() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())));
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::PaddleHit);
        audio.set_muted(true);
        audio.play(SoundEffect::WallHit);

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, SoundEffect::PaddleHit);
        assert!((log[0].1 - 0.4).abs() < 1e-6);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_master_volume_scales_and_silences() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())));
        audio.set_master_volume(2.0);
        audio.play(SoundEffect::BrickHit);
        audio.set_master_volume(0.0);
        audio.play(SoundEffect::BrickHit);

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].1, 1.0);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_names_are_snake_case() {
        assert_eq!(SoundEffect::LevelComplete.name(), "level_complete");
        assert_eq!(SoundEffect::Powerup.name(), "powerup");
    }
}
