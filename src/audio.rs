//! Audio routing
//!
//! The core only emits [`GameEvent`] signals. This module maps them to sound
//! assets and forwards them to whatever player the host provides.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle or wall
    Bounce,
    /// Ball breaks a brick
    BrickBreak,
    /// Game over jingle
    GameOver,
}

impl SoundEffect {
    /// Effect for a signal. The ball vanishing is silent; the game-over
    /// jingle that follows carries it.
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleImpact | GameEvent::WallImpact => Some(SoundEffect::Bounce),
            GameEvent::BrickImpact => Some(SoundEffect::BrickBreak),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Loss => None,
        }
    }

    /// Asset name the player loads
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Bounce => "impact1",
            SoundEffect::BrickBreak => "impact2",
            SoundEffect::GameOver => "gameOver",
        }
    }
}

/// Host-side sound output
pub trait SoundPlayer {
    fn play(&mut self, asset: &str, volume: f32);
    fn set_background_muted(&mut self, muted: bool);
}

/// Forwards game signals to a [`SoundPlayer`]
pub struct AudioRouter<P> {
    player: P,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<P: SoundPlayer> AudioRouter<P> {
    pub fn new(player: P, settings: &Settings) -> Self {
        let mut router = Self {
            player,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        };
        router.apply_settings(settings);
        router
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
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

    /// Play the sound for one signal
    pub fn handle(&mut self, event: GameEvent) {
        if event == GameEvent::GameOver {
            self.player.set_background_muted(true);
        }
        let Some(effect) = SoundEffect::for_event(event) else { return };
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.player.play(effect.asset(), vol);
    }

    pub fn handle_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

/// Player that only logs what it would play
#[derive(Debug, Default)]
pub struct LogPlayer;

impl SoundPlayer for LogPlayer {
    fn play(&mut self, asset: &str, volume: f32) {
        log::debug!("play {asset} at {volume:.2}");
    }

    fn set_background_muted(&mut self, muted: bool) {
        log::debug!("background music muted: {muted}");
    }
}
