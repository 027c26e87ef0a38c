//! Sound effect requests derived from simulation events
//!
//! Playback happens in the host; this module only decides which effect to
//! play and how loud.

use serde::{Deserialize, Serialize};

use crate::settings::AudioSettings;
use crate::sim::SimEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball strikes ball; loudness follows impact strength
    BallHit,
    /// Ball bounces off a cushion
    CushionHit,
    /// Object ball drops
    Pocket,
    /// Cue ball drops
    Scratch,
    /// Cue struck
    Shot,
    /// Last object ball pocketed
    RoundOver,
}

impl SoundEffect {
    /// Base loudness before volume settings
    fn base_gain(self) -> f32 {
        match self {
            SoundEffect::BallHit => 1.0,
            SoundEffect::CushionHit => 0.3,
            SoundEffect::Pocket => 0.6,
            SoundEffect::Scratch => 0.5,
            SoundEffect::Shot => 0.4,
            SoundEffect::RoundOver => 0.5,
        }
    }
}

/// A single playback request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundCue {
    pub effect: SoundEffect,
    /// Final gain in `[0, 1]`
    pub gain: f32,
}

/// Implemented by the host's audio backend
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Turns events into sound cues according to volume settings
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new(&AudioSettings::default())
    }
}

impl AudioMixer {
    pub fn new(settings: &AudioSettings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
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

    /// Sound for one event, or `None` if it would be silent
    pub fn cue_for(&self, event: &SimEvent) -> Option<SoundCue> {
        let (effect, intensity) = match *event {
            SimEvent::BallCollision { strength, .. } => (SoundEffect::BallHit, strength),
            SimEvent::WallHit { .. } => (SoundEffect::CushionHit, 1.0),
            SimEvent::Pocketed { .. } => (SoundEffect::Pocket, 1.0),
            SimEvent::Scratch { .. } => (SoundEffect::Scratch, 1.0),
            SimEvent::Shot { .. } => (SoundEffect::Shot, 1.0),
            SimEvent::RoundOver => (SoundEffect::RoundOver, 1.0),
            SimEvent::TableReset => return None,
        };
        let gain = (effect.base_gain() * intensity * self.effective_volume()).clamp(0.0, 1.0);
        (gain > 0.0).then_some(SoundCue { effect, gain })
    }

    /// Send every audible event to `sink`, returning how many cues were played
    pub fn dispatch(&self, events: &[SimEvent], sink: &mut impl AudioSink) -> usize {
        let mut played = 0;
        for cue in events.iter().filter_map(|e| self.cue_for(e)) {
            sink.play(cue);
            played += 1;
        }
        played
    }
}
