//! Sound cues emitted by the simulation
//!
//! The core never synthesizes audio. It queues [`SoundCue`]s as state changes
//! happen and the host drains them into whatever [`AudioSink`] it owns.

use serde::{Deserialize, Serialize};

use crate::sim::asteroid::AsteroidSize;

/// Explosion sizes, loudest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosionSize {
    Large,
    Medium,
    Small,
}

impl From<AsteroidSize> for ExplosionSize {
    fn from(size: AsteroidSize) -> Self {
        match size {
            AsteroidSize::Large => ExplosionSize::Large,
            AsteroidSize::Medium => ExplosionSize::Medium,
            AsteroidSize::Small => ExplosionSize::Small,
        }
    }
}

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player fired
    Shoot,
    /// UFO fired
    UfoShoot,
    /// Something blew up
    Explosion(ExplosionSize),
    /// One frame of thrust
    ThrustTick,
    /// Ship destroyed
    Death,
    /// Wave cleared, next level started
    LevelUp,
    /// Hyperspace triggered
    Hyperspace,
    UfoEngineStart,
    UfoEngineStop,
    GravityWellSpawn,
    GravityWellDespawn,
    /// Current gravity well loudness in [0, 1]
    GravityWellIntensity(f32),
}

/// Receiver for sound cues (the host's synthesizer)
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Collecting sink, handy for tests and recording
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<SoundCue> = Vec::new();
        sink.play(SoundCue::Shoot);
        sink.play(SoundCue::Explosion(AsteroidSize::Large.into()));
        assert_eq!(
            sink,
            vec![SoundCue::Shoot, SoundCue::Explosion(ExplosionSize::Large)]
        );
    }
}
