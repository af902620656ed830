//! Gravity well: a transient field pulling the player toward its centre
//!
//! The pull has constant magnitude inside the pull radius so a thrusting ship
//! can always fight its way out. Fade and pulse values only drive visuals and
//! the audio intensity cue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, Lifetime, update_timed};

/// Seconds to fade in after spawning
pub const FADE_IN: f32 = 0.5;
/// Seconds of fade-out at the end of the lifetime
pub const FADE_OUT: f32 = 1.0;
/// Inside this distance from the centre the pull is switched off
pub const DEAD_ZONE: f32 = 1.0;

/// Visual spin of the swirl (rad/s)
const SPIN_RATE: f32 = 1.2;
/// Pulse frequency (rad/s of phase)
const PULSE_RATE: f32 = 4.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityWell {
    pub body: Body,
    pub lifetime: Lifetime,
    /// Total lifetime the well was spawned with
    pub duration: f32,
    /// Magnitude of the pull (px/s²)
    pub pull_strength: f32,
    /// Beyond this distance the well has no effect
    pub pull_radius: f32,
    /// Seconds since spawn
    pub age: f32,
    /// Pulse phase in radians
    pub pulse_phase: f32,
}

impl Entity for GravityWell {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        update_timed(&mut self.body, &mut self.lifetime, dt);
        self.age += dt;
        self.pulse_phase = (self.pulse_phase + PULSE_RATE * dt) % std::f32::consts::TAU;
    }
}

impl GravityWell {
    pub fn new(
        position: Vec2,
        duration: f32,
        pull_strength: f32,
        pull_radius: f32,
        core_radius: f32,
    ) -> Self {
        let mut body = Body::new(position, core_radius);
        body.angular_velocity = SPIN_RATE;
        Self {
            body,
            lifetime: Lifetime::new(duration),
            duration,
            pull_strength,
            pull_radius,
            age: 0.0,
            pulse_phase: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.position()
    }

    /// Pull acceleration felt at `point`
    ///
    /// Zero outside the pull radius and inside the dead zone, otherwise
    /// exactly `pull_strength` toward the centre.
    pub fn pull_force(&self, point: Vec2) -> Vec2 {
        if !self.body.active {
            return Vec2::ZERO;
        }
        let to_center = self.center() - point;
        let distance = to_center.length();
        if distance > self.pull_radius || distance < DEAD_ZONE {
            return Vec2::ZERO;
        }
        to_center / distance * self.pull_strength
    }

    /// Fade-in/fade-out envelope in [0, 1]
    pub fn intensity(&self) -> f32 {
        let fade_in = (self.age / FADE_IN).min(1.0);
        let fade_out = (self.lifetime.remaining / FADE_OUT).min(1.0);
        fade_in.min(fade_out).clamp(0.0, 1.0)
    }

    /// Pulse multiplier around 1.0 for the swirl radius
    pub fn pulse(&self) -> f32 {
        1.0 + 0.12 * self.pulse_phase.sin()
    }
}
