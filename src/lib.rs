//! Vector Rocks - simulation core for a vector arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state machine)
//! - `renderer`: Per-frame render snapshot for an external vector renderer
//! - `audio`: Sound cues emitted by the simulation
//! - `highscores`: Score service boundary and local leaderboard
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use audio::{AudioSink, SoundCue};
pub use highscores::{HighScores, ScoreError, ScoreService};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame timestep used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest dt a single tick accepts; longer stalls are clamped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play-field dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Lives at the start of a session
    pub const STARTING_LIVES: u32 = 3;
    /// Large asteroids in the level-1 wave
    pub const STARTING_ASTEROIDS: u32 = 4;

    /// Rejection sampling gives up after this many candidates
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10;

    /// Score service requests fail after this many seconds
    pub const SCORE_REQUEST_TIMEOUT: f32 = 5.0;
    /// Entries requested for the leaderboard view
    pub const LEADERBOARD_SIZE: usize = 10;
}

/// Play-field rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(consts::SCREEN_WIDTH, consts::SCREEN_HEIGHT)
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle`
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    direction(theta) * r
}

/// Bearing from `from` to `to` in radians
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
