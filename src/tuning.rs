//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. Defaults
//! reproduce the shipped balance; a JSON document can override any subset.

use serde::{Deserialize, Serialize};

use crate::sim::asteroid::AsteroidSize;
use crate::sim::ufo::UfoSize;

/// Per-size asteroid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidTuning {
    pub radius: f32,
    pub min_vertices: u32,
    pub max_vertices: u32,
    /// Linear speed (px/s)
    pub speed: f32,
    pub points: u32,
}

/// Per-size UFO parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UfoTuning {
    pub radius: f32,
    /// Horizontal speed (px/s)
    pub speed: f32,
    pub points: u32,
    /// Half-width of the random aim offset (radians)
    pub aim_spread: f32,
    /// Seconds between shots at level 1
    pub fire_cooldown: f32,
}

/// Complete balance sheet for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    pub ship_radius: f32,
    /// Turn rate (rad/s)
    pub ship_turn_rate: f32,
    /// Thrust acceleration (px/s²)
    pub ship_thrust: f32,
    pub ship_max_speed: f32,
    pub ship_fire_cooldown: f32,
    /// Invulnerability granted by a respawn (seconds)
    pub respawn_invulnerability: f32,
    /// Delay between death and respawn (seconds)
    pub respawn_delay: f32,

    // === Hyperspace ===
    pub hyperspace_shrink: f32,
    pub hyperspace_warp: f32,
    pub hyperspace_expand: f32,
    pub hyperspace_cooldown: f32,
    /// Extra invulnerability after the ship reappears
    pub hyperspace_grace: f32,
    /// Keep teleport targets this far from the screen edges
    pub hyperspace_margin: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_radius: f32,
    pub ufo_bullet_speed: f32,

    // === Asteroids ===
    pub asteroid_large: AsteroidTuning,
    pub asteroid_medium: AsteroidTuning,
    pub asteroid_small: AsteroidTuning,
    /// Vertex radius varies within ±this fraction of the size radius
    pub asteroid_jaggedness: f32,
    /// Max spin (rad/s) either way
    pub asteroid_max_spin: f32,
    /// Jitter applied to the second split direction (radians, ±)
    pub split_jitter: f32,
    /// Half-side of the square kept clear around the avoid point at spawn
    pub spawn_exclusion: f32,

    // === UFO ===
    pub ufo_large: UfoTuning,
    pub ufo_small: UfoTuning,
    /// Vertical speed as a fraction of horizontal speed
    pub ufo_vertical_factor: f32,
    pub ufo_drift_min: f32,
    pub ufo_drift_max: f32,
    pub ufo_spawn_min: f32,
    pub ufo_spawn_max: f32,
    /// Small-UFO probability at level 1
    pub ufo_small_chance_base: f32,
    pub ufo_small_chance_per_level: f32,
    pub ufo_small_chance_max: f32,
    /// Fractional cooldown reduction per level
    pub ufo_cooldown_per_level: f32,
    /// Cooldown never drops below this fraction of its base
    pub ufo_cooldown_floor: f32,

    // === Gravity well ===
    pub well_spawn_min: f32,
    pub well_spawn_max: f32,
    pub well_duration_min: f32,
    pub well_duration_max: f32,
    pub well_pull_min: f32,
    pub well_pull_max: f32,
    pub well_pull_per_level: f32,
    pub well_pull_radius: f32,
    /// Radius of the visible core
    pub well_core_radius: f32,
    /// Minimum distance from the player at placement
    pub well_min_player_distance: f32,

    // === Debris ===
    pub debris_lifetime: f32,
    pub debris_min_speed: f32,
    pub debris_max_speed: f32,
    pub debris_max_spin: f32,

    // === Session ===
    pub game_over_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_radius: 12.0,
            ship_turn_rate: 4.5,
            ship_thrust: 220.0,
            ship_max_speed: 320.0,
            ship_fire_cooldown: 0.2,
            respawn_invulnerability: 3.0,
            respawn_delay: 2.0,

            hyperspace_shrink: 0.3,
            hyperspace_warp: 0.2,
            hyperspace_expand: 0.3,
            hyperspace_cooldown: 3.0,
            hyperspace_grace: 0.5,
            hyperspace_margin: 50.0,

            bullet_speed: 450.0,
            bullet_lifetime: 1.2,
            bullet_radius: 2.0,
            ufo_bullet_speed: 300.0,

            asteroid_large: AsteroidTuning {
                radius: 40.0,
                min_vertices: 10,
                max_vertices: 14,
                speed: 50.0,
                points: 20,
            },
            asteroid_medium: AsteroidTuning {
                radius: 22.0,
                min_vertices: 8,
                max_vertices: 11,
                speed: 85.0,
                points: 50,
            },
            asteroid_small: AsteroidTuning {
                radius: 11.0,
                min_vertices: 6,
                max_vertices: 9,
                speed: 130.0,
                points: 100,
            },
            asteroid_jaggedness: 0.3,
            asteroid_max_spin: 1.5,
            split_jitter: 0.35,
            spawn_exclusion: 150.0,

            ufo_large: UfoTuning {
                radius: 20.0,
                speed: 90.0,
                points: 200,
                aim_spread: 0.5,
                fire_cooldown: 2.0,
            },
            ufo_small: UfoTuning {
                radius: 12.0,
                speed: 130.0,
                points: 1000,
                aim_spread: 0.15,
                fire_cooldown: 1.4,
            },
            ufo_vertical_factor: 0.5,
            ufo_drift_min: 0.6,
            ufo_drift_max: 1.8,
            ufo_spawn_min: 12.0,
            ufo_spawn_max: 25.0,
            ufo_small_chance_base: 0.1,
            ufo_small_chance_per_level: 0.08,
            ufo_small_chance_max: 0.7,
            ufo_cooldown_per_level: 0.1,
            ufo_cooldown_floor: 0.3,

            well_spawn_min: 15.0,
            well_spawn_max: 30.0,
            well_duration_min: 8.0,
            well_duration_max: 12.0,
            well_pull_min: 60.0,
            well_pull_max: 180.0,
            well_pull_per_level: 15.0,
            well_pull_radius: 220.0,
            well_core_radius: 25.0,
            well_min_player_distance: 200.0,

            debris_lifetime: 1.5,
            debris_min_speed: 20.0,
            debris_max_speed: 70.0,
            debris_max_spin: 4.0,

            game_over_delay: 5.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn asteroid(&self, size: AsteroidSize) -> &AsteroidTuning {
        match size {
            AsteroidSize::Large => &self.asteroid_large,
            AsteroidSize::Medium => &self.asteroid_medium,
            AsteroidSize::Small => &self.asteroid_small,
        }
    }

    pub fn ufo(&self, size: UfoSize) -> &UfoTuning {
        match size {
            UfoSize::Large => &self.ufo_large,
            UfoSize::Small => &self.ufo_small,
        }
    }

    /// Total hyperspace animation time (shrink + warp + expand)
    pub fn hyperspace_total(&self) -> f32 {
        self.hyperspace_shrink + self.hyperspace_warp + self.hyperspace_expand
    }

    /// UFO fire cooldown for a level, floored at a fraction of its base
    pub fn ufo_fire_cooldown(&self, size: UfoSize, level: u32) -> f32 {
        let base = self.ufo(size).fire_cooldown;
        let steps = level.saturating_sub(1) as f32;
        let factor = (1.0 - self.ufo_cooldown_per_level * steps).max(self.ufo_cooldown_floor);
        base * factor
    }

    /// Probability that a freshly spawned UFO is the small one
    pub fn ufo_small_chance(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.ufo_small_chance_base + self.ufo_small_chance_per_level * steps)
            .min(self.ufo_small_chance_max)
    }

    /// Gravity well pull strength for a level
    pub fn well_pull_strength(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.well_pull_min + self.well_pull_per_level * steps).min(self.well_pull_max)
    }

    /// Large asteroids in the wave for a level
    pub fn wave_size(&self, level: u32) -> u32 {
        crate::consts::STARTING_ASTEROIDS + level.saturating_sub(1)
    }
}
