//! Hostile saucer
//!
//! Crosses the screen horizontally with erratic vertical drift and fires at
//! the player with level-scaled accuracy and cooldown.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{outside_horizontal, wrap_vertical};
use super::entity::{Body, Entity, Scorable, integrate};
use crate::tuning::Tuning;
use crate::{Bounds, bearing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UfoSize {
    /// Slow, inaccurate, cheap
    Large,
    /// Fast, accurate, valuable
    Small,
}

/// Saucer silhouette in local space
pub fn ufo_outline(radius: f32) -> Vec<Vec2> {
    let r = radius;
    vec![
        Vec2::new(-r, 0.0),
        Vec2::new(-r * 0.45, -r * 0.35),
        Vec2::new(-r * 0.25, -r * 0.7),
        Vec2::new(r * 0.25, -r * 0.7),
        Vec2::new(r * 0.45, -r * 0.35),
        Vec2::new(r, 0.0),
        Vec2::new(r * 0.45, r * 0.35),
        Vec2::new(-r * 0.45, r * 0.35),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ufo {
    pub body: Body,
    pub size: UfoSize,
    /// +1 moving right, -1 moving left
    pub horizontal_dir: f32,
    /// -1, 0 or +1
    pub vertical_dir: f32,
    /// Seconds until the vertical drift is re-rolled
    pub drift_timer: f32,
    /// Seconds until the next shot is allowed
    pub shoot_timer: f32,
    /// Level the saucer was spawned on (fixes its fire cooldown)
    pub level: u32,
    speed: f32,
    vertical_factor: f32,
    points: u32,
}

impl Entity for Ufo {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Fly along the current heading and run down the shoot timer
    fn update(&mut self, dt: f32) {
        debug_assert!(self.body.active, "updating an inactive saucer");
        if !self.body.active {
            return;
        }
        self.shoot_timer -= dt;
        self.body.velocity = self.velocity();
        integrate(&mut self.body, dt);
    }
}

impl Scorable for Ufo {
    fn points(&self) -> u32 {
        self.points
    }
}

impl Ufo {
    /// Spawn on a random side edge heading across the field
    pub fn spawn(size: UfoSize, level: u32, rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning) -> Self {
        let params = tuning.ufo(size);
        let from_left = rng.random_bool(0.5);
        let (x, horizontal_dir) = if from_left {
            (-params.radius, 1.0)
        } else {
            (bounds.width + params.radius, -1.0)
        };
        let y = rng.random_range(bounds.height * 0.2..=bounds.height * 0.8);

        let mut body = Body::new(Vec2::new(x, y), params.radius);
        body.outline = ufo_outline(params.radius);

        let mut ufo = Self {
            body,
            size,
            horizontal_dir,
            vertical_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            drift_timer: rng.random_range(tuning.ufo_drift_min..=tuning.ufo_drift_max),
            shoot_timer: tuning.ufo_fire_cooldown(size, level),
            level,
            speed: params.speed,
            vertical_factor: tuning.ufo_vertical_factor,
            points: params.points,
        };
        ufo.body.velocity = ufo.velocity();
        ufo
    }

    /// `(speed * hdir, speed * vertical_factor * vdir)`
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(
            self.speed * self.horizontal_dir,
            self.speed * self.vertical_factor * self.vertical_dir,
        )
    }

    /// Per-frame movement with erratic vertical drift
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning) {
        debug_assert!(self.body.active, "updating an inactive saucer");
        if !self.body.active {
            return;
        }
        self.drift_timer -= dt;
        if self.drift_timer <= 0.0 {
            self.vertical_dir = rng.random_range(-1i32..=1) as f32;
            self.drift_timer = rng.random_range(tuning.ufo_drift_min..=tuning.ufo_drift_max);
        }
        Entity::update(self, dt);
        wrap_vertical(&mut self.body.transform.position, self.body.radius, bounds);
    }

    /// True once the saucer has crossed out of the far side
    pub fn has_exited(&self, bounds: Bounds) -> bool {
        let x = self.body.position().x;
        let past_far_edge = if self.horizontal_dir > 0.0 {
            x > bounds.width
        } else {
            x < 0.0
        };
        past_far_edge && outside_horizontal(&self.body, bounds)
    }

    /// Fire at `target` if the shoot timer has elapsed
    ///
    /// Returns the firing angle and re-arms the timer; spawning the bullet is
    /// the caller's job.
    pub fn try_shoot(&mut self, target: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Option<f32> {
        if !self.body.active || self.shoot_timer > 0.0 {
            return None;
        }
        let spread = tuning.ufo(self.size).aim_spread;
        let offset = rng.random_range(-spread..=spread);
        self.shoot_timer = tuning.ufo_fire_cooldown(self.size, self.level);
        Some(bearing(self.body.position(), target) + offset)
    }
}
