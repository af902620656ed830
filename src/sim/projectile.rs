//! Bullets and destruction debris

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, Lifetime, update_timed};
use crate::direction;
use crate::tuning::Tuning;

/// A straight-flying projectile with a fixed lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub lifetime: Lifetime,
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        update_timed(&mut self.body, &mut self.lifetime, dt);
    }
}

impl Bullet {
    pub fn new(position: Vec2, angle: f32, speed: f32, lifetime: f32, radius: f32) -> Self {
        let mut body = Body::new(position, radius);
        body.velocity = direction(angle) * speed;
        body.transform.rotation = angle;
        Self {
            body,
            lifetime: Lifetime::new(lifetime),
        }
    }
}

/// Colour family for debris, resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    Ship,
    Asteroid,
    Ufo,
}

/// One edge of a destroyed outline, flying on its own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebrisSegment {
    /// Midpoint in world space
    pub center: Vec2,
    /// Half of the edge vector at zero rotation
    pub half_extent: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub remaining: f32,
}

impl DebrisSegment {
    /// World-space endpoints
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let offset = Vec2::from_angle(self.rotation).rotate(self.half_extent);
        (self.center - offset, self.center + offset)
    }
}

/// Wreckage of a destroyed entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub segments: Vec<DebrisSegment>,
    pub palette: Palette,
    /// Shared lifetime every segment starts with
    pub lifetime: f32,
}

impl Debris {
    /// Break a closed world-space outline into independent edges
    pub fn from_outline(
        outline: &[Vec2],
        base_velocity: Vec2,
        palette: Palette,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Self {
        let lifetime = tuning.debris_lifetime;
        let count = outline.len();
        if count < 2 {
            return Self {
                segments: Vec::new(),
                palette,
                lifetime,
            };
        }
        // A two-point outline is a single edge, not a closed loop
        let edges = if count == 2 { 1 } else { count };
        let segments = (0..edges)
            .map(|i| {
                let a = outline[i];
                let b = outline[(i + 1) % count];
                let heading = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(tuning.debris_min_speed..=tuning.debris_max_speed);
                DebrisSegment {
                    center: (a + b) * 0.5,
                    half_extent: (b - a) * 0.5,
                    rotation: 0.0,
                    velocity: base_velocity * 0.3 + direction(heading) * speed,
                    angular_velocity: rng
                        .random_range(-tuning.debris_max_spin..=tuning.debris_max_spin),
                    remaining: lifetime,
                }
            })
            .collect();
        Self {
            segments,
            palette,
            lifetime,
        }
    }

    /// Active while any segment still has time left
    pub fn is_active(&self) -> bool {
        self.segments.iter().any(|s| s.remaining > 0.0)
    }

    pub fn update(&mut self, dt: f32) {
        for segment in self.segments.iter_mut().filter(|s| s.remaining > 0.0) {
            segment.center += segment.velocity * dt;
            segment.rotation += segment.angular_velocity * dt;
            segment.remaining -= dt;
        }
    }

    /// Opacity of a segment: solid for the first half, then fading to zero
    pub fn alpha(&self, segment: &DebrisSegment) -> f32 {
        let half = self.lifetime * 0.5;
        if half <= 0.0 || segment.remaining >= half {
            1.0
        } else {
            (segment.remaining / half).max(0.0)
        }
    }
}
