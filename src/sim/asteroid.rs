//! Asteroids: rocky outlines and splitting

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, Scorable};
use crate::direction;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Size of the pieces this one breaks into
    pub fn smaller(self) -> Option<Self> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    points: u32,
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Scorable for Asteroid {
    fn points(&self) -> u32 {
        self.points
    }
}

impl Asteroid {
    pub fn new(
        size: AsteroidSize,
        position: Vec2,
        velocity: Vec2,
        spin: f32,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Self {
        let params = tuning.asteroid(size);
        let mut body = Body::new(position, params.radius);
        body.velocity = velocity;
        body.angular_velocity = spin;
        body.transform.rotation = rng.random_range(0.0..std::f32::consts::TAU);
        body.outline = rocky_outline(
            params.radius,
            params.min_vertices,
            params.max_vertices,
            tuning.asteroid_jaggedness,
            rng,
        );
        Self {
            body,
            size,
            points: params.points,
        }
    }

    /// New asteroid drifting in a random direction at its size's speed
    pub fn drifting(size: AsteroidSize, position: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let heading = rng.random_range(0.0..std::f32::consts::TAU);
        let velocity = direction(heading) * tuning.asteroid(size).speed;
        let spin = random_spin(rng, tuning);
        Self::new(size, position, velocity, spin, rng, tuning)
    }

    /// Pieces produced when this asteroid is destroyed
    ///
    /// Large and medium asteroids yield two of the next size, heading roughly
    /// 90° apart; small asteroids yield nothing.
    pub fn split(&self, rng: &mut impl Rng, tuning: &Tuning) -> Vec<Asteroid> {
        let Some(child) = self.size.smaller() else {
            return Vec::new();
        };
        let speed = tuning.asteroid(child).speed;
        let position = self.body.position();

        let first = rng.random_range(0.0..std::f32::consts::TAU);
        let jitter = rng.random_range(-tuning.split_jitter..=tuning.split_jitter);
        let second = first + std::f32::consts::FRAC_PI_2 + jitter;

        [first, second]
            .into_iter()
            .map(|heading| {
                let spin = random_spin(rng, tuning);
                Asteroid::new(child, position, direction(heading) * speed, spin, rng, tuning)
            })
            .collect()
    }
}

fn random_spin(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    rng.random_range(-tuning.asteroid_max_spin..=tuning.asteroid_max_spin)
}

/// Closed polygon with evenly spaced vertices and jittered radii
pub fn rocky_outline(
    radius: f32,
    min_vertices: u32,
    max_vertices: u32,
    jaggedness: f32,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    let count = rng.random_range(min_vertices.max(3)..=max_vertices.max(min_vertices).max(3));
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| {
            let r = radius * rng.random_range(1.0 - jaggedness..=1.0 + jaggedness);
            crate::polar_to_cartesian(r, i as f32 * step)
        })
        .collect()
}
