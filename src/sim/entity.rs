//! Shared entity record and lifecycle helpers
//!
//! Every simulated object embeds a [`Body`]. Motion is a free function over
//! the body so variants with custom movement (the UFO) can still reuse it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, facing and visual scale of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Radians, 0 = facing +x
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Map a local-space point into world space
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.rotation).rotate(local * self.scale)
    }
}

/// Common physical state shared by all entity variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub transform: Transform,
    pub velocity: Vec2,
    /// Radians per second
    pub angular_velocity: f32,
    /// Bounding circle radius used for collisions and wrapping
    pub radius: f32,
    /// Closed outline in local space (empty for point-like entities)
    pub outline: Vec<Vec2>,
    pub active: bool,
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            transform: Transform::at(position),
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            radius,
            outline: Vec::new(),
            active: true,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Outline transformed into world space
    pub fn world_outline(&self) -> Vec<Vec2> {
        self.outline.iter().map(|&p| self.transform.apply(p)).collect()
    }

    /// Mark the entity destroyed
    pub fn destroy(&mut self) {
        debug_assert!(self.active, "entity destroyed twice");
        self.active = false;
    }
}

/// Advance position and rotation by one step of straight-line motion
#[inline]
pub fn integrate(body: &mut Body, dt: f32) {
    body.transform.position += body.velocity * dt;
    body.transform.rotation += body.angular_velocity * dt;
}

/// Behaviour shared by every entity variant
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn is_active(&self) -> bool {
        self.body().active
    }

    /// Advance the entity by `dt` seconds
    fn update(&mut self, dt: f32) {
        let body = self.body_mut();
        debug_assert!(body.active, "updating an inactive entity");
        if !body.active {
            return;
        }
        integrate(body, dt);
    }
}

/// Entities that award points when destroyed
pub trait Scorable {
    fn points(&self) -> u32;
}

/// Countdown that expires once it reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Count down by `dt`; returns true once expired
    #[inline]
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.is_expired()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Update a timed entity: integrate motion, then deactivate on expiry
pub fn update_timed(body: &mut Body, lifetime: &mut Lifetime, dt: f32) {
    debug_assert!(body.active, "updating an inactive entity");
    if !body.active {
        return;
    }
    integrate(body, dt);
    if lifetime.tick(dt) {
        body.active = false;
    }
}
