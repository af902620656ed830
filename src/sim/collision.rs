//! Collision detection and boundary wrapping
//!
//! Everything collides as a circle: the bounding radius stored on each
//! [`Body`]. The play field is a torus for most entities.

use glam::Vec2;

use super::entity::Body;
use crate::Bounds;

/// True if both bodies are active and their bounding circles overlap
#[inline]
pub fn collide(a: &Body, b: &Body) -> bool {
    if !a.active || !b.active {
        return false;
    }
    circles_overlap(a.position(), a.radius, b.position(), b.radius)
}

/// Strict circle overlap test (touching circles do not collide)
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Wrap a position horizontally once it is more than `radius` past an edge
#[inline]
pub fn wrap_horizontal(position: &mut Vec2, radius: f32, bounds: Bounds) {
    if position.x < -radius {
        position.x = bounds.width + radius;
    } else if position.x > bounds.width + radius {
        position.x = -radius;
    }
}

/// Wrap a position vertically once it is more than `radius` past an edge
#[inline]
pub fn wrap_vertical(position: &mut Vec2, radius: f32, bounds: Bounds) {
    if position.y < -radius {
        position.y = bounds.height + radius;
    } else if position.y > bounds.height + radius {
        position.y = -radius;
    }
}

/// Toroidal wrap on both axes
pub fn wrap(body: &mut Body, bounds: Bounds) {
    let radius = body.radius;
    wrap_horizontal(&mut body.transform.position, radius, bounds);
    wrap_vertical(&mut body.transform.position, radius, bounds);
}

/// True once the body has completely left the field on the x axis
pub fn outside_horizontal(body: &Body, bounds: Bounds) -> bool {
    let x = body.position().x;
    x < -body.radius || x > bounds.width + body.radius
}
