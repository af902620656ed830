//! Shape generation for 2D vector primitives

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::polar_to_cartesian;
use crate::sim::gravity_well::GravityWell;
use crate::sim::projectile::{Debris, Palette};

/// Colors for game elements
pub mod colors {
    pub const SHIP: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const SHIP_INVULNERABLE: [f32; 4] = [0.5, 0.8, 1.0, 0.6];
    pub const ASTEROID: [f32; 4] = [0.8, 0.8, 0.75, 1.0];
    pub const UFO: [f32; 4] = [1.0, 0.4, 0.3, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const UFO_BULLET: [f32; 4] = [1.0, 0.6, 0.2, 1.0];
    pub const GRAVITY_WELL: [f32; 4] = [0.6, 0.2, 0.8, 1.0];
}

/// Number of spiral arms drawn for a gravity well
pub const WELL_ARMS: usize = 3;
/// Points per spiral arm
pub const WELL_ARM_POINTS: usize = 16;
/// Radians an arm winds from rim to core
const WELL_WIND: f32 = 2.5;

/// A primitive in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed polygon outline
    LineLoop { points: Vec<Vec2>, color: [f32; 4] },
    /// Single line segment
    Line { from: Vec2, to: Vec2, color: [f32; 4] },
    /// Dot of the given radius
    Point {
        position: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

pub fn palette_color(palette: Palette) -> [f32; 4] {
    match palette {
        Palette::Ship => colors::SHIP,
        Palette::Asteroid => colors::ASTEROID,
        Palette::Ufo => colors::UFO,
    }
}

/// Scale a color's alpha channel
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Outline shape, or nothing for degenerate outlines
pub fn line_loop(points: Vec<Vec2>, color: [f32; 4]) -> Option<Shape> {
    (points.len() >= 2).then_some(Shape::LineLoop { points, color })
}

/// One line per live debris segment, fading with its remaining time
pub fn debris_lines(debris: &Debris) -> impl Iterator<Item = Shape> + '_ {
    let color = palette_color(debris.palette);
    debris
        .segments
        .iter()
        .filter(|s| s.remaining > 0.0)
        .map(move |segment| {
            let (from, to) = segment.endpoints();
            Shape::Line {
                from,
                to,
                color: with_alpha(color, debris.alpha(segment)),
            }
        })
}

/// Fill `out` with the swirl points of a gravity well
///
/// The buffer is cleared first so a host can reuse it every frame.
pub fn gravity_well_points(well: &GravityWell, out: &mut Vec<Vec2>) {
    out.clear();
    let center = well.center();
    let spin = well.body.transform.rotation;
    let rim = well.pull_radius * well.pulse() * well.intensity();
    let core = well.body.radius;
    if rim <= core {
        return;
    }

    for arm in 0..WELL_ARMS {
        let base = spin + arm as f32 * TAU / WELL_ARMS as f32;
        for i in 0..WELL_ARM_POINTS {
            let t = i as f32 / (WELL_ARM_POINTS - 1) as f32;
            let r = rim + (core - rim) * t;
            out.push(center + polar_to_cartesian(r, base + WELL_WIND * t));
        }
    }
}
