//! Render snapshot
//!
//! Flattens the simulation into world-space vector shapes and a HUD. Drawing
//! them is the host's business.

pub mod shapes;

use serde::{Deserialize, Serialize};

use crate::sim::entity::Entity;
use crate::sim::ship::HyperspacePhase;
use crate::sim::state::{GameState, SessionState};
pub use shapes::{Shape, colors, gravity_well_points};

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub session: SessionState,
    pub hyperspace_ready: bool,
    /// Seconds until hyperspace is available again
    pub hyperspace_cooldown: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub shapes: Vec<Shape>,
    pub hud: Hud,
}

/// Snapshot the current state for drawing
pub fn build_frame(state: &GameState) -> Frame {
    let mut frame = Frame {
        shapes: Vec::with_capacity(state.asteroids.len() + state.debris.len() * 8 + 16),
        hud: Hud {
            score: state.score,
            lives: state.lives,
            level: state.level,
            session: state.session,
            hyperspace_ready: state.ship.hyperspace_ready(),
            hyperspace_cooldown: state.ship.hyperspace_cooldown,
        },
    };

    let out = &mut frame.shapes;

    if let Some(well) = &state.gravity_well {
        let mut points = Vec::new();
        gravity_well_points(well, &mut points);
        let color = shapes::with_alpha(colors::GRAVITY_WELL, well.intensity());
        out.extend(points.into_iter().map(|position| Shape::Point {
            position,
            radius: 1.5,
            color,
        }));
    }

    for asteroid in state.asteroids.iter().filter(|a| a.is_active()) {
        out.extend(shapes::line_loop(
            asteroid.body.world_outline(),
            colors::ASTEROID,
        ));
    }

    if let Some(ufo) = state.ufo.as_ref().filter(|u| u.is_active()) {
        out.extend(shapes::line_loop(ufo.body.world_outline(), colors::UFO));
    }

    let ship = &state.ship;
    if ship.body.active && ship.phase != HyperspacePhase::Warping {
        let color = if ship.is_invulnerable() {
            colors::SHIP_INVULNERABLE
        } else {
            colors::SHIP
        };
        out.extend(shapes::line_loop(ship.body.world_outline(), color));
    }

    let bullets = state
        .player_bullets
        .iter()
        .map(|b| (b, colors::PLAYER_BULLET))
        .chain(state.ufo_bullets.iter().map(|b| (b, colors::UFO_BULLET)));
    for (bullet, color) in bullets.filter(|(b, _)| b.is_active()) {
        out.push(Shape::Point {
            position: bullet.body.position(),
            radius: bullet.body.radius,
            color,
        });
    }

    for debris in &state.debris {
        out.extend(shapes::debris_lines(debris));
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_frame_covers_ship_and_asteroids() {
        let mut state = GameState::new(3);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, FRAME_DT);

        let frame = build_frame(&state);
        let loops = frame
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::LineLoop { .. }))
            .count();
        assert_eq!(loops, state.asteroids.len() + 1);
        assert_eq!(frame.hud.lives, state.lives);
        assert_eq!(frame.hud.session, SessionState::Playing);
        assert!(frame.hud.hyperspace_ready);
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_string(&build_frame(&state)).unwrap();
        assert!(json.contains("\"score\":0"));
    }
}
