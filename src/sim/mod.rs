//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Caller-supplied frame time, clamped
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod entity;
pub mod gravity_well;
pub mod projectile;
pub mod ship;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod ufo;

pub use asteroid::{Asteroid, AsteroidSize};
pub use collision::{collide, wrap};
pub use entity::{Body, Entity, Lifetime, Scorable, Transform};
pub use gravity_well::GravityWell;
pub use projectile::{Bullet, Debris, DebrisSegment, Palette};
pub use ship::{HyperspacePhase, Ship, ShipControls};
pub use state::{GameState, ScoreBoard, SessionState};
pub use tick::{TickInput, destroy_ship, tick};
pub use ufo::{Ufo, UfoSize};
