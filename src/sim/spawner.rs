//! Entity creation with placement constraints
//!
//! Stateless: every function takes the RNG and tuning it needs. Rejection
//! sampling is bounded; when it runs out of attempts the last candidate is
//! used as-is.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize};
use super::gravity_well::GravityWell;
use super::ufo::{Ufo, UfoSize};
use crate::Bounds;
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::tuning::Tuning;

fn random_point(rng: &mut impl Rng, bounds: Bounds) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..bounds.width),
        rng.random_range(0.0..bounds.height),
    )
}

/// Sample positions until `accept` passes or attempts run out
fn sample_position(
    rng: &mut impl Rng,
    bounds: Bounds,
    accept: impl Fn(Vec2) -> bool,
) -> Vec2 {
    let mut candidate = random_point(rng, bounds);
    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if accept(candidate) {
            return candidate;
        }
        candidate = random_point(rng, bounds);
    }
    if !accept(candidate) {
        log::debug!("Placement attempts exhausted, using {:?}", candidate);
    }
    candidate
}

/// True if `point` lies inside the square of half-side `half` around `center`
#[inline]
pub fn in_exclusion_zone(point: Vec2, center: Vec2, half: f32) -> bool {
    (point.x - center.x).abs() < half && (point.y - center.y).abs() < half
}

/// `count` large asteroids kept out of the square zone around `avoid`
pub fn spawn_asteroids(
    count: u32,
    avoid: Vec2,
    rng: &mut impl Rng,
    bounds: Bounds,
    tuning: &Tuning,
) -> Vec<Asteroid> {
    (0..count)
        .map(|_| {
            let position = sample_position(rng, bounds, |p| {
                !in_exclusion_zone(p, avoid, tuning.spawn_exclusion)
            });
            Asteroid::drifting(AsteroidSize::Large, position, rng, tuning)
        })
        .collect()
}

/// A saucer whose chance of being the small one grows with level
pub fn spawn_ufo(level: u32, rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning) -> Ufo {
    let small_chance = tuning.ufo_small_chance(level).clamp(0.0, 1.0) as f64;
    let size = if rng.random_bool(small_chance) {
        UfoSize::Small
    } else {
        UfoSize::Large
    };
    let ufo = Ufo::spawn(size, level, rng, bounds, tuning);
    log::debug!("UFO {:?} spawned at {:?}", size, ufo.body.position());
    ufo
}

/// A gravity well placed away from the player
pub fn spawn_gravity_well(
    level: u32,
    player: Vec2,
    rng: &mut impl Rng,
    bounds: Bounds,
    tuning: &Tuning,
) -> GravityWell {
    let min_distance = tuning.well_min_player_distance;
    let position = sample_position(rng, bounds, |p| p.distance(player) >= min_distance);
    let duration = rng.random_range(tuning.well_duration_min..=tuning.well_duration_max);
    let well = GravityWell::new(
        position,
        duration,
        tuning.well_pull_strength(level),
        tuning.well_pull_radius,
        tuning.well_core_radius,
    );
    log::debug!(
        "Gravity well at {:?} for {:.1}s, pull {:.0}",
        position,
        duration,
        well.pull_strength
    );
    well
}

/// Seconds until the next UFO appears (level-independent)
pub fn next_ufo_delay(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    rng.random_range(tuning.ufo_spawn_min..=tuning.ufo_spawn_max)
}

/// Seconds until the next gravity well appears
pub fn next_gravity_well_delay(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    rng.random_range(tuning.well_spawn_min..=tuning.well_spawn_max)
}
