//! The player's ship
//!
//! Movement, fire cooldown, invulnerability and the four-phase hyperspace
//! maneuver. The ship is created once and reset on every respawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, integrate};
use crate::tuning::Tuning;
use crate::{Bounds, direction};

/// Phase timers within this of zero count as finished (absorbs f32 drift)
const PHASE_EPSILON: f32 = 1e-4;

/// Hyperspace phase, orthogonal to destruction and invulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HyperspacePhase {
    #[default]
    Idle,
    Shrinking,
    /// Ship is absent from the field
    Warping,
    Expanding,
}

/// Held movement keys for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipControls {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

/// Ship facing on spawn (pointing up in screen coordinates)
pub const SPAWN_ROTATION: f32 = -std::f32::consts::FRAC_PI_2;

/// Ship outline, nose along +x
pub fn ship_outline(radius: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(radius * 1.25, 0.0),
        Vec2::new(-radius * 0.85, -radius * 0.75),
        Vec2::new(-radius * 0.45, 0.0),
        Vec2::new(-radius * 0.85, radius * 0.75),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    pub phase: HyperspacePhase,
    /// Seconds left in the current hyperspace phase
    pub phase_timer: f32,
    /// Seconds until hyperspace may be used again
    pub hyperspace_cooldown: f32,
    /// Teleport destination picked when hyperspace was triggered
    pub hyperspace_target: Vec2,
    /// Seconds of remaining invulnerability
    pub invulnerable: f32,
    pub fire_cooldown: f32,
    /// Thrust was applied on the last update (for the exhaust flame)
    pub thrusting: bool,
    // Phase durations captured from tuning so scale() needs no context
    shrink_duration: f32,
    warp_duration: f32,
    expand_duration: f32,
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Ship {
    pub fn new(position: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(position, tuning.ship_radius);
        body.transform.rotation = SPAWN_ROTATION;
        body.outline = ship_outline(tuning.ship_radius);
        Self {
            body,
            phase: HyperspacePhase::Idle,
            phase_timer: 0.0,
            hyperspace_cooldown: 0.0,
            hyperspace_target: position,
            invulnerable: 0.0,
            fire_cooldown: 0.0,
            thrusting: false,
            shrink_duration: tuning.hyperspace_shrink,
            warp_duration: tuning.hyperspace_warp,
            expand_duration: tuning.hyperspace_expand,
        }
    }

    /// Respawn in place of destroy-and-recreate
    pub fn reset(&mut self, position: Vec2, tuning: &Tuning) {
        self.body.transform.position = position;
        self.body.transform.rotation = SPAWN_ROTATION;
        self.body.transform.scale = 1.0;
        self.body.velocity = Vec2::ZERO;
        self.body.angular_velocity = 0.0;
        self.body.active = true;
        self.phase = HyperspacePhase::Idle;
        self.phase_timer = 0.0;
        self.hyperspace_cooldown = 0.0;
        self.hyperspace_target = position;
        self.invulnerable = tuning.respawn_invulnerability;
        self.fire_cooldown = 0.0;
        self.thrusting = false;
    }

    /// Facing direction as a unit vector
    pub fn heading(&self) -> Vec2 {
        direction(self.body.transform.rotation)
    }

    pub fn in_hyperspace(&self) -> bool {
        self.phase != HyperspacePhase::Idle
    }

    /// Immune to destruction
    pub fn is_invulnerable(&self) -> bool {
        self.in_hyperspace() || self.invulnerable > 0.0
    }

    /// Hyperspace can be triggered right now
    pub fn hyperspace_ready(&self) -> bool {
        self.body.active && !self.in_hyperspace() && self.hyperspace_cooldown <= 0.0
    }

    /// Start the hyperspace maneuver; silently ignored unless ready
    pub fn try_hyperspace(&mut self, rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning) -> bool {
        if !self.hyperspace_ready() {
            return false;
        }

        let margin = tuning.hyperspace_margin.min(bounds.width / 2.0).min(bounds.height / 2.0);
        self.hyperspace_target = Vec2::new(
            rng.random_range(margin..=bounds.width - margin),
            rng.random_range(margin..=bounds.height - margin),
        );
        self.phase = HyperspacePhase::Shrinking;
        self.phase_timer = tuning.hyperspace_shrink;
        self.invulnerable = self
            .invulnerable
            .max(tuning.hyperspace_total() + tuning.hyperspace_grace);
        self.thrusting = false;
        true
    }

    /// Visual scale derived from hyperspace progress
    pub fn scale(&self) -> f32 {
        match self.phase {
            HyperspacePhase::Idle => 1.0,
            HyperspacePhase::Shrinking => phase_fraction(self.phase_timer, self.shrink_duration),
            HyperspacePhase::Warping => 0.0,
            HyperspacePhase::Expanding => {
                1.0 - phase_fraction(self.phase_timer, self.expand_duration)
            }
        }
    }

    /// Advance timers, hyperspace and motion by one frame
    pub fn update(&mut self, dt: f32, controls: ShipControls, tuning: &Tuning) {
        debug_assert!(self.body.active, "updating a destroyed ship");
        if !self.body.active {
            return;
        }

        // Cooldown only runs while idle; it starts when expanding ends
        if self.phase == HyperspacePhase::Idle && self.hyperspace_cooldown > 0.0 {
            self.hyperspace_cooldown = (self.hyperspace_cooldown - dt).max(0.0);
        }
        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }

        self.thrusting = false;
        match self.phase {
            HyperspacePhase::Idle => {
                self.steer(dt, controls, tuning);
                integrate(&mut self.body, dt);
            }
            HyperspacePhase::Shrinking | HyperspacePhase::Expanding => {
                integrate(&mut self.body, dt);
                self.phase_timer -= dt;
            }
            HyperspacePhase::Warping => self.phase_timer -= dt,
        }
        // Overshoot carries into the next phase, so a large dt may finish several
        while self.in_hyperspace() && self.phase_timer <= PHASE_EPSILON {
            self.finish_phase(tuning);
        }
        self.body.transform.scale = self.scale();
    }

    fn finish_phase(&mut self, tuning: &Tuning) {
        match self.phase {
            HyperspacePhase::Idle => {}
            HyperspacePhase::Shrinking => {
                self.phase = HyperspacePhase::Warping;
                self.phase_timer += self.warp_duration;
            }
            HyperspacePhase::Warping => {
                self.body.transform.position = self.hyperspace_target;
                self.body.velocity = Vec2::ZERO;
                self.phase = HyperspacePhase::Expanding;
                self.phase_timer += self.expand_duration;
            }
            HyperspacePhase::Expanding => {
                self.phase = HyperspacePhase::Idle;
                self.phase_timer = 0.0;
                self.hyperspace_cooldown = tuning.hyperspace_cooldown;
            }
        }
    }

    fn steer(&mut self, dt: f32, controls: ShipControls, tuning: &Tuning) {
        if controls.left {
            self.body.transform.rotation -= tuning.ship_turn_rate * dt;
        }
        if controls.right {
            self.body.transform.rotation += tuning.ship_turn_rate * dt;
        }
        self.body.transform.rotation = crate::normalize_angle(self.body.transform.rotation);

        if controls.thrust {
            self.body.velocity += self.heading() * tuning.ship_thrust * dt;
            self.thrusting = true;
        }
        self.body.velocity = self.body.velocity.clamp_length_max(tuning.ship_max_speed);
    }

    /// Apply an external acceleration (gravity well) for one frame
    pub fn apply_acceleration(&mut self, accel: Vec2, dt: f32) {
        if self.body.active && self.phase != HyperspacePhase::Warping {
            self.body.velocity += accel * dt;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.body.active && !self.in_hyperspace() && self.fire_cooldown <= 0.0
    }

    /// Consume the fire cooldown; returns the muzzle position and heading
    pub fn fire(&mut self, tuning: &Tuning) -> Option<(Vec2, f32)> {
        if !self.can_fire() {
            return None;
        }
        self.fire_cooldown = tuning.ship_fire_cooldown;
        let rotation = self.body.transform.rotation;
        let muzzle = self.body.position() + self.heading() * self.body.radius;
        Some((muzzle, rotation))
    }
}

/// Remaining fraction of a phase, safe for zero-length phases
fn phase_fraction(remaining: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        0.0
    } else {
        (remaining / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Ship, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let ship = Ship::new(Bounds::default().center(), &tuning);
        (ship, tuning, Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_thrust_clamped_to_max_speed() {
        let (mut ship, tuning, _) = setup();
        let controls = ShipControls {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..600 {
            ship.update(1.0 / 60.0, controls, &tuning);
        }
        assert!(ship.body.velocity.length() <= tuning.ship_max_speed + 1e-3);
        assert!(ship.thrusting);
    }

    #[test]
    fn test_turning() {
        let (mut ship, tuning, _) = setup();
        let start = ship.body.transform.rotation;
        let controls = ShipControls {
            right: true,
            ..Default::default()
        };
        ship.update(0.1, controls, &tuning);
        assert!((ship.body.transform.rotation - (start + tuning.ship_turn_rate * 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_hyperspace_full_cycle() {
        let (mut ship, tuning, mut rng) = setup();
        ship.body.velocity = Vec2::new(30.0, 0.0);
        assert!(ship.try_hyperspace(&mut rng, Bounds::default(), &tuning));
        let target = ship.hyperspace_target;
        assert_eq!(ship.phase, HyperspacePhase::Shrinking);
        assert!(ship.is_invulnerable());

        let idle = ShipControls::default();
        ship.update(tuning.hyperspace_shrink, idle, &tuning);
        assert_eq!(ship.phase, HyperspacePhase::Warping);
        assert_eq!(ship.scale(), 0.0);

        ship.update(tuning.hyperspace_warp, idle, &tuning);
        assert_eq!(ship.phase, HyperspacePhase::Expanding);
        assert_eq!(ship.body.position(), target);
        assert_eq!(ship.body.velocity, Vec2::ZERO);

        ship.update(tuning.hyperspace_expand, idle, &tuning);
        assert_eq!(ship.phase, HyperspacePhase::Idle);
        assert_eq!(ship.hyperspace_cooldown, tuning.hyperspace_cooldown);
        assert_eq!(ship.body.position(), target);
        assert_eq!(ship.scale(), 1.0);
        // Grace period outlasts the animation
        assert!(ship.is_invulnerable());
    }

    /// Run a whole hyperspace cycle in equal steps of `dt`
    fn cycle_in_steps(dt: f32, steps: usize) -> (Ship, Tuning, Vec2) {
        let (mut ship, tuning, mut rng) = setup();
        ship.body.velocity = Vec2::new(-40.0, 25.0);
        assert!(ship.try_hyperspace(&mut rng, Bounds::default(), &tuning));
        let target = ship.hyperspace_target;
        for _ in 0..steps {
            ship.update(dt, ShipControls::default(), &tuning);
        }
        (ship, tuning, target)
    }

    #[test]
    fn test_hyperspace_cycle_at_frame_rate() {
        let (ship, tuning, target) = cycle_in_steps(crate::consts::FRAME_DT, 48);
        assert!((tuning.hyperspace_total() - 48.0 * crate::consts::FRAME_DT).abs() < 1e-5);
        assert_eq!(ship.phase, HyperspacePhase::Idle);
        assert_eq!(ship.hyperspace_cooldown, tuning.hyperspace_cooldown);
        assert_eq!(ship.body.position(), target);
    }

    #[test]
    fn test_hyperspace_cycle_in_coarse_steps() {
        let (ship, tuning, target) = cycle_in_steps(0.1, 8);
        assert_eq!(ship.phase, HyperspacePhase::Idle);
        assert_eq!(ship.hyperspace_cooldown, tuning.hyperspace_cooldown);
        assert_eq!(ship.body.position(), target);
    }

    #[test]
    fn test_one_long_step_crosses_phases() {
        let (mut ship, tuning, mut rng) = setup();
        assert!(ship.try_hyperspace(&mut rng, Bounds::default(), &tuning));
        let target = ship.hyperspace_target;
        let dt = tuning.hyperspace_shrink + tuning.hyperspace_warp + 0.1;
        ship.update(dt, ShipControls::default(), &tuning);
        assert_eq!(ship.phase, HyperspacePhase::Expanding);
        assert_eq!(ship.body.position(), target);
        assert!((ship.phase_timer - (tuning.hyperspace_expand - 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_hyperspace_rejected_while_active_or_cooling() {
        let (mut ship, tuning, mut rng) = setup();
        assert!(ship.try_hyperspace(&mut rng, Bounds::default(), &tuning));
        ship.update(0.1, ShipControls::default(), &tuning);

        let (phase, timer, target) = (ship.phase, ship.phase_timer, ship.hyperspace_target);
        assert!(!ship.try_hyperspace(&mut rng, Bounds::default(), &tuning));
        assert_eq!((ship.phase, ship.phase_timer, ship.hyperspace_target), (phase, timer, target));

        ship.phase = HyperspacePhase::Idle;
        ship.hyperspace_cooldown = 1.0;
        let target = ship.hyperspace_target;
        assert!(!ship.try_hyperspace(&mut rng, Bounds::default(), &tuning));
        assert_eq!(ship.phase, HyperspacePhase::Idle);
        assert_eq!(ship.hyperspace_cooldown, 1.0);
        assert_eq!(ship.hyperspace_target, target);
    }

    #[test]
    fn test_scale_progress() {
        let (mut ship, tuning, mut rng) = setup();
        ship.try_hyperspace(&mut rng, Bounds::default(), &tuning);
        assert!((ship.scale() - 1.0).abs() < 1e-6);
        ship.update(tuning.hyperspace_shrink / 2.0, ShipControls::default(), &tuning);
        assert!((ship.scale() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_fire_cooldown() {
        let (mut ship, tuning, _) = setup();
        assert!(ship.fire(&tuning).is_some());
        assert!(ship.fire(&tuning).is_none());
        ship.update(tuning.ship_fire_cooldown, ShipControls::default(), &tuning);
        assert!(ship.fire(&tuning).is_some());
    }

    #[test]
    fn test_reset_grants_invulnerability() {
        let (mut ship, tuning, _) = setup();
        ship.body.destroy();
        ship.body.velocity = Vec2::new(100.0, 100.0);
        ship.reset(Bounds::default().center(), &tuning);
        assert!(ship.body.active);
        assert_eq!(ship.body.velocity, Vec2::ZERO);
        assert_eq!(ship.invulnerable, tuning.respawn_invulnerability);
    }
}
