//! Fixed timestep simulation tick
//!
//! Advances the session one frame: input, entity updates, spawning,
//! collisions, then the end-of-frame reconcile.

use super::collision::{collide, wrap};
use super::entity::Entity;
use super::projectile::{Bullet, Debris, Palette};
use super::ship::{HyperspacePhase, ShipControls};
use super::spawner;
use super::state::{GameState, SessionState};
use crate::audio::SoundCue;
use crate::consts::MAX_FRAME_DT;
use crate::highscores::ScoreSubmission;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Rotate counter-clockwise (held)
    pub left: bool,
    /// Rotate clockwise (held)
    pub right: bool,
    /// Thrust (held)
    pub thrust: bool,
    /// Fire button held down (auto-fire at the cooldown rate)
    pub fire_held: bool,
    /// Fire pressed this frame
    pub fire: bool,
    /// Start / restart pressed this frame
    pub start: bool,
    /// Hyperspace pressed this frame
    pub hyperspace: bool,
    /// Menu / back pressed this frame
    pub menu: bool,
    /// Name entered on the submission screen
    pub player_name: Option<String>,
}

impl TickInput {
    fn controls(&self) -> ShipControls {
        ShipControls {
            left: self.left,
            right: self.right,
            thrust: self.thrust,
        }
    }
}

/// Advance the game state by one frame
///
/// `dt` is clamped to [`MAX_FRAME_DT`] so a stalled host can't tunnel
/// entities through each other.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.frame += 1;

    let mut input = input.clone();
    match state.session {
        SessionState::Start => tick_start(state, &input),
        SessionState::Playing => tick_playing(state, &mut input, dt),
        SessionState::GameOver => tick_game_over(state, &input, dt),
        SessionState::SubmittingScore => tick_submitting(state, &input, dt),
        SessionState::ViewingScores => tick_viewing(state, &input, dt),
    }
}

fn tick_start(state: &mut GameState, input: &TickInput) {
    if input.start {
        state.begin_playing();
    } else if input.menu {
        state.scores.request_top();
        state.session = SessionState::ViewingScores;
        log::info!("Viewing high scores");
    }
}

fn tick_playing(state: &mut GameState, input: &mut TickInput, dt: f32) {
    if input.menu {
        state.return_to_start();
        return;
    }

    update_ship(state, input, dt);

    for asteroid in state.asteroids.iter_mut().filter(|a| a.is_active()) {
        asteroid.update(dt);
        wrap(&mut asteroid.body, state.bounds);
    }
    let bullets = state.player_bullets.iter_mut().chain(&mut state.ufo_bullets);
    for bullet in bullets.filter(|b| b.is_active()) {
        bullet.update(dt);
        if bullet.is_active() {
            wrap(&mut bullet.body, state.bounds);
        }
    }

    update_ufo(state, dt);
    update_gravity_well(state, dt);
    update_debris(state, dt);

    resolve_collisions(state, input);
    state.reconcile();

    if state.session == SessionState::Playing && state.asteroids.is_empty() {
        state.advance_level();
    }
}

fn update_ship(state: &mut GameState, input: &TickInput, dt: f32) {
    let ship = &mut state.ship;

    if !ship.body.active {
        if let Some(timer) = state.respawn_timer.as_mut() {
            *timer -= dt;
            if *timer <= 0.0 {
                state.respawn_timer = None;
                ship.reset(state.bounds.center(), &state.tuning);
                log::debug!("Ship respawned, {} lives left", state.lives);
            }
        }
        return;
    }

    if input.hyperspace && ship.try_hyperspace(&mut state.rng, state.bounds, &state.tuning) {
        state.cues.push(SoundCue::Hyperspace);
        log::debug!("Hyperspace to {:?}", ship.hyperspace_target);
    }

    if let Some(well) = &state.gravity_well {
        ship.apply_acceleration(well.pull_force(ship.body.position()), dt);
    }

    ship.update(dt, input.controls(), &state.tuning);
    if ship.thrusting {
        state.cues.push(SoundCue::ThrustTick);
    }
    if ship.phase != HyperspacePhase::Warping {
        wrap(&mut ship.body, state.bounds);
    }

    if input.fire || input.fire_held {
        if let Some((muzzle, angle)) = ship.fire(&state.tuning) {
            let tuning = &state.tuning;
            state.player_bullets.push(Bullet::new(
                muzzle,
                angle,
                tuning.bullet_speed,
                tuning.bullet_lifetime,
                tuning.bullet_radius,
            ));
            state.cues.push(SoundCue::Shoot);
        }
    }
}

fn update_ufo(state: &mut GameState, dt: f32) {
    let targetable = state.ship_targetable();
    let target = state.ship.body.position();

    let Some(ufo) = state.ufo.as_mut() else {
        state.ufo_spawn_timer -= dt;
        if state.ufo_spawn_timer <= 0.0 {
            state.ufo = Some(spawner::spawn_ufo(
                state.level,
                &mut state.rng,
                state.bounds,
                &state.tuning,
            ));
            state.cues.push(SoundCue::UfoEngineStart);
        }
        return;
    };

    if !ufo.is_active() {
        return;
    }
    ufo.advance(dt, &mut state.rng, state.bounds, &state.tuning);
    if ufo.has_exited(state.bounds) {
        ufo.body.destroy();
        state.cues.push(SoundCue::UfoEngineStop);
        log::debug!("UFO left the field");
        return;
    }

    if targetable {
        if let Some(angle) = ufo.try_shoot(target, &mut state.rng, &state.tuning) {
            let tuning = &state.tuning;
            state.ufo_bullets.push(Bullet::new(
                ufo.body.position(),
                angle,
                tuning.ufo_bullet_speed,
                tuning.bullet_lifetime,
                tuning.bullet_radius,
            ));
            state.cues.push(SoundCue::UfoShoot);
        }
    }
}

fn update_gravity_well(state: &mut GameState, dt: f32) {
    let Some(well) = state.gravity_well.as_mut() else {
        state.gravity_well_spawn_timer -= dt;
        if state.gravity_well_spawn_timer <= 0.0 {
            let player = state.player_position();
            state.gravity_well = Some(spawner::spawn_gravity_well(
                state.level,
                player,
                &mut state.rng,
                state.bounds,
                &state.tuning,
            ));
            state.cues.push(SoundCue::GravityWellSpawn);
        }
        return;
    };

    if !well.is_active() {
        return;
    }
    well.update(dt);
    if well.is_active() {
        state.cues.push(SoundCue::GravityWellIntensity(well.intensity()));
    } else {
        state.cues.push(SoundCue::GravityWellDespawn);
    }
}

fn update_debris(state: &mut GameState, dt: f32) {
    for debris in &mut state.debris {
        debris.update(dt);
    }
}

fn resolve_collisions(state: &mut GameState, input: &mut TickInput) {
    // Player bullets against asteroids, then the UFO
    for b in 0..state.player_bullets.len() {
        if !state.player_bullets[b].is_active() {
            continue;
        }
        let hit = (0..state.asteroids.len())
            .find(|&a| collide(&state.player_bullets[b].body, &state.asteroids[a].body));
        if let Some(a) = hit {
            state.player_bullets[b].body.destroy();
            state.destroy_asteroid(a, true);
            continue;
        }
        let hits_ufo = state
            .ufo
            .as_ref()
            .is_some_and(|ufo| collide(&state.player_bullets[b].body, &ufo.body));
        if hits_ufo {
            state.player_bullets[b].body.destroy();
            state.destroy_ufo();
        }
    }

    if !state.ship.body.active || state.ship.is_invulnerable() {
        return;
    }

    let rock = (0..state.asteroids.len()).find(|&a| collide(&state.ship.body, &state.asteroids[a].body));
    if let Some(a) = rock {
        state.destroy_asteroid(a, true);
        destroy_ship(state, input);
        return;
    }

    let rammed = state
        .ufo
        .as_ref()
        .is_some_and(|ufo| collide(&state.ship.body, &ufo.body));
    if rammed {
        state.destroy_ufo();
        destroy_ship(state, input);
        return;
    }

    let shot = state
        .ufo_bullets
        .iter()
        .position(|bullet| collide(&state.ship.body, &bullet.body));
    if let Some(i) = shot {
        state.ufo_bullets[i].body.destroy();
        destroy_ship(state, input);
    }
}

/// Destroy the player ship and charge a life
///
/// `input` is the frame's working copy; it is reset so no step after the
/// death acts on presses made before it. Hosts supply fresh input every
/// frame, so nothing buffers across frames. When the last life goes, the
/// session leaves play immediately.
pub fn destroy_ship(state: &mut GameState, input: &mut TickInput) {
    let outline = state.ship.body.world_outline();
    state.debris.push(Debris::from_outline(
        &outline,
        state.ship.body.velocity,
        Palette::Ship,
        &mut state.rng,
        &state.tuning,
    ));
    state.ship.body.destroy();
    state.ship.thrusting = false;
    state.lives = state.lives.saturating_sub(1);
    *input = TickInput::default();
    state.cues.push(SoundCue::Death);
    log::info!("Ship destroyed, {} lives left", state.lives);

    if state.lives == 0 {
        state.enter_game_over();
    } else {
        state.respawn_timer = Some(state.tuning.respawn_delay);
    }
}

fn tick_game_over(state: &mut GameState, input: &TickInput, dt: f32) {
    update_debris(state, dt);
    state.debris.retain(|d| d.is_active());

    if input.start {
        state.begin_playing();
        return;
    }
    state.game_over_timer -= dt;
    if state.game_over_timer <= 0.0 {
        state.return_to_start();
    }
}

fn tick_submitting(state: &mut GameState, input: &TickInput, dt: f32) {
    update_debris(state, dt);
    state.debris.retain(|d| d.is_active());

    if input.menu {
        state.return_to_start();
        return;
    }

    if !state.scores.is_submitting() {
        let Some(name) = input.player_name.as_deref().map(str::trim) else {
            return;
        };
        if name.is_empty() {
            return;
        }
        let entry = ScoreSubmission {
            player_name: name.to_string(),
            score: state.score,
            level: state.level,
        };
        state.scores.submit(entry);
    }

    if let Some(receipt) = state.scores.poll_submit(dt) {
        match receipt.rank {
            Some(rank) => log::info!("Score placed at #{rank}"),
            None => log::info!("Score submitted (success: {})", receipt.success),
        }
        state.scores.request_top();
        state.session = SessionState::ViewingScores;
    }
}

fn tick_viewing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.scores.poll_top(dt);
    if input.start || input.menu {
        state.return_to_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, STARTING_LIVES};
    use crate::highscores::HighScores;
    use crate::sim::asteroid::{Asteroid, AsteroidSize};
    use crate::sim::gravity_well::GravityWell;
    use glam::Vec2;

    fn start_input() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &start_input(), FRAME_DT);
        state
    }

    /// Tick idle frames until the ship is back
    fn wait_for_respawn(state: &mut GameState) {
        for _ in 0..600 {
            if state.ship.body.active {
                return;
            }
            tick(state, &TickInput::default(), FRAME_DT);
        }
        panic!("ship never respawned");
    }

    /// A lone stationary asteroid far from the ship
    fn lone_asteroid(state: &mut GameState, size: AsteroidSize, position: Vec2) {
        let asteroid = Asteroid::new(
            size,
            position,
            Vec2::ZERO,
            0.0,
            &mut state.rng,
            &state.tuning,
        );
        state.asteroids = vec![asteroid];
    }

    #[test]
    fn test_start_begins_play() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.session, SessionState::Start);

        tick(&mut state, &start_input(), FRAME_DT);
        assert_eq!(state.session, SessionState::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.asteroids.len(), 4);
    }

    #[test]
    fn test_bullet_splits_large_asteroid() {
        let mut state = playing(2);
        let target = Vec2::new(100.0, 100.0);
        lone_asteroid(&mut state, AsteroidSize::Large, target);
        state
            .player_bullets
            .push(Bullet::new(target, 0.0, 0.0, 1.0, 2.0));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.score, 20);
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
        assert!(state.cues.contains(&SoundCue::Explosion(AsteroidSize::Large.into())));
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_clearing_wave_advances_level() {
        let mut state = playing(3);
        let target = Vec2::new(120.0, 480.0);
        lone_asteroid(&mut state, AsteroidSize::Small, target);
        state
            .player_bullets
            .push(Bullet::new(target, 0.0, 0.0, 1.0, 2.0));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.score, 100);
        assert_eq!(state.level, 2);
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
        assert!(state.cues.contains(&SoundCue::LevelUp));
    }

    #[test]
    fn test_losing_every_life_ends_game() {
        let mut state = playing(4);
        let mut input = TickInput::default();

        destroy_ship(&mut state, &mut input);
        assert_eq!(state.lives, 2);
        assert_eq!(state.session, SessionState::Playing);
        wait_for_respawn(&mut state);

        destroy_ship(&mut state, &mut input);
        assert_eq!(state.lives, 1);
        wait_for_respawn(&mut state);

        state.ufo = Some(spawner::spawn_ufo(1, &mut state.rng, state.bounds, &state.tuning));
        state.gravity_well = Some(GravityWell::new(Vec2::new(50.0, 50.0), 10.0, 100.0, 200.0, 20.0));
        destroy_ship(&mut state, &mut input);

        assert_eq!(state.lives, 0);
        assert_eq!(state.session, SessionState::GameOver);
        assert!(state.ufo.is_none());
        assert!(state.gravity_well.is_none());
        assert!(state.cues.contains(&SoundCue::UfoEngineStop));
        assert!(state.cues.contains(&SoundCue::GravityWellDespawn));
    }

    #[test]
    fn test_destroying_ship_clears_input() {
        let mut state = playing(5);
        let mut input = TickInput {
            thrust: true,
            fire_held: true,
            hyperspace: true,
            ..Default::default()
        };
        destroy_ship(&mut state, &mut input);
        assert_eq!(input, TickInput::default());
        assert_eq!(state.respawn_timer, Some(state.tuning.respawn_delay));
        assert_eq!(state.debris.len(), 1);
    }

    #[test]
    fn test_asteroid_rams_ship() {
        let mut state = playing(6);
        state.ship.invulnerable = 0.0;
        let ship_pos = state.ship.body.position();
        lone_asteroid(&mut state, AsteroidSize::Medium, ship_pos + Vec2::new(10.0, 0.0));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(!state.ship.body.active);
        assert_eq!(state.score, 50);
        assert_eq!(state.asteroids.len(), 2);
    }

    /// A UFO parked at `position`, returning its point value
    fn parked_ufo(state: &mut GameState, position: Vec2, shoot_timer: f32) -> u64 {
        let mut ufo = spawner::spawn_ufo(1, &mut state.rng, state.bounds, &state.tuning);
        ufo.body.transform.position = position;
        ufo.shoot_timer = shoot_timer;
        let points = u64::from(state.tuning.ufo(ufo.size).points);
        state.ufo = Some(ufo);
        points
    }

    #[test]
    fn test_ufo_fires_at_exposed_ship() {
        let mut state = playing(17);
        state.ship.invulnerable = 0.0;
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(700.0, 560.0));
        parked_ufo(&mut state, Vec2::new(150.0, 150.0), 0.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.ufo_bullets.len(), 1);
        assert!(state.cues.contains(&SoundCue::UfoShoot));
        let ufo = state.ufo.as_ref().expect("ufo still flying");
        assert!(ufo.shoot_timer > 0.0);
    }

    #[test]
    fn test_ufo_holds_fire_at_invulnerable_ship() {
        let mut state = playing(18);
        assert!(state.ship.is_invulnerable());
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(700.0, 560.0));
        parked_ufo(&mut state, Vec2::new(150.0, 150.0), 0.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert!(state.ufo_bullets.is_empty());
        assert!(!state.cues.contains(&SoundCue::UfoShoot));
    }

    #[test]
    fn test_bullet_destroys_ufo() {
        let mut state = playing(19);
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(700.0, 560.0));
        let spot = Vec2::new(200.0, 200.0);
        let points = parked_ufo(&mut state, spot, 10.0);
        state.player_bullets.push(Bullet::new(spot, 0.0, 0.0, 1.0, 2.0));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.score, points);
        assert!(state.ufo.is_none());
        assert!(state.player_bullets.is_empty());
        assert!(state.cues.contains(&SoundCue::UfoEngineStop));
        let tuning = &state.tuning;
        assert!(
            state.ufo_spawn_timer >= tuning.ufo_spawn_min
                && state.ufo_spawn_timer <= tuning.ufo_spawn_max
        );
        assert_eq!(state.debris.len(), 1);
    }

    #[test]
    fn test_ship_rams_ufo() {
        let mut state = playing(20);
        state.ship.invulnerable = 0.0;
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(700.0, 560.0));
        let ship_pos = state.ship.body.position();
        let points = parked_ufo(&mut state, ship_pos, 10.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.score, points);
        assert!(state.ufo.is_none());
        assert!(!state.ship.body.active);
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_ufo_bullet_destroys_ship() {
        let mut state = playing(21);
        state.ship.invulnerable = 0.0;
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(700.0, 560.0));
        let ship_pos = state.ship.body.position();
        state.ufo_bullets.push(Bullet::new(ship_pos, 0.0, 0.0, 1.0, 2.0));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert!(!state.ship.body.active);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(state.ufo_bullets.is_empty());
        assert!(state.cues.contains(&SoundCue::Death));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_invulnerable_ship_survives_contact() {
        let mut state = playing(7);
        assert!(state.ship.is_invulnerable());
        let ship_pos = state.ship.body.position();
        lone_asteroid(&mut state, AsteroidSize::Large, ship_pos);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert!(state.ship.body.active);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_ufo_bullets_ignore_asteroids() {
        let mut state = playing(8);
        let spot = Vec2::new(150.0, 150.0);
        lone_asteroid(&mut state, AsteroidSize::Large, spot);
        state.ufo_bullets.push(Bullet::new(spot, 0.0, 0.0, 1.0, 2.0));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.ufo_bullets.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_gravity_well_pulls_ship() {
        let mut state = playing(9);
        let ship_pos = state.ship.body.position();
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(20.0, 20.0));
        state.gravity_well = Some(GravityWell::new(
            ship_pos + Vec2::new(100.0, 0.0),
            10.0,
            150.0,
            220.0,
            25.0,
        ));

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert!(state.ship.body.velocity.x > 0.0);
        assert!(
            state
                .cues
                .iter()
                .any(|c| matches!(c, SoundCue::GravityWellIntensity(_)))
        );
    }

    #[test]
    fn test_hyperspace_cue_and_immunity() {
        let mut state = playing(10);
        state.ship.invulnerable = 0.0;
        let input = TickInput {
            hyperspace: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(state.ship.in_hyperspace());
        assert!(state.ship.is_invulnerable());
        assert!(state.cues.contains(&SoundCue::Hyperspace));
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut state = playing(11);
        let input = TickInput {
            fire_held: true,
            ..Default::default()
        };
        // 0.5 seconds of held fire at a 0.2 second cooldown
        for _ in 0..30 {
            tick(&mut state, &input, FRAME_DT);
        }
        let shots = state.cues.iter().filter(|c| **c == SoundCue::Shoot).count();
        assert_eq!(shots, 3);
    }

    #[test]
    fn test_menu_abandons_run() {
        let mut state = playing(12);
        state.score = 400;
        let input = TickInput {
            menu: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.session, SessionState::Start);
        assert_eq!(state.score, 0);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_game_over_counts_down_to_start() {
        let mut state = playing(13);
        state.lives = 1;
        let mut input = TickInput::default();
        destroy_ship(&mut state, &mut input);
        assert_eq!(state.session, SessionState::GameOver);

        let frames = (state.tuning.game_over_delay / FRAME_DT).ceil() as usize + 1;
        for _ in 0..frames {
            tick(&mut state, &TickInput::default(), FRAME_DT);
        }
        assert_eq!(state.session, SessionState::Start);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = playing(14);
        state.lives = 1;
        let mut input = TickInput::default();
        destroy_ship(&mut state, &mut input);
        tick(&mut state, &start_input(), FRAME_DT);
        assert_eq!(state.session, SessionState::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_score_submission_flow() {
        let mut state = GameState::new(15).with_score_service(Box::new(HighScores::new()));
        tick(&mut state, &start_input(), FRAME_DT);
        state.score = 1234;
        state.lives = 1;
        let mut input = TickInput::default();
        destroy_ship(&mut state, &mut input);
        assert_eq!(state.session, SessionState::SubmittingScore);

        // Waits for a name
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.session, SessionState::SubmittingScore);

        let named = TickInput {
            player_name: Some("ACE".into()),
            ..Default::default()
        };
        tick(&mut state, &named, FRAME_DT);
        assert_eq!(state.session, SessionState::ViewingScores);
        assert_eq!(state.scores.last_receipt.and_then(|r| r.rank), Some(1));

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.scores.top.len(), 1);
        assert_eq!(state.scores.top[0].player_name, "ACE");
        assert_eq!(state.scores.top[0].score, 1234);

        tick(&mut state, &start_input(), FRAME_DT);
        assert_eq!(state.session, SessionState::Start);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = playing(16);
        lone_asteroid(&mut state, AsteroidSize::Large, Vec2::new(100.0, 100.0));
        state.asteroids[0].body.velocity = Vec2::new(50.0, 0.0);
        tick(&mut state, &TickInput::default(), 5.0);
        let x = state.asteroids[0].body.position().x;
        assert!((x - (100.0 + 50.0 * MAX_FRAME_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let script = |frame: u64| TickInput {
            left: frame % 90 < 30,
            thrust: frame % 120 < 40,
            fire_held: frame % 10 < 5,
            hyperspace: frame == 400,
            start: frame == 0,
            ..Default::default()
        };

        let mut a = GameState::new(4242);
        let mut b = GameState::new(4242);
        for frame in 0..1200 {
            tick(&mut a, &script(frame), FRAME_DT);
            tick(&mut b, &script(frame), FRAME_DT);
        }

        assert_eq!(a.session, b.session);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.level, b.level);
        assert_eq!(a.cues, b.cues);
        let positions = |s: &GameState| {
            s.asteroids
                .iter()
                .map(|r| r.body.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
