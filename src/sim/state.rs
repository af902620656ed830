//! Session state and the entity collections it owns
//!
//! [`GameState`] is the single owner of everything mutable in a run. Entities
//! never see it; the tick passes them exactly the pieces they need.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::entity::Scorable;
use super::gravity_well::GravityWell;
use super::projectile::{Bullet, Debris, Palette};
use super::ship::Ship;
use super::spawner;
use super::ufo::Ufo;
use crate::Bounds;
use crate::audio::{AudioSink, ExplosionSize, SoundCue};
use crate::consts::{LEADERBOARD_SIZE, STARTING_LIVES};
use crate::highscores::{
    PendingRequest, RankedScore, ScoreError, ScoreService, ScoreSubmission, SubmitReceipt,
};
use crate::tuning::Tuning;

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Title / menu screen
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, counting down back to the menu
    GameOver,
    /// Waiting on name entry and the score submission
    SubmittingScore,
    /// Leaderboard on screen
    ViewingScores,
}

/// Score service connection plus the requests in flight
#[derive(Default)]
pub struct ScoreBoard {
    service: Option<Box<dyn ScoreService>>,
    pending_submit: Option<PendingRequest<SubmitReceipt>>,
    pending_fetch: Option<PendingRequest<Vec<RankedScore>>>,
    /// Last leaderboard received (empty until a fetch succeeds)
    pub top: Vec<RankedScore>,
    /// Outcome of the most recent submission
    pub last_receipt: Option<SubmitReceipt>,
}

impl fmt::Debug for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreBoard")
            .field("connected", &self.service.is_some())
            .field("submitting", &self.pending_submit.is_some())
            .field("fetching", &self.pending_fetch.is_some())
            .field("top", &self.top.len())
            .field("last_receipt", &self.last_receipt)
            .finish()
    }
}

impl ScoreBoard {
    pub fn new(service: Box<dyn ScoreService>) -> Self {
        Self {
            service: Some(service),
            ..Default::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.service.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submit.is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// Fire off a submission; the answer arrives through [`Self::poll_submit`]
    pub fn submit(&mut self, entry: ScoreSubmission) {
        log::info!("Submitting score {} for {}", entry.score, entry.player_name);
        let pending = match self.service.as_mut() {
            Some(service) => service.submit(entry),
            None => PendingRequest::ready(Err(ScoreError::Unreachable(
                "no score service".to_string(),
            ))),
        };
        self.pending_submit = Some(pending);
    }

    /// Poll the submission; failures collapse into an unsuccessful receipt
    pub fn poll_submit(&mut self, dt: f32) -> Option<SubmitReceipt> {
        let result = self.pending_submit.as_mut()?.poll(dt)?;
        self.pending_submit = None;
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(err) => {
                log::warn!("Score submission failed: {err}");
                SubmitReceipt::default()
            }
        };
        self.last_receipt = Some(receipt);
        Some(receipt)
    }

    /// Ask for the leaderboard; without a service the cached list stays
    pub fn request_top(&mut self) {
        if let Some(service) = self.service.as_mut() {
            self.pending_fetch = Some(service.fetch_top(LEADERBOARD_SIZE));
        }
    }

    /// Poll the leaderboard fetch; returns true once it has resolved
    pub fn poll_top(&mut self, dt: f32) -> bool {
        let Some(result) = self.pending_fetch.as_mut().and_then(|p| p.poll(dt)) else {
            return false;
        };
        self.pending_fetch = None;
        match result {
            Ok(rows) => self.top = rows,
            Err(err) => log::warn!("Leaderboard fetch failed, keeping cached list: {err}"),
        }
        true
    }

    /// Forget any requests in flight
    pub fn abandon(&mut self) {
        self.pending_submit = None;
        self.pending_fetch = None;
    }
}

/// Complete game state for one session
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub bounds: Bounds,
    pub session: SessionState,
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Ticks processed since creation
    pub frame: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub player_bullets: Vec<Bullet>,
    pub ufo_bullets: Vec<Bullet>,
    pub debris: Vec<Debris>,
    pub ufo: Option<Ufo>,
    pub gravity_well: Option<GravityWell>,
    /// Seconds until the next UFO (counts only while none is present)
    pub ufo_spawn_timer: f32,
    /// Seconds until the next gravity well (counts only while none is present)
    pub gravity_well_spawn_timer: f32,
    /// Seconds until the destroyed ship respawns
    pub respawn_timer: Option<f32>,
    /// Seconds left on the game-over screen
    pub game_over_timer: f32,
    /// Cues raised this frame, drained by the host
    pub cues: Vec<SoundCue>,
    pub scores: ScoreBoard,
    /// Split children waiting for the end-of-frame reconcile
    spawned_asteroids: Vec<Asteroid>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let bounds = Bounds::default();
        let ship = Ship::new(bounds.center(), &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            bounds,
            session: SessionState::Start,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            frame: 0,
            ship,
            asteroids: Vec::new(),
            player_bullets: Vec::new(),
            ufo_bullets: Vec::new(),
            debris: Vec::new(),
            ufo: None,
            gravity_well: None,
            ufo_spawn_timer: 0.0,
            gravity_well_spawn_timer: 0.0,
            respawn_timer: None,
            game_over_timer: 0.0,
            cues: Vec::new(),
            scores: ScoreBoard::default(),
            spawned_asteroids: Vec::new(),
        }
    }

    /// Wire up a score service (enables the submission flow)
    pub fn with_score_service(mut self, service: Box<dyn ScoreService>) -> Self {
        self.scores = ScoreBoard::new(service);
        self
    }

    /// Hand queued cues to the audio host
    pub fn drain_cues(&mut self, sink: &mut impl AudioSink) {
        for cue in self.cues.drain(..) {
            sink.play(cue);
        }
    }

    /// Clear every transient entity and restore score, lives and level
    pub fn reset_session(&mut self) {
        if self.ufo.take().is_some() {
            self.cues.push(SoundCue::UfoEngineStop);
        }
        if self.gravity_well.take().is_some() {
            self.cues.push(SoundCue::GravityWellDespawn);
        }
        self.asteroids.clear();
        self.spawned_asteroids.clear();
        self.player_bullets.clear();
        self.ufo_bullets.clear();
        self.debris.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.respawn_timer = None;
        self.game_over_timer = 0.0;
        self.ship.reset(self.bounds.center(), &self.tuning);
        self.scores.abandon();
    }

    /// Full reset, then straight into play with a fresh level-1 wave
    pub fn begin_playing(&mut self) {
        self.reset_session();
        self.spawn_wave();
        self.ufo_spawn_timer = spawner::next_ufo_delay(&mut self.rng, &self.tuning);
        self.gravity_well_spawn_timer =
            spawner::next_gravity_well_delay(&mut self.rng, &self.tuning);
        self.session = SessionState::Playing;
        log::info!("Game started (seed {})", self.seed);
    }

    /// Full reset back to the menu
    pub fn return_to_start(&mut self) {
        self.reset_session();
        self.session = SessionState::Start;
        log::info!("Returned to start screen");
    }

    /// Spawn the wave for the current level away from the ship
    pub fn spawn_wave(&mut self) {
        let count = self.tuning.wave_size(self.level);
        let avoid = self.player_position();
        let wave = spawner::spawn_asteroids(count, avoid, &mut self.rng, self.bounds, &self.tuning);
        log::info!("Level {}: {} asteroids", self.level, wave.len());
        self.asteroids.extend(wave);
    }

    /// Wave cleared: next level and a bigger wave
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.cues.push(SoundCue::LevelUp);
        self.spawn_wave();
    }

    /// Destroy the asteroid at `index`, crediting its points
    ///
    /// Split children are queued and join the field at the end of the frame.
    pub fn destroy_asteroid(&mut self, index: usize, split: bool) {
        let asteroid = &mut self.asteroids[index];
        debug_assert!(asteroid.body.active, "asteroid destroyed twice");
        if !asteroid.body.active {
            return;
        }
        asteroid.body.destroy();
        self.score += u64::from(asteroid.points());
        self.cues.push(SoundCue::Explosion(asteroid.size.into()));

        let outline = asteroid.body.world_outline();
        let velocity = asteroid.body.velocity;
        if split {
            let children = asteroid.split(&mut self.rng, &self.tuning);
            self.spawned_asteroids.extend(children);
        }
        self.debris.push(Debris::from_outline(
            &outline,
            velocity,
            Palette::Asteroid,
            &mut self.rng,
            &self.tuning,
        ));
    }

    /// Destroy the current UFO, crediting its points
    pub fn destroy_ufo(&mut self) {
        let Some(ufo) = self.ufo.as_mut() else {
            return;
        };
        debug_assert!(ufo.body.active, "UFO destroyed twice");
        if !ufo.body.active {
            return;
        }
        ufo.body.destroy();
        self.score += u64::from(ufo.points());
        self.cues.push(SoundCue::Explosion(ExplosionSize::Medium));
        self.cues.push(SoundCue::UfoEngineStop);
        let outline = ufo.body.world_outline();
        self.debris.push(Debris::from_outline(
            &outline,
            ufo.body.velocity,
            Palette::Ufo,
            &mut self.rng,
            &self.tuning,
        ));
        log::debug!("UFO destroyed, score {}", self.score);
    }

    /// Final life lost: tear down hazards and leave play
    pub fn enter_game_over(&mut self) {
        if self.ufo.take().is_some() {
            self.cues.push(SoundCue::UfoEngineStop);
        }
        if self.gravity_well.take().is_some() {
            self.cues.push(SoundCue::GravityWellDespawn);
        }
        self.ufo_bullets.clear();
        self.respawn_timer = None;

        if self.scores.is_connected() && self.score > 0 {
            self.session = SessionState::SubmittingScore;
        } else {
            self.session = SessionState::GameOver;
            self.game_over_timer = self.tuning.game_over_delay;
        }
        log::info!(
            "Game over: score {} at level {} -> {:?}",
            self.score,
            self.level,
            self.session
        );
    }

    /// End-of-frame pass: drop destroyed entities, admit split children
    pub fn reconcile(&mut self) {
        self.asteroids.retain(|a| a.body.active);
        self.asteroids.append(&mut self.spawned_asteroids);
        self.player_bullets.retain(|b| b.body.active);
        self.ufo_bullets.retain(|b| b.body.active);
        self.debris.retain(|d| d.is_active());

        if self.ufo.as_ref().is_some_and(|u| !u.body.active) {
            self.ufo = None;
            self.ufo_spawn_timer = spawner::next_ufo_delay(&mut self.rng, &self.tuning);
        }
        if self.gravity_well.as_ref().is_some_and(|w| !w.body.active) {
            self.gravity_well = None;
            self.gravity_well_spawn_timer =
                spawner::next_gravity_well_delay(&mut self.rng, &self.tuning);
        }
    }

    /// Where the ship is, or where it will respawn
    pub fn player_position(&self) -> Vec2 {
        if self.ship.body.active {
            self.ship.body.position()
        } else {
            self.bounds.center()
        }
    }

    /// The UFO only targets a ship it could actually hit
    pub fn ship_targetable(&self) -> bool {
        self.ship.body.active && !self.ship.is_invulnerable()
    }
}
