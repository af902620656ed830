//! Vector Rocks headless runner
//!
//! Plays the simulation at 60 Hz with a simple autopilot and logs what
//! happened. Usage: `vector-rocks [seed] [seconds]`.

use vector_rocks::audio::{AudioSink, SoundCue};
use vector_rocks::consts::FRAME_DT;
use vector_rocks::highscores::HighScores;
use vector_rocks::renderer::build_frame;
use vector_rocks::sim::{GameState, SessionState, TickInput, tick};
use vector_rocks::{bearing, normalize_angle};

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_SECONDS: u32 = 120;

/// Aim tolerance before the autopilot opens fire (radians)
const FIRE_CONE: f32 = 0.25;
/// Jump away when a rock gets this close (beyond both radii)
const PANIC_DISTANCE: f32 = 30.0;

/// Counts cues instead of playing them
#[derive(Debug, Default)]
struct CueTally {
    shots: u32,
    explosions: u32,
    deaths: u32,
    level_ups: u32,
    hyperspace: u32,
    ufos: u32,
    wells: u32,
}

impl AudioSink for CueTally {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Shoot => self.shots += 1,
            SoundCue::Explosion(_) => self.explosions += 1,
            SoundCue::Death => self.deaths += 1,
            SoundCue::LevelUp => self.level_ups += 1,
            SoundCue::Hyperspace => self.hyperspace += 1,
            SoundCue::UfoEngineStart => self.ufos += 1,
            SoundCue::GravityWellSpawn => self.wells += 1,
            _ => {}
        }
    }
}

/// Turn toward the nearest rock, shoot when lined up, jump when cornered
fn autopilot(state: &GameState) -> TickInput {
    match state.session {
        SessionState::Start | SessionState::ViewingScores | SessionState::GameOver => {
            return TickInput {
                start: true,
                ..Default::default()
            };
        }
        SessionState::SubmittingScore => {
            return TickInput {
                player_name: Some("BOT".to_string()),
                ..Default::default()
            };
        }
        SessionState::Playing => {}
    }

    let ship = &state.ship;
    if !ship.body.active {
        return TickInput::default();
    }
    let position = ship.body.position();

    let nearest = state
        .asteroids
        .iter()
        .map(|a| (a, a.body.position().distance(position) - a.body.radius))
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let Some((rock, gap)) = nearest else {
        return TickInput::default();
    };

    let aim = normalize_angle(bearing(position, rock.body.position()) - ship.body.transform.rotation);
    TickInput {
        left: aim < -FIRE_CONE * 0.5,
        right: aim > FIRE_CONE * 0.5,
        thrust: gap > 250.0 && aim.abs() < FIRE_CONE,
        fire_held: aim.abs() < FIRE_CONE,
        hyperspace: gap < PANIC_DISTANCE && !ship.is_invulnerable(),
        ..Default::default()
    }
}

fn parse_args() -> (u64, u32) {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let seconds = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SECONDS);
    (seed, seconds)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let (seed, seconds) = parse_args();
    log::info!("Vector Rocks (headless) starting, seed {seed:#x}, {seconds}s");

    let mut state = GameState::new(seed).with_score_service(Box::new(HighScores::new()));
    let mut tally = CueTally::default();
    let mut best_score = 0;
    let mut games = 0u32;
    let mut shapes_drawn = 0usize;

    let frames = seconds * 60;
    for _ in 0..frames {
        let input = autopilot(&state);
        let was_playing = state.session == SessionState::Playing;
        tick(&mut state, &input, FRAME_DT);
        if !was_playing && state.session == SessionState::Playing {
            games += 1;
        }
        state.drain_cues(&mut tally);

        let frame = build_frame(&state);
        shapes_drawn += frame.shapes.len();
        best_score = best_score.max(frame.hud.score);
    }

    log::info!(
        "Ran {frames} frames: {games} games started, best score {best_score}, level {}",
        state.level
    );
    log::info!("Cues: {tally:?}");
    log::info!("Average shapes per frame: {}", shapes_drawn / frames.max(1) as usize);
    for row in &state.scores.top {
        log::info!("#{} {} {} (level {})", row.rank, row.player_name, row.score, row.level);
    }
}
