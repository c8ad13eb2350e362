//! Game state and core simulation types
//!
//! Everything the step, collision pass and renderer touch lives in `GameState`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// RNG stream for gameplay (spawns, particle velocities)
const SIM_STREAM: u64 = 0xa02b_dbf7_bb3c_0a7;
/// RNG stream for visual-only randomness (stars, shake)
const FX_STREAM: u64 = 0x5851_f42d_4c95_7f2d;

/// Playable area in canvas units, never smaller than `MIN_PLAYFIELD`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Clamp host dimensions to a usable size (NaN, zero and negatives included)
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(MIN_PLAYFIELD),
            height: height.max(MIN_PLAYFIELD),
        }
    }

    /// Clamp a circle center so the circle stays fully inside
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }

    /// Fallers at or beyond this y are culled
    pub fn cull_line(&self) -> f32 {
        self.height + CULL_MARGIN
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The player's circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Player {
    /// Spawn point: horizontally centered, near the bottom edge
    pub fn start_position(field: &Playfield) -> Vec2 {
        let pos = Vec2::new(
            field.width / 2.0,
            field.height - PLAYER_START_MARGIN.max(PLAYER_RADIUS * 4.0),
        );
        field.clamp_circle(pos, PLAYER_RADIUS)
    }

    pub fn new(field: &Playfield) -> Self {
        Self {
            pos: Self::start_position(field),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }
}

/// A pollution hazard or a renewable bonus; both fall straight down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl FallingObject {
    pub fn hazard(x: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, SPAWN_Y),
            radius: HAZARD_RADIUS,
            speed,
        }
    }

    pub fn bonus(x: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, SPAWN_Y),
            radius: BONUS_RADIUS,
            speed,
        }
    }

    /// Place at an explicit position (scripted scenarios)
    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every frame
    pub life: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Particle {
    /// Move and decay; returns false once dead
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
        self.life > 0.0
    }
}

/// Background star (parallax decoration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Star {
    pub fn random(field: &Playfield, rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * field.width,
                rng.random::<f32>() * field.height,
            ),
            radius: rng.random::<f32>() * 2.0 + 1.0,
            speed: rng.random::<f32>() * 0.3 + 0.1,
        }
    }

    /// Drift down; wrap to the top at a fresh x after leaving the bottom
    pub fn drift(&mut self, field: &Playfield, rng: &mut Pcg32) {
        self.pos.y += self.speed;
        if self.pos.y > field.height {
            self.pos.y = 0.0;
            self.pos.x = rng.random::<f32>() * field.width;
        }
    }
}

/// Score, clock and run flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Whole seconds since the run started
    pub elapsed_secs: u32,
    /// Set by a hazard hit
    pub over: bool,
    /// True between start/respawn and game over
    pub running: bool,
    /// Frame clock timestamp (ms) of the run start
    pub started_at_ms: f64,
}

impl RunState {
    /// Idle state before the first run
    pub fn idle() -> Self {
        Self {
            score: 0,
            elapsed_secs: 0,
            over: false,
            running: false,
            started_at_ms: 0.0,
        }
    }

    pub fn started(now_ms: f64) -> Self {
        Self {
            running: true,
            started_at_ms: now_ms,
            ..Self::idle()
        }
    }

    /// Simulation only advances while this holds
    #[inline]
    pub fn is_active(&self) -> bool {
        self.running && !self.over
    }

    pub fn end(&mut self) {
        self.over = true;
        self.running = false;
    }
}

/// Rendering-only state; never feeds back into the simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualState {
    /// Frames of camera shake left
    pub shake_frames: u32,
    /// Player glow pulse phase (radians, only grows)
    pub pulse_phase: f32,
}

impl VisualState {
    /// Current pulse scale factor
    pub fn pulse(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * PULSE_AMPLITUDE
    }
}

/// Notifications for the host (audio, DOM). Delivered at most once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    BonusCollected { score: u64 },
    RunEnded { score: u64, elapsed_secs: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed both RNG streams were built from
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub player: Player,
    /// Pollution
    pub hazards: Vec<FallingObject>,
    /// Renewables
    pub bonuses: Vec<FallingObject>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub run: RunState,
    pub fx: VisualState,
    /// Gameplay randomness
    pub rng: Pcg32,
    /// Visual randomness, kept apart so rendering can't perturb gameplay
    pub fx_rng: Pcg32,
    /// Pending host notifications
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game on the default playfield
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let playfield = Playfield::default();
        Self {
            seed,
            tuning,
            player: Player::new(&playfield),
            playfield,
            hazards: Vec::new(),
            bonuses: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            run: RunState::idle(),
            fx: VisualState::default(),
            rng: Pcg32::new(seed, SIM_STREAM),
            fx_rng: Pcg32::new(seed, FX_STREAM),
            events: Vec::new(),
        }
    }

    /// Size the playfield, reseed stars, and place the player.
    ///
    /// While a run is active the player keeps its position (clamped to the
    /// new bounds); otherwise it moves to the start position.
    pub fn initialize(&mut self, width: f32, height: f32, star_count: usize) {
        self.playfield = Playfield::new(width, height);

        self.stars = (0..star_count)
            .map(|_| Star::random(&self.playfield, &mut self.fx_rng))
            .collect();

        self.player.pos = if self.run.is_active() {
            self.playfield.clamp_circle(self.player.pos, self.player.radius)
        } else {
            Player::start_position(&self.playfield)
        };
    }

    /// Start (or restart) a run. Stars and pulse carry over.
    pub fn reset_run(&mut self, now_ms: f64) {
        self.hazards.clear();
        self.bonuses.clear();
        self.particles.clear();
        self.player.pos = Player::start_position(&self.playfield);
        self.run = RunState::started(now_ms);
        self.fx.shake_frames = 0;
        self.emit(GameEvent::RunStarted);
    }

    pub fn difficulty(&self) -> f32 {
        self.tuning.difficulty(self.run.score)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take pending events; each is handed out once
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
