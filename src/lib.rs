//! Eco Dodge - an arcade avoidance game
//!
//! Core modules:
//! - `sim`: Simulation (input, spawning, collisions, scoring, game state)
//! - `renderer`: Ordered render pipeline drawing to an abstract surface
//! - `driver`: Frame loop, event delivery, scheduler abstraction
//! - `settings` / `tuning`: Player preferences and data-driven game balance
//! - `soundtrack`: Menu/game music cues and fades
//! - `web`: Browser host (canvas, DOM wiring, audio), wasm32 only

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod soundtrack;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{EventSink, FrameScheduler, Game, GameLoop, ManualScheduler, run_loop};
pub use settings::{GameConfig, QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Player circle radius
    pub const PLAYER_RADIUS: f32 = 22.0;
    /// Player movement per tick per active direction
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Minimum gap between the player's start position and the bottom edge
    pub const PLAYER_START_MARGIN: f32 = 80.0;

    /// Pollution (hazard) radius
    pub const HAZARD_RADIUS: f32 = 20.0;
    /// Renewable (bonus) radius
    pub const BONUS_RADIUS: f32 = 15.0;
    /// Spawn height, just above the visible area
    pub const SPAWN_Y: f32 = -20.0;
    /// Fallers are culled once this far past the bottom edge
    pub const CULL_MARGIN: f32 = 80.0;

    /// Points per renewable collected
    pub const BONUS_VALUE: u64 = 10;

    /// Particles per collection burst
    pub const PARTICLE_BURST: usize = 10;
    /// Particle life lost per frame
    pub const PARTICLE_DECAY: f32 = 0.03;
    /// Particle draw radius
    pub const PARTICLE_RADIUS: f32 = 3.0;
    /// Max particle speed per axis (velocity is in [-2, 2])
    pub const PARTICLE_SPREAD: f32 = 4.0;
    /// Burst color for a collected renewable (0xRRGGBB)
    pub const PARTICLE_COLOR_BONUS: u32 = 0x66ff99;

    /// Frames of camera shake after a hazard hit
    pub const SHAKE_FRAMES: u32 = 10;
    /// Max shake offset per axis
    pub const SHAKE_MAGNITUDE: f32 = 5.0;

    /// Pulse phase advance per frame
    pub const PULSE_STEP: f32 = 0.05;
    /// Pulse scale amplitude
    pub const PULSE_AMPLITUDE: f32 = 0.15;

    /// Star opacity
    pub const STAR_ALPHA: f32 = 0.3;

    /// Glow blur for falling objects
    pub const FALLER_GLOW: f32 = 18.0;
    /// Glow blur for the player (before pulse)
    pub const PLAYER_GLOW: f32 = 40.0;

    /// Smallest playfield dimension accepted by `initialize`
    pub const MIN_PLAYFIELD: f32 = 120.0;
}
