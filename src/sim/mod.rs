//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (separate visual stream)
//! - One step per frame, driven by an explicit clock value
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Collision, CollisionHook, DEFAULT_HOOKS, circles_overlap, resolve_collisions};
pub use input::{Direction, Intent, InputState};
pub use spawner::{SpawnOutcome, spawn};
pub use state::{
    FallingObject, GameEvent, GameState, Particle, Player, Playfield, RunState, Star, VisualState,
};
pub use tick::tick;
