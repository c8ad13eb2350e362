//! Collision detection and scoring
//!
//! Plain circle overlap: `distance(centers) < r_a + r_b`. Hazards end the run,
//! bonuses score and disappear. Nothing is ever deflected.
//!
//! Visual reactions (particle bursts, camera shake) run as an ordered list of
//! post-collision hooks, each seeing every collision event of the pass.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Particle};
use crate::consts::*;

/// A collision resolved this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    /// Player touched pollution; the run is over
    Hazard { at: Vec2 },
    /// Player collected a renewable
    Bonus { at: Vec2 },
}

/// Reaction to a resolved collision
pub type CollisionHook = fn(&mut GameState, &Collision);

/// Hooks run after every collision, in order
pub const DEFAULT_HOOKS: &[CollisionHook] = &[burst_on_bonus, shake_on_hazard];

/// Strict circle overlap
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Resolve player collisions against hazards then bonuses, firing `hooks`
/// for each one. Returns what happened, in order.
pub fn resolve_collisions(state: &mut GameState, hooks: &[CollisionHook]) -> Vec<Collision> {
    let mut collisions = Vec::new();
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    // First hazard hit wins; bonuses are not examined on a fatal tick
    let hit = state
        .hazards
        .iter()
        .any(|h| circles_overlap(player_pos, player_radius, h.pos, h.radius));
    if hit {
        state.run.end();
        state.emit(GameEvent::RunEnded {
            score: state.run.score,
            elapsed_secs: state.run.elapsed_secs,
        });
        log::info!(
            "Run over: score {} after {}s",
            state.run.score,
            state.run.elapsed_secs
        );
        collisions.push(Collision::Hazard { at: player_pos });
    } else {
        // Back to front so removal keeps pending indices valid
        for i in (0..state.bonuses.len()).rev() {
            let bonus = &state.bonuses[i];
            if circles_overlap(player_pos, player_radius, bonus.pos, bonus.radius) {
                state.bonuses.remove(i);
                state.run.score += BONUS_VALUE;
                state.emit(GameEvent::BonusCollected {
                    score: state.run.score,
                });
                log::debug!("Renewable collected, score {}", state.run.score);
                collisions.push(Collision::Bonus { at: player_pos });
            }
        }
    }

    for collision in &collisions {
        for hook in hooks {
            hook(state, collision);
        }
    }

    collisions
}

/// Particle burst at the player when a renewable is collected
pub fn burst_on_bonus(state: &mut GameState, collision: &Collision) {
    if let Collision::Bonus { at } = *collision {
        spawn_particles(state, at, PARTICLE_COLOR_BONUS);
    }
}

/// Camera shake when pollution ends the run
pub fn shake_on_hazard(state: &mut GameState, collision: &Collision) {
    if matches!(collision, Collision::Hazard { .. }) {
        state.fx.shake_frames = SHAKE_FRAMES;
    }
}

/// Push a burst of `PARTICLE_BURST` particles with random velocities
pub fn spawn_particles(state: &mut GameState, at: Vec2, color: u32) {
    let rng = &mut state.rng;
    state.particles.extend((0..PARTICLE_BURST).map(|_| Particle {
        pos: at,
        vel: Vec2::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        ),
        life: 1.0,
        color,
    }));
}
