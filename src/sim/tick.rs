//! Simulation step
//!
//! One call per frame. Does nothing unless a run is active.

use super::collision::{Collision, DEFAULT_HOOKS, resolve_collisions};
use super::input::Intent;
use super::spawner::spawn;
use super::state::GameState;

/// Advance the game by one tick.
///
/// `now_ms` is the frame clock; elapsed time is whole seconds since the run
/// started on the same clock.
pub fn tick(state: &mut GameState, intent: &Intent, now_ms: f64) -> Vec<Collision> {
    if !state.run.is_active() {
        return Vec::new();
    }

    let since_start = (now_ms - state.run.started_at_ms).max(0.0);
    state.run.elapsed_secs = (since_start / 1000.0).floor() as u32;

    // Move, then keep the whole circle on the playfield
    let player = &mut state.player;
    player.pos += intent.displacement(player.speed);
    player.pos = state.playfield.clamp_circle(player.pos, player.radius);

    spawn(state);

    let cull_line = state.playfield.cull_line();
    for hazard in &mut state.hazards {
        hazard.advance();
    }
    state.hazards.retain(|h| h.pos.y < cull_line);

    for bonus in &mut state.bonuses {
        bonus.advance();
    }
    state.bonuses.retain(|b| b.pos.y < cull_line);

    resolve_collisions(state, DEFAULT_HOOKS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Direction;
    use crate::sim::state::FallingObject;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state(tuning: Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning);
        state.initialize(800.0, 600.0, 0);
        state.reset_run(0.0);
        state.drain_events();
        state
    }

    fn intent_from_bits(bits: u8) -> Intent {
        Intent {
            left: bits & 1 != 0,
            right: bits & 2 != 0,
            up: bits & 4 != 0,
            down: bits & 8 != 0,
        }
    }

    #[test]
    fn test_elapsed_whole_seconds() {
        let mut state = running_state(Tuning::no_spawns());
        state.run.started_at_ms = 1_000.0;
        tick(&mut state, &Intent::default(), 3_999.0);
        assert_eq!(state.run.elapsed_secs, 2);
        tick(&mut state, &Intent::default(), 4_000.0);
        assert_eq!(state.run.elapsed_secs, 3);
        // Clock behind the start never goes negative
        tick(&mut state, &Intent::default(), 0.0);
        assert_eq!(state.run.elapsed_secs, 0);
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = running_state(Tuning::no_spawns());
        let start = state.player.pos;
        let right = Intent {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 16.0);
        assert_eq!(state.player.pos, start + Vec2::new(5.0, 0.0));

        for _ in 0..500 {
            tick(&mut state, &right, 16.0);
        }
        assert_eq!(state.player.pos.x, 800.0 - 22.0);

        let down = Intent {
            down: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &down, 16.0);
        }
        assert_eq!(state.player.pos.y, 600.0 - 22.0);
    }

    #[test]
    fn test_fallers_advance_and_cull() {
        let mut state = running_state(Tuning::no_spawns());
        state
            .hazards
            .push(FallingObject::hazard(0.0, 4.0).at(Vec2::new(30.0, 675.0)));
        state
            .bonuses
            .push(FallingObject::bonus(0.0, 2.5).at(Vec2::new(60.0, 100.0)));

        tick(&mut state, &Intent::default(), 16.0);
        assert_eq!(state.hazards[0].pos.y, 679.0);
        assert_eq!(state.bonuses[0].pos.y, 102.5);

        // 683 >= 600 + 80
        tick(&mut state, &Intent::default(), 32.0);
        assert!(state.hazards.is_empty());
        assert_eq!(state.bonuses.len(), 1);
    }

    #[test]
    fn test_falling_hazard_scenario() {
        let mut state = running_state(Tuning::no_spawns());
        state.player.pos = Vec2::new(400.0, 550.0);
        state.hazards.push(FallingObject::hazard(400.0, 5.0));

        let mut ended_at = None;
        for t in 1..=114 {
            tick(&mut state, &Intent::default(), t as f64 * 16.0);
            if state.run.over {
                ended_at = Some(t);
                break;
            }
        }

        // 550 - (-20 + 5t) < 42 first holds at t = 106
        assert_eq!(ended_at, Some(106));
        assert!(!state.run.running);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_bonus_pickup_through_tick() {
        let mut state = running_state(Tuning::no_spawns());
        state.player.pos = Vec2::new(400.0, 550.0);
        state
            .bonuses
            .push(FallingObject::bonus(0.0, 3.0).at(Vec2::new(400.0, 500.0)));

        for t in 0..10 {
            tick(&mut state, &Intent::default(), t as f64);
        }
        assert_eq!(state.run.score, 10);
        assert!(state.bonuses.is_empty());
        assert_eq!(state.particles.len(), crate::consts::PARTICLE_BURST);
        assert!(state.run.running);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(Tuning::default());
        let mut b = running_state(Tuning::default());
        let left = Intent {
            left: true,
            ..Default::default()
        };

        for t in 0..600 {
            let intent = if (t / 60) % 2 == 0 {
                left
            } else {
                Intent::default()
            };
            tick(&mut a, &intent, t as f64 * 16.0);
            tick(&mut b, &intent, t as f64 * 16.0);
        }

        assert_eq!(a.run, b.run);
        assert_eq!(a.hazards, b.hazards);
        assert_eq!(a.bonuses, b.bonuses);
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn test_intent_directions_map_to_axes() {
        for dir in Direction::ALL {
            let mut state = running_state(Tuning::no_spawns());
            state.player.pos = Vec2::new(400.0, 300.0);
            let mut input = crate::sim::input::InputState::new();
            input.set_intent(dir, true);
            tick(&mut state, &input.intent(), 0.0);
            assert_eq!(state.player.pos, Vec2::new(400.0, 300.0) + dir.unit() * 5.0);
        }
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(
            moves in proptest::collection::vec(0u8..16, 1..400),
            width in 0.0f32..1500.0,
            height in 0.0f32..1000.0,
        ) {
            let mut state = GameState::new(5, Tuning::no_spawns());
            state.initialize(width, height, 0);
            state.reset_run(0.0);
            let field = state.playfield;
            let r = state.player.radius;
            for bits in moves {
                tick(&mut state, &intent_from_bits(bits), 0.0);
                let p = state.player.pos;
                prop_assert!(p.x >= r && p.x <= field.width - r);
                prop_assert!(p.y >= r && p.y <= field.height - r);
            }
        }

        #[test]
        fn idle_step_changes_nothing(
            moves in proptest::collection::vec(0u8..16, 1..50),
            now in 0.0f64..1.0e7,
            over in any::<bool>(),
        ) {
            let mut state = GameState::new(77, Tuning {
                hazard_spawn_base: 1.0,
                bonus_spawn_base: 1.0,
                ..Default::default()
            });
            state.initialize(800.0, 600.0, 0);
            state.reset_run(0.0);
            state.hazards.push(FallingObject::hazard(100.0, 3.0));
            state.bonuses.push(FallingObject::bonus(200.0, 2.0));
            state.run.score = 40;
            if over {
                state.run.end();
            } else {
                state.run.running = false;
            }
            let before = state.clone();

            for bits in moves {
                let collisions = tick(&mut state, &intent_from_bits(bits), now);
                prop_assert!(collisions.is_empty());
            }

            prop_assert_eq!(&state.run, &before.run);
            prop_assert_eq!(&state.hazards, &before.hazards);
            prop_assert_eq!(&state.bonuses, &before.bonuses);
            prop_assert_eq!(state.player.pos, before.player.pos);
        }
    }
}
