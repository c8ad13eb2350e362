//! Pollution / renewable spawning
//!
//! Two independent Bernoulli trials per tick, both scaled by difficulty.

use rand::Rng;

use super::state::{FallingObject, GameState};

/// What a spawn pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub hazard: bool,
    pub bonus: bool,
}

/// Run one spawn pass. No-op unless the run is active.
pub fn spawn(state: &mut GameState) -> SpawnOutcome {
    let mut outcome = SpawnOutcome::default();
    if !state.run.is_active() {
        return outcome;
    }

    let difficulty = state.difficulty();
    let width = state.playfield.width;
    let rng = &mut state.rng;

    if rng.random::<f32>() < state.tuning.hazard_spawn_base * difficulty {
        let x = rng.random::<f32>() * width;
        let speed = 2.0 + rng.random::<f32>() * 2.0 * difficulty;
        state.hazards.push(FallingObject::hazard(x, speed));
        outcome.hazard = true;
    }

    if rng.random::<f32>() < state.tuning.bonus_spawn_base * difficulty {
        let x = rng.random::<f32>() * width;
        let speed = 2.0 + rng.random::<f32>();
        state.bonuses.push(FallingObject::bonus(x, speed));
        outcome.bonus = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BONUS_RADIUS, HAZARD_RADIUS, SPAWN_Y};
    use crate::tuning::Tuning;

    fn active_state(tuning: Tuning) -> GameState {
        let mut state = GameState::new(42, tuning);
        state.initialize(800.0, 600.0, 0);
        state.reset_run(0.0);
        state
    }

    #[test]
    fn test_no_spawn_when_idle() {
        let mut state = GameState::new(42, Tuning {
            hazard_spawn_base: 1.0,
            bonus_spawn_base: 1.0,
            ..Default::default()
        });
        assert_eq!(spawn(&mut state), SpawnOutcome::default());
        assert!(state.hazards.is_empty() && state.bonuses.is_empty());
    }

    #[test]
    fn test_certain_spawn_ranges() {
        let mut state = active_state(Tuning {
            hazard_spawn_base: 1.0,
            bonus_spawn_base: 1.0,
            ..Default::default()
        });
        state.run.score = 200; // difficulty 3

        for _ in 0..200 {
            let outcome = spawn(&mut state);
            assert!(outcome.hazard && outcome.bonus);
        }

        for h in &state.hazards {
            assert!(h.pos.x >= 0.0 && h.pos.x < 800.0);
            assert_eq!(h.pos.y, SPAWN_Y);
            assert_eq!(h.radius, HAZARD_RADIUS);
            assert!(h.speed >= 2.0 && h.speed < 8.0);
        }
        for b in &state.bonuses {
            assert!(b.pos.x >= 0.0 && b.pos.x < 800.0);
            assert_eq!(b.radius, BONUS_RADIUS);
            assert!(b.speed >= 2.0 && b.speed < 3.0);
        }
    }

    #[test]
    fn test_zero_rates_never_spawn() {
        let mut state = active_state(Tuning::no_spawns());
        for _ in 0..1000 {
            spawn(&mut state);
        }
        assert!(state.hazards.is_empty() && state.bonuses.is_empty());
    }

    #[test]
    fn test_spawn_rate_roughly_matches_probability() {
        let mut state = active_state(Tuning::default());
        let mut hazards = 0;
        let mut bonuses = 0;
        let trials = 20_000;
        for _ in 0..trials {
            let outcome = spawn(&mut state);
            hazards += outcome.hazard as u32;
            bonuses += outcome.bonus as u32;
        }
        // Expected 400 and 300 at difficulty 1
        assert!((300..500).contains(&hazards), "hazards = {hazards}");
        assert!((220..380).contains(&bonuses), "bonuses = {bonuses}");
    }
}
