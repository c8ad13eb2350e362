//! Background music cues
//!
//! Decides which looping track should be audible and how fast to fade it.
//! The audio backend only carries out the returned `Fade`s.

use crate::sim::GameEvent;

/// Looping music beds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// Start menu, before the first run
    Menu,
    /// Plays while a run is active
    Game,
}

/// Ramp a track's level (0.0 silent, 1.0 full) over `secs`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub track: Track,
    pub level: f32,
    pub secs: f32,
}

impl Fade {
    fn to(track: Track, level: f32, secs: f32) -> Self {
        Self { track, level, secs }
    }
}

pub const MENU_FADE_IN_SECS: f32 = 1.2;
pub const MENU_FADE_OUT_SECS: f32 = 0.6;
pub const GAME_FADE_IN_SECS: f32 = 0.9;
pub const RESPAWN_FADE_IN_SECS: f32 = 0.6;
pub const GAME_FADE_OUT_SECS: f32 = 0.7;

/// Music state across menu, runs and game over
#[derive(Debug, Clone, Default)]
pub struct Soundtrack {
    unlocked: bool,
    left_menu: bool,
}

impl Soundtrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// First user gesture. Brings in the menu bed unless a run already began;
    /// later calls do nothing.
    pub fn unlock(&mut self) -> Option<Fade> {
        if self.unlocked {
            return None;
        }
        self.unlocked = true;
        if self.left_menu {
            None
        } else {
            Some(Fade::to(Track::Menu, 1.0, MENU_FADE_IN_SECS))
        }
    }

    /// Fades for a game notification, in order
    pub fn on_event(&mut self, event: &GameEvent) -> Vec<Fade> {
        match event {
            GameEvent::RunStarted if !self.left_menu => {
                self.left_menu = true;
                vec![
                    Fade::to(Track::Menu, 0.0, MENU_FADE_OUT_SECS),
                    Fade::to(Track::Game, 1.0, GAME_FADE_IN_SECS),
                ]
            }
            GameEvent::RunStarted => vec![Fade::to(Track::Game, 1.0, RESPAWN_FADE_IN_SECS)],
            GameEvent::RunEnded { .. } => vec![Fade::to(Track::Game, 0.0, GAME_FADE_OUT_SECS)],
            GameEvent::BonusCollected { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ended() -> GameEvent {
        GameEvent::RunEnded {
            score: 20,
            elapsed_secs: 7,
        }
    }

    #[test]
    fn test_first_gesture_brings_in_menu_music_once() {
        let mut music = Soundtrack::new();
        assert_eq!(
            music.unlock(),
            Some(Fade::to(Track::Menu, 1.0, MENU_FADE_IN_SECS))
        );
        assert_eq!(music.unlock(), None);
    }

    #[test]
    fn test_unlock_after_start_keeps_menu_silent() {
        let mut music = Soundtrack::new();
        music.on_event(&GameEvent::RunStarted);
        assert_eq!(music.unlock(), None);
    }

    #[test]
    fn test_start_swaps_menu_for_game_track() {
        let mut music = Soundtrack::new();
        let fades = music.on_event(&GameEvent::RunStarted);
        assert_eq!(
            fades,
            vec![
                Fade::to(Track::Menu, 0.0, MENU_FADE_OUT_SECS),
                Fade::to(Track::Game, 1.0, GAME_FADE_IN_SECS),
            ]
        );
    }

    #[test]
    fn test_game_over_and_respawn_fade_game_track() {
        let mut music = Soundtrack::new();
        music.on_event(&GameEvent::RunStarted);

        assert_eq!(
            music.on_event(&ended()),
            vec![Fade::to(Track::Game, 0.0, GAME_FADE_OUT_SECS)]
        );
        // Respawn never returns to the menu bed
        assert_eq!(
            music.on_event(&GameEvent::RunStarted),
            vec![Fade::to(Track::Game, 1.0, RESPAWN_FADE_IN_SECS)]
        );
    }

    #[test]
    fn test_bonus_leaves_music_alone() {
        let mut music = Soundtrack::new();
        music.on_event(&GameEvent::RunStarted);
        assert!(music.on_event(&GameEvent::BonusCollected { score: 10 }).is_empty());
    }
}
