//! Directional input
//!
//! Raw key names (as reported by `KeyboardEvent.key`) resolve to four
//! independent movement intents. The step reads one `Intent` snapshot per tick.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Keys bound to this direction: arrow key plus WASD letter in both cases
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Direction::Left => &["ArrowLeft", "a", "A"],
            Direction::Right => &["ArrowRight", "d", "D"],
            Direction::Up => &["ArrowUp", "w", "W"],
            Direction::Down => &["ArrowDown", "s", "S"],
        }
    }

    /// Direction bound to a key, if any
    pub fn from_key(key: &str) -> Option<Direction> {
        Self::ALL.into_iter().find(|dir| dir.keys().contains(&key))
    }

    /// Unit step in canvas space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Movement intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Intent {
    pub fn is_set(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Per-tick displacement. Axes add independently, so diagonals
    /// move `speed` on both axes.
    pub fn displacement(&self, speed: f32) -> Vec2 {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.is_set(*dir))
            .map(|dir| dir.unit() * speed)
            .sum()
    }
}

/// Held keys plus host-set intents
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held_keys: HashSet<String>,
    forced: [bool; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        if Direction::from_key(key).is_some() {
            self.held_keys.insert(key.to_owned());
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held_keys.remove(key);
    }

    /// Set an intent directly (touch controls, scripted input)
    pub fn set_intent(&mut self, dir: Direction, active: bool) {
        self.forced[dir.index()] = active;
    }

    /// Drop everything held (window blur)
    pub fn clear(&mut self) {
        self.held_keys.clear();
        self.forced = [false; 4];
    }

    pub fn is_active(&self, dir: Direction) -> bool {
        self.forced[dir.index()] || dir.keys().iter().any(|k| self.held_keys.contains(*k))
    }

    /// Snapshot for this tick
    pub fn intent(&self) -> Intent {
        Intent {
            left: self.is_active(Direction::Left),
            right: self.is_active(Direction::Right),
            up: self.is_active(Direction::Up),
            down: self.is_active(Direction::Down),
        }
    }
}
