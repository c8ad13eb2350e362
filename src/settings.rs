//! Game settings and preferences
//!
//! Read once at startup from an optional JSON config block (`GameConfig`);
//! nothing is written back between sessions.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Background star count for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 60,
            QualityPreset::High => 120,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Camera shake on game over
    pub screen_shake: bool,
    /// Collection particle bursts
    pub particles: bool,
    /// Parallax starfield
    pub starfield: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start muted
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            particles: true,
            starfield: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Stars to seed at sizing (0 when the starfield is off)
    pub fn star_count(&self) -> usize {
        if self.starfield {
            self.quality.star_count()
        } else {
            0
        }
    }

    /// Sound effect gain before muting
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Music bed gain before muting
    pub fn music_gain(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}

/// Page-supplied configuration: `{"settings": {...}, "tuning": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settings: Settings,
    pub tuning: Tuning,
}

impl GameConfig {
    /// Parse from JSON; missing sections and fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
