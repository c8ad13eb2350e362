//! Drawing surface abstraction
//!
//! The pipeline only speaks this small 2D vocabulary. The browser host backs
//! it with a Canvas 2D context; `DrawList` records commands for tests and the
//! headless binary.

use glam::Vec2;

/// Fill + blurred shadow used for the glowing circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub fill: u32,
    pub shadow: u32,
    pub blur: f32,
}

pub trait Surface {
    /// Called once before each frame is drawn
    fn begin_frame(&mut self) {}
    /// Solid fill of the whole surface
    fn fill_background(&mut self, color: u32);
    /// Top-to-bottom gradient over `(0,0)..size`
    fn fill_vertical_gradient(&mut self, size: Vec2, top: u32, bottom: u32, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32);
    fn fill_glow_circle(&mut self, center: Vec2, radius: f32, glow: Glow);
    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: u32);
    /// Translate everything drawn until the matching `pop_offset`
    fn push_offset(&mut self, offset: Vec2);
    fn pop_offset(&mut self);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        color: u32,
    },
    Gradient {
        size: Vec2,
        top: u32,
        bottom: u32,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
        alpha: f32,
    },
    GlowCircle {
        center: Vec2,
        radius: f32,
        glow: Glow,
    },
    Text {
        text: String,
        pos: Vec2,
        font_px: f32,
        color: u32,
    },
    PushOffset(Vec2),
    PopOffset,
}

/// Recording surface
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text commands in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    /// Keep only the latest frame
    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn fill_background(&mut self, color: u32) {
        self.commands.push(DrawCommand::Background { color });
    }

    fn fill_vertical_gradient(&mut self, size: Vec2, top: u32, bottom: u32, alpha: f32) {
        self.commands.push(DrawCommand::Gradient {
            size,
            top,
            bottom,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_glow_circle(&mut self, center: Vec2, radius: f32, glow: Glow) {
        self.commands.push(DrawCommand::GlowCircle {
            center,
            radius,
            glow,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: u32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            font_px,
            color,
        });
    }

    fn push_offset(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::PushOffset(offset));
    }

    fn pop_offset(&mut self) {
        self.commands.push(DrawCommand::PopOffset);
    }
}
