//! Rendering module
//!
//! An ordered stage pipeline drawing through the `Surface` trait.

pub mod colors;
pub mod pipeline;
pub mod surface;

pub use pipeline::{RenderStage, render};
pub use surface::{DrawCommand, DrawList, Glow, Surface};
