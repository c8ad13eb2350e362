//! Canvas 2D backend for the render pipeline

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::HostError;
use crate::renderer::colors::css;
use crate::renderer::{Glow, Surface};

const HUD_FONT: &str = "'Segoe UI',sans-serif";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Logical (CSS pixel) size
    width: f32,
    height: f32,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(HostError::NoContext2d)?;
        ctx.set_image_smoothing_enabled(false);
        Ok(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        })
    }

    /// Resize the backing store in device pixels, draw in CSS pixels
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f64) {
        self.width = width;
        self.height = height;
        self.canvas.set_width((width as f64 * pixel_ratio) as u32);
        self.canvas.set_height((height as f64 * pixel_ratio) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        let _ = self
            .ctx
            .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
    }

    pub fn set_visible(&self, visible: bool) {
        let _ = self
            .canvas
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn fill_background(&mut self, color: u32) {
        self.ctx.set_fill_style_str(&css(color, 1.0));
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_vertical_gradient(&mut self, size: Vec2, top: u32, bottom: u32, alpha: f32) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, size.y as f64);
        let _ = gradient.add_color_stop(0.0, &css(top, alpha));
        let _ = gradient.add_color_stop(1.0, &css(bottom, alpha));
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&css(color, 1.0));
        self.circle_path(center, radius);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn fill_glow_circle(&mut self, center: Vec2, radius: f32, glow: Glow) {
        self.ctx.save();
        self.ctx.set_shadow_blur(glow.blur as f64);
        self.ctx.set_shadow_color(&css(glow.shadow, 1.0));
        self.ctx.set_fill_style_str(&css(glow.fill, 1.0));
        self.circle_path(center, radius);
        self.ctx.fill();
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: u32) {
        self.ctx.set_fill_style_str(&css(color, 1.0));
        self.ctx.set_font(&format!("{font_px}px {HUD_FONT}"));
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    fn push_offset(&mut self, offset: Vec2) {
        self.ctx.save();
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn pop_offset(&mut self) {
        self.ctx.restore();
    }
}
