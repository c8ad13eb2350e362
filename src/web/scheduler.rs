//! `requestAnimationFrame` scheduling and the frame clock

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::driver::FrameScheduler;

/// Schedules frames on the browser's display refresh
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, frame: Box<dyn FnOnce(f64)>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window - frame loop stopped");
            return;
        };
        // Freed by the JS side after its single call
        let callback = Closure::once_into_js(move |time: f64| frame(time));
        if window
            .request_animation_frame(callback.unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed - frame loop stopped");
        }
    }
}

/// Milliseconds on the same clock `requestAnimationFrame` reports
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
