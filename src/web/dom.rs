//! DOM wiring: viewport sizing, keyboard, menu / respawn / mute buttons,
//! first-click audio unlock

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, FocusEvent, HtmlElement, KeyboardEvent, MouseEvent,
    Window,
};

use super::SharedLoop;
use super::audio::AudioManager;
use super::scheduler::now_ms;

pub const CANVAS_ID: &str = "gameCanvas";
pub const START_MENU_ID: &str = "startMenu";
pub const START_BUTTON_ID: &str = "startBtn";
pub const RESPAWN_BUTTON_ID: &str = "respawnBtn";
pub const MUTE_BUTTON_ID: &str = "muteBtn";
pub const WRAPPER_ID: &str = "gameWrap";

/// Windowed-mode size caps
const MAX_WINDOWED_WIDTH: f64 = 1100.0;
const MAX_WINDOWED_HEIGHT: f64 = 720.0;

/// Show or hide an element by id; missing elements are ignored
pub fn set_display(document: &Document, id: &str, visible: bool) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let value = if visible { "block" } else { "none" };
        let _ = el.style().set_property("display", value);
    }
}

/// Logical playfield size: whole window when full-screen, capped otherwise
pub fn viewport_size(window: &Window, document: &Document) -> (f32, f32) {
    let inner_w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(MAX_WINDOWED_WIDTH);
    let inner_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(MAX_WINDOWED_HEIGHT);

    if document.fullscreen_element().is_some() {
        (inner_w as f32, inner_h as f32)
    } else {
        (
            (inner_w * 0.95).min(MAX_WINDOWED_WIDTH).floor() as f32,
            (inner_h * 0.72).min(MAX_WINDOWED_HEIGHT).floor() as f32,
        )
    }
}

/// Re-measure the viewport and reflow the game
pub fn resize(game_loop: &SharedLoop) {
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    let (width, height) = viewport_size(&window, &document);
    let mut lp = game_loop.borrow_mut();
    lp.surface.resize(width, height, window.device_pixel_ratio());
    lp.game.initialize(width, height);
}

/// Attach a listener for the lifetime of the page
fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("Failed to attach '{}' listener", event);
    }
    closure.forget();
}

fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
    let Some(el) = document.get_element_by_id(id) else {
        log::warn!("Element #{} not found - control disabled", id);
        return;
    };
    listen(&el, "click", handler);
}

pub fn setup_resize(game_loop: SharedLoop) {
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    let lp = game_loop.clone();
    listen(&window, "resize", move |_event: Event| resize(&lp));
    listen(&document, "fullscreenchange", move |_event: Event| {
        resize(&game_loop)
    });
}

pub fn setup_keyboard(game_loop: SharedLoop) {
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    let lp = game_loop.clone();
    listen(&document, "keydown", move |event: KeyboardEvent| {
        lp.borrow_mut().game.key_down(&event.key());
    });
    let lp = game_loop.clone();
    listen(&document, "keyup", move |event: KeyboardEvent| {
        lp.borrow_mut().game.key_up(&event.key());
    });
    // Keys released while unfocused never report keyup
    listen(&window, "blur", move |_event: FocusEvent| {
        game_loop.borrow_mut().game.clear_input();
    });
}

pub fn setup_start_button(game_loop: SharedLoop, audio: Rc<RefCell<AudioManager>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let doc = document.clone();
    on_click(&document, START_BUTTON_ID, move |_event| {
        if let Some(wrap) = doc.get_element_by_id(WRAPPER_ID) {
            // Best effort; fullscreenchange reflows once it lands
            if wrap.request_fullscreen().is_err() {
                log::warn!("Full-screen request refused");
            }
        }
        set_display(&doc, START_MENU_ID, false);
        game_loop.borrow().surface.set_visible(true);
        audio.borrow().resume();
        resize(&game_loop);
        game_loop.borrow_mut().game.start_run(now_ms());
    });
}

pub fn setup_respawn_button(game_loop: SharedLoop) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    set_display(&document, RESPAWN_BUTTON_ID, false);
    on_click(&document, RESPAWN_BUTTON_ID, move |_event| {
        game_loop.borrow_mut().game.respawn(now_ms());
    });
}

/// Browsers keep audio suspended until a gesture; the first click brings
/// in the menu music. Later clicks are no-ops.
pub fn setup_audio_unlock(audio: Rc<RefCell<AudioManager>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    listen(&document, "click", move |_event: MouseEvent| {
        audio.borrow_mut().unlock();
    });
}

pub fn setup_mute_button(audio: Rc<RefCell<AudioManager>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let button: Option<Element> = document.get_element_by_id(MUTE_BUTTON_ID);
    let Some(button) = button else { return };
    render_mute_state(&button, audio.borrow().is_muted());

    let target = button.clone();
    on_click(&document, MUTE_BUTTON_ID, move |_event| {
        let muted = audio.borrow_mut().toggle_muted();
        render_mute_state(&target, muted);
    });
}

fn render_mute_state(button: &Element, muted: bool) {
    let _ = button.class_list().toggle_with_force("muted", muted);
    button.set_text_content(Some(if muted { "🔇" } else { "🔊" }));
}
