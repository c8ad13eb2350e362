//! Browser host
//!
//! Finds the page elements, builds the game, wires input and starts the
//! `requestAnimationFrame` loop.

mod audio;
mod canvas;
mod dom;
mod error;
mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

pub use audio::{AudioManager, SoundEffect};
pub use canvas::CanvasSurface;
pub use error::HostError;
pub use scheduler::{RafScheduler, now_ms};

use crate::driver::{Game, GameLoop, run_loop};
use crate::settings::GameConfig;
use crate::sim::GameEvent;

pub(crate) type SharedLoop = Rc<RefCell<GameLoop<CanvasSurface>>>;

const CONFIG_ID: &str = "game-config";

/// Read the optional `<script id="game-config">` block
fn load_config(document: &Document) -> GameConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return GameConfig::default();
    };
    match GameConfig::from_json(&text) {
        Ok(config) => {
            log::info!("Loaded page config");
            config
        }
        Err(e) => {
            log::warn!("Invalid #{} ({}), using defaults", CONFIG_ID, e);
            GameConfig::default()
        }
    }
}

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::fill(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => js_sys::Date::now() as u64,
    }
}

pub fn run() -> Result<(), HostError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| HostError::Logger(e.to_string()))?;

    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(dom::CANVAS_ID)
        .ok_or(HostError::MissingElement { id: dom::CANVAS_ID })?
        .dyn_into()
        .map_err(|_| HostError::NotACanvas { id: dom::CANVAS_ID })?;

    let config = load_config(&document);
    let audio = Rc::new(RefCell::new(AudioManager::new(&config.settings)));

    // Runs inside the frame borrow; must not touch the game loop
    let sink_audio = Rc::clone(&audio);
    let sink_document = document.clone();
    let sink = move |event: &GameEvent| {
        sink_audio.borrow_mut().handle_event(event);
        match event {
            GameEvent::RunStarted => {
                dom::set_display(&sink_document, dom::RESPAWN_BUTTON_ID, false)
            }
            GameEvent::RunEnded { .. } => {
                dom::set_display(&sink_document, dom::RESPAWN_BUTTON_ID, true)
            }
            GameEvent::BonusCollected { .. } => {}
        }
    };

    let surface = CanvasSurface::new(canvas)?;
    surface.set_visible(false);

    let seed = random_seed();
    let game = Game::new(seed, config.settings, config.tuning).with_sink(sink);
    log::info!("Game created with seed: {}", seed);

    let game_loop: SharedLoop = Rc::new(RefCell::new(GameLoop::new(game, surface)));
    dom::resize(&game_loop);
    dom::setup_resize(Rc::clone(&game_loop));
    dom::setup_keyboard(Rc::clone(&game_loop));
    dom::setup_start_button(Rc::clone(&game_loop), Rc::clone(&audio));
    dom::setup_respawn_button(Rc::clone(&game_loop));
    dom::setup_audio_unlock(Rc::clone(&audio));
    dom::setup_mute_button(audio);

    run_loop(game_loop, Rc::new(RafScheduler));
    Ok(())
}
