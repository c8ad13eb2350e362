//! Eco Dodge entry point
//!
//! On wasm the browser host takes over. Natively there is no window: a
//! headless session plays one scripted run against a recording surface.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = eco_dodge::web::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eco Dodge (native) starting headless session...");
    headless::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use eco_dodge::renderer::DrawList;
    use eco_dodge::sim::Direction;
    use eco_dodge::{Game, GameLoop, ManualScheduler, Settings, Tuning, run_loop};

    const SEED: u64 = 0x5eed_ec0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// One minute at 60 fps
    const MAX_FRAMES: u32 = 3600;
    /// Frames spent holding each direction before switching
    const SWEEP_FRAMES: u32 = 45;

    pub fn run() {
        let settings = Settings::default();
        let mut game = Game::new(SEED, settings, Tuning::default());
        game.initialize(800.0, 600.0);
        game.start_run(0.0);

        let game_loop = Rc::new(RefCell::new(GameLoop::new(game, DrawList::new())));
        let scheduler = Rc::new(ManualScheduler::new());
        run_loop(Rc::clone(&game_loop), Rc::clone(&scheduler));

        let mut frame = 0;
        while frame < MAX_FRAMES {
            // Sweep left and right along the bottom
            let leftward = (frame / SWEEP_FRAMES) % 2 == 0;
            {
                let mut lp = game_loop.borrow_mut();
                lp.game.set_input_intent(Direction::Left, leftward);
                lp.game.set_input_intent(Direction::Right, !leftward);
            }

            frame += 1;
            if !scheduler.fire(frame as f64 * FRAME_MS) {
                log::warn!("Frame loop stopped early");
                break;
            }
            if game_loop.borrow().game.state.run.over {
                break;
            }
        }

        let lp = game_loop.borrow();
        log::info!(
            "Session finished after {} frames, {} draw commands in the last frame",
            lp.game.frames(),
            lp.surface.len()
        );
        match serde_json::to_string(&lp.game.state.run) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize run state: {}", e),
        }
    }
}
