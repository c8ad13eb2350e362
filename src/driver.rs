//! Game loop driver
//!
//! `Game` owns all state and exposes the host-facing operations. The loop
//! itself is scheduled through `FrameScheduler`, so the browser plugs in
//! `requestAnimationFrame` and tests pump frames by hand.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::renderer::{Surface, render};
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GameState, InputState, tick};
use crate::tuning::Tuning;

/// Receives host notifications. Must not fail or block.
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Sink that only logs (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, event: &GameEvent) {
        log::info!("Event: {:?}", event);
    }
}

/// Game state plus everything the host talks to
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub settings: Settings,
    sink: Box<dyn EventSink>,
    frames: u64,
}

impl Game {
    pub fn new(seed: u64, settings: Settings, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            input: InputState::new(),
            settings,
            sink: Box::new(LogSink),
            frames: 0,
        }
    }

    /// Replace the event sink
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Size the playfield (startup and every resize)
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.state
            .initialize(width, height, self.settings.star_count());
        log::info!(
            "Playfield {}x{} (requested {}x{})",
            self.state.playfield.width,
            self.state.playfield.height,
            width,
            height
        );
    }

    /// Begin a run from the menu
    pub fn start_run(&mut self, now_ms: f64) {
        self.state.reset_run(now_ms);
        log::info!("Run started (seed {})", self.state.seed);
        self.flush_events();
    }

    /// Begin a fresh run after game over
    pub fn respawn(&mut self, now_ms: f64) {
        self.start_run(now_ms);
    }

    pub fn set_input_intent(&mut self, dir: Direction, active: bool) {
        self.input.set_intent(dir, active);
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// One frame: simulation step, render pass, then event delivery
    pub fn tick<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        let intent = self.input.intent();
        tick(&mut self.state, &intent, now_ms);
        render(&mut self.state, &self.settings, surface);
        self.flush_events();
        self.frames += 1;
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            self.sink.notify(&event);
        }
    }
}

/// Schedules the next frame callback (receives the frame timestamp in ms)
pub trait FrameScheduler {
    fn request_frame(&self, frame: Box<dyn FnOnce(f64)>);
}

/// A game paired with the surface it draws to
pub struct GameLoop<S> {
    pub game: Game,
    pub surface: S,
}

impl<S: Surface> GameLoop<S> {
    pub fn new(game: Game, surface: S) -> Self {
        Self { game, surface }
    }

    pub fn frame(&mut self, now_ms: f64) {
        self.game.tick(now_ms, &mut self.surface);
    }
}

/// Run forever: every scheduled frame ticks once and schedules the next,
/// whether or not a run is active.
pub fn run_loop<S, F>(game_loop: Rc<RefCell<GameLoop<S>>>, scheduler: Rc<F>)
where
    S: Surface + 'static,
    F: FrameScheduler + ?Sized + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |now_ms| {
        game_loop.borrow_mut().frame(now_ms);
        run_loop(game_loop, next);
    }));
}

/// Scheduler whose frames fire only when asked (tests, headless runs)
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<VecDeque<Box<dyn FnOnce(f64)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fire the oldest pending frame; false if none was scheduled
    pub fn fire(&self, now_ms: f64) -> bool {
        let frame = self.pending.borrow_mut().pop_front();
        match frame {
            Some(frame) => {
                frame(now_ms);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, frame: Box<dyn FnOnce(f64)>) {
        self.pending.borrow_mut().push_back(frame);
    }
}
