//! Layered render pipeline
//!
//! Stages draw back to front. World stages share the camera-shake offset;
//! the HUD is drawn last in screen space.
//!
//! Rendering never touches gameplay entities or the score. It does advance
//! animation-only state: star drift, particle motion/decay, pulse phase and
//! the shake countdown.

use glam::Vec2;
use rand::Rng;

use super::colors;
use super::surface::{Glow, Surface};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;

/// One layer of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// Drifting stars over the cleared background
    Starfield,
    /// Translucent gradient over the playfield
    Backdrop,
    Hazards,
    Bonuses,
    /// Pulsing player glow
    Player,
    Particles,
    /// Score and time text
    Hud,
}

impl RenderStage {
    /// Stages drawn under the shake offset, back to front
    pub const WORLD: [RenderStage; 6] = [
        RenderStage::Starfield,
        RenderStage::Backdrop,
        RenderStage::Hazards,
        RenderStage::Bonuses,
        RenderStage::Player,
        RenderStage::Particles,
    ];

    pub fn draw<S: Surface + ?Sized>(
        self,
        state: &mut GameState,
        settings: &Settings,
        surface: &mut S,
    ) {
        match self {
            RenderStage::Starfield => draw_starfield(state, surface),
            RenderStage::Backdrop => {
                let size = Vec2::new(state.playfield.width, state.playfield.height);
                surface.fill_vertical_gradient(
                    size,
                    colors::BACKDROP_TOP,
                    colors::BACKDROP_BOTTOM,
                    colors::BACKDROP_ALPHA,
                );
            }
            RenderStage::Hazards => {
                let glow = Glow {
                    fill: colors::HAZARD,
                    shadow: colors::HAZARD_GLOW,
                    blur: FALLER_GLOW,
                };
                for hazard in &state.hazards {
                    surface.fill_glow_circle(hazard.pos, hazard.radius, glow);
                }
            }
            RenderStage::Bonuses => {
                let glow = Glow {
                    fill: colors::BONUS,
                    shadow: colors::BONUS_GLOW,
                    blur: FALLER_GLOW,
                };
                for bonus in &state.bonuses {
                    surface.fill_glow_circle(bonus.pos, bonus.radius, glow);
                }
            }
            RenderStage::Player => {
                state.fx.pulse_phase += PULSE_STEP;
                let pulse = state.fx.pulse();
                let glow = Glow {
                    fill: colors::PLAYER,
                    shadow: colors::PLAYER_GLOW,
                    blur: PLAYER_GLOW * pulse,
                };
                surface.fill_glow_circle(state.player.pos, state.player.radius * pulse, glow);
            }
            RenderStage::Particles => draw_particles(state, settings.particles, surface),
            RenderStage::Hud => {
                let font_px = (state.playfield.width / 50.0).max(16.0);
                surface.fill_text(
                    &format!("Score: {}", state.run.score),
                    Vec2::new(20.0, 30.0),
                    font_px,
                    colors::HUD_TEXT,
                );
                surface.fill_text(
                    &format!("Time: {}s", state.run.elapsed_secs),
                    Vec2::new(20.0, 60.0),
                    font_px,
                    colors::HUD_TEXT,
                );
            }
        }
    }
}

fn draw_starfield<S: Surface + ?Sized>(state: &mut GameState, surface: &mut S) {
    for star in &mut state.stars {
        star.drift(&state.playfield, &mut state.fx_rng);
        surface.fill_circle(star.pos, star.radius, colors::STAR, STAR_ALPHA);
    }
}

/// Draw at alpha = life, then move and decay; dead particles are dropped
fn draw_particles<S: Surface + ?Sized>(state: &mut GameState, visible: bool, surface: &mut S) {
    state.particles.retain_mut(|p| {
        if visible {
            surface.fill_circle(p.pos, PARTICLE_RADIUS, p.color, p.life);
        }
        p.advance()
    });
}

/// Consume one frame of shake, returning the offset to draw the world with
fn take_shake_offset(state: &mut GameState, settings: &Settings) -> Option<Vec2> {
    if state.fx.shake_frames == 0 {
        return None;
    }
    state.fx.shake_frames -= 1;
    if !settings.effective_screen_shake() {
        return None;
    }
    let rng = &mut state.fx_rng;
    Some(Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0 * SHAKE_MAGNITUDE,
        (rng.random::<f32>() - 0.5) * 2.0 * SHAKE_MAGNITUDE,
    ))
}

/// Render one frame
pub fn render<S: Surface + ?Sized>(state: &mut GameState, settings: &Settings, surface: &mut S) {
    surface.begin_frame();
    // Screen space, so a shaken frame leaves no stale edges
    surface.fill_background(colors::BACKGROUND);

    let offset = take_shake_offset(state, settings);
    if let Some(offset) = offset {
        surface.push_offset(offset);
    }

    for stage in RenderStage::WORLD {
        stage.draw(state, settings, surface);
    }

    if offset.is_some() {
        surface.pop_offset();
    }

    RenderStage::Hud.draw(state, settings, surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCommand, DrawList};
    use crate::sim::{FallingObject, Particle};
    use crate::tuning::Tuning;

    fn scene() -> GameState {
        let mut state = GameState::new(3, Tuning::no_spawns());
        state.initialize(800.0, 600.0, 5);
        state.reset_run(0.0);
        state.hazards.push(FallingObject::hazard(100.0, 3.0));
        state.bonuses.push(FallingObject::bonus(300.0, 2.0));
        state
    }

    fn kind(cmd: &DrawCommand) -> &'static str {
        match cmd {
            DrawCommand::Background { .. } => "bg",
            DrawCommand::Gradient { .. } => "gradient",
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::GlowCircle { .. } => "glow",
            DrawCommand::Text { .. } => "text",
            DrawCommand::PushOffset(_) => "push",
            DrawCommand::PopOffset => "pop",
        }
    }

    #[test]
    fn test_draw_order() {
        let mut state = scene();
        let mut list = DrawList::new();
        render(&mut state, &Settings::default(), &mut list);

        let kinds: Vec<_> = list.commands.iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec![
                "bg", "circle", "circle", "circle", "circle", "circle", // stars
                "gradient", "glow", // hazard
                "glow", // bonus
                "glow", // player
                "text", "text",
            ]
        );

        let glows: Vec<_> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::GlowCircle { glow, .. } => Some(glow.fill),
                _ => None,
            })
            .collect();
        assert_eq!(glows, vec![colors::HAZARD, colors::BONUS, colors::PLAYER]);
        assert_eq!(list.texts(), vec!["Score: 0", "Time: 0s"]);
    }

    #[test]
    fn test_player_pulse() {
        let mut state = scene();
        let mut list = DrawList::new();
        render(&mut state, &Settings::default(), &mut list);

        assert_eq!(state.fx.pulse_phase, PULSE_STEP);
        let expected = 1.0 + PULSE_STEP.sin() * PULSE_AMPLITUDE;
        let player = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::GlowCircle { radius, glow, .. } if glow.fill == colors::PLAYER => {
                    Some((*radius, glow.blur))
                }
                _ => None,
            })
            .unwrap();
        assert!((player.0 - PLAYER_RADIUS * expected).abs() < 1e-4);
        assert!((player.1 - PLAYER_GLOW * expected).abs() < 1e-4);
    }

    #[test]
    fn test_shake_wraps_world_only_and_counts_down() {
        let mut state = scene();
        state.fx.shake_frames = 2;
        let settings = Settings::default();

        let mut list = DrawList::new();
        render(&mut state, &settings, &mut list);
        assert_eq!(state.fx.shake_frames, 1);

        assert_eq!(kind(&list.commands[0]), "bg");
        let DrawCommand::PushOffset(offset) = list.commands[1] else {
            panic!("world should be drawn with a shake offset");
        };
        assert!(offset.x.abs() <= SHAKE_MAGNITUDE && offset.y.abs() <= SHAKE_MAGNITUDE);
        let pop = list
            .commands
            .iter()
            .position(|c| *c == DrawCommand::PopOffset)
            .unwrap();
        assert!(list.commands[pop + 1..].iter().all(|c| kind(c) == "text"));

        list.clear();
        render(&mut state, &settings, &mut list);
        assert_eq!(state.fx.shake_frames, 0);
        assert_eq!(kind(&list.commands[1]), "push");

        list.clear();
        render(&mut state, &settings, &mut list);
        assert!(!list.commands.iter().any(|c| kind(c) == "push"));
    }

    #[test]
    fn test_background_covers_canvas_while_shaking() {
        let mut state = scene();
        state.fx.shake_frames = 1;
        let mut list = DrawList::new();
        render(&mut state, &Settings::default(), &mut list);

        let bg = list.commands.iter().position(|c| kind(c) == "bg").unwrap();
        let push = list.commands.iter().position(|c| kind(c) == "push").unwrap();
        assert!(bg < push);
        assert_eq!(list.commands.iter().filter(|c| kind(c) == "bg").count(), 1);
    }

    #[test]
    fn test_reduced_motion_counts_down_without_offset() {
        let mut state = scene();
        state.fx.shake_frames = 3;
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut list = DrawList::new();
        render(&mut state, &settings, &mut list);
        assert_eq!(state.fx.shake_frames, 2);
        assert_eq!(kind(&list.commands[0]), "bg");
    }

    #[test]
    fn test_particles_fade_then_disappear() {
        let mut state = scene();
        state.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, -1.0),
            life: 0.05,
            color: PARTICLE_COLOR_BONUS,
        });

        let mut list = DrawList::new();
        render(&mut state, &Settings::default(), &mut list);
        let drawn = list.commands.iter().any(|c| {
            matches!(c, DrawCommand::Circle { center, alpha, color, .. }
                if *center == Vec2::new(10.0, 10.0)
                    && *alpha == 0.05
                    && *color == PARTICLE_COLOR_BONUS)
        });
        assert!(drawn);
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].pos, Vec2::new(11.0, 9.0));

        // 0.02 -> -0.01: drawn once more, then removed
        render(&mut state, &Settings::default(), &mut list);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_render_leaves_gameplay_alone() {
        let mut state = scene();
        state.run.score = 30;
        let hazards = state.hazards.clone();
        let bonuses = state.bonuses.clone();
        let player = state.player.pos;
        let run = state.run.clone();
        let rng = state.rng.clone();

        let mut list = DrawList::new();
        for _ in 0..20 {
            render(&mut state, &Settings::default(), &mut list);
        }

        assert_eq!(state.hazards, hazards);
        assert_eq!(state.bonuses, bonuses);
        assert_eq!(state.player.pos, player);
        assert_eq!(state.run, run);
        assert_eq!(state.rng, rng);
    }

    #[test]
    fn test_hud_font_scales_with_width() {
        let mut state = scene();
        state.initialize(1600.0, 900.0, 0);
        let mut list = DrawList::new();
        RenderStage::Hud.draw(&mut state, &Settings::default(), &mut list);
        assert!(matches!(list.commands[0], DrawCommand::Text { font_px, .. } if font_px == 32.0));

        state.initialize(400.0, 300.0, 0);
        list.clear();
        RenderStage::Hud.draw(&mut state, &Settings::default(), &mut list);
        assert!(matches!(list.commands[0], DrawCommand::Text { font_px, .. } if font_px == 16.0));
    }
}
