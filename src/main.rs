//! Brick Breaker entry point
//!
//! Runs a headless attract-mode game: an autopilot paddle keeps the ball in
//! play for a while, then steps aside so the ball drops, and finally taps the
//! restart control.
//!
//! Usage: `brick-breaker [config.json] [settings.json]`

use glam::Vec2;

use brick_breaker::audio::{AudioRouter, LogPlayer};
use brick_breaker::consts::SIM_DT;
use brick_breaker::sim::{BrickClass, FixedStep, Game, GamePhase, HeadlessWorld, InputEvent, TickInput, tick};
use brick_breaker::{GameConfig, Settings};

/// Simulated seconds the autopilot defends the floor
const AUTOPILOT_SECS: f32 = 60.0;
/// Hard stop for the whole run
const MAX_SECS: f32 = 90.0;
/// Host frame time (a 60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{path}: {err}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let settings = args.next().map(Settings::load_or_default).unwrap_or_default();

    let mut world = HeadlessWorld::new();
    let mut game = Game::new(config, &mut world);
    let mut audio = AudioRouter::new(LogPlayer, &settings);
    let mut clock = FixedStep::default();
    let paddle_y = game.config().paddle_home().y;

    log::info!(
        "Board ready: {} high, {} medium, {} low bricks",
        game.brick_count(BrickClass::High),
        game.brick_count(BrickClass::Medium),
        game.brick_count(BrickClass::Low)
    );

    // First drag starts the game
    let mut input = TickInput::single(InputEvent::Move(Vec2::new(0.0, paddle_y)));
    let mut elapsed = 0.0;
    'frames: while elapsed < MAX_SECS {
        for _ in 0..clock.advance(FRAME_DT) {
            audio.handle_all(tick(&mut game, &mut world, &input, SIM_DT));
            input = TickInput::default();
            elapsed += SIM_DT;
            if game.phase() == GamePhase::Ended {
                break 'frames;
            }

            let Some((_, ball)) = world.ball() else { break 'frames };
            let x = if elapsed < AUTOPILOT_SECS {
                ball.pos.x
            } else if ball.pos.x > 0.0 {
                -game.config().border_size().x / 2.0
            } else {
                game.config().border_size().x / 2.0
            };
            input.pointer.push(InputEvent::Move(Vec2::new(x, paddle_y)));
        }
    }

    let difficulty = game.difficulty();
    log::info!(
        "After {elapsed:.1}s: phase {:?}, score {}, {} escalations (damping {:.4}, restitution {:.4})",
        game.phase(),
        game.score(),
        game.scoreboard().escalations,
        difficulty.angular_damping,
        difficulty.restitution
    );

    if game.phase() == GamePhase::Ended {
        let tap = TickInput::single(InputEvent::Begin(game.config().restart_control_pos));
        audio.handle_all(tick(&mut game, &mut world, &tap, SIM_DT));
        log::info!(
            "Restart tapped: phase {:?}, score {}, {} bricks",
            game.phase(),
            game.score(),
            game.registry().bricks.len()
        );
    }
}
