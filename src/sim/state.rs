//! Game state and lifecycle
//!
//! [`Game`] owns the single [`GamePhase`] and every piece of mutable gameplay
//! state. Hosts drive it from their frame loop through input and contact
//! callbacks; all transitions complete synchronously inside the callback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{BodyProps, BrickClass, Category, EntityKind, Registry};
use super::host::{PhysicsHost, soft};
use super::layout::generate_brick_grid;
use super::score::{Difficulty, Scoreboard};
use crate::tuning::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball centered and stationary, waiting for the first drag
    Idle,
    /// Ball in motion, paddle controllable
    Playing,
    /// Ball reached the floor, restart control visible
    Ended,
}

/// Signals for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    BrickImpact,
    PaddleImpact,
    WallImpact,
    Loss,
    GameOver,
}

impl GameEvent {
    pub fn name(self) -> &'static str {
        match self {
            GameEvent::BrickImpact => "brick-impact",
            GameEvent::PaddleImpact => "paddle-impact",
            GameEvent::WallImpact => "wall-impact",
            GameEvent::Loss => "loss",
            GameEvent::GameOver => "game-over",
        }
    }
}

/// Player input in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Touch/click began
    Begin(Vec2),
    /// Touch/pointer dragged
    Move(Vec2),
}

impl InputEvent {
    pub fn point(self) -> Vec2 {
        match self {
            InputEvent::Begin(p) | InputEvent::Move(p) => p,
        }
    }
}

/// Centered prompt text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    TapToStart,
    GameOver,
}

impl Prompt {
    pub fn text(self) -> &'static str {
        match self {
            Prompt::TapToStart => "Touch the screen to start",
            Prompt::GameOver => "Game over",
        }
    }
}

/// Labels the renderer draws
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    /// Visible prompt, if any
    pub prompt: Option<Prompt>,
    pub score_text: String,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            prompt: Some(Prompt::TapToStart),
            score_text: "Score: 0".to_string(),
        }
    }
}

impl Hud {
    pub fn set_score(&mut self, score: u64) {
        self.score_text = format!("Score: {score}");
    }
}

/// The whole game: entities, score, phase and pending signals
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) phase: GamePhase,
    pub(crate) registry: Registry,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) hud: Hud,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Game {
    /// Build the opening scene on the host
    pub fn new(config: GameConfig, host: &mut impl PhysicsHost) -> Self {
        let scoreboard = Scoreboard::new(&config);
        let mut game = Self {
            config,
            phase: GamePhase::Idle,
            registry: Registry::new(),
            scoreboard,
            hud: Hud::default(),
            events: Vec::new(),
        };
        game.setup(host);
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score
    }

    /// Ball contacts since the last escalation
    pub fn impacts(&self) -> u32 {
        self.scoreboard.impacts
    }

    pub fn difficulty(&self) -> Difficulty {
        self.scoreboard.difficulty
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Live bricks of one class
    pub fn brick_count(&self, class: BrickClass) -> usize {
        self.registry.brick_count(class)
    }

    /// Signals emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::debug!("signal {}", event.name());
        self.events.push(event);
    }

    /// Handle a pointer event from the host.
    ///
    /// A begin that lands on the restart control restarts the game; the first
    /// move starts it. Outside of Ended the paddle follows the pointer's x.
    pub fn handle_input(&mut self, host: &mut impl PhysicsHost, event: InputEvent) {
        let point = event.point();
        match event {
            InputEvent::Begin(_) => {
                let restart_id = self.registry.restart_control.as_ref().map(|e| e.id);
                if restart_id.is_some() && host.hit_test(point) == restart_id {
                    self.restart(host);
                }
            }
            InputEvent::Move(_) => {
                if self.phase == GamePhase::Idle {
                    self.start(host);
                }
            }
        }

        if self.phase != GamePhase::Ended {
            self.move_paddle(host, point.x);
        }
    }

    /// Idle -> Playing. Returns false (and does nothing) from any other phase.
    pub fn start(&mut self, host: &mut impl PhysicsHost) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Playing;

        let bricks = [Category::HighBrick, Category::LowBrick, Category::MediumBrick];
        if let Some(ball) = self.registry.ball.as_mut() {
            ball.body.dynamic = true;
            soft("set_dynamic", host.set_dynamic(ball.id, true));
            soft("apply_impulse", host.apply_impulse(ball.id, self.config.launch_impulse));
            let mut contacts = vec![Category::Floor, Category::Paddle, Category::Border];
            contacts.extend(bricks);
            soft(
                "set_contact_filter",
                host.set_contact_filter(ball.id, Category::Ball, &contacts),
            );
        }
        if let Some(paddle) = self.registry.paddle.as_mut() {
            paddle.body.mass = self.config.paddle_play_mass;
            soft("set_mass", host.set_mass(paddle.id, paddle.body.mass));
            soft(
                "set_contact_filter",
                host.set_contact_filter(paddle.id, Category::Paddle, &[Category::Ball]),
            );
        }
        if let Some(floor) = &self.registry.floor {
            soft(
                "set_contact_filter",
                host.set_contact_filter(floor.id, Category::Floor, &[Category::Ball]),
            );
        }

        self.hud.prompt = None;
        log::info!("Game started");
        true
    }

    /// Playing/Idle -> Ended. Freezes the ball and paddle, drops the bricks
    /// under a force field and shows the restart control.
    pub(crate) fn end_game(&mut self, host: &mut impl PhysicsHost) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;

        if let Some(ball) = self.registry.ball.as_mut() {
            ball.body.affected_by_force = true;
            ball.body.pinned = true;
            ball.body.hidden = true;
            soft("set_affected_by_force", host.set_affected_by_force(ball.id, true));
            soft("set_pinned", host.set_pinned(ball.id, true));
            soft("set_hidden", host.set_hidden(ball.id, true));
        }
        if let Some(paddle) = self.registry.paddle.as_mut() {
            paddle.body.pinned = true;
            soft("set_pinned", host.set_pinned(paddle.id, true));
        }

        host.set_force_field(self.config.game_over_force);
        for brick in &mut self.registry.bricks {
            brick.body.dynamic = true;
            brick.body.affected_by_force = true;
            brick.body.mass = self.config.falling_brick_mass;
            soft("set_dynamic", host.set_dynamic(brick.id, true));
            soft("set_affected_by_force", host.set_affected_by_force(brick.id, true));
            soft("set_mass", host.set_mass(brick.id, brick.body.mass));
        }

        let size = Vec2::splat(self.config.restart_control_size);
        let control = self.registry.create(
            EntityKind::RestartControl,
            self.config.restart_control_pos,
            size,
            BodyProps::fixed(0.0),
        );
        host.spawn(&control);
        self.registry.restart_control = Some(control);

        self.hud.prompt = Some(Prompt::GameOver);
        self.emit(GameEvent::GameOver);
        log::info!("Game over, score {}", self.scoreboard.score);
    }

    /// Ended -> Idle. Clears the board and rebuilds the opening scene.
    /// Returns false (and does nothing) from any other phase.
    pub fn restart(&mut self, host: &mut impl PhysicsHost) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }
        for brick in self.registry.clear_bricks() {
            soft("despawn", host.despawn(brick.id));
        }
        if let Some(control) = self.registry.restart_control.take() {
            soft("despawn", host.despawn(control.id));
        }
        self.hud.prompt = None;
        self.setup(host);
        log::info!("Game restarted");
        true
    }

    /// Shared setup for first launch and restart
    fn setup(&mut self, host: &mut impl PhysicsHost) {
        self.phase = GamePhase::Idle;
        host.set_force_field(Vec2::ZERO);
        self.spawn_fixtures(host);

        if let Some(ball) = self.registry.ball.as_mut() {
            ball.pos = Vec2::ZERO;
            ball.body.dynamic = false;
            ball.body.affected_by_force = false;
            ball.body.pinned = false;
            ball.body.hidden = false;
            soft("set_dynamic", host.set_dynamic(ball.id, false));
            soft("set_position", host.set_position(ball.id, ball.pos));
            soft("set_affected_by_force", host.set_affected_by_force(ball.id, false));
            soft("set_pinned", host.set_pinned(ball.id, false));
            soft("set_hidden", host.set_hidden(ball.id, false));
        }
        if let Some(paddle) = self.registry.paddle.as_mut() {
            paddle.body.pinned = false;
            soft("set_pinned", host.set_pinned(paddle.id, false));
        }

        self.spawn_bricks(host);

        self.scoreboard.reset();
        self.apply_difficulty(host);
        self.events.clear();
        self.hud.set_score(0);
        self.hud.prompt = Some(Prompt::TapToStart);
    }

    /// Border, floor, ball and paddle. Each exists exactly once, so these are
    /// only created on first launch.
    fn spawn_fixtures(&mut self, host: &mut impl PhysicsHost) {
        let config = &self.config;
        if self.registry.border.is_none() {
            let border = self.registry.create(
                EntityKind::Border,
                Vec2::ZERO,
                config.border_size(),
                BodyProps::fixed(config.border_mass),
            );
            host.spawn(&border);
            soft(
                "set_contact_filter",
                host.set_contact_filter(border.id, Category::Border, &[Category::Ball]),
            );
            self.registry.border = Some(border);
        }
        if self.registry.floor.is_none() {
            let floor = self.registry.create(
                EntityKind::Floor,
                config.floor_pos(),
                Vec2::new(config.border_size().x, config.floor_height),
                BodyProps::fixed(config.border_mass),
            );
            host.spawn(&floor);
            self.registry.floor = Some(floor);
        }
        if self.registry.ball.is_none() {
            let ball = self.registry.create(
                EntityKind::Ball,
                Vec2::ZERO,
                Vec2::splat(config.ball_radius * 2.0),
                BodyProps::fixed(config.ball_mass),
            );
            host.spawn(&ball);
            self.registry.ball = Some(ball);
        }
        if self.registry.paddle.is_none() {
            let paddle = self.registry.create(
                EntityKind::Paddle,
                config.paddle_home(),
                config.paddle_size,
                BodyProps::fixed(config.paddle_mass),
            );
            host.spawn(&paddle);
            self.registry.paddle = Some(paddle);
        }
    }

    /// Lay out the full grid for every class
    fn spawn_bricks(&mut self, host: &mut impl PhysicsHost) {
        for class in BrickClass::ALL {
            let class_config = *self.config.brick_classes.get(class);
            let placements = generate_brick_grid(
                self.config.board,
                self.config.brick_size,
                class,
                class_config.rows,
                class_config.vertical_offset,
            );
            for placement in placements {
                let brick = self.registry.create(
                    EntityKind::Brick(class),
                    placement.pos,
                    self.config.brick_size,
                    BodyProps::fixed(self.config.brick_mass),
                );
                host.spawn(&brick);
                soft(
                    "set_contact_filter",
                    host.set_contact_filter(brick.id, class.category(), &[Category::Ball]),
                );
                self.registry.insert_brick(brick);
            }
        }
        log::debug!("laid out {} bricks", self.registry.bricks.len());
    }

    /// Paddle follows the pointer horizontally
    fn move_paddle(&mut self, host: &mut impl PhysicsHost, x: f32) {
        let Some(paddle) = self.registry.paddle.as_mut() else { return };
        paddle.pos.x = x;
        soft("set_position", host.set_position(paddle.id, paddle.pos));
    }

    /// One difficulty step, pushed to the ball
    pub(crate) fn escalate(&mut self, host: &mut impl PhysicsHost) {
        let difficulty = self.scoreboard.escalate();
        log::info!(
            "Difficulty up: damping {:.4}, restitution {:.4}",
            difficulty.angular_damping,
            difficulty.restitution
        );
        self.apply_difficulty(host);
    }

    fn apply_difficulty(&self, host: &mut impl PhysicsHost) {
        let Some(ball) = &self.registry.ball else { return };
        let d = self.scoreboard.difficulty;
        soft("set_angular_damping", host.set_angular_damping(ball.id, d.angular_damping));
        soft("set_restitution", host.set_restitution(ball.id, d.restitution));
    }
}
