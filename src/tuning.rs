//! Data-driven game balance and geometry
//!
//! [`GameConfig`] mirrors the constants in [`crate::consts`]. Any subset can be
//! overridden from JSON; missing keys fall back to the compile-time defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BrickClass, column_count, grid_size};

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Layout and scoring for one brick class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickClassConfig {
    pub points: u32,
    /// Last row index laid out (rows `0..=rows`)
    pub rows: u32,
    /// Distance of the first row below the top edge
    pub vertical_offset: f32,
}

impl From<BrickClass> for BrickClassConfig {
    fn from(class: BrickClass) -> Self {
        Self {
            points: class.points(),
            rows: class.rows(),
            vertical_offset: class.vertical_offset(),
        }
    }
}

/// Per-class brick settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickClasses {
    pub low: BrickClassConfig,
    pub medium: BrickClassConfig,
    pub high: BrickClassConfig,
}

impl Default for BrickClasses {
    fn default() -> Self {
        Self {
            low: BrickClass::Low.into(),
            medium: BrickClass::Medium.into(),
            high: BrickClass::High.into(),
        }
    }
}

impl BrickClasses {
    pub fn get(&self, class: BrickClass) -> &BrickClassConfig {
        match class {
            BrickClass::Low => &self.low,
            BrickClass::Medium => &self.medium,
            BrickClass::High => &self.high,
        }
    }
}

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Board ────────────────────────────────────────────────────────────────
    pub board: Vec2,
    pub border_mass: f32,
    pub floor_height: f32,

    // ── Bricks ───────────────────────────────────────────────────────────────
    pub brick_size: Vec2,
    pub brick_mass: f32,
    pub brick_classes: BrickClasses,

    // ── Ball ─────────────────────────────────────────────────────────────────
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub launch_impulse: Vec2,
    pub ball_angular_damping: f32,
    pub ball_restitution: f32,

    // ── Paddle ───────────────────────────────────────────────────────────────
    pub paddle_size: Vec2,
    pub paddle_lift: f32,
    pub paddle_mass: f32,
    pub paddle_play_mass: f32,

    // ── Difficulty ───────────────────────────────────────────────────────────
    pub impacts_per_escalation: u32,
    pub angular_damping_step: f32,
    pub restitution_step: f32,
    /// Optional ceilings; `None` keeps escalation open-ended
    pub max_angular_damping: Option<f32>,
    pub max_restitution: Option<f32>,

    // ── Game over ────────────────────────────────────────────────────────────
    pub game_over_force: Vec2,
    pub falling_brick_mass: f32,
    pub restart_control_pos: Vec2,
    pub restart_control_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Board
            board: Vec2::new(BOARD_WIDTH, BOARD_HEIGHT),
            border_mass: BORDER_MASS,
            floor_height: FLOOR_HEIGHT,
            // Bricks
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            brick_mass: BRICK_MASS,
            brick_classes: BrickClasses::default(),
            // Ball
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            launch_impulse: Vec2::from(BALL_LAUNCH_IMPULSE),
            ball_angular_damping: BALL_ANGULAR_DAMPING,
            ball_restitution: BALL_RESTITUTION,
            // Paddle
            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_lift: PADDLE_LIFT,
            paddle_mass: PADDLE_MASS,
            paddle_play_mass: PADDLE_PLAY_MASS,
            // Difficulty
            impacts_per_escalation: IMPACTS_PER_ESCALATION,
            angular_damping_step: ANGULAR_DAMPING_STEP,
            restitution_step: RESTITUTION_STEP,
            max_angular_damping: None,
            max_restitution: None,
            // Game over
            game_over_force: Vec2::from(GAME_OVER_FORCE),
            falling_brick_mass: FALLING_BRICK_MASS,
            restart_control_pos: Vec2::from(RESTART_CONTROL_POS),
            restart_control_size: RESTART_CONTROL_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board.x", self.board.x),
            ("board.y", self.board.y),
            ("brick_size.x", self.brick_size.x),
            ("brick_size.y", self.brick_size.y),
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
            ("paddle_size.x", self.paddle_size.x),
            ("paddle_size.y", self.paddle_size.y),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.impacts_per_escalation == 0 {
            return Err(ConfigError::Invalid("impacts_per_escalation must be at least 1".into()));
        }
        if self.angular_damping_step < 0.0 || self.restitution_step < 0.0 {
            return Err(ConfigError::Invalid("escalation steps must not be negative".into()));
        }
        for class in BrickClass::ALL {
            if self.brick_classes.get(class).points == 0 {
                return Err(ConfigError::Invalid(format!("{class:?} bricks must score points")));
            }
        }
        let columns = column_count(self.board.x, self.brick_size.x);
        let total: u64 = BrickClass::ALL
            .into_iter()
            .map(|class| grid_size(columns, self.brick_classes.get(class).rows))
            .fold(0, u64::saturating_add);
        if total > MAX_GRID_BRICKS {
            return Err(ConfigError::Invalid(format!(
                "brick grid of {total} exceeds {MAX_GRID_BRICKS} bricks"
            )));
        }
        Ok(())
    }

    /// Paddle resting position
    pub fn paddle_home(&self) -> Vec2 {
        Vec2::new(0.0, -self.board.y / 2.0 + self.paddle_lift)
    }

    /// Floor strip center
    pub fn floor_pos(&self) -> Vec2 {
        Vec2::new(0.0, -self.board.y / 2.0 + self.floor_height / 2.0)
    }

    /// Size of the area enclosed by the border
    pub fn border_size(&self) -> Vec2 {
        Vec2::new(self.board.x * BORDER_WIDTH_FRACTION, self.board.y)
    }
}
