//! Brick Breaker - simulation core of a single-screen brick-breaking game
//!
//! Core modules:
//! - `sim`: Rules engine (entities, layout, contacts, scoring, lifecycle)
//! - `tuning`: Data-driven game balance and geometry
//! - `settings`: Player audio preferences
//! - `audio`: Signal to sound-asset routing

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions (scene space, origin at center)
    pub const BOARD_WIDTH: f32 = 750.0;
    pub const BOARD_HEIGHT: f32 = 1334.0;
    /// Fraction of the board width enclosed by the border
    pub const BORDER_WIDTH_FRACTION: f32 = 0.88;
    /// Mass given to the border loop
    pub const BORDER_MASS: f32 = 100_000.0;

    /// Bricks
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_MASS: f32 = 10_000_000.0;
    /// Left inset of the first brick column from the board edge
    pub const GRID_LEFT_INSET: f32 = 100.0;
    /// Columns dropped from the fitted count as a safety margin
    pub const GRID_COLUMN_MARGIN: i64 = 2;
    /// Upper bound on bricks laid out across all classes
    pub const MAX_GRID_BRICKS: u64 = 10_000;

    /// Ball
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_MASS: f32 = 0.1;
    /// Impulse applied on the start transition
    pub const BALL_LAUNCH_IMPULSE: (f32, f32) = (50.0, -50.0);
    pub const BALL_ANGULAR_DAMPING: f32 = 0.1;
    pub const BALL_RESTITUTION: f32 = 1.0;

    /// Paddle
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle center height above the bottom edge of the board
    pub const PADDLE_LIFT: f32 = 150.0;
    /// Paddle becomes effectively immovable by the ball once play starts
    pub const PADDLE_PLAY_MASS: f32 = 100_000.0;
    pub const PADDLE_MASS: f32 = 1.0;

    /// Floor strip along the bottom edge
    pub const FLOOR_HEIGHT: f32 = 20.0;

    /// Difficulty escalation
    pub const IMPACTS_PER_ESCALATION: u32 = 10;
    pub const ANGULAR_DAMPING_STEP: f32 = 0.001;
    pub const RESTITUTION_STEP: f32 = 0.0005;

    /// Game-over effect
    pub const GAME_OVER_FORCE: (f32, f32) = (0.0, -1.0);
    pub const FALLING_BRICK_MASS: f32 = 1000.0;

    /// Restart control
    pub const RESTART_CONTROL_SIZE: f32 = 75.0;
    pub const RESTART_CONTROL_POS: (f32, f32) = (0.0, -10.0);
}
