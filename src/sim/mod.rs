//! Game rules simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Physics and rendering are reached only through [`PhysicsHost`]
//! - State changes happen synchronously inside input/contact callbacks
//! - Stable iteration order (by entity ID)

pub mod collision;
pub mod contact;
pub mod entity;
pub mod host;
pub mod layout;
pub mod score;
pub mod state;
pub mod tick;
pub mod world;

pub use contact::{ContactRule, classify};
pub use entity::{BodyProps, BrickClass, Category, Entity, EntityId, EntityKind, Registry};
pub use host::{Contact, ContactBody, HostError, HostResult, PhysicsHost, Simulate};
pub use layout::{BrickPlacement, column_count, generate_brick_grid, grid_size};
pub use score::{Difficulty, Scoreboard};
pub use state::{Game, GameEvent, GamePhase, Hud, InputEvent, Prompt};
pub use tick::{FixedStep, TickInput, tick};
pub use world::HeadlessWorld;
