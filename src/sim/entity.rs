//! Entity registry and collision categories
//!
//! Holds the fixed set of gameplay entities. The core allocates ids and keeps
//! the authoritative list; the physics host mirrors it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable entity handle shared with the physics host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Brick point tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickClass {
    Low,
    Medium,
    High,
}

impl BrickClass {
    /// All classes in layout order (top rows first)
    pub const ALL: [BrickClass; 3] = [BrickClass::High, BrickClass::Medium, BrickClass::Low];

    /// Default point value
    pub fn points(self) -> u32 {
        match self {
            BrickClass::Low => 5,
            BrickClass::Medium => 10,
            BrickClass::High => 15,
        }
    }

    /// Default last row index laid out for this class
    pub fn rows(self) -> u32 {
        match self {
            BrickClass::Low => 5,
            BrickClass::Medium => 2,
            BrickClass::High => 3,
        }
    }

    /// Default distance of the first row below the top edge
    pub fn vertical_offset(self) -> f32 {
        match self {
            BrickClass::Low => 350.0,
            BrickClass::Medium => 250.0,
            BrickClass::High => 150.0,
        }
    }

    pub fn category(self) -> Category {
        match self {
            BrickClass::Low => Category::LowBrick,
            BrickClass::Medium => Category::MediumBrick,
            BrickClass::High => Category::HighBrick,
        }
    }
}

/// Collision category tag.
///
/// Ordering follows the tag value, so the lower tag of a pair sorts first.
/// Ball has the lowest tag and is always first in any pair it takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ball,
    Paddle,
    HighBrick,
    LowBrick,
    MediumBrick,
    Floor,
    Border,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Ball,
        Category::Paddle,
        Category::HighBrick,
        Category::LowBrick,
        Category::MediumBrick,
        Category::Floor,
        Category::Border,
    ];

    /// Tag value, one bit per category
    pub fn tag(self) -> u32 {
        match self {
            Category::Ball => 1 << 1,
            Category::Paddle => 1 << 2,
            Category::HighBrick => 1 << 3,
            Category::LowBrick => 1 << 4,
            Category::MediumBrick => 1 << 5,
            Category::Floor => 1 << 6,
            Category::Border => 1 << 7,
        }
    }

    /// Brick class, if this is a brick category
    pub fn brick_class(self) -> Option<BrickClass> {
        match self {
            Category::LowBrick => Some(BrickClass::Low),
            Category::MediumBrick => Some(BrickClass::Medium),
            Category::HighBrick => Some(BrickClass::High),
            _ => None,
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tag().cmp(&other.tag())
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Paddle,
    Floor,
    Border,
    Brick(BrickClass),
    /// Tap target shown after game over; has no collision body
    RestartControl,
}

impl EntityKind {
    pub fn category(self) -> Option<Category> {
        match self {
            EntityKind::Ball => Some(Category::Ball),
            EntityKind::Paddle => Some(Category::Paddle),
            EntityKind::Floor => Some(Category::Floor),
            EntityKind::Border => Some(Category::Border),
            EntityKind::Brick(class) => Some(class.category()),
            EntityKind::RestartControl => None,
        }
    }
}

/// Physical properties mirrored to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProps {
    pub mass: f32,
    /// Moved by the host's integrator (bricks are static until game over)
    pub dynamic: bool,
    /// Pinned in place, immovable
    pub pinned: bool,
    /// Affected by the scene force field
    pub affected_by_force: bool,
    pub hidden: bool,
}

impl BodyProps {
    pub fn fixed(mass: f32) -> Self {
        Self {
            mass,
            dynamic: false,
            pinned: false,
            affected_by_force: false,
            hidden: false,
        }
    }

    pub fn moving(mass: f32) -> Self {
        Self {
            dynamic: true,
            ..Self::fixed(mass)
        }
    }
}

/// A gameplay entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position in scene space
    pub pos: Vec2,
    pub size: Vec2,
    pub body: BodyProps,
}

impl Entity {
    pub fn category(&self) -> Option<Category> {
        self.kind.category()
    }

    /// Axis-aligned containment test used for hit-testing taps
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point - self.pos).abs().cmple(half).all()
    }
}

/// The set of live entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub ball: Option<Entity>,
    pub paddle: Option<Entity>,
    pub floor: Option<Entity>,
    pub border: Option<Entity>,
    /// Live bricks, sorted by id
    pub bricks: Vec<Entity>,
    pub restart_control: Option<Entity>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an entity with a fresh id (not yet stored)
    pub fn create(&mut self, kind: EntityKind, pos: Vec2, size: Vec2, body: BodyProps) -> Entity {
        Entity {
            id: self.next_entity_id(),
            kind,
            pos,
            size,
            body,
        }
    }

    /// Look up any live entity by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.singletons()
            .find(|e| e.id == id)
            .or_else(|| self.brick(id))
    }

    pub fn brick(&self, id: EntityId) -> Option<&Entity> {
        self.bricks
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|idx| &self.bricks[idx])
    }

    /// Insert a brick, keeping id order
    pub fn insert_brick(&mut self, brick: Entity) {
        let idx = self.bricks.partition_point(|b| b.id < brick.id);
        self.bricks.insert(idx, brick);
    }

    /// Remove a brick. Stale ids are ignored.
    pub fn remove_brick(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.bricks.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(self.bricks.remove(idx))
    }

    /// Remove every brick, returning them
    pub fn clear_bricks(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.bricks)
    }

    /// Live bricks of one class
    pub fn brick_count(&self, class: BrickClass) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.kind == EntityKind::Brick(class))
            .count()
    }

    /// Ball, paddle, floor, border and restart control (whichever exist)
    pub fn singletons(&self) -> impl Iterator<Item = &Entity> {
        [
            self.ball.as_ref(),
            self.paddle.as_ref(),
            self.floor.as_ref(),
            self.border.as_ref(),
            self.restart_control.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick(reg: &mut Registry, class: BrickClass) -> Entity {
        reg.create(
            EntityKind::Brick(class),
            Vec2::ZERO,
            Vec2::new(50.0, 20.0),
            BodyProps::fixed(1.0),
        )
    }

    #[test]
    fn test_category_order_follows_tags() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert!(Category::Ball < Category::Paddle);
        assert!(Category::HighBrick < Category::LowBrick);
        assert!(Category::Floor < Category::Border);
    }

    #[test]
    fn test_brick_class_defaults() {
        assert_eq!(BrickClass::Low.points(), 5);
        assert_eq!(BrickClass::Medium.points(), 10);
        assert_eq!(BrickClass::High.points(), 15);
        for class in BrickClass::ALL {
            assert_eq!(class.category().brick_class(), Some(class));
        }
        assert_eq!(Category::Ball.brick_class(), None);
    }

    #[test]
    fn test_registry_ids_are_monotonic() {
        let mut reg = Registry::new();
        let a = reg.next_entity_id();
        let b = reg.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_remove_brick_and_stale_id() {
        let mut reg = Registry::new();
        let low = brick(&mut reg, BrickClass::Low);
        let high = brick(&mut reg, BrickClass::High);
        let low_id = low.id;
        reg.insert_brick(high);
        reg.insert_brick(low);
        assert_eq!(reg.bricks[0].id, low_id);

        assert!(reg.remove_brick(low_id).is_some());
        assert_eq!(reg.brick_count(BrickClass::Low), 0);
        assert_eq!(reg.brick_count(BrickClass::High), 1);
        // Already destroyed
        assert!(reg.remove_brick(low_id).is_none());
        assert!(reg.get(low_id).is_none());
    }

    #[test]
    fn test_contains() {
        let mut reg = Registry::new();
        let e = reg.create(
            EntityKind::RestartControl,
            Vec2::new(0.0, -10.0),
            Vec2::splat(75.0),
            BodyProps::fixed(0.0),
        );
        assert!(e.contains(Vec2::new(30.0, 20.0)));
        assert!(!e.contains(Vec2::new(40.0, 0.0)));
        assert_eq!(e.category(), None);
    }
}
