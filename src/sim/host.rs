//! Physics/rendering host contract
//!
//! The host owns continuous-time integration and collision detection. The
//! core drives it through these named mutation operations and reacts to the
//! contact-begin events it reports back.

use glam::Vec2;

use super::entity::{Category, Entity, EntityId};

/// Errors reported by host operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The referenced node is not in the scene (destroyed or never spawned)
    #[error("entity {0} not found")]
    MissingEntity(EntityId),
}

pub type HostResult = Result<(), HostError>;

/// One side of a contact event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub category: Category,
    /// Node reference; may be stale after a destroy earlier in the frame
    pub entity: Option<EntityId>,
}

impl ContactBody {
    pub fn new(category: Category, entity: EntityId) -> Self {
        Self {
            category,
            entity: Some(entity),
        }
    }
}

/// Two bodies began overlapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl Contact {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    /// Bodies ordered by category tag, lower tag first
    pub fn ordered(&self) -> (ContactBody, ContactBody) {
        if self.a.category < self.b.category {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// Operations the core needs from the physics/rendering engine
pub trait PhysicsHost {
    /// Add an entity's body to the scene
    fn spawn(&mut self, entity: &Entity);
    /// Remove an entity from the scene
    fn despawn(&mut self, id: EntityId) -> HostResult;

    fn set_position(&mut self, id: EntityId, pos: Vec2) -> HostResult;
    fn set_dynamic(&mut self, id: EntityId, dynamic: bool) -> HostResult;
    /// Pin in place (immovable)
    fn set_pinned(&mut self, id: EntityId, pinned: bool) -> HostResult;
    fn set_hidden(&mut self, id: EntityId, hidden: bool) -> HostResult;
    fn set_affected_by_force(&mut self, id: EntityId, affected: bool) -> HostResult;
    fn set_mass(&mut self, id: EntityId, mass: f32) -> HostResult;
    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) -> HostResult;
    fn set_angular_damping(&mut self, id: EntityId, damping: f32) -> HostResult;
    fn set_restitution(&mut self, id: EntityId, restitution: f32) -> HostResult;
    /// Set an entity's category and the categories it reports contacts with
    fn set_contact_filter(&mut self, id: EntityId, category: Category, contacts: &[Category]) -> HostResult;

    /// Scene-wide force field (gravity equivalent)
    fn set_force_field(&mut self, force: Vec2);

    /// Topmost visible entity at a scene point
    fn hit_test(&self, point: Vec2) -> Option<EntityId>;
}

/// A host the core can advance itself (headless play, tests)
pub trait Simulate: PhysicsHost {
    /// Integrate one fixed step and report contacts that began during it
    fn step(&mut self, dt: f32) -> Vec<Contact>;
}

/// Run a host operation whose failure is a normal stale-reference case.
///
/// Missing entities are logged and dropped so a frame never fails.
pub(crate) fn soft(op: &str, result: HostResult) {
    if let Err(err) = result {
        log::debug!("host {op} skipped: {err}");
    }
}
