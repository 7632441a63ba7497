//! Headless physics host
//!
//! An in-memory [`PhysicsHost`] with just enough integration to play a game
//! without a rendering engine: the ball moves under impulses, bounces off
//! boxes and reports contact-begin events filtered by category masks. Used by
//! tests and the attract-mode binary.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::collision::{CollisionResult, ball_box_collision, ball_wall_collision, bounce_velocity};
use super::entity::{Category, Entity, EntityId, EntityKind};
use super::host::{Contact, ContactBody, HostError, HostResult, PhysicsHost, Simulate};

/// Scene points per meter when converting the force field to an acceleration
pub const POINTS_PER_METER: f32 = 150.0;

/// A body as the host sees it
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub dynamic: bool,
    pub pinned: bool,
    pub affected_by_force: bool,
    pub hidden: bool,
    pub angular_damping: f32,
    pub restitution: f32,
    pub category: Option<Category>,
    /// Tags of categories this body reports contacts with
    pub contact_mask: u32,
}

impl Body {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            kind: entity.kind,
            pos: entity.pos,
            size: entity.size,
            vel: Vec2::ZERO,
            mass: entity.body.mass,
            dynamic: entity.body.dynamic,
            pinned: entity.body.pinned,
            affected_by_force: entity.body.affected_by_force,
            hidden: entity.body.hidden,
            angular_damping: 0.0,
            restitution: 1.0,
            category: entity.category(),
            contact_mask: 0,
        }
    }

    fn moves(&self) -> bool {
        self.dynamic && !self.pinned
    }

    fn contains(&self, point: Vec2) -> bool {
        (point - self.pos).abs().cmple(self.size / 2.0).all()
    }

    fn reports_contact_with(&self, other: &Body) -> bool {
        let tag = |b: &Body| b.category.map_or(0, Category::tag);
        tag(self) & other.contact_mask != 0 || tag(other) & self.contact_mask != 0
    }
}

/// In-memory scene
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    /// Bodies by id; ids grow with spawn order, so later bodies are on top
    bodies: BTreeMap<EntityId, Body>,
    force_field: Vec2,
    /// Pairs currently overlapping (ball first)
    touching: BTreeSet<(EntityId, EntityId)>,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.body(id).map(|b| b.pos)
    }

    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        self.body(id).map(|b| b.vel)
    }

    pub fn restitution(&self, id: EntityId) -> Option<f32> {
        self.body(id).map(|b| b.restitution)
    }

    pub fn force_field(&self) -> Vec2 {
        self.force_field
    }

    /// Bodies whose kind matches
    pub fn count(&self, pred: impl Fn(EntityKind) -> bool) -> usize {
        self.bodies.values().filter(|b| pred(b.kind)).count()
    }

    /// The first ball body, if any
    pub fn ball(&self) -> Option<(EntityId, &Body)> {
        self.bodies
            .iter()
            .find(|(_, b)| b.kind == EntityKind::Ball)
            .map(|(id, b)| (*id, b))
    }

    /// Override a body's velocity (scripted shots in tests and demos)
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) -> HostResult {
        self.body_mut(id)?.vel = vel;
        Ok(())
    }

    fn body_mut(&mut self, id: EntityId) -> Result<&mut Body, HostError> {
        self.bodies.get_mut(&id).ok_or(HostError::MissingEntity(id))
    }

    fn integrate(&mut self, dt: f32) {
        let accel = self.force_field * POINTS_PER_METER;
        for body in self.bodies.values_mut().filter(|b| b.moves()) {
            if body.affected_by_force {
                body.vel += accel * dt;
            }
            body.pos += body.vel * dt;
        }
    }

    /// Resolve ball collisions, returning newly begun contacts
    fn collide(&mut self) -> Vec<Contact> {
        let balls: Vec<EntityId> = self
            .bodies
            .iter()
            .filter(|(_, b)| b.kind == EntityKind::Ball)
            .map(|(id, _)| *id)
            .collect();

        let mut contacts = Vec::new();
        for ball_id in balls {
            let others: Vec<EntityId> = self
                .bodies
                .iter()
                .filter(|(id, b)| **id != ball_id && b.category.is_some())
                .map(|(id, _)| *id)
                .collect();

            for other_id in others {
                let (Some(ball), Some(other)) = (self.bodies.get(&ball_id), self.bodies.get(&other_id))
                else {
                    continue;
                };
                let radius = ball.size.x / 2.0;
                let result = match other.kind {
                    EntityKind::Border => ball_wall_collision(ball.pos, radius, other.pos, other.size),
                    _ => ball_box_collision(ball.pos, radius, other.pos, other.size),
                };

                let key = (ball_id, other_id);
                if !result.hit {
                    self.touching.remove(&key);
                    continue;
                }

                if self.touching.insert(key) && ball.reports_contact_with(other) {
                    let (Some(a), Some(b)) = (ball.category, other.category) else { continue };
                    contacts.push(Contact::new(
                        ContactBody::new(a, ball_id),
                        ContactBody::new(b, other_id),
                    ));
                }
                self.respond(ball_id, &result);
            }
        }
        contacts
    }

    /// Push the ball out of the surface and bounce it
    fn respond(&mut self, ball_id: EntityId, result: &CollisionResult) {
        let Some(ball) = self.bodies.get_mut(&ball_id) else { return };
        if !ball.moves() {
            return;
        }
        ball.pos += result.normal * result.penetration;
        ball.vel = bounce_velocity(ball.vel, result.normal, ball.restitution);
    }
}

impl PhysicsHost for HeadlessWorld {
    fn spawn(&mut self, entity: &Entity) {
        self.bodies.insert(entity.id, Body::from_entity(entity));
    }

    fn despawn(&mut self, id: EntityId) -> HostResult {
        self.bodies.remove(&id).ok_or(HostError::MissingEntity(id))?;
        self.touching.retain(|(a, b)| *a != id && *b != id);
        Ok(())
    }

    fn set_position(&mut self, id: EntityId, pos: Vec2) -> HostResult {
        self.body_mut(id)?.pos = pos;
        Ok(())
    }

    fn set_dynamic(&mut self, id: EntityId, dynamic: bool) -> HostResult {
        let body = self.body_mut(id)?;
        body.dynamic = dynamic;
        if !dynamic {
            body.vel = Vec2::ZERO;
        }
        Ok(())
    }

    fn set_pinned(&mut self, id: EntityId, pinned: bool) -> HostResult {
        let body = self.body_mut(id)?;
        body.pinned = pinned;
        if pinned {
            body.vel = Vec2::ZERO;
        }
        Ok(())
    }

    fn set_hidden(&mut self, id: EntityId, hidden: bool) -> HostResult {
        self.body_mut(id)?.hidden = hidden;
        Ok(())
    }

    fn set_affected_by_force(&mut self, id: EntityId, affected: bool) -> HostResult {
        self.body_mut(id)?.affected_by_force = affected;
        Ok(())
    }

    fn set_mass(&mut self, id: EntityId, mass: f32) -> HostResult {
        self.body_mut(id)?.mass = mass;
        Ok(())
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) -> HostResult {
        let body = self.body_mut(id)?;
        if body.moves() && body.mass > 0.0 {
            body.vel += impulse / body.mass;
        }
        Ok(())
    }

    fn set_angular_damping(&mut self, id: EntityId, damping: f32) -> HostResult {
        self.body_mut(id)?.angular_damping = damping;
        Ok(())
    }

    fn set_restitution(&mut self, id: EntityId, restitution: f32) -> HostResult {
        self.body_mut(id)?.restitution = restitution;
        Ok(())
    }

    fn set_contact_filter(&mut self, id: EntityId, category: Category, contacts: &[Category]) -> HostResult {
        let body = self.body_mut(id)?;
        body.category = Some(category);
        body.contact_mask = contacts.iter().fold(0, |mask, c| mask | c.tag());
        Ok(())
    }

    fn set_force_field(&mut self, force: Vec2) {
        self.force_field = force;
    }

    fn hit_test(&self, point: Vec2) -> Option<EntityId> {
        self.bodies
            .iter()
            .rev()
            .find(|(_, b)| !b.hidden && b.contains(point))
            .map(|(id, _)| *id)
    }
}

impl Simulate for HeadlessWorld {
    fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.integrate(dt);
        self.collide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{BodyProps, BrickClass, Registry};

    fn spawn(world: &mut HeadlessWorld, reg: &mut Registry, kind: EntityKind, pos: Vec2, size: Vec2, body: BodyProps) -> EntityId {
        let entity = reg.create(kind, pos, size, body);
        world.spawn(&entity);
        entity.id
    }

    #[test]
    fn test_missing_entity_errors() {
        let mut world = HeadlessWorld::new();
        let id = EntityId(42);
        assert_eq!(world.despawn(id), Err(HostError::MissingEntity(id)));
        assert_eq!(world.set_hidden(id, true), Err(HostError::MissingEntity(id)));
    }

    #[test]
    fn test_impulse_needs_dynamic_body() {
        let mut world = HeadlessWorld::new();
        let mut reg = Registry::new();
        let ball = spawn(&mut world, &mut reg, EntityKind::Ball, Vec2::ZERO, Vec2::splat(30.0), BodyProps::fixed(0.1));
        world.apply_impulse(ball, Vec2::new(50.0, -50.0)).unwrap();
        assert_eq!(world.velocity(ball), Some(Vec2::ZERO));

        world.set_dynamic(ball, true).unwrap();
        world.apply_impulse(ball, Vec2::new(50.0, -50.0)).unwrap();
        let vel = world.velocity(ball).unwrap();
        assert!((vel - Vec2::new(500.0, -500.0)).length() < 1e-3);
    }

    #[test]
    fn test_contact_begins_once_and_respects_filter() {
        let mut world = HeadlessWorld::new();
        let mut reg = Registry::new();
        let ball = spawn(&mut world, &mut reg, EntityKind::Ball, Vec2::new(0.0, -40.0), Vec2::splat(30.0), BodyProps::moving(0.1));
        let brick = spawn(
            &mut world,
            &mut reg,
            EntityKind::Brick(BrickClass::Low),
            Vec2::ZERO,
            Vec2::new(50.0, 20.0),
            BodyProps::fixed(1.0),
        );

        // No masks yet: the ball bounces but nothing is reported
        world.set_velocity(ball, Vec2::new(0.0, 600.0)).unwrap();
        let mut reported = 0;
        for _ in 0..10 {
            reported += world.step(1.0 / 120.0).len();
        }
        assert_eq!(reported, 0);
        assert!(world.velocity(ball).unwrap().y < 0.0);

        world.set_contact_filter(brick, Category::LowBrick, &[Category::Ball]).unwrap();
        world.set_position(ball, Vec2::new(0.0, -40.0)).unwrap();
        world.set_velocity(ball, Vec2::new(0.0, 600.0)).unwrap();
        let mut contacts = Vec::new();
        for _ in 0..10 {
            contacts.extend(world.step(1.0 / 120.0));
        }
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].a, ContactBody::new(Category::Ball, ball));
        assert_eq!(contacts[0].b, ContactBody::new(Category::LowBrick, brick));
    }

    #[test]
    fn test_force_field_moves_affected_bodies() {
        let mut world = HeadlessWorld::new();
        let mut reg = Registry::new();
        let falling = spawn(&mut world, &mut reg, EntityKind::Brick(BrickClass::High), Vec2::ZERO, Vec2::new(50.0, 20.0), BodyProps::moving(1000.0));
        let resting = spawn(&mut world, &mut reg, EntityKind::Brick(BrickClass::High), Vec2::new(100.0, 0.0), Vec2::new(50.0, 20.0), BodyProps::moving(1000.0));
        world.set_affected_by_force(falling, true).unwrap();
        world.set_force_field(Vec2::new(0.0, -1.0));
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        assert!(world.position(falling).unwrap().y < -50.0);
        assert_eq!(world.position(resting), Some(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_hit_test_prefers_topmost_visible() {
        let mut world = HeadlessWorld::new();
        let mut reg = Registry::new();
        let under = spawn(&mut world, &mut reg, EntityKind::Ball, Vec2::ZERO, Vec2::splat(30.0), BodyProps::fixed(0.1));
        let control = spawn(&mut world, &mut reg, EntityKind::RestartControl, Vec2::new(0.0, -10.0), Vec2::splat(75.0), BodyProps::fixed(0.0));
        assert_eq!(world.hit_test(Vec2::ZERO), Some(control));
        world.set_hidden(control, true).unwrap();
        assert_eq!(world.hit_test(Vec2::ZERO), Some(under));
        assert_eq!(world.hit_test(Vec2::new(500.0, 500.0)), None);
    }
}
