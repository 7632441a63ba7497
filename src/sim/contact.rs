//! Contact resolution
//!
//! Classifies a contact-begin event by its category pair and applies exactly
//! one rule. Selection is by exact category match on the canonically ordered
//! pair; unknown pairs fall through to [`ContactRule::Ignore`].

use super::entity::{BrickClass, Category, EntityKind};
use super::host::{Contact, ContactBody, PhysicsHost, soft};
use super::state::{Game, GameEvent, GamePhase};

/// The rule selected for a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    /// Ball destroyed a brick
    BrickHit(BrickClass),
    PaddleBounce,
    WallBounce,
    /// Ball reached the floor
    FloorLoss,
    Ignore,
}

impl ContactRule {
    /// Dispatch table over an ordered category pair
    pub fn for_pair(first: Category, second: Category) -> Self {
        match (first, second) {
            (Category::Ball, Category::HighBrick) => ContactRule::BrickHit(BrickClass::High),
            (Category::Ball, Category::MediumBrick) => ContactRule::BrickHit(BrickClass::Medium),
            (Category::Ball, Category::LowBrick) => ContactRule::BrickHit(BrickClass::Low),
            (Category::Ball, Category::Paddle) => ContactRule::PaddleBounce,
            (Category::Ball, Category::Border) => ContactRule::WallBounce,
            (Category::Ball, Category::Floor) => ContactRule::FloorLoss,
            _ => ContactRule::Ignore,
        }
    }
}

/// Order the pair and pick its rule. Returns the rule and the non-canonical
/// (second) body, which is the brick for brick hits.
pub fn classify(contact: &Contact) -> (ContactRule, ContactBody) {
    let (first, second) = contact.ordered();
    (ContactRule::for_pair(first.category, second.category), second)
}

impl Game {
    /// Handle one contact-begin event from the host.
    ///
    /// Contacts after game over have no gameplay consequence and are dropped.
    pub fn handle_contact(&mut self, host: &mut impl PhysicsHost, contact: Contact) -> ContactRule {
        if self.phase == GamePhase::Ended {
            return ContactRule::Ignore;
        }

        let (rule, target) = classify(&contact);
        match rule {
            ContactRule::BrickHit(class) => {
                if !self.destroy_brick(host, class, target) {
                    return ContactRule::Ignore;
                }
                self.emit(GameEvent::BrickImpact);
            }
            ContactRule::PaddleBounce => self.emit(GameEvent::PaddleImpact),
            ContactRule::WallBounce => self.emit(GameEvent::WallImpact),
            ContactRule::FloorLoss => {
                self.emit(GameEvent::Loss);
                self.end_game(host);
            }
            ContactRule::Ignore => {
                log::debug!(
                    "ignoring contact {:?} x {:?}",
                    contact.a.category,
                    contact.b.category
                );
                return rule;
            }
        }

        log::debug!("contact {rule:?}, impacts {}", self.scoreboard.impacts + 1);
        if self.scoreboard.record_impact() {
            if self.phase != GamePhase::Ended {
                self.escalate(host);
            }
            self.scoreboard.reset_impacts();
        }
        rule
    }

    /// Remove the brick and score it. False for a stale reference.
    fn destroy_brick(
        &mut self,
        host: &mut impl PhysicsHost,
        class: BrickClass,
        target: ContactBody,
    ) -> bool {
        // A stale reference means the brick already went earlier this frame
        let Some(id) = target.entity else { return false };
        match self.registry.brick(id).map(|b| b.kind) {
            Some(EntityKind::Brick(live)) if live == class => {}
            Some(kind) => {
                log::debug!("brick {id} is {kind:?}, contact reported {class:?}");
                return false;
            }
            None => {
                log::debug!("brick {id} already destroyed");
                return false;
            }
        }
        self.registry.remove_brick(id);
        soft("despawn", host.despawn(id));
        let points = self.config.brick_classes.get(class).points;
        self.scoreboard.add_score(points);
        self.hud.set_score(self.scoreboard.score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;

    #[test]
    fn test_dispatch_table() {
        assert_eq!(
            ContactRule::for_pair(Category::Ball, Category::LowBrick),
            ContactRule::BrickHit(BrickClass::Low)
        );
        assert_eq!(
            ContactRule::for_pair(Category::Ball, Category::Floor),
            ContactRule::FloorLoss
        );
        // Rules only match the canonical order
        assert_eq!(
            ContactRule::for_pair(Category::Paddle, Category::Ball),
            ContactRule::Ignore
        );
    }

    #[test]
    fn test_non_ball_pairs_ignored() {
        for a in Category::ALL {
            for b in Category::ALL {
                if a != Category::Ball && b != Category::Ball {
                    assert_eq!(ContactRule::for_pair(a, b), ContactRule::Ignore);
                }
            }
        }
        assert_eq!(
            ContactRule::for_pair(Category::Ball, Category::Ball),
            ContactRule::Ignore
        );
    }

    #[test]
    fn test_classify_orders_pair() {
        let brick = ContactBody::new(Category::HighBrick, EntityId(5));
        let ball = ContactBody::new(Category::Ball, EntityId(1));
        let (rule, target) = classify(&Contact::new(brick, ball));
        assert_eq!(rule, ContactRule::BrickHit(BrickClass::High));
        assert_eq!(target, brick);
    }
}
