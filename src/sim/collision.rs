//! Collision detection and response for the headless host
//!
//! Ball is a circle; every other body is an axis-aligned box. The border is
//! the one box the ball lives inside, so it collides on its inner edges.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn hit(normal: Vec2, penetration: f32) -> Self {
        Self {
            hit: true,
            normal,
            penetration,
        }
    }
}

/// Check a ball against the outside of a box centered at `box_pos`
pub fn ball_box_collision(ball_pos: Vec2, ball_radius: f32, box_pos: Vec2, box_size: Vec2) -> CollisionResult {
    let half = box_size / 2.0;
    let local = ball_pos - box_pos;
    let closest = local.clamp(-half, half);
    let delta = local - closest;
    let dist = delta.length();

    if dist > ball_radius {
        return CollisionResult::miss();
    }
    if dist > f32::EPSILON {
        return CollisionResult::hit(delta / dist, ball_radius - dist);
    }

    // Center inside the box: push out along the shallowest axis
    let depth = half - local.abs();
    if depth.x < depth.y {
        let sign = if local.x < 0.0 { -1.0 } else { 1.0 };
        CollisionResult::hit(Vec2::new(sign, 0.0), depth.x + ball_radius)
    } else {
        let sign = if local.y < 0.0 { -1.0 } else { 1.0 };
        CollisionResult::hit(Vec2::new(0.0, sign), depth.y + ball_radius)
    }
}

/// Check a ball against the inner edges of an enclosing box
pub fn ball_wall_collision(ball_pos: Vec2, ball_radius: f32, box_pos: Vec2, box_size: Vec2) -> CollisionResult {
    let half = box_size / 2.0;
    let local = ball_pos - box_pos;

    let walls = [
        (Vec2::X, local.x - ball_radius + half.x),
        (Vec2::NEG_X, half.x - local.x - ball_radius),
        (Vec2::Y, local.y - ball_radius + half.y),
        (Vec2::NEG_Y, half.y - local.y - ball_radius),
    ];
    // Gap to each wall; negative means overlap
    let (normal, gap) = walls
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((Vec2::ZERO, f32::INFINITY));

    if gap > 0.0 {
        CollisionResult::miss()
    } else {
        CollisionResult::hit(normal, -gap)
    }
}

/// Bounce a velocity off a surface.
///
/// `restitution` scales the normal component: 1.0 is a perfect bounce,
/// above 1.0 adds energy.
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let along = velocity.dot(normal);
    if along >= 0.0 {
        // Already separating
        return velocity;
    }
    velocity - (1.0 + restitution) * along * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_box_collision_top_edge() {
        // Box 50x20 at origin, ball just above the top edge
        let result = ball_box_collision(Vec2::new(0.0, 20.0), 15.0, Vec2::ZERO, Vec2::new(50.0, 20.0));
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!((result.penetration - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_ball_box_collision_miss() {
        let result = ball_box_collision(Vec2::new(100.0, 0.0), 15.0, Vec2::ZERO, Vec2::new(50.0, 20.0));
        assert!(!result.hit);
    }

    #[test]
    fn test_ball_box_collision_center_inside() {
        let result = ball_box_collision(Vec2::new(-20.0, 0.0), 5.0, Vec2::ZERO, Vec2::new(50.0, 20.0));
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
    }

    #[test]
    fn test_wall_collision() {
        let size = Vec2::new(660.0, 1334.0);
        assert!(!ball_wall_collision(Vec2::ZERO, 15.0, Vec2::ZERO, size).hit);

        let result = ball_wall_collision(Vec2::new(320.0, 0.0), 15.0, Vec2::ZERO, size);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 5.0).abs() < 1e-4);

        let result = ball_wall_collision(Vec2::new(0.0, -660.0), 15.0, Vec2::ZERO, size);
        assert_eq!(result.normal, Vec2::Y);
    }

    #[test]
    fn test_bounce_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = bounce_velocity(Vec2::new(100.0, 0.0), Vec2::NEG_X, 1.0);
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);

        // Extra restitution speeds the ball up
        let reflected = bounce_velocity(Vec2::new(100.0, 50.0), Vec2::NEG_X, 1.5);
        assert!((reflected.x + 150.0).abs() < 0.001);
        assert!((reflected.y - 50.0).abs() < 0.001);

        // Separating velocities are left alone
        let v = Vec2::new(-10.0, 0.0);
        assert_eq!(bounce_velocity(v, Vec2::NEG_X, 1.0), v);
    }
}
