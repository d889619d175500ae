//! Collision detection and response for the ball
//!
//! Two primitives cover the whole table: a thick segment (flippers) against a
//! circle, and a circle against a static circle (bumpers). Both push the ball
//! out of any overlap and reflect its velocity only when it is approaching.

use glam::Vec2;

/// Segments shorter than this (squared) are treated as points
pub const POINT_EPSILON: f32 = 1e-6;
/// Tolerance on the projection parameter before clamping to an endpoint
pub const PARAM_EPSILON: f32 = 1e-6;
/// Distances below this cannot be normalized
pub const DISTANCE_EPSILON: f32 = 1e-6;
/// Overlaps below this are not corrected
pub const OVERLAP_EPSILON: f32 = 1e-6;
/// Extra push past the surface so the next sub-step starts clear
pub const SEPARATION_MARGIN: f32 = 0.05;

/// Result of a collision test, consumed immediately by the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// Whether the shapes touched
    pub collided: bool,
    /// Ball velocity after response (unchanged on miss or separation)
    pub velocity: Vec2,
    /// Ball center after overlap correction
    pub position: Vec2,
}

impl CollisionOutcome {
    pub fn miss(velocity: Vec2, position: Vec2) -> Self {
        Self {
            collided: false,
            velocity,
            position,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Normal for a circle whose center sits on the segment itself
fn segment_side_normal(p1: Vec2, line: Vec2, center: Vec2) -> Vec2 {
    let Some(perp) = line.perp().try_normalize() else {
        return Vec2::NEG_Y;
    };
    // Positive when the center lies on the perp() side of p1 -> p2
    let side = line.perp_dot(center - p1);
    if side > DISTANCE_EPSILON {
        perp
    } else if side < -DISTANCE_EPSILON {
        -perp
    } else {
        Vec2::NEG_Y
    }
}

/// Collide a circle with a thick segment
///
/// `extra_radius` is the segment's own half-thickness. `surface_velocity` is
/// the velocity of the segment at the contact point and is added to the
/// reflected velocity, which is how a swinging flipper strikes the ball.
#[allow(clippy::too_many_arguments)]
pub fn segment_circle_collide(
    p1: Vec2,
    p2: Vec2,
    center: Vec2,
    radius: f32,
    extra_radius: f32,
    velocity: Vec2,
    restitution: f32,
    surface_velocity: Vec2,
) -> CollisionOutcome {
    let line = p2 - p1;
    let len_sq = line.length_squared();
    let is_point = len_sq < POINT_EPSILON;
    let total_radius = radius + extra_radius;

    // Closest point on the segment to the circle center
    let contact = if is_point {
        p1
    } else {
        let t = (center - p1).dot(line) / len_sq;
        if t < -PARAM_EPSILON || t > 1.0 + PARAM_EPSILON {
            if center.distance_squared(p1) < center.distance_squared(p2) {
                p1
            } else {
                p2
            }
        } else {
            p1 + line * t
        }
    };

    let dist_sq = center.distance_squared(contact);
    if dist_sq > total_radius * total_radius {
        return CollisionOutcome::miss(velocity, center);
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > DISTANCE_EPSILON {
        (center - contact) / dist
    } else if is_point {
        // Center on top of a point collider: no preferred side
        Vec2::X
    } else {
        segment_side_normal(p1, line, center)
    };

    let mut position = center;
    let overlap = total_radius - dist;
    if overlap > OVERLAP_EPSILON {
        position += normal * (overlap + SEPARATION_MARGIN);
    }

    let approach = velocity.dot(normal);
    if approach > 0.0 {
        // Already separating: keep the push-out, skip the bounce
        return CollisionOutcome {
            collided: true,
            velocity,
            position,
        };
    }

    CollisionOutcome {
        collided: true,
        velocity: reflect_velocity(velocity, normal) * restitution + surface_velocity,
        position,
    }
}

/// Collide a moving circle with a static circle
pub fn circle_circle_collide(
    moving_center: Vec2,
    moving_radius: f32,
    static_center: Vec2,
    static_radius: f32,
    velocity: Vec2,
    restitution: f32,
) -> CollisionOutcome {
    let offset = moving_center - static_center;
    let dist_sq = offset.length_squared();
    let total_radius = moving_radius + static_radius;

    if dist_sq > total_radius * total_radius {
        return CollisionOutcome::miss(velocity, moving_center);
    }

    let dist = dist_sq.sqrt();
    // Points from the static circle toward the moving one
    let normal = if dist > DISTANCE_EPSILON {
        offset / dist
    } else {
        Vec2::NEG_Y
    };

    let mut position = moving_center;
    let overlap = total_radius - dist;
    if overlap > OVERLAP_EPSILON {
        position += normal * (overlap + SEPARATION_MARGIN);
    }

    let approach = velocity.dot(normal);
    let velocity = if approach < 0.0 {
        reflect_velocity(velocity, normal) * restitution
    } else {
        velocity
    };

    CollisionOutcome {
        collided: true,
        velocity,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_segment_head_on_reflection() {
        // Ball above a horizontal segment (y grows downward), moving down onto it
        let out = segment_circle_collide(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, -1.0),
            1.0,
            0.0,
            Vec2::new(0.0, 2.0),
            1.0,
            Vec2::ZERO,
        );
        assert!(out.collided);
        assert!(out.velocity.x.abs() < 1e-6);
        assert!((out.velocity.y - (-2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_segment_restitution_and_surface_velocity() {
        let out = segment_circle_collide(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, -0.5),
            1.0,
            0.0,
            Vec2::new(1.0, 2.0),
            0.5,
            Vec2::new(0.0, -3.0),
        );
        assert!(out.collided);
        // (1, -2) * 0.5 + (0, -3)
        assert!((out.velocity.x - 0.5).abs() < 1e-5);
        assert!((out.velocity.y - (-4.0)).abs() < 1e-5);
        // Pushed out to radius plus margin
        assert!((out.position.y - (-1.0 - SEPARATION_MARGIN)).abs() < 1e-5);
        assert!((out.position.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_miss_leaves_state() {
        let v = Vec2::new(0.3, 0.4);
        let c = Vec2::new(5.0, -3.0);
        let out = segment_circle_collide(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            c,
            1.0,
            1.0,
            v,
            1.0,
            Vec2::new(9.0, 9.0),
        );
        assert!(!out.collided);
        assert_eq!(out.velocity, v);
        assert_eq!(out.position, c);
    }

    #[test]
    fn test_segment_extra_radius_extends_reach() {
        let c = Vec2::new(5.0, -3.5);
        let thin = segment_circle_collide(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            c,
            1.0,
            0.0,
            Vec2::new(0.0, 1.0),
            1.0,
            Vec2::ZERO,
        );
        let thick = segment_circle_collide(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            c,
            1.0,
            3.0,
            Vec2::new(0.0, 1.0),
            1.0,
            Vec2::ZERO,
        );
        assert!(!thin.collided);
        assert!(thick.collided);
        assert!(thick.velocity.y < 0.0);
    }

    #[test]
    fn test_segment_separating_keeps_velocity() {
        // Overlapping but already moving away: position fixed, no bounce
        let v = Vec2::new(0.0, -2.0);
        let out = segment_circle_collide(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, -0.5),
            1.0,
            0.0,
            v,
            1.0,
            Vec2::new(0.0, -5.0),
        );
        assert!(out.collided);
        assert_eq!(out.velocity, v);
        assert!(out.position.y < -1.0);
    }

    #[test]
    fn test_segment_endpoint_contact() {
        // Beyond p2 on the segment's axis: contact is the endpoint itself
        let out = segment_circle_collide(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.5, 0.0),
            1.0,
            0.0,
            Vec2::new(-1.0, 0.0),
            1.0,
            Vec2::ZERO,
        );
        assert!(out.collided);
        assert!((out.velocity.x - 1.0).abs() < 1e-6);
        assert!(out.position.x > 11.0);
    }

    #[test]
    fn test_degenerate_segment_is_point() {
        let p = Vec2::new(2.0, 2.0);
        let out = segment_circle_collide(
            p,
            p,
            Vec2::new(2.0, 1.5),
            1.0,
            0.0,
            Vec2::new(0.0, 1.0),
            1.0,
            Vec2::ZERO,
        );
        assert!(out.collided);
        assert!(out.velocity.y < 0.0);
        assert!(out.position.is_finite());
        assert!((out.position.distance(p) - (1.0 + SEPARATION_MARGIN)).abs() < 1e-5);
    }

    #[test]
    fn test_center_on_segment_uses_side_fallback() {
        let out = segment_circle_collide(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            1.0,
            0.0,
            Vec2::new(0.0, 1.0),
            1.0,
            Vec2::ZERO,
        );
        assert!(out.collided);
        assert!(out.position.is_finite());
        assert!(out.velocity.is_finite());
        // Pushed off the line along an axis-aligned normal
        assert!((out.position.x - 5.0).abs() < 1e-6);
        assert!((out.position.y.abs() - (1.0 + SEPARATION_MARGIN)).abs() < 1e-5);
    }

    #[test]
    fn test_side_normal_points_toward_center() {
        let line = Vec2::new(10.0, 0.0);
        let below = segment_side_normal(Vec2::ZERO, line, Vec2::new(5.0, 1e-3));
        let above = segment_side_normal(Vec2::ZERO, line, Vec2::new(5.0, -1e-3));
        assert!(below.y > 0.0);
        assert!(above.y < 0.0);

        // Exactly on a sloped blade: straight up, not the blade perpendicular
        let sloped = Vec2::new(8.0, 6.0);
        let on_line = segment_side_normal(Vec2::ZERO, sloped, sloped * 0.5);
        assert_eq!(on_line, Vec2::NEG_Y);
    }

    #[test]
    fn test_coincident_point_segment_and_center() {
        let p = Vec2::new(1.0, 1.0);
        let out = segment_circle_collide(p, p, p, 1.0, 0.5, Vec2::ZERO, 1.0, Vec2::ZERO);
        assert!(out.collided);
        assert!(out.position.is_finite());
        assert!(out.velocity.is_finite());
    }

    #[test]
    fn test_circle_circle_miss() {
        let out = circle_circle_collide(
            Vec2::new(0.0, 0.0),
            3.0,
            Vec2::new(20.0, 0.0),
            8.0,
            Vec2::new(1.0, 0.0),
            5.0,
        );
        assert!(!out.collided);
        assert_eq!(out.position, Vec2::ZERO);
    }

    #[test]
    fn test_circle_circle_approach_reflects() {
        // Moving circle left of static circle, moving right into it
        let out = circle_circle_collide(
            Vec2::new(10.0, 0.0),
            3.0,
            Vec2::new(20.0, 0.0),
            8.0,
            Vec2::new(2.0, 0.0),
            0.5,
        );
        assert!(out.collided);
        assert!((out.velocity.x - (-1.0)).abs() < 1e-6);
        // Pushed away from the static circle
        assert!((out.position.x - (9.0 - SEPARATION_MARGIN)).abs() < 1e-5);
    }

    #[test]
    fn test_circle_circle_separating_keeps_velocity() {
        let v = Vec2::new(-2.0, 0.0);
        let out = circle_circle_collide(Vec2::new(10.0, 0.0), 3.0, Vec2::new(20.0, 0.0), 8.0, v, 5.0);
        assert!(out.collided);
        assert_eq!(out.velocity, v);
        assert!(out.position.x < 10.0);
    }

    #[test]
    fn test_circle_circle_coincident_pushes_up() {
        let c = Vec2::new(50.0, 50.0);
        let out = circle_circle_collide(c, 3.0, c, 8.0, Vec2::new(0.0, 1.0), 1.0);
        assert!(out.collided);
        assert!((out.position.y - (50.0 - 11.0 - SEPARATION_MARGIN)).abs() < 1e-4);
        assert!((out.position.x - 50.0).abs() < 1e-6);
        assert!(out.velocity.y < 0.0);
    }
}
