//! Circle-geometry and physics helpers shared by all systems.
//!
//! All "no effect" cases (zero-length directions, exact center overlap,
//! behind-origin rays) return `None` or the zero vector rather than
//! signaling an error; callers treat them as "skip".

use glam::DVec2;

use crate::types::{Position, Velocity};

/// Result of a resolved circle-vs-circle overlap.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit separating normal, pointing from the obstacle toward the entity.
    pub normal: DVec2,
    /// Penetration depth before the push-out.
    pub overlap: f64,
    /// Center distance before the push-out.
    pub distance: f64,
}

/// Closest positive hit distance of a unit-direction ray against a circle,
/// up to `max_len`. `dir` must be pre-normalized by the caller; this
/// function does not normalize. Returns `None` when the circle is behind
/// the origin, beyond `max_len`, or missed entirely.
pub fn ray_circle(origin: DVec2, dir: DVec2, center: DVec2, radius: f64, max_len: f64) -> Option<f64> {
    let to_center = center - origin;
    let proj = to_center.dot(dir);
    let closest_sq = to_center.length_squared() - proj * proj;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let thickness = (radius_sq - closest_sq).sqrt();
    let t = proj - thickness;
    if t < 0.0 || t > max_len {
        return None;
    }
    Some(t)
}

/// If the entity circle overlaps the obstacle circle, push the entity
/// position out to the non-overlapping boundary along the separating
/// normal and return the contact. Exact center overlap (distance 0) is
/// treated as no collision to avoid a zero-length normal.
pub fn push_out_overlap(
    entity: &mut Position,
    obstacle: Position,
    r_entity: f64,
    r_obstacle: f64,
) -> Option<Contact> {
    let delta = entity.vec() - obstacle.vec();
    let distance = delta.length();
    let radius_sum = r_entity + r_obstacle;
    if distance <= 0.0 || distance >= radius_sum {
        return None;
    }
    let normal = delta / distance;
    *entity = Position::from_vec(obstacle.vec() + normal * radius_sum);
    Some(Contact {
        normal,
        overlap: radius_sum - distance,
        distance,
    })
}

/// Reflect the velocity's normal component by `(1 + restitution)`, but
/// only when the entity is moving into the surface. Returns the pre-bounce
/// inward speed (0 when not moving inward) for impact-damage formulas.
pub fn bounce(vel: &mut Velocity, normal: DVec2, restitution: f64) -> f64 {
    let v = vel.vec();
    let inward = v.dot(normal);
    if inward >= 0.0 {
        return 0.0;
    }
    *vel = Velocity::from_vec(v - normal * (inward * (1.0 + restitution)));
    -inward
}

/// Distance from the viewport center to the viewport edge along a unit
/// direction. Used to cap the mining laser at the screen edge.
pub fn viewport_edge_distance(dir: DVec2, half_width: f64, half_height: f64) -> f64 {
    let tx = if dir.x.abs() > 1e-12 {
        half_width / dir.x.abs()
    } else {
        f64::INFINITY
    };
    let ty = if dir.y.abs() > 1e-12 {
        half_height / dir.y.abs()
    } else {
        f64::INFINITY
    };
    tx.min(ty)
}
