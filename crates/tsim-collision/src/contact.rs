//! Where two moving rectangles first touched.
//!
//! The two-body problem is reduced to one body moving with the relative
//! velocity against a stationary one.  The mover is backed off along that
//! direction by a distance no overlap can exceed, then every corner is swept
//! forward as a ray and intersected with every edge of the stationary body.
//! The smallest travel distance marks the first contact.  Both roles are
//! tried (agent corners into opponent edges and vice versa), since a corner
//! of either body can be the one that touches first.

use tsim_core::Vector2d;
use tsim_world::WorldObject;

use crate::{CollisionError, CollisionResult, OrientedRect};

/// Relative speeds below this (m/s) count as zero.
const VELOCITY_EPS: f64 = 1e-9;

/// Slack on the edge parameter so rays through a corner still hit.
const EDGE_EPS: f64 = 1e-9;

/// Distances this close are the same distance.
const TIE_EPS: f64 = 1e-9;

/// Point of first contact of a collision, plus where it lies on each body's
/// outline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactPoint {
    /// World coordinates on the edge that was hit, with that edge's body at
    /// its current pose.  The other body is the one swept along the
    /// relative velocity, so for rotated pairs this point can lie inside
    /// the other body's current footprint.
    pub position:                 Vector2d,
    /// Clockwise distance along the agent's outline from its UpperLeft corner.
    pub agent_border_distance:    f64,
    /// Clockwise distance along the opponent's outline from its UpperLeft corner.
    pub opponent_border_distance: f64,
}

/// Clockwise distance from the UpperLeft corner to the point `fraction` of
/// the way along `edge` (0 = top, 1 = front, 2 = bottom, 3 = rear), wrapped
/// to the perimeter.
pub fn border_distance(length: f64, width: f64, edge: usize, fraction: f64) -> f64 {
    let edges = [length, width, length, width];
    let edge = edge % 4;
    let before: f64 = edges[..edge].iter().sum();
    let perimeter = 2.0 * (length + width);
    (before + fraction * edges[edge]).rem_euclid(perimeter)
}

/// First hit of a swept corner against a stationary edge.
#[derive(Copy, Clone, Debug)]
struct Hit {
    distance: f64,
    position: Vector2d,
    corner:   usize,
    edge:     usize,
    fraction: f64,
}

/// Sweep `moving`'s corners along `dir` against `fixed`'s edges.
fn first_hit(moving: &OrientedRect, fixed: &OrientedRect, dir: Vector2d) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (corner, origin) in moving.corners.iter().enumerate() {
        for edge in 0..4 {
            let (start, end) = fixed.edge(edge);
            let along = end - start;
            // origin + t·dir = start + s·along, solved by Cramer's rule.
            let det = dir.cross(along);
            if det.abs() < f64::EPSILON {
                continue;
            }
            let rhs = start - *origin;
            let t = rhs.cross(along) / det;
            let s = rhs.cross(dir) / det;
            if t <= 0.0 || s < -EDGE_EPS || s > 1.0 + EDGE_EPS {
                continue;
            }
            if best.is_none_or(|b| t < b.distance) {
                best = Some(Hit {
                    distance: t,
                    position: *origin + dir * t,
                    corner,
                    edge,
                    fraction: s.clamp(0.0, 1.0),
                });
            }
        }
    }
    best
}

/// Reconstruct the point where `agent` and `other` first touched.
///
/// Whichever body owns the struck edge keeps its current pose; the other
/// is swept back along the relative velocity.  The returned `position`
/// is given in that frame.
///
/// Fails with [`CollisionError::ZeroRelativeVelocity`] when both move
/// identically, and with [`CollisionError::NoContact`] if no corner ray
/// meets an edge (only possible for degenerate rectangles).
pub fn calculate_point_of_contact(agent: &dyn WorldObject, other: &dyn WorldObject) -> CollisionResult<ContactPoint> {
    let relative = agent.velocity_vector() - other.velocity_vector();
    if relative.length() < VELOCITY_EPS {
        return Err(CollisionError::ZeroRelativeVelocity);
    }
    let dir = relative.normalized().ok_or(CollisionError::ZeroRelativeVelocity)?;

    let agent_rect = OrientedRect::from_object(agent);
    let other_rect = OrientedRect::from_object(other);
    let safety = agent.length() + agent.width() + other.length() + other.width();

    // Agent corners into the opponent, and opponent corners into the agent.
    let agent_into_other = first_hit(&agent_rect.shifted(-(dir * safety)), &other_rect, dir);
    let other_into_agent = first_hit(&other_rect.shifted(dir * safety), &agent_rect, -dir);

    let contact = match (agent_into_other, other_into_agent) {
        (Some(a), Some(b)) if b.distance + TIE_EPS < a.distance => (b, false),
        (Some(a), _) => (a, true),
        (None, Some(b)) => (b, false),
        (None, None) => return Err(CollisionError::NoContact),
    };

    let (hit, agent_moving) = contact;
    let corner_on = |obj: &dyn WorldObject| border_distance(obj.length(), obj.width(), hit.corner, 0.0);
    let edge_on = |obj: &dyn WorldObject| border_distance(obj.length(), obj.width(), hit.edge, hit.fraction);

    Ok(if agent_moving {
        ContactPoint {
            position:                 hit.position,
            agent_border_distance:    corner_on(agent),
            opponent_border_distance: edge_on(other),
        }
    } else {
        ContactPoint {
            position:                 hit.position,
            agent_border_distance:    edge_on(agent),
            opponent_border_distance: corner_on(other),
        }
    })
}
