//! The world query surface used by collision detection.

use tsim_core::{ObjectId, Vector2d};

/// Geometry and motion of anything that occupies road space.
///
/// The reference point is the object's `position`; the body extends
/// `distance_reference_point_to_leading_edge` forward along `yaw` and
/// `length - distance_reference_point_to_leading_edge` backward, and
/// `width / 2` to each side.
pub trait WorldObject {
    fn position(&self) -> Vector2d;

    /// Heading in radians, counter-clockwise from +x.
    fn yaw(&self) -> f64;

    fn length(&self) -> f64;

    fn width(&self) -> f64;

    fn distance_reference_point_to_leading_edge(&self) -> f64;

    /// Velocity in world coordinates (m/s).
    fn velocity_vector(&self) -> Vector2d;
}

// ── TrafficObject ─────────────────────────────────────────────────────────────

/// A static obstacle: barrier, parked vehicle, debris.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficObject {
    /// Assigned by [`World::add_traffic_object`][crate::World::add_traffic_object].
    pub id:       ObjectId,
    pub position: Vector2d,
    pub yaw:      f64,
    pub length:   f64,
    pub width:    f64,
    pub distance_reference_point_to_leading_edge: f64,
}

impl TrafficObject {
    /// An object whose reference point is its geometric centre.
    pub fn new(position: Vector2d, yaw: f64, length: f64, width: f64) -> Self {
        Self {
            id: ObjectId::INVALID,
            position,
            yaw,
            length,
            width,
            distance_reference_point_to_leading_edge: length / 2.0,
        }
    }
}

impl WorldObject for TrafficObject {
    fn position(&self) -> Vector2d {
        self.position
    }

    fn yaw(&self) -> f64 {
        self.yaw
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn distance_reference_point_to_leading_edge(&self) -> f64 {
        self.distance_reference_point_to_leading_edge
    }

    fn velocity_vector(&self) -> Vector2d {
        Vector2d::ZERO
    }
}
