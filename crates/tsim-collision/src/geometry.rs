//! Oriented rectangles and the separating-axis test.

use std::f64::consts::FRAC_PI_2;

use tsim_core::Vector2d;
use tsim_world::WorldObject;

/// Yaw tolerance (rad) under which two rectangles count as axis-aligned
/// with each other.
pub const ROTATION_EPS: f64 = 1e-4;

/// Corner order, clockwise starting at the rear left.
///
/// "Upper" is the left-hand side of the body, "Left" its rear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Corner {
    UpperLeft = 0,
    UpperRight = 1,
    LowerRight = 2,
    LowerLeft = 3,
}

/// A body's footprint in world coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrientedRect {
    pub corners: [Vector2d; 4],
    pub yaw:     f64,
    pub length:  f64,
    pub width:   f64,
}

impl OrientedRect {
    pub fn new(position: Vector2d, yaw: f64, length: f64, width: f64, leading_edge: f64) -> Self {
        let rear = leading_edge - length;
        let half_width = width / 2.0;
        let local = [
            Vector2d::new(rear, half_width),
            Vector2d::new(leading_edge, half_width),
            Vector2d::new(leading_edge, -half_width),
            Vector2d::new(rear, -half_width),
        ];
        OrientedRect {
            corners: local.map(|c| c.rotate(yaw).translate(position)),
            yaw,
            length,
            width,
        }
    }

    pub fn from_object(object: &dyn WorldObject) -> Self {
        Self::new(
            object.position(),
            object.yaw(),
            object.length(),
            object.width(),
            object.distance_reference_point_to_leading_edge(),
        )
    }

    pub fn corner(&self, corner: Corner) -> Vector2d {
        self.corners[corner as usize]
    }

    /// Same rectangle moved by `offset`.
    pub fn shifted(&self, offset: Vector2d) -> Self {
        OrientedRect { corners: self.corners.map(|c| c.translate(offset)), ..*self }
    }

    /// Edge `i` runs from corner `i` to corner `i + 1` (clockwise).
    pub fn edge(&self, index: usize) -> (Vector2d, Vector2d) {
        (self.corners[index % 4], self.corners[(index + 1) % 4])
    }

    /// The two independent edge normals: `Right = UR - UL`, `Up = UL - LL`.
    pub fn normals(&self) -> [Vector2d; 2] {
        [
            self.corner(Corner::UpperRight) - self.corner(Corner::UpperLeft),
            self.corner(Corner::UpperLeft) - self.corner(Corner::LowerLeft),
        ]
    }

    /// `[min, max]` of the corners projected onto `axis`.
    pub fn project(&self, axis: Vector2d) -> (f64, f64) {
        self.corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            let p = c.dot(axis);
            (lo.min(p), hi.max(p))
        })
    }
}

/// Result of [`detect_intersection`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SatOutcome {
    pub colliding:   bool,
    /// Axes projected before a verdict was reached.
    pub axes_tested: u8,
}

/// `true` if the yaws differ by a multiple of 90° (within [`ROTATION_EPS`]),
/// in which case both rectangles share the same pair of normal directions.
pub fn axes_aligned(a: f64, b: f64) -> bool {
    let d = (a - b).rem_euclid(FRAC_PI_2);
    d < ROTATION_EPS || FRAC_PI_2 - d < ROTATION_EPS
}

/// Separating-axis test.  Touching rectangles count as colliding.
///
/// Tests `a`'s two normals, then `b`'s two unless the rectangles are
/// axis-aligned with each other.  Stops at the first separating axis.
pub fn detect_intersection(a: &OrientedRect, b: &OrientedRect) -> SatOutcome {
    let [a_right, a_up] = a.normals();
    let [b_right, b_up] = b.normals();
    let all = [a_right, a_up, b_right, b_up];
    let axes = if axes_aligned(a.yaw, b.yaw) { &all[..2] } else { &all[..] };

    let mut tested = 0;
    for axis in axes {
        tested += 1;
        let (a_min, a_max) = a.project(*axis);
        let (b_min, b_max) = b.project(*axis);
        if a_max < b_min || b_max < a_min {
            return SatOutcome { colliding: false, axes_tested: tested };
        }
    }
    SatOutcome { colliding: true, axes_tested: tested }
}

/// Cheap pre-filter on the UpperLeft corners: `true` if either coordinate
/// delta exceeds the sum of both bodies' length and width.
pub fn broad_phase_reject(a: &OrientedRect, b: &OrientedRect) -> bool {
    let threshold = a.length + a.width + b.length + b.width;
    let delta = a.corner(Corner::UpperLeft) - b.corner(Corner::UpperLeft);
    delta.x.abs() > threshold || delta.y.abs() > threshold
}
