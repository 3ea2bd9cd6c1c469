//! Small vector helpers shared by the primitive builders.

use std::f64::consts::PI;

use glam::{DQuat, DVec3};
use serde::Serialize;

use super::AtomShape;

/// Lengths below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

/// Find any unit vector perpendicular to the given vector.
///
/// Crosses with X unless `v` is nearly parallel to it, then with Y, so the
/// result is stable for a given direction.
#[must_use]
pub fn find_perpendicular(v: DVec3) -> DVec3 {
    if v.length_squared() < EPSILON {
        return DVec3::X;
    }
    let candidate = if v.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    v.cross(candidate).normalize()
}

/// Distance from an atom center to its envelope along unit direction `u`.
///
/// `None` (no envelope) yields zero so bonds reach the center.
#[must_use]
pub fn surface_offset(shape: Option<AtomShape>, radius: f64, u: DVec3) -> f64 {
    match shape {
        None => 0.0,
        Some(AtomShape::Sphere) => radius,
        Some(AtomShape::Box) => {
            let exit = u
                .abs()
                .to_array()
                .into_iter()
                .filter(|c| *c > EPSILON)
                .map(|c| radius / c)
                .fold(f64::INFINITY, f64::min);
            if exit.is_finite() {
                exit
            } else {
                radius
            }
        }
    }
}

/// Point on the quadratic Bézier `p0 → p2` with control point `p1`.
#[must_use]
pub fn quadratic_point(p0: DVec3, p1: DVec3, p2: DVec3, t: f64) -> DVec3 {
    let s = 1.0 - t;
    p0 * (s * s) + p1 * (2.0 * s * t) + p2 * (t * t)
}

/// Axis-angle rotation taking the unit cylinder axis (+Y) onto a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orientation {
    /// Unit rotation axis.
    pub axis: DVec3,
    /// Rotation angle in radians.
    pub angle: f64,
}

impl Orientation {
    /// Rotation aligning +Y with `direction`.
    ///
    /// Returns `None` for zero-length directions and for directions already
    /// along +Y. Directions along −Y rotate half a turn about X.
    #[must_use]
    pub fn aligning(direction: DVec3) -> Option<Self> {
        let d = direction.try_normalize()?;
        let cos = DVec3::Y.dot(d).clamp(-1.0, 1.0);
        let axis = DVec3::Y.cross(d);
        if axis.length_squared() < EPSILON * EPSILON {
            return (cos < 0.0).then_some(Self {
                axis: DVec3::X,
                angle: PI,
            });
        }
        Some(Self {
            axis: axis.normalize(),
            angle: cos.acos(),
        })
    }

    /// As a quaternion.
    #[must_use]
    pub fn to_quat(self) -> DQuat {
        DQuat::from_axis_angle(self.axis, self.angle)
    }
}
