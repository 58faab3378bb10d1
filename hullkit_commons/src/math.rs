// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use float_ord::FloatOrd;
use glam::{DVec3, Vec3};
use num_traits::{AsPrimitive, Float};

/// A totally ordered wrapper over a point. Comparison is lexicographic on
/// (x, y, z), which is the ordering hull vertices are reported in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Vec3Ord([FloatOrd<f64>; 3]);

pub trait ToOrd<T>
where
    T: Eq + PartialEq + Ord + PartialOrd + std::hash::Hash + Copy,
{
    fn to_ord(&self) -> T;
}

impl ToOrd<Vec3Ord> for DVec3 {
    fn to_ord(&self) -> Vec3Ord {
        Vec3Ord([FloatOrd(self.x), FloatOrd(self.y), FloatOrd(self.z)])
    }
}

pub trait ToVec<T> {
    fn to_vec(&self) -> T;
}

impl ToVec<DVec3> for Vec3Ord {
    fn to_vec(&self) -> DVec3 {
        DVec3::new(self.0[0].0, self.0[1].0, self.0[2].0)
    }
}

/// Anything that can be fed to the hull builder as an input point. All the
/// predicates run in double precision, so every coordinate type is widened to
/// f64 on the way in.
pub trait HullPoint {
    fn to_dvec3(&self) -> DVec3;
}

impl HullPoint for DVec3 {
    fn to_dvec3(&self) -> DVec3 {
        *self
    }
}

impl HullPoint for Vec3 {
    fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl<T> HullPoint for [T; 3]
where
    T: Float + AsPrimitive<f64>,
{
    fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self[0].as_(), self[1].as_(), self[2].as_())
    }
}

impl<T> HullPoint for (T, T, T)
where
    T: Float + AsPrimitive<f64>,
{
    fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.0.as_(), self.1.as_(), self.2.as_())
    }
}

/// Twice the signed area of the triangle (a, b, c) projected on the XY plane.
/// Positive when the projection winds counter-clockwise.
pub fn orient2d(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Six times the signed volume of the tetrahedron (a, b, c, d). Positive when
/// `d` lies on the side the normal of the counter-clockwise triangle (a, b, c)
/// points to.
pub fn orient3d(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    (b - a).cross(c - a).dot(d - a)
}

/// Unnormalized normal of the triangle (a, b, c), following the right hand
/// rule.
pub fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}

/// Signed distance from `p` to the supporting plane of triangle (a, b, c).
/// Returns zero for degenerate (zero-area) triangles.
pub fn signed_distance(a: DVec3, b: DVec3, c: DVec3, p: DVec3) -> f64 {
    let n = triangle_normal(a, b, c);
    let len = n.length();
    if len == 0.0 {
        0.0
    } else {
        n.dot(p - a) / len
    }
}

/// Returns true when `p` is strictly above the plane of (a, b, c). Points
/// exactly on the plane are not considered outside.
pub fn is_strictly_outside(a: DVec3, b: DVec3, c: DVec3, p: DVec3) -> bool {
    orient3d(a, b, c, p) > 0.0
}
