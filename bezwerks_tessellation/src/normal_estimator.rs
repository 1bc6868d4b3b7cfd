// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

use crate::geometry::unit;
use crate::triangle_patch::*;

// One third of the first derivative at 0 of the cubic Bezier curve starting with a, b.
fn bezier_p(a: DVec3, b: DVec3) -> DVec3 {
    b - a
}

// One sixth of the second derivative at 0 of the cubic Bezier curve starting with a, b, c.
fn bezier_pp(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    a + c - b * 2.0
}

// One third of the third derivative of the cubic Bezier curve a, b, c, d.
fn bezier_ppp(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> DVec3 {
    d - a + (b - c) * 3.0
}

/// Two boundary curves leaving a vertex, sampled three control points deep on each side.
///
/// `left[0]` and `right[0]` are the control points adjacent to `middle`.
#[derive(Debug, Copy, Clone)]
pub struct NormalStencil {
    pub left: [DVec3; 3],
    pub middle: DVec3,
    pub right: [DVec3; 3],
}

impl NormalStencil {
    pub fn new(
        left3: DVec3,
        left2: DVec3,
        left1: DVec3,
        middle: DVec3,
        right1: DVec3,
        right2: DVec3,
        right3: DVec3,
    ) -> Self {
        Self {
            left: [left1, left2, left3],
            middle,
            right: [right1, right2, right3],
        }
    }

    /// Stencils for the three outer corners, each wrapping around both adjacent edges.
    pub fn patch_corners(patch: &TrianglePatch) -> [Self; 3] {
        let p = &patch.control_points;
        [
            Self::new(p[9], p[5], p[2], p[0], p[1], p[3], p[6]),
            Self::new(p[0], p[1], p[3], p[6], p[7], p[8], p[9]),
            Self::new(p[6], p[7], p[8], p[9], p[5], p[2], p[0]),
        ]
    }
}

/// Unit surface normals at patch vertices.
///
/// `epsilon` is a squared length, below it a cross product is treated as degenerate and
/// a higher order estimate is used instead.
#[derive(Debug, Copy, Clone)]
pub struct NormalEstimator {
    epsilon: f64,
}

impl NormalEstimator {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Scales the degeneracy threshold to the size of `patch`.
    pub fn for_patch(patch: &TrianglePatch, fuzz: f64) -> Self {
        Self::new(fuzz * fuzz * patch.max_distance_sq_from_first_corner())
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn normal(&self, stencil: &NormalStencil) -> DVec3 {
        let middle = stencil.middle;
        let n = (stencil.right[0] - middle).cross(stencil.left[0] - middle);
        if n.mag_sq() > self.epsilon {
            unit(n)
        } else {
            self.higher_order_normal(stencil)
        }
    }

    fn higher_order_normal(&self, stencil: &NormalStencil) -> DVec3 {
        let NormalStencil { left, middle, right } = *stencil;

        let lp = bezier_p(middle, left[0]);
        let rp = bezier_p(middle, right[0]);
        let lpp = bezier_pp(middle, left[0], left[1]);
        let rpp = bezier_pp(middle, right[0], right[1]);

        let n1 = rpp.cross(lp) + rp.cross(lpp);
        if n1.mag_sq() > self.epsilon {
            log::trace!("second order normal at {:?}", middle);
            return unit(n1);
        }

        log::trace!("third order normal at {:?}", middle);
        let lppp = bezier_ppp(middle, left[0], left[1], left[2]);
        let rppp = bezier_ppp(middle, right[0], right[1], right[2]);
        let n2 = rpp.cross(lpp) * 9.0
            + (rp.cross(lppp) + rppp.cross(lp) + rppp.cross(lpp) + rpp.cross(lppp)) * 3.0
            + rppp.cross(lppp);
        unit(n2)
    }
}
