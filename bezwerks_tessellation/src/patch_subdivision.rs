// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

use crate::geometry::midpoint;
use crate::triangle_patch::*;

// Splits a cubic Bezier curve at t = 0.5, returning both halves as a 7 point polygon
// that shares the middle point.
fn split_cubic(curve: [DVec3; 4]) -> [DVec3; 7] {
    let [a, b, c, d] = curve;

    let ab = midpoint(a, b);
    let bc = midpoint(b, c);
    let cd = midpoint(c, d);
    let abc = midpoint(ab, bc);
    let bcd = midpoint(bc, cd);

    [a, ab, abc, midpoint(abc, bcd), bcd, cd, d]
}

// Quarter-half-quarter average along a row of three control points.
fn blend(a: DVec3, center: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.25 + center * 0.5
}

/// Four half-scale patches covering the parent.
///
/// ```text
///                 corner 2
///                   /\
///                  /up\
///          m_02   /____\   m_12
///                /\    /\
///               /  \c /  \
///              /left\/right\
///      corner 0 ----m_01---- corner 1
/// ```
///
/// Corner sub-patches keep their outer corner at index 0 (`left`), 6 (`right`) and 9 (`up`).
/// The center sub-patch runs `m_12`, `m_02`, `m_01` and touches no outer edge.
#[derive(Debug, Copy, Clone)]
pub struct SubdividedPatch {
    pub left: TrianglePatch,
    pub right: TrianglePatch,
    pub up: TrianglePatch,
    pub center: TrianglePatch,
}

impl SubdividedPatch {
    /// Surface points at the midpoints of the parent's edges 0-1, 0-2 and 1-2.
    pub fn edge_midpoints(&self) -> [DVec3; 3] {
        [
            self.left.control_points[CORNER_1],
            self.left.control_points[CORNER_2],
            self.right.control_points[CORNER_2],
        ]
    }
}

/// One midpoint step of triangular de Casteljau subdivision.
pub fn subdivide(patch: &TrianglePatch) -> SubdividedPatch {
    let p = &patch.control_points;

    let e01 = split_cubic(patch.edge_01());
    let e02 = split_cubic(patch.edge_02());
    let e12 = split_cubic(patch.edge_12());

    // Rows through the center, each parallel to the edge it is named after.
    let row_01 = blend(p[2], p[4], p[7]);
    let row_02 = blend(p[8], p[4], p[1]);
    let row_12 = blend(p[5], p[4], p[3]);

    let left_7 = midpoint(row_01, e01[2]);
    let left_8 = midpoint(e02[2], row_02);
    let right_2 = midpoint(row_01, e01[4]);
    let right_5 = midpoint(row_12, e12[2]);
    let up_1 = midpoint(e02[4], row_02);
    let up_3 = midpoint(row_12, e12[4]);

    let left_4 = midpoint(midpoint(p[2], p[4]), e01[1]);
    let right_4 = midpoint(midpoint(p[4], p[3]), e12[1]);
    let up_4 = midpoint(e02[5], midpoint(p[8], p[4]));
    let center_4 = (midpoint(p[5], p[2]) + midpoint(p[8], p[7]) + midpoint(p[1], p[3]) + p[4]) * 0.25;

    SubdividedPatch {
        left: TrianglePatch::new([
            e01[0], e01[1], e02[1], e01[2], left_4, e02[2], e01[3], left_7, left_8, e02[3],
        ]),
        right: TrianglePatch::new([
            e01[3], e01[4], right_2, e01[5], right_4, right_5, e01[6], e12[1], e12[2], e12[3],
        ]),
        up: TrianglePatch::new([
            e02[3], up_1, e02[4], up_3, up_4, e02[5], e12[3], e12[4], e12[5], e12[6],
        ]),
        center: TrianglePatch::new([
            e12[3], up_3, right_5, up_1, center_4, right_2, e02[3], left_8, left_7, e01[3],
        ]),
    }
}
