// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Deviation of a patch from its flat triangle.
//!
//! Straight boundary edges plus a center control point lying in the corner plane are taken
//! as a proxy for the whole patch being flat. The interior is not tested any further.

use ultraviolet::vec::DVec3;

use crate::geometry::*;
use crate::triangle_patch::*;

/// Perpendicular displacement of `z` from the line through `p` and `q`.
fn line_displacement(z: DVec3, p: DVec3, q: DVec3) -> DVec3 {
    perp(z - p, unit(q - p))
}

/// Perpendicular displacement of `z` from the plane through `u` with unit normal `n`.
/// A zero normal means the corners are collinear, then the raw offset is used.
fn plane_displacement(z: DVec3, u: DVec3, n: DVec3) -> DVec3 {
    let offset = z - u;
    if n != DVec3::zero() {
        n * offset.dot(n)
    } else {
        offset
    }
}

/// Per-axis maximum displacement of the control points `c0`, `c1` from the chord `z0`-`z1`.
pub fn edge_displacement(z0: DVec3, c0: DVec3, c1: DVec3, z1: DVec3) -> DVec3 {
    max_abs(line_displacement(c0, z0, z1), line_displacement(c1, z0, z1))
}

pub fn edge_displacement_of(edge: &[DVec3; 4]) -> DVec3 {
    edge_displacement(edge[0], edge[1], edge[2], edge[3])
}

/// Per-axis maximum absolute deviation of `patch` from its corner triangle.
pub fn displacement(patch: &TrianglePatch) -> DVec3 {
    let [z0, z1, z2] = patch.corners();

    let mut d = DVec3::zero();
    d = max_abs(d, plane_displacement(patch.center(), z0, unit((z1 - z0).cross(z2 - z0))));

    d = max_abs(d, edge_displacement_of(&patch.edge_01()));
    d = max_abs(d, edge_displacement_of(&patch.edge_02()));
    d = max_abs(d, edge_displacement_of(&patch.edge_12()));

    d
}

pub fn is_flat(patch: &TrianglePatch, res: f64) -> bool {
    displacement(patch).mag() < res
}

pub fn is_edge_flat(edge: &[DVec3; 4], res: f64) -> bool {
    edge_displacement_of(edge).mag() < res
}
