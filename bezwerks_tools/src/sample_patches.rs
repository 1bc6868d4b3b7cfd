// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bezwerks_tessellation::*;
use ultraviolet::vec::DVec3;

/// Eight patches approximating the unit sphere, one per octahedron face, wound outwards.
pub fn unit_sphere_patches() -> Vec<TrianglePatch> {
    let mut patches = Vec::with_capacity(8);
    for &sx in [1.0, -1.0].iter() {
        for &sy in [1.0, -1.0].iter() {
            for &sz in [1.0, -1.0].iter() {
                let a = DVec3::new(sx, 0.0, 0.0);
                let b = DVec3::new(0.0, sy, 0.0);
                let c = DVec3::new(0.0, 0.0, sz);

                let mut patch = if sx * sy * sz > 0.0 {
                    TrianglePatch::planar(a, b, c)
                } else {
                    TrianglePatch::planar(a, c, b)
                };
                for point in patch.control_points.iter_mut() {
                    *point = point.normalized();
                }
                patches.push(patch);
            }
        }
    }
    patches
}
