// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

// Zero stays zero instead of turning into NaN, callers rely on that to detect degenerate planes.
#[inline]
pub(crate) fn unit(v: DVec3) -> DVec3 {
    let length = v.mag();
    if length != 0.0 {
        v * (1.0 / length)
    } else {
        DVec3::zero()
    }
}

// Component of `v` perpendicular to the unit vector `u`.
pub(crate) fn perp(v: DVec3, u: DVec3) -> DVec3 {
    v - u * v.dot(u)
}

pub(crate) fn max_abs(a: DVec3, b: DVec3) -> DVec3 {
    DVec3::new(
        a.x.abs().max(b.x.abs()),
        a.y.abs().max(b.y.abs()),
        a.z.abs().max(b.z.abs()),
    )
}

pub(crate) fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.5
}

pub(crate) fn to_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}
