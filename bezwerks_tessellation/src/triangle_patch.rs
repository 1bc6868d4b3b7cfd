// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

pub const PATCH_CONTROL_POINT_COUNT: usize = 10;

// Control point layout, corner 0 at the bottom left, corner 1 at the bottom right, corner 2 on top:
//
//              9
//            5   8
//          2   4   7
//        0   1   3   6
//
pub const CORNER_0: usize = 0;
pub const CORNER_1: usize = 6;
pub const CORNER_2: usize = 9;
pub const CENTER: usize = 4;

// Interior points of each boundary edge, ordered away from the first corner.
pub const EDGE_01: [usize; 2] = [1, 3];
pub const EDGE_02: [usize; 2] = [2, 5];
pub const EDGE_12: [usize; 2] = [7, 8];

// Bernstein exponents (corner 1, corner 2, corner 0) for every control point.
const BERNSTEIN_EXPONENTS: [(i32, i32, i32); PATCH_CONTROL_POINT_COUNT] = [
    (0, 0, 3),
    (1, 0, 2),
    (0, 1, 2),
    (2, 0, 1),
    (1, 1, 1),
    (0, 2, 1),
    (3, 0, 0),
    (2, 1, 0),
    (1, 2, 0),
    (0, 3, 0),
];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PatchError {
    #[error("triangle patch needs 10 control points, got {0}")]
    ControlPointCount(usize),
}

/// Cubic triangular Bezier patch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrianglePatch {
    pub control_points: [DVec3; PATCH_CONTROL_POINT_COUNT],
}

impl TrianglePatch {
    pub fn new(control_points: [DVec3; PATCH_CONTROL_POINT_COUNT]) -> Self {
        Self { control_points }
    }

    pub fn from_slice(points: &[DVec3]) -> Result<Self, PatchError> {
        if points.len() != PATCH_CONTROL_POINT_COUNT {
            return Err(PatchError::ControlPointCount(points.len()));
        }

        let mut control_points = [DVec3::zero(); PATCH_CONTROL_POINT_COUNT];
        control_points.copy_from_slice(points);
        Ok(Self { control_points })
    }

    /// Flat patch spanning the triangle `a`, `b`, `c`, with every control point
    /// at the barycentric thirds of the corners.
    pub fn planar(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let mut control_points = [DVec3::zero(); PATCH_CONTROL_POINT_COUNT];
        for (point, &(i, j, k)) in control_points.iter_mut().zip(BERNSTEIN_EXPONENTS.iter()) {
            *point = (a * k as f64 + b * i as f64 + c * j as f64) / 3.0;
        }
        Self { control_points }
    }

    pub fn corners(&self) -> [DVec3; 3] {
        [
            self.control_points[CORNER_0],
            self.control_points[CORNER_1],
            self.control_points[CORNER_2],
        ]
    }

    pub fn center(&self) -> DVec3 {
        self.control_points[CENTER]
    }

    /// Boundary curve from corner 0 to corner 1 as (start, control, control, end).
    pub fn edge_01(&self) -> [DVec3; 4] {
        let p = &self.control_points;
        [p[CORNER_0], p[EDGE_01[0]], p[EDGE_01[1]], p[CORNER_1]]
    }

    pub fn edge_02(&self) -> [DVec3; 4] {
        let p = &self.control_points;
        [p[CORNER_0], p[EDGE_02[0]], p[EDGE_02[1]], p[CORNER_2]]
    }

    pub fn edge_12(&self) -> [DVec3; 4] {
        let p = &self.control_points;
        [p[CORNER_1], p[EDGE_12[0]], p[EDGE_12[1]], p[CORNER_2]]
    }

    /// Evaluates the surface at barycentric weights `a`, `b`, `c` of corners 0, 1 and 2.
    pub fn evaluate(&self, a: f64, b: f64, c: f64) -> DVec3 {
        const FACTORIAL: [f64; 4] = [1.0, 1.0, 2.0, 6.0];

        let mut point = DVec3::zero();
        for (control_point, &(i, j, k)) in self.control_points.iter().zip(BERNSTEIN_EXPONENTS.iter()) {
            let coefficient = 6.0 / (FACTORIAL[i as usize] * FACTORIAL[j as usize] * FACTORIAL[k as usize]);
            point += *control_point * (coefficient * b.powi(i) * c.powi(j) * a.powi(k));
        }
        point
    }

    /// Largest squared distance from corner 0 to any other control point.
    pub fn max_distance_sq_from_first_corner(&self) -> f64 {
        let origin = self.control_points[CORNER_0];
        self.control_points[1..]
            .iter()
            .map(|point| (*point - origin).mag_sq())
            .fold(0.0, f64::max)
    }

    /// Axis-aligned bounds of the control net as (min, max).
    pub fn bounds(&self) -> (DVec3, DVec3) {
        let mut min = self.control_points[0];
        let mut max = self.control_points[0];
        for point in self.control_points[1..].iter() {
            min = min.min_by_component(*point);
            max = max.max_by_component(*point);
        }
        (min, max)
    }
}
