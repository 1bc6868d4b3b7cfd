// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

use crate::flatness::*;
use crate::*;

fn assert_near(actual: DVec3, expected: DVec3, tolerance: f64) {
    assert!(
        (actual - expected).mag() <= tolerance,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

fn curved_patch() -> TrianglePatch {
    TrianglePatch::new([
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, -0.2, 0.3),
        DVec3::new(0.1, 1.1, 0.4),
        DVec3::new(2.0, 0.1, -0.2),
        DVec3::new(1.2, 1.0, 0.9),
        DVec3::new(0.3, 2.1, 0.1),
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(2.4, 1.0, 0.5),
        DVec3::new(1.6, 2.0, 0.2),
        DVec3::new(1.0, 3.0, -0.3),
    ])
}

fn planar_patch() -> TrianglePatch {
    TrianglePatch::planar(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(0.0, 3.0, 0.0),
    )
}

#[test]
fn test_from_slice_checks_point_count() {
    let points = vec![DVec3::zero(); 9];
    assert_eq!(
        TrianglePatch::from_slice(&points),
        Err(PatchError::ControlPointCount(9))
    );
    assert_eq!(
        PatchError::ControlPointCount(9).to_string(),
        "triangle patch needs 10 control points, got 9"
    );

    let patch = curved_patch();
    assert_eq!(TrianglePatch::from_slice(&patch.control_points), Ok(patch));
}

#[test]
fn test_planar_patch_layout() {
    let patch = planar_patch();
    assert_eq!(
        patch.corners(),
        [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(0.0, 3.0, 0.0)
        ]
    );
    assert_near(patch.center(), DVec3::new(1.0, 1.0, 0.0), 1e-12);
    assert_near(patch.control_points[1], DVec3::new(1.0, 0.0, 0.0), 1e-12);
    assert_near(patch.control_points[5], DVec3::new(0.0, 2.0, 0.0), 1e-12);
    assert_near(patch.control_points[8], DVec3::new(1.0, 2.0, 0.0), 1e-12);

    assert_near(patch.evaluate(1.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 0.0), 1e-12);
    assert_near(patch.evaluate(0.0, 0.5, 0.5), DVec3::new(1.5, 1.5, 0.0), 1e-12);
    assert_near(patch.evaluate(0.2, 0.3, 0.5), DVec3::new(0.9, 1.5, 0.0), 1e-12);
}

#[test]
fn test_bounds_and_extent() {
    let patch = curved_patch();
    let (min, max) = patch.bounds();
    assert_eq!(min, DVec3::new(0.0, -0.2, -0.3));
    assert_eq!(max, DVec3::new(3.0, 3.0, 0.9));
    assert!((patch.max_distance_sq_from_first_corner() - 10.09).abs() < 1e-12);
}

#[test]
fn test_planar_patch_has_no_displacement() {
    let patch = planar_patch();
    assert!(displacement(&patch).mag() < 1e-12);
    assert!(is_flat(&patch, 1e-9));
    assert!(!is_flat(&patch, 0.0));
}

#[test]
fn test_lifted_center_displacement() {
    let mut patch = planar_patch();
    patch.control_points[CENTER] += DVec3::new(0.25, -0.25, 0.75);

    // only the out-of-plane part counts
    assert_near(displacement(&patch), DVec3::new(0.0, 0.0, 0.75), 1e-12);
    assert!(is_flat(&patch, 0.8));
    assert!(!is_flat(&patch, 0.7));
}

#[test]
fn test_curved_edge_displacement() {
    let mut patch = planar_patch();
    patch.control_points[EDGE_01[0]] += DVec3::new(0.0, -0.5, 0.0);
    patch.control_points[EDGE_01[1]] += DVec3::new(0.0, 0.0, 0.25);

    assert_near(
        edge_displacement_of(&patch.edge_01()),
        DVec3::new(0.0, 0.5, 0.25),
        1e-12,
    );
    assert!(edge_displacement_of(&patch.edge_02()).mag() < 1e-12);
    assert_near(displacement(&patch), DVec3::new(0.0, 0.5, 0.25), 1e-12);

    assert!(!is_edge_flat(&patch.edge_01(), 0.5));
    assert!(is_edge_flat(&patch.edge_12(), 1e-9));
}

#[test]
fn test_degenerate_corner_plane_uses_raw_offset() {
    let mut patch = TrianglePatch::planar(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
    );
    patch.control_points[CENTER] = DVec3::new(1.0, 1.0, 0.0);

    assert_near(displacement(&patch), DVec3::new(1.0, 1.0, 0.0), 1e-12);
}

fn sub_patch_domains() -> [(&'static str, [DVec3; 3]); 4] {
    // barycentric weights of each sub-patch corner in the parent domain
    let c0 = DVec3::new(1.0, 0.0, 0.0);
    let c1 = DVec3::new(0.0, 1.0, 0.0);
    let c2 = DVec3::new(0.0, 0.0, 1.0);
    let m01 = (c0 + c1) * 0.5;
    let m02 = (c0 + c2) * 0.5;
    let m12 = (c1 + c2) * 0.5;
    [
        ("left", [c0, m01, m02]),
        ("right", [m01, c1, m12]),
        ("up", [m02, m12, c2]),
        ("center", [m12, m02, m01]),
    ]
}

#[test]
fn test_subdivision_reparametrizes_surface() {
    let patch = curved_patch();
    let sub = subdivide(&patch);
    let sub_patches = [sub.left, sub.right, sub.up, sub.center];

    let samples = [
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (0.5, 0.5, 0.0),
        (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
        (0.2, 0.3, 0.5),
        (0.7, 0.1, 0.2),
    ];

    for (sub_patch, (name, domain)) in sub_patches.iter().zip(sub_patch_domains().iter()) {
        for &(a, b, c) in samples.iter() {
            let parent = domain[0] * a + domain[1] * b + domain[2] * c;
            let expected = patch.evaluate(parent.x, parent.y, parent.z);
            let actual = sub_patch.evaluate(a, b, c);
            assert!(
                (actual - expected).mag() < 1e-12,
                "{} sub-patch deviates at ({}, {}, {})",
                name,
                a,
                b,
                c
            );
        }
    }
}

#[test]
fn test_subdivision_shares_corners() {
    let patch = curved_patch();
    let sub = subdivide(&patch);

    assert_eq!(sub.left.control_points[CORNER_0], patch.control_points[CORNER_0]);
    assert_eq!(sub.right.control_points[CORNER_1], patch.control_points[CORNER_1]);
    assert_eq!(sub.up.control_points[CORNER_2], patch.control_points[CORNER_2]);

    let [m01, m02, m12] = sub.edge_midpoints();
    assert_eq!(sub.right.control_points[CORNER_0], m01);
    assert_eq!(sub.center.control_points[CORNER_2], m01);
    assert_eq!(sub.up.control_points[CORNER_0], m02);
    assert_eq!(sub.center.control_points[CORNER_1], m02);
    assert_eq!(sub.up.control_points[CORNER_1], m12);
    assert_eq!(sub.center.control_points[CORNER_0], m12);

    assert_near(m01, patch.evaluate(0.5, 0.5, 0.0), 1e-12);
    assert_near(m02, patch.evaluate(0.5, 0.0, 0.5), 1e-12);
    assert_near(m12, patch.evaluate(0.0, 0.5, 0.5), 1e-12);

    // neighbouring sub-patches see the same boundary curve
    assert_eq!(sub.left.edge_12(), {
        let e = sub.center.edge_12();
        [e[3], e[2], e[1], e[0]]
    });
}

#[test]
fn test_subdivided_planar_patch_stays_flat() {
    let sub = subdivide(&planar_patch());
    for sub_patch in [sub.left, sub.right, sub.up, sub.center].iter() {
        assert!(displacement(sub_patch).mag() < 1e-12);
    }
}

#[test]
fn test_first_order_normal() {
    let estimator = NormalEstimator::for_patch(&planar_patch(), DEFAULT_FUZZ);
    assert!((estimator.epsilon() / (9.0 * DEFAULT_FUZZ * DEFAULT_FUZZ) - 1.0).abs() < 1e-12);

    for stencil in NormalStencil::patch_corners(&planar_patch()).iter() {
        assert_near(estimator.normal(stencil), DVec3::new(0.0, 0.0, 1.0), 1e-12);
    }

    let patch = curved_patch();
    let estimator = NormalEstimator::for_patch(&patch, DEFAULT_FUZZ);
    for stencil in NormalStencil::patch_corners(&patch).iter() {
        assert!((estimator.normal(stencil).mag() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_second_order_normal_fallback() {
    let stencil = NormalStencil::new(
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(2.0, 1.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::zero(),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(4.0, 0.0, 1.0),
        DVec3::new(6.0, 0.0, 0.0),
    );
    let normal = NormalEstimator::new(0.0).normal(&stencil);
    assert_near(normal, DVec3::new(0.0, 1.0, 2.0) * (1.0 / 5.0f64.sqrt()), 1e-12);
}

#[test]
fn test_third_order_normal_fallback() {
    let stencil = NormalStencil::new(
        DVec3::new(3.0, 1.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::zero(),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::new(-2.0, 0.0, 0.0),
        DVec3::new(-3.0, 0.0, 1.0),
    );
    let normal = NormalEstimator::new(0.0).normal(&stencil);
    assert_near(normal, DVec3::new(-1.0, 3.0, -3.0) * (1.0 / 19.0f64.sqrt()), 1e-12);
}

#[test]
fn test_fully_degenerate_normal_is_zero() {
    let point = DVec3::new(1.0, 2.0, 3.0);
    let stencil = NormalStencil::new(point, point, point, point, point, point, point);
    assert_eq!(NormalEstimator::new(0.0).normal(&stencil), DVec3::zero());
}
