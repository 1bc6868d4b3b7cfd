// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

use crate::camera::*;
use crate::flatness;
use crate::geometry::*;
use crate::mesh_builder::*;
use crate::normal_estimator::*;
use crate::patch_subdivision::*;
use crate::render_backend::*;
use crate::triangle_patch::*;

pub const DEFAULT_MAX_DEPTH: u32 = 8;

// Object space tolerance per projected pixel.
pub const ADAPTIVE_RENDERING_CONSTANT: f64 = 0.5;

pub const DEFAULT_FUZZ: f64 = 1000.0 * std::f64::EPSILON;

// Fraction of the resolution a freshly flattened edge midpoint is pushed outwards by.
const CRACK_NUDGE: f64 = 0.1;

#[derive(Debug, Copy, Clone)]
pub struct TessellationOptions {
    pub max_depth: u32,
    pub adaptive_constant: f64,
    pub fuzz: f64,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            adaptive_constant: ADAPTIVE_RENDERING_CONSTANT,
            fuzz: DEFAULT_FUZZ,
        }
    }
}

/// Boundary edges already known to be flat, named after the corners they join.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct EdgeFlatFlags {
    pub edge_01: bool,
    pub edge_02: bool,
    pub edge_12: bool,
}

impl EdgeFlatFlags {
    pub fn new(edge_01: bool, edge_02: bool, edge_12: bool) -> Self {
        Self {
            edge_01,
            edge_02,
            edge_12,
        }
    }
}

/// Turns the patch to face `viewer` around `pivot`.
#[derive(Copy, Clone)]
pub struct Billboard<'a> {
    pub pivot: DVec3,
    pub viewer: &'a dyn Viewer,
}

// An emitted vertex and the position its index stands for. The position is the
// unbillboarded one and may be nudged off the surface.
#[derive(Debug, Copy, Clone)]
struct PatchVertex {
    index: u32,
    position: DVec3,
}

pub struct Tessellator {
    options: TessellationOptions,
    mesh: MeshBuilder,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(TessellationOptions::default())
    }
}

impl Tessellator {
    pub fn new(options: TessellationOptions) -> Self {
        Self {
            options,
            mesh: MeshBuilder::new(),
        }
    }

    pub fn mesh(&self) -> &MeshBuilder {
        &self.mesh
    }

    pub fn clear(&mut self) {
        self.mesh.clear();
    }

    /// Object space length that maps to the flatness threshold on screen.
    pub fn resolution(&self, projected_pixel_size: f64, object_size: DVec3) -> f64 {
        self.options.adaptive_constant * object_size.mag() / projected_pixel_size.abs()
    }

    /// Tessellates `patch`, hands the buffers to `backend` and clears them.
    pub fn tessellate<B>(
        &mut self,
        patch: &TrianglePatch,
        projected_pixel_size: f64,
        object_size: DVec3,
        billboard: Option<Billboard>,
        backend: &mut B,
    ) where
        B: RenderBackend + ?Sized,
    {
        puffin::profile_function!();

        self.mesh
            .begin(billboard.map(|billboard| BillboardBasis::from_viewer(billboard.pivot, billboard.viewer)));

        let res = self.resolution(projected_pixel_size, object_size);
        self.render(patch, res, self.options.max_depth);

        {
            puffin::profile_scope!("draw_triangles");
            backend.draw_triangles(self.mesh.vertex_data(), self.mesh.indices());
        }

        self.mesh.clear();
        self.mesh.begin(None);
    }

    /// Appends the tessellation of `patch` to the current buffers.
    pub fn render(&mut self, patch: &TrianglePatch, res: f64, max_depth: u32) {
        let normals = NormalEstimator::for_patch(patch, self.options.fuzz);
        let mut renderer = PatchRenderer {
            mesh: &mut self.mesh,
            normals,
            res,
        };

        let first_vertex = renderer.mesh.vertex_count();
        let first_triangle = renderer.mesh.triangle_count();

        let positions = patch.corners();
        let stencils = NormalStencil::patch_corners(patch);
        let mut corners = [PatchVertex {
            index: 0,
            position: DVec3::zero(),
        }; 3];
        for ((corner, position), stencil) in corners.iter_mut().zip(positions.iter()).zip(stencils.iter()) {
            *corner = renderer.emit(*position, stencil);
        }

        renderer.render(patch, max_depth, corners, EdgeFlatFlags::default());

        log::debug!(
            "tessellated patch: {} vertices, {} triangles, res = {}, epsilon = {}",
            self.mesh.vertex_count() - first_vertex,
            self.mesh.triangle_count() - first_triangle,
            res,
            normals.epsilon()
        );
    }
}

struct PatchRenderer<'a> {
    mesh: &'a mut MeshBuilder,
    normals: NormalEstimator,
    res: f64,
}

impl<'a> PatchRenderer<'a> {
    fn emit(&mut self, position: DVec3, stencil: &NormalStencil) -> PatchVertex {
        let normal = self.normals.normal(stencil);
        PatchVertex {
            index: self.mesh.vertex(position, normal),
            position,
        }
    }

    // Picks the position of the vertex splitting an outer edge. Flat edges use the chord
    // midpoint of the parent's vertices so every patch sharing the edge agrees on it.
    // The first time an edge turns flat the midpoint is pushed slightly away from the
    // opposite corner, covering the gap to a neighbour that keeps subdividing.
    fn edge_split(
        &self,
        known_flat: bool,
        edge: &[DVec3; 4],
        ends: (DVec3, DVec3),
        surface_midpoint: DVec3,
        opposite_corner: DVec3,
    ) -> (DVec3, bool) {
        let chord_midpoint = midpoint(ends.0, ends.1);
        if known_flat {
            (chord_midpoint, true)
        } else if flatness::is_edge_flat(edge, self.res) {
            let nudge = unit(surface_midpoint - opposite_corner) * (CRACK_NUDGE * self.res);
            (chord_midpoint + nudge, true)
        } else {
            (surface_midpoint, false)
        }
    }

    fn render(&mut self, patch: &TrianglePatch, depth: u32, corners: [PatchVertex; 3], flat: EdgeFlatFlags) {
        let [v0, v1, v2] = corners;

        if depth == 0 || flatness::is_flat(patch, self.res) {
            self.mesh.triangle(v0.index, v1.index, v2.index);
            return;
        }

        let sub = subdivide(patch);
        let [surface_01, surface_02, surface_12] = sub.edge_midpoints();
        let [z0, z1, z2] = patch.corners();

        let (position_01, flat_01) = self.edge_split(
            flat.edge_01,
            &patch.edge_01(),
            (v0.position, v1.position),
            surface_01,
            z2,
        );
        let (position_02, flat_02) = self.edge_split(
            flat.edge_02,
            &patch.edge_02(),
            (v0.position, v2.position),
            surface_02,
            z1,
        );
        let (position_12, flat_12) = self.edge_split(
            flat.edge_12,
            &patch.edge_12(),
            (v1.position, v2.position),
            surface_12,
            z0,
        );

        // The center patch corners are exactly the three new vertices, its corner stencils
        // run along the inner edges.
        let [stencil_12, stencil_02, stencil_01] = NormalStencil::patch_corners(&sub.center);
        let m01 = self.emit(position_01, &stencil_01);
        let m02 = self.emit(position_02, &stencil_02);
        let m12 = self.emit(position_12, &stencil_12);

        let depth = depth - 1;
        self.render(
            &sub.left,
            depth,
            [v0, m01, m02],
            EdgeFlatFlags::new(flat_01, flat_02, false),
        );
        self.render(
            &sub.right,
            depth,
            [m01, v1, m12],
            EdgeFlatFlags::new(flat_01, false, flat_12),
        );
        self.render(
            &sub.up,
            depth,
            [m02, m12, v2],
            EdgeFlatFlags::new(false, flat_02, flat_12),
        );
        self.render(&sub.center, depth, [m12, m02, m01], EdgeFlatFlags::default());
    }
}
