// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

use crate::camera::Viewer;
use crate::geometry::*;

const INITIAL_BUFFER_CAPACITY: usize = 10000;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

unsafe impl bytemuck::Zeroable for MeshVertex {}
unsafe impl bytemuck::Pod for MeshVertex {}

/// Orthonormal frame turning patch geometry towards the viewer around a fixed pivot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BillboardBasis {
    pub pivot: DVec3,
    pub u: DVec3,
    pub v: DVec3,
    pub w: DVec3,
}

impl BillboardBasis {
    pub fn from_viewer(pivot: DVec3, viewer: &dyn Viewer) -> Self {
        let w = unit(viewer.view_position() - viewer.view_target());
        let v = unit(perp(viewer.view_up(), w));
        let u = v.cross(w);
        Self { pivot, u, v, w }
    }

    pub fn transform(&self, position: DVec3) -> DVec3 {
        let offset = position - self.pivot;
        self.pivot + self.u * offset.x + self.v * offset.y + self.w * offset.z
    }
}

/// Vertex and index buffers of one patch.
///
/// Vertices are addressed only by the index `vertex()` hands out, the same position
/// emitted twice yields two vertices.
#[derive(Debug)]
pub struct MeshBuilder {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    billboard: Option<BillboardBasis>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
            indices: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
            billboard: None,
        }
    }

    /// Sets the orientation used by every following `vertex()` call.
    pub fn begin(&mut self, billboard: Option<BillboardBasis>) {
        self.billboard = billboard;
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn vertex(&mut self, position: DVec3, normal: DVec3) -> u32 {
        let position = match &self.billboard {
            Some(billboard) => billboard.transform(position),
            None => position,
        };

        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex {
            position: to_f32(position),
            normal: to_f32(normal),
        });
        index
    }

    pub fn triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Interleaved position and normal floats.
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
