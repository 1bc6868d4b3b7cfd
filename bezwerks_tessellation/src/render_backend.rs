// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub const VERTEX_STRIDE: usize = 6;

/// Receives a finished patch.
///
/// `vertex_data` holds interleaved position and normal triples, `VERTEX_STRIDE` floats per vertex.
/// `indices` holds one vertex index triple per triangle. Both slices are only valid for the
/// duration of the call, the tessellator clears them right after.
pub trait RenderBackend {
    fn draw_triangles(&mut self, vertex_data: &[f32], indices: &[u32]);
}

/// Backend that keeps a copy of the most recent submission.
#[derive(Debug, Default, Clone)]
pub struct CapturedMesh {
    pub vertex_data: Vec<f32>,
    pub indices: Vec<u32>,
    pub draw_count: usize,
}

impl CapturedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> [f32; 3] {
        let offset = index * VERTEX_STRIDE;
        [
            self.vertex_data[offset],
            self.vertex_data[offset + 1],
            self.vertex_data[offset + 2],
        ]
    }

    pub fn normal(&self, index: usize) -> [f32; 3] {
        let offset = index * VERTEX_STRIDE + 3;
        [
            self.vertex_data[offset],
            self.vertex_data[offset + 1],
            self.vertex_data[offset + 2],
        ]
    }
}

impl RenderBackend for CapturedMesh {
    fn draw_triangles(&mut self, vertex_data: &[f32], indices: &[u32]) {
        self.vertex_data.clear();
        self.vertex_data.extend_from_slice(vertex_data);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        self.draw_count += 1;
    }
}
