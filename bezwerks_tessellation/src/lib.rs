// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

mod camera;
mod geometry;
mod mesh_builder;
mod normal_estimator;
mod patch_subdivision;
mod render_backend;
mod tessellator;
mod triangle_patch;

pub mod flatness;

pub use camera::*;
pub use mesh_builder::*;
pub use normal_estimator::*;
pub use patch_subdivision::*;
pub use render_backend::*;
pub use tessellator::*;
pub use triangle_patch::*;

pub use ultraviolet as utv;

#[cfg(test)]
mod test_patch_geometry;
