// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

mod patch_file;
mod sample_patches;

use bezwerks_tessellation::*;
use rayon::prelude::*;
use ultraviolet::vec::DVec3;

#[derive(Debug, structopt::StructOpt)]
#[structopt(name = "tessellate_patch", about = "Adaptive Bezier triangle tessellation tool")]
struct CommandLineOptions {
    #[structopt(
        short = "i",
        long = "input",
        help = "Patch file, ten \"x y z\" lines per patch. Uses a sample sphere if omitted",
        parse(from_os_str)
    )]
    input_file: Option<std::path::PathBuf>,

    #[structopt(
        short = "s",
        long = "screen_size",
        default_value = "400",
        help = "Projected size of the whole model in pixels"
    )]
    screen_size: f64,

    #[structopt(short = "d", long = "max_depth", default_value = "8")]
    max_depth: u32,

    #[structopt(
        short = "c",
        long = "camera",
        help = "Camera position as x,y,z, derives the projected size from a 45 degree view",
        parse(try_from_str = parse_triple)
    )]
    camera: Option<DVec3>,

    #[structopt(long = "billboard", help = "Turns every patch towards the camera")]
    billboard: bool,
}

fn parse_triple(text: &str) -> Result<DVec3, String> {
    let coordinates = text
        .split(',')
        .map(|s| s.trim().parse::<f64>().map_err(|e| format!("{:?}: {}", s, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match coordinates.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {:?}", text)),
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct MeshStatistics {
    patch_count: usize,
    vertex_count: usize,
    triangle_count: usize,
}

impl MeshStatistics {
    fn merge(self, other: Self) -> Self {
        Self {
            patch_count: self.patch_count + other.patch_count,
            vertex_count: self.vertex_count + other.vertex_count,
            triangle_count: self.triangle_count + other.triangle_count,
        }
    }
}

impl RenderBackend for MeshStatistics {
    fn draw_triangles(&mut self, vertex_data: &[f32], indices: &[u32]) {
        self.patch_count += 1;
        self.vertex_count += vertex_data.len() / VERTEX_STRIDE;
        self.triangle_count += indices.len() / 3;
    }
}

fn model_bounds(patches: &[TrianglePatch]) -> (DVec3, DVec3) {
    let mut min = DVec3::broadcast(std::f64::MAX);
    let mut max = DVec3::broadcast(std::f64::MIN);
    for patch in patches {
        let (patch_min, patch_max) = patch.bounds();
        min = min.min_by_component(patch_min);
        max = max.max_by_component(patch_max);
    }
    (min, max)
}

#[logging_timer::time("info")]
fn tessellate_patches(patches: &[TrianglePatch], command_line: &CommandLineOptions) -> MeshStatistics {
    let (min, max) = model_bounds(patches);
    let object_size = max - min;
    let model_center = (min + max) * 0.5;

    let camera = command_line.camera.map(|position| {
        let mut camera = Camera::new(
            45.0,
            Viewport {
                x: 0,
                y: 0,
                width: 1024,
                height: 1024,
            },
        );
        camera.look_at(position, model_center, DVec3::new(0.0, 1.0, 0.0));
        camera
    });

    let projected_pixel_size = match &camera {
        Some(camera) => camera.projected_pixel_size(model_center, object_size),
        None => command_line.screen_size,
    };
    log::info!(
        "tessellating {} patches, object size {:?}, projected size {} pixels",
        patches.len(),
        object_size,
        projected_pixel_size
    );

    let billboard = match (&camera, command_line.billboard) {
        (Some(camera), true) => Some(camera),
        (None, true) => {
            log::warn!("billboard mode needs a camera position, ignoring it");
            None
        }
        _ => None,
    };

    let options = TessellationOptions {
        max_depth: command_line.max_depth,
        ..Default::default()
    };

    patches
        .par_iter()
        .map_init(
            || Tessellator::new(options),
            |tessellator, patch| {
                let mut statistics = MeshStatistics::default();
                tessellator.tessellate(
                    patch,
                    projected_pixel_size,
                    object_size,
                    billboard.map(|camera| Billboard {
                        pivot: model_center,
                        viewer: camera,
                    }),
                    &mut statistics,
                );
                statistics
            },
        )
        .reduce(MeshStatistics::default, MeshStatistics::merge)
}

fn main() {
    if std::env::var("CARGO_MANIFEST_DIR").is_ok() {
        std::env::set_var("RUST_LOG", "info");
    }

    pretty_env_logger::init();

    let command_line = {
        use structopt::StructOpt;
        CommandLineOptions::from_args()
    };
    log::info!("{:?}", &command_line);

    let patches = match &command_line.input_file {
        Some(input_file) => patch_file::load_patches(input_file).expect("failed to load patch file"),
        None => sample_patches::unit_sphere_patches(),
    };
    if patches.is_empty() {
        log::warn!("no patches to tessellate");
        return;
    }

    let statistics = tessellate_patches(&patches, &command_line);
    log::info!(
        "{} patches: {} vertices, {} triangles",
        statistics.patch_count,
        statistics.vertex_count,
        statistics.triangle_count
    );
}
