// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ultraviolet::vec::DVec3;

/// Source of the view orientation used by billboard patches.
pub trait Viewer {
    fn view_position(&self) -> DVec3;
    fn view_target(&self) -> DVec3;
    fn view_up(&self) -> DVec3;
}

#[derive(Debug, Copy, Clone)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,

    viewport: Viewport,
    field_of_view: f64,
}

impl Camera {
    pub fn new(field_of_view: f64, viewport: Viewport) -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 1.0),
            target: DVec3::zero(),
            up: DVec3::new(0.0, 1.0, 0.0),

            viewport,
            field_of_view,
        }
    }

    pub fn look_at(&mut self, position: DVec3, target: DVec3, up: DVec3) {
        self.position = position;
        self.target = target;
        self.up = up;
    }

    pub fn move_by(&mut self, amount: DVec3) {
        self.position += amount;
        self.target += amount;
    }

    /// Approximate on-screen height in pixels of an object with the given extent placed at `center`.
    pub fn projected_pixel_size(&self, center: DVec3, extent: DVec3) -> f64 {
        let height = ((self.viewport.height as i64) - (self.viewport.y as i64)) as f64;
        let distance = (center - self.position).mag();
        let half_height = distance * (to_radians(self.field_of_view) * 0.5).tan();
        if half_height > 0.0 {
            extent.mag() * height / (2.0 * half_height)
        } else {
            height
        }
    }
}

impl Viewer for Camera {
    fn view_position(&self) -> DVec3 {
        self.position
    }

    fn view_target(&self) -> DVec3 {
        self.target
    }

    fn view_up(&self) -> DVec3 {
        self.up
    }
}

fn to_radians(f: f64) -> f64 {
    f * (std::f64::consts::PI / 180.0)
}
