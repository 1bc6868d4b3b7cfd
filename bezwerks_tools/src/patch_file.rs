// Copyright (c) 2021 Kyrylo Bazhenov
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Text patch files: one "x y z" control point per line, ten lines per patch,
// blank lines and lines starting with '#' are skipped.

use bezwerks_tessellation::*;
use ultraviolet::vec::DVec3;

#[derive(Debug, thiserror::Error)]
pub enum PatchFileError {
    #[error("failed to read patch file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 3 coordinates, got {count}")]
    CoordinateCount { line: usize, count: usize },

    #[error("line {line}: invalid coordinate {text:?}")]
    InvalidCoordinate { line: usize, text: String },

    #[error("{0} control points left over after the last complete patch")]
    IncompletePatch(usize),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

pub fn parse_patches(source: &str) -> Result<Vec<TrianglePatch>, PatchFileError> {
    let mut patches = Vec::new();
    let mut points = Vec::with_capacity(PATCH_CONTROL_POINT_COUNT);

    for (line_index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut coordinates = [0.0f64; 3];
        let mut count = 0;
        for text in line.split_ascii_whitespace() {
            if count < 3 {
                coordinates[count] = text.parse().map_err(|_| PatchFileError::InvalidCoordinate {
                    line: line_index + 1,
                    text: text.to_owned(),
                })?;
            }
            count += 1;
        }
        if count != 3 {
            return Err(PatchFileError::CoordinateCount {
                line: line_index + 1,
                count,
            });
        }

        points.push(DVec3::new(coordinates[0], coordinates[1], coordinates[2]));
        if points.len() == PATCH_CONTROL_POINT_COUNT {
            patches.push(TrianglePatch::from_slice(&points)?);
            points.clear();
        }
    }

    if !points.is_empty() {
        return Err(PatchFileError::IncompletePatch(points.len()));
    }

    Ok(patches)
}

#[logging_timer::time("info")]
pub fn load_patches(path: &std::path::Path) -> Result<Vec<TrianglePatch>, PatchFileError> {
    let source = std::fs::read_to_string(path)?;
    parse_patches(&source)
}
