// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning depths into colors.
//!
//! The brightness of an escaping pixel follows an inverted parabola
//! over its depth, peaking at the deepest escaping pixel in the frame.
//! That shade drives blue up and red down, with green held at half
//! intensity.  Pixels that never escaped are black.

use grid::{ColorGrid, DepthGrid, Rgb};
use num::clamp;

const BLACK: Rgb = [0, 0, 0];
const GREEN: u8 = 128;

/// The brightness of a pixel at `depth`, given the deepest escaping
/// pixel in the frame.  A frame where everything escaped immediately
/// (`max_depth == 0`) is uniformly bright.
pub fn shade(depth: u32, max_depth: u32) -> u8 {
    if max_depth == 0 {
        return 255;
    }
    let max = f64::from(max_depth);
    let distance = f64::from(depth) - max;
    let brightness = -255.0 / (max * max) * distance * distance + 255.0;
    clamp(brightness, 0.0, 255.0) as u8
}

/// The color of an escaping pixel.
pub fn escape_color(depth: u32, max_depth: u32) -> Rgb {
    let shade = shade(depth, max_depth);
    [255 - shade, GREEN, shade]
}

/// Color every pixel of a frame.
pub fn map(depths: &DepthGrid) -> ColorGrid {
    let max_depth = depths.max_depth();
    let mut colors = ColorGrid::new(depths.width(), depths.height());
    for (color, depth) in colors.pixels_mut().iter_mut().zip(depths.depths()) {
        *color = match *depth {
            Some(d) => escape_color(d, max_depth),
            None => BLACK,
        };
    }
    colors
}
