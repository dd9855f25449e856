// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two per-frame buffers: depths straight out of the escape-time
//! iterator, and the colors they are mapped to.  Both are row-major,
//! `width * height` long, and owned by whichever frame made them.

use escape::Depth;

/// One depth per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthGrid {
    width: usize,
    height: usize,
    depths: Vec<Depth>,
}

impl DepthGrid {
    /// A grid with every pixel marked as non-escaping.
    pub fn new(width: usize, height: usize) -> Self {
        DepthGrid {
            width,
            height,
            depths: vec![None; width * height],
        }
    }

    /// Wrap an already-computed buffer.  Returns None if the buffer
    /// does not have exactly `width * height` entries.
    pub fn from_vec(width: usize, height: usize, depths: Vec<Depth>) -> Option<Self> {
        if depths.len() != width * height {
            return None;
        }
        Some(DepthGrid {
            width,
            height,
            depths,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The depth at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Depth {
        self.depths[y * self.width + x]
    }

    /// All of the depths, row by row.
    pub fn depths(&self) -> &[Depth] {
        &self.depths
    }

    /// Mutable access to the buffer, for filling it in.  The length
    /// is fixed.
    pub fn depths_mut(&mut self) -> &mut [Depth] {
        &mut self.depths
    }

    /// The deepest pixel that escaped, or 0 if none did.
    pub fn max_depth(&self) -> u32 {
        self.depths.iter().filter_map(|d| *d).max().unwrap_or(0)
    }
}

/// A single RGB triple.
pub type Rgb = [u8; 3];

/// One color per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl ColorGrid {
    /// An all-black grid.
    pub fn new(width: usize, height: usize) -> Self {
        ColorGrid {
            width,
            height,
            pixels: vec![[0, 0, 0]; width * height],
        }
    }

    /// Wrap an already-computed buffer.  Returns None if the buffer
    /// does not have exactly `width * height` entries.
    pub fn from_vec(width: usize, height: usize, pixels: Vec<Rgb>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(ColorGrid {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The color at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// All of the colors, row by row.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Mutable access to the buffer, for filling it in.  The length
    /// is fixed.
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// The colors flattened into the packed `RGBRGB...` layout the
    /// image encoders expect.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.iter().cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_refuse_the_wrong_size() {
        assert!(DepthGrid::from_vec(2, 2, vec![None; 3]).is_none());
        assert!(ColorGrid::from_vec(2, 2, vec![[0, 0, 0]; 5]).is_none());
    }

    #[test]
    fn max_depth_ignores_non_escaping() {
        let grid = DepthGrid::from_vec(2, 2, vec![Some(3), None, Some(7), Some(0)]).unwrap();
        assert_eq!(grid.max_depth(), 7);
        assert_eq!(grid.get(0, 1), Some(7));
        let grid = DepthGrid::from_vec(2, 1, vec![None, None]).unwrap();
        assert_eq!(grid.max_depth(), 0);
    }

    #[test]
    fn colors_flatten_row_major() {
        let grid = ColorGrid::from_vec(2, 1, vec![[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(grid.to_rgb8(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.get(1, 0), [4, 5, 6]);
    }
}
