// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Computing the depth of every pixel of a single frame.
//!
//! Every pixel is independent of every other, so the buffer is
//! carved into rows and each row is handed to the worker pool as its
//! own task.  A row is a disjoint `&mut` slice of the buffer, so the
//! workers never need to lock anything, and the call does not return
//! until every row has been filled in.

use escape::{evaluate, Depth};
use grid::DepthGrid;
use planes::{Pixel, Viewport};
use rayon::prelude::*;

/// Fill one row of depths.
fn render_row(viewport: &Viewport, row: usize, depths: &mut [Depth], exponent: f64, cap: u32) {
    for (column, depth) in depths.iter_mut().enumerate() {
        let c = viewport.pixel_to_point(&Pixel(column, row));
        *depth = evaluate(c, exponent, cap);
    }
}

/// Compute the depth grid for one frame on the current rayon pool.
/// Called from inside a pool task, the rows join that pool rather
/// than starting a new one.
pub fn generate(viewport: &Viewport, exponent: f64, iteration_cap: u32) -> DepthGrid {
    let width = viewport.width();
    let mut grid = DepthGrid::new(width, viewport.height());
    grid.depths_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, line)| render_row(viewport, row, line, exponent, iteration_cap));
    grid
}

/// The single-threaded version, walking the pixels in order.
pub fn generate_single(viewport: &Viewport, exponent: f64, iteration_cap: u32) -> DepthGrid {
    let mut grid = DepthGrid::new(viewport.width(), viewport.height());
    let depths = grid.depths_mut();
    for (row, column) in viewport.pixels() {
        let pixel = Pixel(column, row);
        depths[viewport.offset(&pixel)] =
            evaluate(viewport.pixel_to_point(&pixel), exponent, iteration_cap);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;
    use rayon::ThreadPoolBuilder;

    fn default_plane(width: usize, height: usize) -> Viewport {
        Viewport::new(width, height, Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0)).unwrap()
    }

    fn on_pool(threads: usize, viewport: &Viewport, exponent: f64, cap: u32) -> DepthGrid {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
        pool.install(|| generate(viewport, exponent, cap))
    }

    #[test]
    fn grid_has_the_shape_of_the_viewport() {
        let viewport = default_plane(7, 3);
        let grid = on_pool(2, &viewport, 2.0, 50);
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.depths().len(), 21);
    }

    #[test]
    fn pool_size_does_not_change_the_result() {
        let viewport = default_plane(4, 4);
        let one = on_pool(1, &viewport, 2.0, 50);
        let four = on_pool(4, &viewport, 2.0, 50);
        assert_eq!(one, four);
        assert_eq!(one, generate_single(&viewport, 2.0, 50));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let viewport = default_plane(16, 9);
        for &exponent in &[1.3, 2.0, 4.75] {
            let first = on_pool(4, &viewport, exponent, 100);
            let second = on_pool(4, &viewport, exponent, 100);
            assert_eq!(first, second);
            assert_eq!(first, generate_single(&viewport, exponent, 100));
        }
    }

    #[test]
    fn each_cell_matches_its_own_evaluation() {
        let viewport = default_plane(4, 4);
        let grid = on_pool(4, &viewport, 2.0, 50);
        // (0, 0) is -2-1i, well outside the set.
        assert_eq!(grid.get(0, 0), evaluate(Complex::new(-2.0, -1.0), 2.0, 50));
        // (2, 2) is -0.5+0i, inside the main cardioid.
        assert_eq!(grid.get(2, 2), None);
    }
}
