#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Multibrot animator
//!
//! The Mandelbrot set takes a point `c` on the complex plane and
//! repeatedly squares a number starting at zero, adding `c` each time,
//! measuring how quickly that number runs off to infinity.  Nothing
//! about the process requires the power to be two.  Raise `z` to
//! three and the set grows a second bulb; raise it to 2.5 and it
//! tears open along the negative real axis, where the principal
//! branch of the power is discontinuous.  These generalized sets are
//! called multibrots.
//!
//! This crate renders an animation of them: a fixed window onto the
//! complex plane, rendered once per frame with a slowly increasing
//! exponent, so the boundary of the set morphs from one shape into
//! the next.  Each pixel's escape depth is turned into a color and
//! each frame is written out as its own image.

extern crate crossbeam;
extern crate failure;
#[macro_use]
extern crate failure_derive;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rayon;

#[cfg(test)]
extern crate tempfile;

pub mod animation;
pub mod complex;
pub mod emit;
pub mod errors;
pub mod escape;
pub mod frame;
pub mod grid;
pub mod palette;
pub mod planes;

pub use animation::{Animation, FrameDescriptor, FrameFailure, RunSummary};
pub use complex::PolarPower;
pub use emit::{frame_name, Emitter, ImageFormat, ImageWriter};
pub use errors::{ConfigurationError, DomainError, EmissionError, RenderError};
pub use escape::{evaluate, Depth, DEFAULT_ITERATION_CAP, NON_ESCAPING};
pub use frame::{generate, generate_single};
pub use grid::{ColorGrid, DepthGrid, Rgb};
pub use planes::{Pixel, Viewport};
