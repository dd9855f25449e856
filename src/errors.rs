// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for every stage of a render: arithmetic, configuration,
//! emission, and the orchestration that ties them together.

use std::io;
use std::path::Path;

/// Raised by the polar power when the result is undefined: zero
/// raised to a non-positive (or NaN) exponent.
#[derive(Debug, Fail, Clone, Copy, PartialEq)]
#[fail(display = "0 cannot be raised to the exponent {}", exponent)]
pub struct DomainError {
    /// The offending exponent.
    pub exponent: f64,
}

/// Invalid render parameters.  Always detected before any pixel is
/// computed.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum ConfigurationError {
    /// x_min >= x_max, y_min >= y_max, or a bound that isn't finite.
    #[fail(display = "Invalid viewport: {}", _0)]
    Viewport(String),

    /// A zero width or height.
    #[fail(display = "Image dimensions must be non-zero, got {}x{}", _0, _1)]
    Dimensions(usize, usize),

    /// Some parameter that must be positive was zero.
    #[fail(display = "{} must be greater than zero", _0)]
    Zero(&'static str),

    /// The exponent schedule reaches a value the iteration can't use.
    #[fail(display = "Frame {} would use exponent {}, which must be finite and positive", _0, _1)]
    Exponent(usize, f64),
}

/// A frame could not be written out.
#[derive(Debug, Fail)]
pub enum EmissionError {
    /// Creating, encoding or writing the output file failed.  The
    /// encoders report their own failures as I/O errors.
    #[fail(display = "Could not write {}: {}", _0, _1)]
    Io(String, #[cause] io::Error),

    /// The frame is wider or taller than an image file can describe.
    #[fail(display = "Frame {} is {}x{}, too large to encode", _0, _1, _2)]
    TooLarge(String, usize, usize),
}

impl EmissionError {
    /// Wraps an I/O failure for the file at `path`.
    pub fn io(path: &Path, err: io::Error) -> Self {
        EmissionError::Io(path.display().to_string(), err)
    }
}

/// Failures of the animation run as a whole, as opposed to failures
/// of a single frame.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The rayon pool could not be started.
    #[fail(display = "Could not build the worker pool: {}", _0)]
    Pool(String),

    /// Every emission worker has gone away; frames have nowhere to go.
    #[fail(display = "Image writers stopped before frame {} could be emitted", _0)]
    EmitterDisconnected(usize),

    /// A worker thread panicked.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}
