// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iterator.
//!
//! Starting from `z = 0`, repeatedly apply `z ← z^exponent + c` and
//! count how many steps it takes before `z` leaves the disk of radius
//! 2 around the origin.  That count is the point's "depth," and it
//! drives the color of the pixel.  Points that are still inside the
//! disk when we give up are considered part of the set.

use complex::PolarPower;
use num::Complex;

/// The number of completed iterations before a point escaped, or
/// `None` if it never did within the iteration cap.
pub type Depth = Option<u32>;

/// The depth of a point that never escaped.
pub const NON_ESCAPING: Depth = None;

/// The default number of iterations per point.
pub const DEFAULT_ITERATION_CAP: u32 = 900;

// Radius 2, squared, so the bound test needs no square root.
const BOUND_SQR: f64 = 4.0;

/// True if `z` has left the bounded region.  Overflow to infinity or
/// NaN counts as having left: the comparison alone would call a NaN
/// "inside" and spin to the cap.
#[inline]
pub fn escaped(z: &Complex<f64>) -> bool {
    !z.re.is_finite() || !z.im.is_finite() || z.norm_sqr() > BOUND_SQR
}

/// Determine the depth of `c` under `z ← z^exponent + c`.
///
/// The bound is tested before each update, so the first test sees
/// the origin and at least one iteration always runs.  If the cap is
/// reached the point is `NON_ESCAPING`, even if the last step would
/// have taken it out.
///
/// An undefined power (zero to a non-positive exponent) leaves the
/// orbit undefined, and is treated as escaping at that step.
pub fn evaluate(c: Complex<f64>, exponent: f64, iteration_cap: u32) -> Depth {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut count = 0;
    while count < iteration_cap && !escaped(&z) {
        z = match z.power(exponent) {
            Ok(p) => p + c,
            Err(_) => return Some(count),
        };
        count += 1;
    }
    if count < iteration_cap {
        Some(count)
    } else {
        NON_ESCAPING
    }
}
