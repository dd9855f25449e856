// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generalized powers of complex numbers.
//!
//! The classic Mandelbrot squares `z` by multiplying it by itself.
//! Once the exponent is allowed to be any real number that no longer
//! works, so instead we go through polar form: raise the modulus to
//! the exponent, multiply the argument by it, and convert back.  For
//! non-integer exponents this is multi-valued; we always take the
//! principal branch, with the argument in (-π, π].

use errors::DomainError;
use num::Complex;

/// Polar-form arithmetic on complex numbers.
pub trait PolarPower: Sized {
    /// The distance from the origin.
    fn modulus(&self) -> f64;

    /// The angle from the positive real axis, in (-π, π].  Zero at
    /// the origin.
    fn argument(&self) -> f64;

    /// Raise to a real exponent via polar form.  Fails only for the
    /// origin raised to a non-positive exponent, where the result is
    /// undefined.
    fn power(&self, exponent: f64) -> Result<Self, DomainError>;
}

impl PolarPower for Complex<f64> {
    #[inline]
    fn modulus(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    #[inline]
    fn argument(&self) -> f64 {
        self.im.atan2(self.re)
    }

    fn power(&self, exponent: f64) -> Result<Self, DomainError> {
        if exponent.is_nan() {
            return Err(DomainError { exponent });
        }
        if self.re == 0.0 && self.im == 0.0 {
            return if exponent > 0.0 {
                Ok(Complex::new(0.0, 0.0))
            } else {
                Err(DomainError { exponent })
            };
        }
        let r = self.modulus().powf(exponent);
        let theta = self.argument() * exponent;
        Ok(Complex::new(r * theta.cos(), r * theta.sin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn modulus_and_argument() {
        let z = Complex::new(3.0, 4.0);
        assert_eq!(z.modulus(), 5.0);
        assert!((Complex::new(0.0, 1.0).argument() - PI / 2.0).abs() < EPSILON);
        assert_eq!(Complex::new(-1.0, 0.0).argument(), PI);
        assert_eq!(Complex::new(0.0, 0.0).argument(), 0.0);
    }

    #[test]
    fn power_two_matches_multiplication() {
        let z = Complex::new(0.3, -1.7);
        assert!(close(z.power(2.0).unwrap(), z * z));
        let z = Complex::new(-1.25, 0.5);
        assert!(close(z.power(3.0).unwrap(), z * z * z));
    }

    #[test]
    fn power_one_is_identity() {
        let z = Complex::new(-0.75, 0.1);
        assert!(close(z.power(1.0).unwrap(), z));
    }

    #[test]
    fn fractional_power_takes_principal_branch() {
        let root = Complex::new(-1.0, 0.0).power(0.5).unwrap();
        assert!(close(root, Complex::new(0.0, 1.0)));
    }

    #[test]
    fn origin_to_positive_power_is_origin() {
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(origin.power(2.5), Ok(Complex::new(0.0, 0.0)));
    }

    #[test]
    fn origin_to_non_positive_power_fails() {
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(origin.power(0.0), Err(DomainError { exponent: 0.0 }));
        assert!(origin.power(-1.5).is_err());
        assert!(Complex::new(1.0, 1.0).power(::std::f64::NAN).is_err());
    }

    #[test]
    fn addition_is_componentwise() {
        let sum = Complex::new(1.0, -2.0) + Complex::new(0.5, 0.25);
        assert_eq!(sum, Complex::new(1.5, -1.75));
    }
}
