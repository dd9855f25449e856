//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners of the
//! complex plane.
use errors::ConfigurationError;
use itertools::{iproduct, Product};
use num::Complex;
use std::ops::Range;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.  For that reason,
/// the lower-left-hand corner is not included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Every pixel of a viewport, row by row.
pub type Pixels = Product<Range<usize>, Range<usize>>;

/// The region of the complex plane being rendered, and the pixel
/// grid it is rendered onto.  Read-only once built, and shared by
/// every frame of an animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
    // The width and height of a single pixel on the complex plane.
    scale: (f64, f64),
}

impl Viewport {
    /// Takes the size of the integral plane, and the two corners of
    /// the complex plane.  The corners must be finite, and the
    /// left-lower corner must be strictly left of and below the
    /// right-upper one.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Viewport, ConfigurationError> {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::Dimensions(width, height));
        }

        let corners = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if corners.iter().any(|v| !v.is_finite()) {
            return Err(ConfigurationError::Viewport(
                "The corners of the complex plane must be finite.".to_string(),
            ));
        }

        if rightupper.re <= leftlower.re {
            return Err(ConfigurationError::Viewport(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if rightupper.im <= leftlower.im {
            return Err(ConfigurationError::Viewport(
                "The left lower corner is not lower than the right upper corner.".to_string(),
            ));
        }

        let scale = (
            (rightupper.re - leftlower.re) / (width as f64),
            (rightupper.im - leftlower.im) / (height as f64),
        );

        Ok(Viewport {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            scale,
        })
    }

    /// Width of the integral plane, in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the integral plane, in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// point on the complex plane at its corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.complex_plane.0.re + (pixel.0 as f64) * self.scale.0,
            self.complex_plane.0.im + (pixel.1 as f64) * self.scale.1,
        )
    }

    /// The linear offset of a pixel in a row-major buffer.
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.integral_plane.0 + pixel.0
    }

    /// Every pixel in the plane, in the same row-major order as the
    /// buffers.  Yields (row, column) pairs.
    pub fn pixels(&self) -> Pixels {
        iproduct!(0..self.integral_plane.1, 0..self.integral_plane.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_shape() {
        let vp = Viewport::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(vp.is_err());
        let vp = Viewport::new(4, 4, Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0));
        assert!(vp.is_err());
    }

    #[test]
    fn viewport_fails_on_degenerate_shape() {
        let vp = Viewport::new(4, 4, Complex::new(1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(vp.is_err());
        let vp = Viewport::new(0, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert_eq!(vp, Err(ConfigurationError::Dimensions(0, 4)));
        let vp = Viewport::new(
            4,
            4,
            Complex::new(-1.0, ::std::f64::NEG_INFINITY),
            Complex::new(1.0, 1.0),
        );
        assert!(vp.is_err());
    }

    #[test]
    fn viewport_passes_on_good_shape() {
        let vp = Viewport::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(vp.is_ok());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let vp = Viewport::new(5, 5, Complex::new(0.0, 0.0), Complex::new(5.0, 5.0)).unwrap();
        assert_eq!(vp.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(vp.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(vp.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let vp = Viewport::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(vp.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(vp.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(vp.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixel_to_points_on_default_plane() {
        let vp = Viewport::new(4, 4, Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        assert_eq!(vp.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -1.0));
        assert_eq!(vp.pixel_to_point(&Pixel(2, 2)), Complex::new(-0.5, 0.0));
    }

    #[test]
    fn pixels_cover_the_plane_in_buffer_order() {
        let vp = Viewport::new(3, 2, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        let offsets: Vec<usize> = vp
            .pixels()
            .map(|(row, column)| vp.offset(&Pixel(column, row)))
            .collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(vp.len(), 6);
    }
}
