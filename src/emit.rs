// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting finished frames out of the process.
//!
//! The renderer only knows about the `Emitter` trait.  `ImageWriter`
//! is the implementation the binary uses: one lossless image file
//! per frame, in a single output directory.

use errors::EmissionError;
use grid::ColorGrid;
use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::{self, File};
use std::convert::TryFrom;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The name of a frame's output, without extension: its index,
/// zero-padded to three digits.
pub fn frame_name(index: usize) -> String {
    format!("{:03}", index)
}

/// Anything that can take a colored frame and put it somewhere.
/// Shared between emission threads, so it must be `Sync`.
pub trait Emitter: Sync {
    /// Emit one frame under `name`, returning where it went.
    fn emit(&self, name: &str, colors: &ColorGrid) -> Result<PathBuf, EmissionError>;
}

/// The lossless formats a frame can be written in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// Binary portable pixmap.
    Ppm,
}

impl ImageFormat {
    /// The file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Ppm => "ppm",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "ppm" | "pnm" => Ok(ImageFormat::Ppm),
            other => Err(format!("Unknown image format '{}'", other)),
        }
    }
}

/// Writes each frame as `<directory>/<name>.<extension>`.
#[derive(Clone, Debug)]
pub struct ImageWriter {
    directory: PathBuf,
    format: ImageFormat,
    retries: usize,
}

impl ImageWriter {
    /// Creates the output directory if needed.  `retries` is the number
    /// of extra attempts made on a frame whose write fails.
    pub fn new<P: AsRef<Path>>(
        directory: P,
        format: ImageFormat,
        retries: usize,
    ) -> Result<Self, EmissionError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| EmissionError::io(&directory, e))?;
        Ok(ImageWriter {
            directory,
            format,
            retries,
        })
    }

    /// Where the frame called `name` will be written.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", name, self.format.extension()))
    }

    fn write(&self, path: &Path, colors: &ColorGrid) -> Result<(), EmissionError> {
        let (width, height) = match (u32::try_from(colors.width()), u32::try_from(colors.height())) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(EmissionError::TooLarge(
                    path.display().to_string(),
                    colors.width(),
                    colors.height(),
                ))
            }
        };
        let output = File::create(path).map_err(|e| EmissionError::io(path, e))?;
        let pixels = colors.to_rgb8();
        match self.format {
            ImageFormat::Png => PNGEncoder::new(output)
                .encode(&pixels, width, height, ColorType::RGB(8))
                .map_err(|e| EmissionError::io(path, e)),
            ImageFormat::Ppm => {
                let mut encoder = PNMEncoder::new(output)
                    .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
                encoder
                    .encode(&pixels[..], width, height, ColorType::RGB(8))
                    .map_err(|e| EmissionError::io(path, e))
            }
        }
    }
}

impl Emitter for ImageWriter {
    fn emit(&self, name: &str, colors: &ColorGrid) -> Result<PathBuf, EmissionError> {
        let path = self.path_for(name);
        let mut attempt = 0;
        loop {
            match self.write(&path, colors) {
                Ok(()) => return Ok(path),
                Err(e) => {
                    if attempt >= self.retries {
                        return Err(e);
                    }
                    attempt += 1;
                    warn!("Retrying {} ({} of {}): {}", path.display(), attempt, self.retries, e);
                }
            }
        }
    }
}
