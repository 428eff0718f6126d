//! Equirectangular panorama raster

use std::path::Path;

use image::RgbImage;
use log::debug;

use crate::{FusionError, Result};

/// A validated equirectangular raster.
///
/// Pixel x maps linearly to longitude and pixel y to latitude. Sampling
/// wraps horizontally across the longitude seam and clamps vertically at
/// the poles.
#[derive(Debug, Clone)]
pub struct Panorama {
    image: RgbImage,
}

impl Panorama {
    /// Wrap an existing raster; zero-sized input is a fatal error.
    pub fn from_image(image: RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FusionError::EmptyPanorama);
        }
        Ok(Self { image })
    }

    /// Load a panorama from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(&path)?.to_rgb8();
        debug!(
            "loaded panorama {:?} ({}x{})",
            path.as_ref(),
            image.width(),
            image.height()
        );
        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    /// Bilinear sample at fractional pixel coordinates.
    ///
    /// Horizontal neighbors wrap modulo the width so the seam at u = 0 is
    /// continuous; vertical neighbors clamp at the poles.
    pub fn sample_bilinear(&self, u: f64, v: f64) -> [u8; 3] {
        let w = self.image.width() as i64;
        let h = self.image.height() as i64;

        let x0f = u.floor();
        let y0f = v.floor();
        let fx = u - x0f;
        let fy = v - y0f;
        let x0 = x0f as i64;
        let y0 = y0f as i64;

        let xi0 = x0.rem_euclid(w) as u32;
        let xi1 = (x0 + 1).rem_euclid(w) as u32;
        let yi0 = y0.clamp(0, h - 1) as u32;
        let yi1 = (y0 + 1).clamp(0, h - 1) as u32;

        let p00 = self.image.get_pixel(xi0, yi0).0;
        let p10 = self.image.get_pixel(xi1, yi0).0;
        let p01 = self.image.get_pixel(xi0, yi1).0;
        let p11 = self.image.get_pixel(xi1, yi1).0;

        let mut out = [0u8; 3];
        for c in 0..3 {
            let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
            let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
            out[c] = (top * (1.0 - fy) + bottom * fy).round() as u8;
        }
        out
    }
}
