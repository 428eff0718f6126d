//! View specifications and catalogs

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Orientation and intrinsics of one perspective rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Camera yaw in degrees (rotation about the vertical axis).
    pub yaw: f64,
    /// Camera pitch in degrees (rotation about the horizontal axis).
    pub pitch: f64,
    /// Field of view in degrees, strictly inside (0, 180).
    pub fov: f64,
    /// Output raster width in pixels.
    pub width: u32,
    /// Output raster height in pixels.
    pub height: u32,
}

impl ViewSpec {
    pub fn new(yaw: f64, pitch: f64, fov: f64, width: u32, height: u32) -> Self {
        Self {
            yaw,
            pitch,
            fov,
            width,
            height,
        }
    }

    /// A usable spec needs a positive output raster and a field of view
    /// strictly between 0 and 180 degrees.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(GeometryError::InvalidViewSpec {
                reason: format!("fov {} degrees outside (0, 180)", self.fov),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::InvalidViewSpec {
                reason: format!("output size {}x{} has a zero dimension", self.width, self.height),
            });
        }
        Ok(())
    }

    /// Focal length of the pinhole model in normalized image units.
    pub fn focal(&self) -> f64 {
        1.0 / (self.fov.to_radians() / 2.0).tan()
    }
}

/// Grid of view orientations rendered for every panorama.
///
/// Denser grids raise recall and put more duplicate pressure on the
/// cross-view fusion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub yaws: Vec<f64>,
    pub pitches: Vec<f64>,
    pub fov: f64,
    pub output_size: (u32, u32),
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            yaws: vec![0.0, 90.0, 180.0, 270.0],
            pitches: vec![45.0, 0.0, -45.0],
            fov: 90.0,
            output_size: (512, 512),
        }
    }
}

impl CatalogConfig {
    /// Materialize the pitch-major grid of view specs.
    pub fn specs(&self) -> Vec<ViewSpec> {
        let (width, height) = self.output_size;
        let mut specs = Vec::with_capacity(self.yaws.len() * self.pitches.len());
        for &pitch in &self.pitches {
            for &yaw in &self.yaws {
                specs.push(ViewSpec::new(yaw, pitch, self.fov, width, height));
            }
        }
        specs
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.yaws.is_empty() || self.pitches.is_empty() {
            return Err(GeometryError::InvalidViewSpec {
                reason: "catalog has no yaw or pitch entries".to_string(),
            });
        }
        ViewSpec::new(0.0, 0.0, self.fov, self.output_size.0, self.output_size.1).validate()
    }
}
