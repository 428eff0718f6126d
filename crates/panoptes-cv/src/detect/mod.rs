//! Detector capability boundary
//!
//! The neural detector is an external collaborator; the fusion core only
//! depends on this trait. Deterministic stubs live in [`stub`] so tests
//! and dry runs never touch model weights.

pub mod stub;

pub use stub::StubDetector;

use image::RgbImage;
use panoptes_core::ViewSpec;
use serde::{Deserialize, Serialize};

use crate::bbox::BBox;

/// Options forwarded to a detector backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectOptions {
    /// Minimum confidence a backend should report.
    pub confidence_threshold: f32,
    /// Restrict detection to these class ids; `None` detects everything.
    pub class_filter: Option<Vec<u32>>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            class_filter: None,
        }
    }
}

impl DetectOptions {
    /// Whether a detection passes the filter and threshold.
    pub fn accepts(&self, bbox: &BBox) -> bool {
        if bbox.confidence < self.confidence_threshold {
            return false;
        }
        match &self.class_filter {
            Some(classes) => classes.contains(&bbox.class_id),
            None => true,
        }
    }
}

/// Object detection backend.
///
/// Implementations return boxes in the pixel space of the image they were
/// given: origin top-left, x right, y down. Boxes may extend past the
/// raster edges for objects clipped at a view boundary.
pub trait Detector {
    fn detect(&mut self, image: &RgbImage, options: &DetectOptions) -> anyhow::Result<Vec<BBox>>;
}

/// One view's detections, still in that view's pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDetections {
    pub spec: ViewSpec,
    pub boxes: Vec<BBox>,
}

impl ViewDetections {
    pub fn new(spec: ViewSpec, boxes: Vec<BBox>) -> Self {
        Self { spec, boxes }
    }
}
