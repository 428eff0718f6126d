//! Bounding box representation and overlap math
//!
//! Core abstraction for detections in both view and panorama pixel space.

use serde::{Deserialize, Serialize};

/// A detection: corner-form box, confidence, and numeric class id.
///
/// Coordinates are `(xmin, ymin, xmax, ymax)` with origin top-left,
/// x right, y down. Whether they are view pixels or panorama pixels is
/// decided by where the box sits in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub confidence: f32,
    pub class_id: u32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, confidence: f32, class_id: u32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            confidence,
            class_id,
        }
    }

    /// Corner coordinates as `[xmin, ymin, xmax, ymax]`.
    pub fn corners(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }

    /// Replace the corner coordinates, keeping confidence and class.
    pub fn with_corners(mut self, corners: [f64; 4]) -> Self {
        [self.xmin, self.ymin, self.xmax, self.ymax] = corners;
        self
    }

    /// Pixel-inclusive area: a point box covers one pixel.
    ///
    /// The +1 convention matches integer pixel grids and keeps degenerate
    /// boxes comparable instead of vanishing to zero area.
    pub fn area(&self) -> f64 {
        (self.xmax - self.xmin + 1.0) * (self.ymax - self.ymin + 1.0)
    }

    /// Intersection over union with another box, pixel-inclusive.
    pub fn iou(&self, other: &BBox) -> f64 {
        let ix = (self.xmax.min(other.xmax) - self.xmin.max(other.xmin) + 1.0).max(0.0);
        let iy = (self.ymax.min(other.ymax) - self.ymin.max(other.ymin) + 1.0).max(0.0);
        let intersection = ix * iy;
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }

    /// True when the box has no extent along either axis.
    pub fn is_degenerate(&self) -> bool {
        self.xmax <= self.xmin || self.ymax <= self.ymin
    }
}
