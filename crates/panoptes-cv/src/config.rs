//! Fusion configuration

use serde::{Deserialize, Serialize};

use crate::detect::DetectOptions;

/// Tunables for one panorama's detection-fusion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Cross-view NMS threshold. Loose on purpose: boxes of the same
    /// object seen from different views only partially overlap once
    /// mapped into panorama space.
    pub iou_threshold: f64,
    /// Confidence floor forwarded to the detector collaborator.
    pub confidence_threshold: f32,
    /// Class ids the detector should report; `None` means all.
    pub class_filter: Option<Vec<u32>>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.05,
            confidence_threshold: 0.5,
            class_filter: None,
        }
    }
}

impl FusionConfig {
    /// Options handed to the detector for every view.
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions {
            confidence_threshold: self.confidence_threshold,
            class_filter: self.class_filter.clone(),
        }
    }
}
