//! On-disk manifests exchanged with the external detector run

use panoptes_core::ViewSpec;
use panoptes_cv::{BBox, ViewDetections};
use serde::{Deserialize, Serialize};

/// Entry of the `metadata.json` written next to rendered views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub filename: String,
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
    pub width: u32,
    pub height: u32,
}

/// One view's detector output, as produced by an external detector run
/// over a rendered view set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
    // Older manifests omit the view size; 512 was the only size in use.
    #[serde(default = "default_view_dim")]
    pub width: u32,
    #[serde(default = "default_view_dim")]
    pub height: u32,
    pub detections: Vec<BoxRecord>,
}

/// A single detection row in `xyxy` corner form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub class_id: u32,
    pub confidence: f32,
    pub xyxy: [f64; 4],
}

fn default_view_dim() -> u32 {
    512
}

impl DetectionRecord {
    pub fn into_view_detections(self) -> ViewDetections {
        let spec = ViewSpec::new(self.yaw, self.pitch, self.fov, self.width, self.height);
        let boxes = self
            .detections
            .into_iter()
            .map(|row| {
                let [xmin, ymin, xmax, ymax] = row.xyxy;
                BBox::new(xmin, ymin, xmax, ymax, row.confidence, row.class_id)
            })
            .collect();
        ViewDetections::new(spec, boxes)
    }
}

/// Row of the final count report keyed by class id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub count: usize,
}
