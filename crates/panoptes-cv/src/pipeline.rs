//! Panorama processing pipeline
//!
//! Glue sequencing the core transforms with the external collaborators:
//! render the view catalog, detect per view, lift boxes into panorama
//! space, fuse duplicates, count.

use std::collections::BTreeMap;

use log::{debug, info};
use panoptes_core::CatalogConfig;

use crate::config::FusionConfig;
use crate::detect::{Detector, ViewDetections};
use crate::fusion::{count_tracked, map_view_detections, DetectionSet};
use crate::panorama::Panorama;
use crate::projection::render_view;
use crate::track::Tracker;
use crate::{FusionError, Result};

/// One panorama's worth of processing; owns no state across runs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub catalog: CatalogConfig,
    pub config: FusionConfig,
}

impl Pipeline {
    pub fn new(catalog: CatalogConfig, config: FusionConfig) -> Self {
        Self { catalog, config }
    }

    /// Full run: render, detect, map, fuse, count.
    ///
    /// With a tracker, the count is the number of distinct identities per
    /// class; without one it degrades to counting NMS survivors.
    pub fn run(
        &self,
        panorama: &Panorama,
        detector: &mut dyn Detector,
        tracker: Option<&mut dyn Tracker>,
    ) -> Result<BTreeMap<u32, usize>> {
        self.catalog.validate()?;
        let options = self.config.detect_options();
        let mut views = Vec::new();
        for spec in self.catalog.specs() {
            let view = render_view(panorama, &spec)?;
            let boxes = detector
                .detect(&view.image, &options)
                .map_err(FusionError::Detector)?;
            debug!(
                "view yaw {} pitch {}: {} detections",
                spec.yaw,
                spec.pitch,
                boxes.len()
            );
            views.push(ViewDetections::new(spec, boxes));
        }
        self.run_mapped(panorama, &views, tracker)
    }

    /// Fusion-only run over detections produced elsewhere.
    pub fn run_mapped(
        &self,
        panorama: &Panorama,
        views: &[ViewDetections],
        tracker: Option<&mut dyn Tracker>,
    ) -> Result<BTreeMap<u32, usize>> {
        let (w_eq, h_eq) = panorama.dimensions();
        let mut all = DetectionSet::new();
        for view in views {
            all.extend(map_view_detections(view, w_eq, h_eq)?);
        }

        let fused = all.fuse(self.config.iou_threshold);
        info!(
            "{} detections fused across {} views",
            fused.len(),
            views.len()
        );

        match tracker {
            Some(tracker) => {
                let tracked = tracker
                    .update(panorama.as_image(), fused.as_slice())
                    .map_err(FusionError::Tracker)?;
                Ok(count_tracked(&tracked))
            }
            None => Ok(fused.count_by_class()),
        }
    }
}
