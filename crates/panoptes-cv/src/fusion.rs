//! Cross-view detection fusion
//!
//! Lifts per-view detections into panorama pixel space and removes the
//! duplicates that overlapping views produce for the same physical object.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use panoptes_core::{view_box_to_equirect, GeometryError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bbox::BBox;
use crate::detect::ViewDetections;
use crate::track::TrackedDetection;
use crate::{FusionError, Result};

/// Detections in panorama space with batch fusion operations.
#[derive(Debug, Clone, Default)]
pub struct DetectionSet {
    boxes: Vec<BBox>,
}

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(boxes: Vec<BBox>) -> Self {
        Self { boxes }
    }

    pub fn push(&mut self, bbox: BBox) {
        self.boxes.push(bbox);
    }

    pub fn extend(&mut self, other: DetectionSet) {
        self.boxes.extend(other.boxes);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn as_slice(&self) -> &[BBox] {
        &self.boxes
    }

    pub fn into_vec(self) -> Vec<BBox> {
        self.boxes
    }

    /// Class-partitioned greedy non-max suppression.
    ///
    /// Boxes of different classes never suppress each other. The fusion
    /// threshold is deliberately loose compared to a single-view NMS pass:
    /// two views of the same object project to panorama boxes that may
    /// only barely overlap.
    pub fn fuse(self, iou_threshold: f64) -> DetectionSet {
        let total = self.boxes.len();
        let mut partitions: BTreeMap<u32, Vec<BBox>> = BTreeMap::new();
        for bbox in self.boxes {
            partitions.entry(bbox.class_id).or_default().push(bbox);
        }
        let partitions: Vec<Vec<BBox>> = partitions.into_values().collect();

        #[cfg(feature = "parallel")]
        let kept: Vec<Vec<BBox>> = partitions
            .into_par_iter()
            .map(|boxes| suppress(boxes, iou_threshold))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let kept: Vec<Vec<BBox>> = partitions
            .into_iter()
            .map(|boxes| suppress(boxes, iou_threshold))
            .collect();

        let boxes: Vec<BBox> = kept.into_iter().flatten().collect();
        debug!("fusion kept {} of {} detections", boxes.len(), total);
        DetectionSet { boxes }
    }

    /// Count surviving detections per class.
    ///
    /// This is the tracker-less fallback: it over-counts when two distinct
    /// same-class objects overlap past the fusion threshold.
    pub fn count_by_class(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for bbox in &self.boxes {
            *counts.entry(bbox.class_id).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<BBox> for DetectionSet {
    fn from_iter<T: IntoIterator<Item = BBox>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// Greedy NMS within one class partition.
///
/// The sort is stable and descending by confidence, so ties keep their
/// insertion order and results are reproducible across runs.
fn suppress(mut boxes: Vec<BBox>, iou_threshold: f64) -> Vec<BBox> {
    boxes.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut kept: Vec<BBox> = Vec::new();
    'candidates: for bbox in boxes {
        for winner in &kept {
            if winner.iou(&bbox) > iou_threshold {
                continue 'candidates;
            }
        }
        kept.push(bbox);
    }
    kept
}

/// Lift one view's detections into panorama pixel space.
///
/// Boxes with degenerate corner rays are skipped with a warning; an
/// invalid view spec fails the whole request with no partial result.
pub fn map_view_detections(view: &ViewDetections, w_eq: u32, h_eq: u32) -> Result<DetectionSet> {
    view.spec.validate().map_err(FusionError::from)?;
    let mut mapped = DetectionSet::new();
    for bbox in &view.boxes {
        match view_box_to_equirect(bbox.corners(), &view.spec, w_eq, h_eq) {
            Ok(corners) => mapped.push(bbox.clone().with_corners(corners)),
            Err(GeometryError::DegenerateDirection { x, y }) => {
                warn!(
                    "skipping box with degenerate corner ({x}, {y}) in view yaw {} pitch {}",
                    view.spec.yaw, view.spec.pitch
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(mapped)
}

/// Count distinct track identities per class.
pub fn count_tracked(tracked: &[TrackedDetection]) -> BTreeMap<u32, usize> {
    let mut seen: BTreeMap<u32, BTreeSet<u64>> = BTreeMap::new();
    for detection in tracked {
        seen.entry(detection.bbox.class_id)
            .or_default()
            .insert(detection.track_id);
    }
    seen.into_iter().map(|(class, ids)| (class, ids.len())).collect()
}
