//! Tracker capability boundary
//!
//! Identity assignment disambiguates distinct same-class objects whose
//! panorama-space boxes overlap after the loose fusion pass. The real
//! tracker is an external collaborator; [`StubTracker`] is a deterministic
//! greedy-overlap double for tests.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::bbox::BBox;

/// A detection with a stable identity attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedDetection {
    pub bbox: BBox,
    pub track_id: u64,
}

/// Identity assignment backend.
///
/// `track_id` must be stable across calls on the same instance for the
/// same panorama; it carries no meaning across instances.
pub trait Tracker {
    fn update(
        &mut self,
        frame: &RgbImage,
        detections: &[BBox],
    ) -> anyhow::Result<Vec<TrackedDetection>>;
}

/// Greedy-overlap stub: a detection inherits the id of the best same-class
/// remembered box above the match threshold, otherwise it opens a new id.
#[derive(Debug)]
pub struct StubTracker {
    tracks: Vec<(u64, BBox)>,
    next_id: u64,
    match_threshold: f64,
}

impl Default for StubTracker {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            match_threshold: 0.3,
        }
    }
}

impl StubTracker {
    pub fn new(match_threshold: f64) -> Self {
        Self {
            match_threshold,
            ..Self::default()
        }
    }
}

impl Tracker for StubTracker {
    fn update(
        &mut self,
        _frame: &RgbImage,
        detections: &[BBox],
    ) -> anyhow::Result<Vec<TrackedDetection>> {
        let mut claimed = vec![false; self.tracks.len()];
        let mut out = Vec::with_capacity(detections.len());

        for bbox in detections {
            let mut best: Option<(usize, f64)> = None;
            for (i, (_, known)) in self.tracks.iter().enumerate() {
                if claimed[i] || known.class_id != bbox.class_id {
                    continue;
                }
                let overlap = known.iou(bbox);
                if overlap >= self.match_threshold
                    && best.map_or(true, |(_, score)| overlap > score)
                {
                    best = Some((i, overlap));
                }
            }

            let track_id = match best {
                Some((i, _)) => {
                    claimed[i] = true;
                    self.tracks[i].1 = bbox.clone();
                    self.tracks[i].0
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    self.tracks.push((id, bbox.clone()));
                    claimed.push(true);
                    id
                }
            };
            out.push(TrackedDetection {
                bbox: bbox.clone(),
                track_id,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_box_keeps_its_id() {
        let mut tracker = StubTracker::default();
        let frame = RgbImage::new(4, 4);
        let person = BBox::new(10.0, 10.0, 50.0, 90.0, 0.9, 0);

        let first = tracker.update(&frame, &[person.clone()]).unwrap();
        let second = tracker.update(&frame, &[person]).unwrap();
        assert_eq!(first[0].track_id, second[0].track_id);
    }

    #[test]
    fn test_disjoint_boxes_get_fresh_ids() {
        let mut tracker = StubTracker::default();
        let frame = RgbImage::new(4, 4);
        let left = BBox::new(0.0, 0.0, 20.0, 20.0, 0.9, 0);
        let right = BBox::new(200.0, 0.0, 220.0, 20.0, 0.8, 0);

        let tracked = tracker.update(&frame, &[left, right]).unwrap();
        assert_ne!(tracked[0].track_id, tracked[1].track_id);
    }

    #[test]
    fn test_class_change_breaks_identity() {
        let mut tracker = StubTracker::default();
        let frame = RgbImage::new(4, 4);
        let person = BBox::new(10.0, 10.0, 50.0, 90.0, 0.9, 0);
        let car = BBox::new(10.0, 10.0, 50.0, 90.0, 0.9, 2);

        let first = tracker.update(&frame, &[person]).unwrap();
        let second = tracker.update(&frame, &[car]).unwrap();
        assert_ne!(first[0].track_id, second[0].track_id);
    }
}
