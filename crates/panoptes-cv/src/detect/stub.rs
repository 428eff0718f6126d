//! Scripted detector backend

use std::collections::VecDeque;

use image::RgbImage;

use crate::bbox::BBox;
use crate::detect::{DetectOptions, Detector};

/// A detector that replays scripted answers, one batch per call.
///
/// Calls beyond the script return no detections. Filtering honors
/// [`DetectOptions`] the way a real backend would, so pipeline tests
/// exercise the same code paths.
#[derive(Debug, Default)]
pub struct StubDetector {
    responses: VecDeque<Vec<BBox>>,
}

impl StubDetector {
    pub fn new(responses: Vec<Vec<BBox>>) -> Self {
        Self {
            responses: responses.into(),
        }
    }
}

impl Detector for StubDetector {
    fn detect(&mut self, _image: &RgbImage, options: &DetectOptions) -> anyhow::Result<Vec<BBox>> {
        let batch = self.responses.pop_front().unwrap_or_default();
        Ok(batch.into_iter().filter(|b| options.accepts(b)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order_then_runs_dry() {
        let mut stub = StubDetector::new(vec![
            vec![BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0)],
            vec![],
        ]);
        let image = RgbImage::new(4, 4);
        let options = DetectOptions::default();
        assert_eq!(stub.detect(&image, &options).unwrap().len(), 1);
        assert!(stub.detect(&image, &options).unwrap().is_empty());
        assert!(stub.detect(&image, &options).unwrap().is_empty());
    }

    #[test]
    fn test_applies_confidence_threshold() {
        let mut stub = StubDetector::new(vec![vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.9, 0),
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.2, 0),
        ]]);
        let image = RgbImage::new(4, 4);
        let kept = stub.detect(&image, &DetectOptions::default()).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }
}
