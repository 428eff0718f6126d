// tests/fusion_tests.rs
use image::RgbImage;
use panoptes_core::CatalogConfig;
use panoptes_cv::{
    map_view_detections, BBox, DetectionSet, FusionConfig, Panorama, Pipeline, StubDetector,
    StubTracker, Tracker, ViewDetections,
};

fn blank_panorama() -> Panorama {
    Panorama::from_image(RgbImage::new(2048, 1024)).unwrap()
}

fn equator_catalog() -> CatalogConfig {
    CatalogConfig {
        yaws: vec![0.0, 90.0, 180.0, 270.0],
        pitches: vec![0.0],
        fov: 90.0,
        output_size: (512, 512),
    }
}

/// The same person straddles the boundary between the yaw 0 and yaw 90
/// views. Each view reports the person's full extent, partly outside its
/// own raster, so both boxes map to the same panorama region.
fn boundary_person_views() -> (Vec<BBox>, Vec<BBox>) {
    let in_front_view = vec![BBox::new(470.8, 200.0, 561.1, 312.0, 0.9, 0)];
    let in_right_view = vec![BBox::new(-49.1, 200.0, 41.2, 312.0, 0.9, 0)];
    (in_front_view, in_right_view)
}

#[test]
fn test_cross_view_duplicate_collapses_to_one() {
    let pipeline = Pipeline::new(
        equator_catalog(),
        FusionConfig {
            iou_threshold: 0.1,
            ..FusionConfig::default()
        },
    );
    let (front, right) = boundary_person_views();
    let mut detector = StubDetector::new(vec![front, right]);

    let counts = pipeline
        .run(&blank_panorama(), &mut detector, None)
        .unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts.get(&0), Some(&1));
}

#[test]
fn test_cross_view_duplicate_keeps_top_confidence() {
    let specs = equator_catalog().specs();
    let (front, right) = boundary_person_views();

    let mut all = DetectionSet::new();
    for (spec, boxes) in specs.iter().zip([front, right]) {
        let view = ViewDetections::new(*spec, boxes);
        all.extend(map_view_detections(&view, 2048, 1024).unwrap());
    }
    assert_eq!(all.len(), 2);

    let fused = all.fuse(0.1);
    assert_eq!(fused.len(), 1);
    assert_eq!(fused.as_slice()[0].confidence, 0.9);
}

#[test]
fn test_pitch_rows_overlap_dedup() {
    // One object below the horizon at yaw 0, seen both by the pitch 45
    // view (which centers 45 degrees down) and the pitch 0 view.
    let pipeline = Pipeline::new(CatalogConfig::default(), FusionConfig::default());
    let responses = vec![
        vec![BBox::new(236.0, 120.0, 276.0, 180.0, 0.85, 0)], // pitch 45, yaw 0
        vec![],
        vec![],
        vec![],
        vec![BBox::new(236.0, 332.0, 276.0, 392.0, 0.9, 0)], // pitch 0, yaw 0
    ];
    let mut detector = StubDetector::new(responses);

    let counts = pipeline
        .run(&blank_panorama(), &mut detector, None)
        .unwrap();
    assert_eq!(counts.get(&0), Some(&1));
}

#[test]
fn test_distant_objects_stay_separate() {
    let pipeline = Pipeline::new(equator_catalog(), FusionConfig::default());
    let centered = BBox::new(200.0, 200.0, 312.0, 312.0, 0.9, 0);
    let mut detector = StubDetector::new(vec![
        vec![centered.clone()], // yaw 0: person ahead
        vec![],
        vec![centered], // yaw 180: person behind
    ]);

    let counts = pipeline
        .run(&blank_panorama(), &mut detector, None)
        .unwrap();
    assert_eq!(counts.get(&0), Some(&2));
}

#[test]
fn test_tracker_assigns_one_identity_per_object() {
    let pipeline = Pipeline::new(
        equator_catalog(),
        FusionConfig {
            iou_threshold: 0.1,
            ..FusionConfig::default()
        },
    );
    let (front, right) = boundary_person_views();
    let mut detector = StubDetector::new(vec![front, right]);
    let mut tracker = StubTracker::default();

    let counts = pipeline
        .run(&blank_panorama(), &mut detector, Some(&mut tracker))
        .unwrap();
    assert_eq!(counts.get(&0), Some(&1));
}

#[test]
fn test_tracker_separates_classes() {
    let pipeline = Pipeline::new(equator_catalog(), FusionConfig::default());
    let mut detector = StubDetector::new(vec![vec![
        BBox::new(100.0, 100.0, 200.0, 300.0, 0.9, 0),
        BBox::new(100.0, 100.0, 200.0, 300.0, 0.8, 2),
    ]]);
    let mut tracker = StubTracker::default();

    let counts = pipeline
        .run(&blank_panorama(), &mut detector, Some(&mut tracker))
        .unwrap();
    assert_eq!(counts.get(&0), Some(&1));
    assert_eq!(counts.get(&2), Some(&1));
}

#[test]
fn test_empty_manifest_yields_empty_report() {
    let pipeline = Pipeline::new(equator_catalog(), FusionConfig::default());
    let counts = pipeline
        .run_mapped(&blank_panorama(), &[], None)
        .unwrap();
    assert!(counts.is_empty());
}

#[test]
fn test_tracker_sees_panorama_frame() {
    // The tracker receives the original panorama raster, not a view.
    struct SizeProbe(Option<(u32, u32)>);
    impl Tracker for SizeProbe {
        fn update(
            &mut self,
            frame: &RgbImage,
            detections: &[BBox],
        ) -> anyhow::Result<Vec<panoptes_cv::TrackedDetection>> {
            self.0 = Some(frame.dimensions());
            Ok(detections
                .iter()
                .enumerate()
                .map(|(i, bbox)| panoptes_cv::TrackedDetection {
                    bbox: bbox.clone(),
                    track_id: i as u64 + 1,
                })
                .collect())
        }
    }

    let pipeline = Pipeline::new(equator_catalog(), FusionConfig::default());
    let mut detector =
        StubDetector::new(vec![vec![BBox::new(100.0, 100.0, 200.0, 300.0, 0.9, 0)]]);
    let mut probe = SizeProbe(None);
    pipeline
        .run(&blank_panorama(), &mut detector, Some(&mut probe))
        .unwrap();
    assert_eq!(probe.0, Some((2048, 1024)));
}
