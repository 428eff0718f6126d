//! Panoptes Fusion Library
//!
//! Renders overlapping perspective views from an equirectangular panorama,
//! lifts per-view detections back into panorama coordinates, and fuses
//! them into a deduplicated per-class object count.
//!
//! The neural detector and the identity tracker are collaborators behind
//! the [`Detector`] and [`Tracker`] traits; deterministic stubs live next
//! to them so the fusion logic tests without model weights.

pub mod bbox;
pub mod config;
pub mod detect;
pub mod fusion;
pub mod panorama;
pub mod pipeline;
pub mod projection;
pub mod track;

// Re-export commonly used types
pub use bbox::BBox;
pub use config::FusionConfig;
pub use detect::{DetectOptions, Detector, StubDetector, ViewDetections};
pub use fusion::{count_tracked, map_view_detections, DetectionSet};
pub use panorama::Panorama;
pub use pipeline::Pipeline;
pub use projection::{render_catalog, render_view, PerspectiveView};
pub use track::{StubTracker, TrackedDetection, Tracker};

use thiserror::Error;

/// Errors surfaced by the fusion layer.
#[derive(Debug, Error)]
pub enum FusionError {
    /// The panorama file could not be decoded.
    #[error("cannot read panorama image")]
    PanoramaRead(#[from] image::ImageError),

    /// The panorama raster has a zero dimension.
    #[error("panorama raster is empty")]
    EmptyPanorama,

    /// A view spec or catalog cannot describe a usable camera.
    #[error(transparent)]
    Geometry(#[from] panoptes_core::GeometryError),

    /// The detector collaborator failed; propagated, never retried here.
    #[error("detector backend failed")]
    Detector(#[source] anyhow::Error),

    /// The tracker collaborator failed; propagated, never retried here.
    #[error("tracker backend failed")]
    Tracker(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FusionError>;
