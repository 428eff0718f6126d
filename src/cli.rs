//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Count objects in 360 degree panoramas via multi-view fusion.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the perspective view grid and write it with a manifest
    Views {
        /// Equirectangular input image
        panorama: PathBuf,

        /// Output directory for view rasters and metadata.json
        #[arg(long, value_name = "DIR", default_value = "views")]
        out: PathBuf,

        /// Yaw angles in degrees
        #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 90.0, 180.0, 270.0])]
        yaws: Vec<f64>,

        /// Pitch angles in degrees
        #[arg(
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            default_values_t = vec![45.0, 0.0, -45.0]
        )]
        pitches: Vec<f64>,

        /// Field of view in degrees
        #[arg(long, default_value_t = 90.0)]
        fov: f64,

        /// View raster width in pixels
        #[arg(long, default_value_t = 512)]
        width: u32,

        /// View raster height in pixels
        #[arg(long, default_value_t = 512)]
        height: u32,
    },

    /// Fuse a per-view detection manifest into per-class counts
    Count {
        /// Equirectangular input image the detections belong to
        panorama: PathBuf,

        /// Per-view detection manifest (JSON)
        #[arg(long, value_name = "FILE")]
        detections: PathBuf,

        /// Class-id to display-name table (JSON object)
        #[arg(long, value_name = "FILE")]
        labels: Option<PathBuf>,

        /// Cross-view NMS IoU threshold
        #[arg(long, default_value_t = 0.05)]
        iou: f64,
    },
}
