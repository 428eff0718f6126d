//! Perspective view rendering from an equirectangular panorama

use image::RgbImage;
use log::debug;
use panoptes_core::{direction_to_lonlat, lonlat_to_pixel, pixel_ray, Rotation, ViewSpec};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::panorama::Panorama;
use crate::Result;

/// One rendered perspective view together with the spec that produced it.
#[derive(Debug, Clone)]
pub struct PerspectiveView {
    pub spec: ViewSpec,
    pub image: RgbImage,
}

/// Render a single perspective view.
///
/// Every output pixel is traced through the pinhole model, rotated into
/// world space, converted to longitude/latitude, and bilinearly sampled
/// from the panorama (horizontal wrap, vertical clamp).
pub fn render_view(panorama: &Panorama, spec: &ViewSpec) -> Result<PerspectiveView> {
    spec.validate()?;
    let rotation = Rotation::from_yaw_pitch(spec.yaw, spec.pitch);
    let (w_eq, h_eq) = panorama.dimensions();
    let row_len = spec.width as usize * 3;

    let render_row = |y: usize, row: &mut [u8]| {
        for x in 0..spec.width as usize {
            // A valid spec cannot produce a degenerate ray; leave the
            // pixel black if one appears anyway.
            let Ok(dir) = pixel_ray(spec, x as f64, y as f64) else {
                continue;
            };
            let world = rotation.apply(dir);
            let (lon, lat) = direction_to_lonlat(world);
            let (u, v) = lonlat_to_pixel(lon, lat, w_eq, h_eq);
            row[x * 3..x * 3 + 3].copy_from_slice(&panorama.sample_bilinear(u, v));
        }
    };

    let mut image = RgbImage::new(spec.width, spec.height);
    let buffer: &mut [u8] = &mut image;

    #[cfg(feature = "parallel")]
    buffer
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| render_row(y, row));

    #[cfg(not(feature = "parallel"))]
    for (y, row) in buffer.chunks_exact_mut(row_len).enumerate() {
        render_row(y, row);
    }

    debug!(
        "rendered view yaw {} pitch {} fov {} at {}x{}",
        spec.yaw, spec.pitch, spec.fov, spec.width, spec.height
    );
    Ok(PerspectiveView {
        spec: *spec,
        image,
    })
}

/// Render every view of a catalog grid.
///
/// Fails fast on the first invalid spec; no partial view set is returned.
pub fn render_catalog(panorama: &Panorama, specs: &[ViewSpec]) -> Result<Vec<PerspectiveView>> {
    specs.iter().map(|spec| render_view(panorama, spec)).collect()
}
