//! Inverse mapping of perspective-view boxes into panorama pixels

use crate::error::GeometryError;
use crate::rotation::Rotation;
use crate::sphere::{direction_to_lonlat, lonlat_to_pixel, pixel_ray};
use crate::view::ViewSpec;

/// Axis-aligned box in pixel coordinates, `(xmin, ymin, xmax, ymax)`.
pub type PixelBox = [f64; 4];

/// Map a box from one view's pixel space into equirectangular pixels.
///
/// Only the four corners are transformed. The projected outline of a box
/// is not a rectangle, so the axis-aligned hull of the corners is an
/// approximation; an exact answer would need dense sampling of the box
/// outline. The result is clamped to `[0, w_eq] x [0, h_eq]`.
///
/// Corners may lie outside the view raster; the projection extends past
/// the raster edges and detectors are allowed to report boxes that do too.
pub fn view_box_to_equirect(
    bbox: PixelBox,
    spec: &ViewSpec,
    w_eq: u32,
    h_eq: u32,
) -> Result<PixelBox, GeometryError> {
    spec.validate()?;
    let rotation = Rotation::from_yaw_pitch(spec.yaw, spec.pitch);
    let [xmin, ymin, xmax, ymax] = bbox;
    let corners = [(xmin, ymin), (xmax, ymin), (xmax, ymax), (xmin, ymax)];

    let w = w_eq as f64;
    let h = h_eq as f64;
    let mut us = [0.0f64; 4];
    let mut vs = [0.0f64; 4];
    for (i, &(x, y)) in corners.iter().enumerate() {
        let dir = rotation.apply(pixel_ray(spec, x, y)?);
        let (lon, lat) = direction_to_lonlat(dir);
        let (u, v) = lonlat_to_pixel(lon, lat, w_eq, h_eq);
        us[i] = u;
        vs[i] = v;
    }

    let (mut u_lo, mut u_hi) = min_max(&us);
    if u_hi - u_lo > w / 2.0 {
        // Corners sit on both sides of the longitude seam; a naive hull
        // would span nearly the whole panorama. Unwrap the low side by one
        // period, then bring the hull back if it landed past the seam.
        for u in &mut us {
            if *u < w / 2.0 {
                *u += w;
            }
        }
        let (lo, hi) = min_max(&us);
        u_lo = lo;
        u_hi = hi;
        if (u_lo + u_hi) / 2.0 >= w {
            u_lo -= w;
            u_hi -= w;
        }
    }

    let (v_lo, v_hi) = min_max(&vs);
    Ok([
        u_lo.clamp(0.0, w),
        v_lo.clamp(0.0, h),
        u_hi.clamp(0.0, w),
        v_hi.clamp(0.0, h),
    ])
}

fn min_max(values: &[f64; 4]) -> (f64, f64) {
    let mut lo = values[0];
    let mut hi = values[0];
    for &v in &values[1..] {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}
