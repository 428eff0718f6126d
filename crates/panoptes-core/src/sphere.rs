//! Sphere and pixel coordinate conversions

use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::view::ViewSpec;

/// Unit direction through a view pixel, in camera space.
///
/// `(x, y)` follows raster conventions: origin top-left, x right, y down.
/// The view center looks along +Z.
pub fn pixel_ray(spec: &ViewSpec, x: f64, y: f64) -> Result<[f64; 3], GeometryError> {
    let nx = (x / spec.width as f64) * 2.0 - 1.0;
    let ny = 1.0 - (y / spec.height as f64) * 2.0;
    normalize([nx, ny, spec.focal()]).ok_or(GeometryError::DegenerateDirection { x, y })
}

/// Longitude and latitude of a world-space unit direction, in radians.
///
/// Longitude is measured from +Z toward +X in (-pi, pi]; latitude from the
/// equator toward +Y. The asin input is clamped against floating-point
/// overshoot.
pub fn direction_to_lonlat(dir: [f64; 3]) -> (f64, f64) {
    let lon = dir[0].atan2(dir[2]);
    let lat = dir[1].clamp(-1.0, 1.0).asin();
    (lon, lat)
}

/// Equirectangular pixel position of a longitude/latitude pair.
pub fn lonlat_to_pixel(lon: f64, lat: f64, w_eq: u32, h_eq: u32) -> (f64, f64) {
    let u = (lon / (2.0 * PI) + 0.5) * w_eq as f64;
    let v = (0.5 - lat / PI) * h_eq as f64;
    (u, v)
}

fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return None;
    }
    Some([v[0] / norm, v[1] / norm, v[2] / norm])
}
