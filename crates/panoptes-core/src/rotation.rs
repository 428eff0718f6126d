//! Camera rotation matrices

/// Row-major 3×3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation([[f64; 3]; 3]);

impl Rotation {
    /// Identity rotation.
    pub fn identity() -> Self {
        Rotation([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation about the vertical (world Y) axis.
    pub fn yaw(degrees: f64) -> Self {
        let a = degrees.to_radians();
        Rotation([
            [a.cos(), 0.0, a.sin()],
            [0.0, 1.0, 0.0],
            [-a.sin(), 0.0, a.cos()],
        ])
    }

    /// Rotation about the horizontal (camera-local X) axis.
    pub fn pitch(degrees: f64) -> Self {
        let a = degrees.to_radians();
        Rotation([
            [1.0, 0.0, 0.0],
            [0.0, a.cos(), -a.sin()],
            [0.0, a.sin(), a.cos()],
        ])
    }

    /// Camera orientation for a view: yaw applied first, then pitch
    /// (`Rx(pitch) · Ry(yaw)`).
    pub fn from_yaw_pitch(yaw_deg: f64, pitch_deg: f64) -> Self {
        Rotation::pitch(pitch_deg).compose(&Rotation::yaw(yaw_deg))
    }

    /// Matrix product `self · other`.
    pub fn compose(&self, other: &Rotation) -> Rotation {
        let a = &self.0;
        let b = &other.0;
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Rotation(out)
    }

    /// Rotate a 3-vector.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: [f64; 3], b: [f64; 3]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_identity_orientation() {
        let r = Rotation::from_yaw_pitch(0.0, 0.0);
        assert_vec_eq(r.apply([0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // A quarter yaw turn sends the view axis (+Z) to +X.
        let r = Rotation::yaw(90.0);
        assert_vec_eq(r.apply([0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pitch_moves_view_axis_down() {
        // Positive pitch tilts the view axis below the equator (-Y).
        let v = Rotation::pitch(45.0).apply([0.0, 0.0, 1.0]);
        assert!((v[1] + (45f64).to_radians().sin()).abs() < 1e-12);
        assert!((v[2] - (45f64).to_radians().cos()).abs() < 1e-12);
    }

    #[test]
    fn test_yaw_then_pitch_order() {
        let composed = Rotation::from_yaw_pitch(90.0, 45.0);
        let manual = Rotation::pitch(45.0).compose(&Rotation::yaw(90.0));
        let v = [0.3, -0.4, 0.86];
        assert_vec_eq(composed.apply(v), manual.apply(v));
    }
}
