/// Orthographic projection and the NDC to screen mapping
use nalgebra::{Matrix4, Point3};

/// Half width of the viewing volume the scene was laid out for
pub const DEFAULT_HALF_EXTENT: f64 = 10.0;

/// A fixed orthographic viewing volume, `[-h, h]` on every axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub half_extent: f64,
}

impl Projection {
    pub fn orthographic(half_extent: f64) -> Self {
        Self { half_extent }
    }

    /// The projection matrix, equivalent to `glOrtho(-h, h, -h, h, -h, h)`
    pub fn matrix(&self) -> Matrix4<f64> {
        let h = self.half_extent;
        Matrix4::new_orthographic(-h, h, -h, h, -h, h)
    }

    /// Map a point in normalised device coordinates to a `width x height`
    /// surface. Returns `(x, y, depth)`; y grows downwards and a smaller
    /// depth is nearer the viewer.
    pub fn to_screen(ndc: &Point3<f64>, width: usize, height: usize) -> (f64, f64, f64) {
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f64;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f64;
        (screen_x, screen_y, ndc.z)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::orthographic(DEFAULT_HALF_EXTENT)
    }
}
