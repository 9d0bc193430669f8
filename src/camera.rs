use std::fmt;

use macroquad::math::{vec2, Affine2, Vec2};

/// Base of the exponential zoom curve: one zoom step scales by 1%.
pub const ZOOM_BASE: f32 = 1.01;

/// World-to-screen camera with integer zoom steps and rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
    /// World-space offset of the view.
    pub position: Vec2,
    /// Zoom steps; the scale is `1.01^zoom_factor`.
    pub zoom_factor: i32,
    /// Rotation about the viewport center.
    pub rotation_degrees: i32,
}

impl Camera {
    /// Identity-framed camera for a viewport of `viewport` pixels.
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            position: Vec2::ZERO,
            zoom_factor: 0,
            rotation_degrees: 0,
        }
    }

    /// Point about which zoom and rotation are applied.
    pub fn viewport_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Uniform scale for the current zoom.
    pub fn scale(&self) -> f32 {
        ZOOM_BASE.powi(self.zoom_factor)
    }

    /// The forward transform. Applied to a point in order: shift by
    /// -position, shift by -center, scale, rotate, shift by +center.
    pub fn world_to_screen(&self) -> Affine2 {
        let center = self.viewport_center();
        let s = self.scale();
        let angle = (self.rotation_degrees as f32).to_radians();

        Affine2::from_translation(center)
            * Affine2::from_angle(angle)
            * Affine2::from_scale(vec2(s, s))
            * Affine2::from_translation(-center)
            * Affine2::from_translation(-self.position)
    }

    /// Maps a screen pixel back into world space. Both coordinates are NaN
    /// when the forward transform cannot be inverted.
    pub fn screen_to_world(&self, px: f32, py: f32) -> (f32, f32) {
        let m = self.world_to_screen();
        let det = m.matrix2.determinant();
        if det == 0.0 || !det.is_finite() {
            return (f32::NAN, f32::NAN);
        }
        let w = m.inverse().transform_point2(vec2(px, py));
        (w.x, w.y)
    }

    /// Shifts the view by a world-space offset.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position += vec2(dx, dy);
    }

    /// Adds `steps` zoom steps, saturating at the `i32` range.
    pub fn zoom_by(&mut self, steps: i32) {
        self.zoom_factor = self.zoom_factor.saturating_add(steps);
    }

    /// Adds `degrees`, kept within `0..360`.
    pub fn rotate_by(&mut self, degrees: i32) {
        self.rotation_degrees = (i64::from(self.rotation_degrees) + i64::from(degrees)).rem_euclid(360) as i32;
    }

    /// Back to identity framing: no offset, rotation or zoom.
    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.rotation_degrees = 0;
        self.zoom_factor = 0;
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CAM: ({:.1}, {:.1}), R: {}, S: {}",
            self.position.x, self.position.y, self.rotation_degrees, self.zoom_factor
        )
    }
}
