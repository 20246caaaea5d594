//! Scale and translation between canvas (screen) space and diagram (world) space.
//!
//! Screen points are relative to the canvas' top-left corner. The mapping is
//!
//! ```text
//! screen = (world + translate) * scale
//! world  = screen / scale - translate
//! ```
//!
//! and is applied exactly once per pointer event.

use tracing::debug;

use crate::model::Point;

pub const DEFAULT_ZOOM_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    scale: f32,
    translate_x: f32,
    translate_y: f32,
    width: f32,
    height: f32,
    zoom_step: f32,
    min_scale: f32,
    reset_translation: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            width: 0.0,
            height: 0.0,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_scale: 0.0,
            reset_translation: false,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Zoom increment and floor. A step that is not a positive finite number
    /// falls back to [`DEFAULT_ZOOM_STEP`]; a negative or non-finite floor
    /// becomes 0.
    pub fn with_zoom_limits(mut self, zoom_step: f32, min_scale: f32) -> Self {
        self.zoom_step = if zoom_step.is_finite() && zoom_step > 0.0 {
            zoom_step
        } else {
            DEFAULT_ZOOM_STEP
        };
        self.min_scale = if min_scale.is_finite() {
            min_scale.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Whether [`Viewport::reset`] also returns the translation to the origin.
    pub fn with_reset_translation(mut self, reset_translation: bool) -> Self {
        self.reset_translation = reset_translation;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> (f32, f32) {
        (self.translate_x, self.translate_y)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Zoom as shown in the zoom control, e.g. `130` for a scale of 1.3.
    pub fn zoom_percent(&self) -> i32 {
        // repeated f32 steps can land just under a whole percent (129.99998)
        (self.scale * 100.0 + 1e-3).floor() as i32
    }

    /// At scale 0 every world point lands on the screen origin and the inverse
    /// mapping is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.scale <= f32::EPSILON
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() {
            self.width = width.max(0.0);
            self.height = height.max(0.0);
        }
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(
            (p.x + self.translate_x) * self.scale,
            (p.y + self.translate_y) * self.scale,
        )
    }

    /// Inverse of [`Viewport::world_to_screen`]. A degenerate viewport maps
    /// every screen point to `-translate`.
    pub fn screen_to_world(&self, p: Point) -> Point {
        if self.is_degenerate() {
            return Point::new(-self.translate_x, -self.translate_y);
        }
        Point::new(
            p.x / self.scale - self.translate_x,
            p.y / self.scale - self.translate_y,
        )
    }

    pub fn zoom_in(&mut self) {
        self.scale += self.zoom_step;
        debug!(scale = self.scale, "zoom in");
    }

    pub fn zoom_out(&mut self) {
        // never raises the scale, even when the floor sits above it
        let next = self.scale - self.zoom_step;
        self.scale = next.max(self.min_scale).min(self.scale);
        debug!(scale = self.scale, "zoom out");
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        if self.reset_translation {
            self.translate_x = 0.0;
            self.translate_y = 0.0;
        }
        debug!("zoom reset");
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.translate_x += dx;
            self.translate_y += dy;
        }
    }
}
