use glam::Vec2;
use web_sys as web;

/// Raw and smoothed normalized mouse position. The smoothing loop owns the
/// interpolation; everything else reads `smooth`.
#[derive(Clone, Copy, Debug)]
pub struct SmoothedMouse {
    pub raw: Vec2,
    pub smooth: Vec2,
}

impl Default for SmoothedMouse {
    fn default() -> Self {
        let center = Vec2::splat(0.5);
        Self {
            raw: center,
            smooth: center,
        }
    }
}

impl SmoothedMouse {
    /// One smoothing tick: exponential approach toward the raw position.
    #[inline]
    pub fn step(&mut self, alpha: f32) {
        self.smooth += (self.raw - self.smooth) * alpha;
    }
}

/// Normalized [0,1]² viewport position of a mouse event; drives the camera
/// parallax.
#[inline]
pub fn mouse_viewport_uv(ev: &web::MouseEvent, window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0);
    Vec2::new(
        (ev.client_x() as f64 / w).clamp(0.0, 1.0) as f32,
        (ev.client_y() as f64 / h).clamp(0.0, 1.0) as f32,
    )
}

/// Mouse event position in canvas backing-store pixels, the space the card
/// bounds live in.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f64 - rect.left();
    let y_css = ev.client_y() as f64 - rect.top();
    let sx = (x_css / rect.width().max(1.0)) * canvas.width() as f64;
    let sy = (y_css / rect.height().max(1.0)) * canvas.height() as f64;
    Vec2::new(sx as f32, sy as f32)
}

/// Normalized progress through the fixed-height entrance zone.
#[inline]
pub fn scroll_progress(window: &web::Window, zone_px: f64) -> f32 {
    let y = window.scroll_y().unwrap_or(0.0);
    (y / zone_px).clamp(0.0, 1.0) as f32
}
