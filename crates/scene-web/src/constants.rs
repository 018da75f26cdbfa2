// DOM ids the site template provides
pub const CANVAS_ID: &str = "scene-canvas";
pub const OVERLAY_ID: &str = "module-overlay";
pub const FRAME_IMAGE_ID: &str = "room-frame-image";

// Scroll transition zone height (CSS px) mapped to progress 0..1
pub const SCROLL_ZONE_PX: f64 = 2400.0;

// Per-tick exponential approach of the smoothed mouse toward the cursor
pub const MOUSE_SMOOTHING_ALPHA: f32 = 0.12;

// Unscaled CSS width the overlay content is laid out at
pub const OVERLAY_BASE_WIDTH_PX: f32 = 520.0;
