//! Overlay compositor contract: aligning the HTML content region with the
//! projected card panel.
//!
//! The content is real DOM scaled down with a CSS transform. Transforms do
//! not shrink layout flow, so the layout height the unscaled content still
//! occupies has to be pulled back with a negative bottom margin.

use crate::projection::ProjectedPanel;

/// Intrinsic metrics of the HTML content being composited.
#[derive(Clone, Copy, Debug)]
pub struct ContentMetrics {
    /// Unscaled CSS width the content is laid out at.
    pub base_width: f32,
    /// `scrollHeight` of the unscaled content.
    pub scroll_height: f32,
}

/// CSS-ready placement for the overlay element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayLayout {
    pub left: f32,
    pub top: f32,
    pub scale: f32,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    /// Negative bottom margin compensating the layout height left behind by
    /// the transform scale; zero when the content is not shrunk.
    pub margin_bottom: f32,
}

pub fn overlay_layout(panel: &ProjectedPanel, content: &ContentMetrics) -> OverlayLayout {
    let scale = if content.base_width > 0.0 {
        panel.width / content.base_width
    } else {
        0.0
    };
    let effective_height = content.scroll_height * scale;
    let shrink = content.scroll_height - effective_height;
    OverlayLayout {
        left: panel.x,
        top: panel.y,
        scale,
        rotate_x_deg: panel.rotate_x_deg,
        rotate_y_deg: panel.rotate_y_deg,
        margin_bottom: if shrink > 0.0 { -shrink } else { 0.0 },
    }
}
