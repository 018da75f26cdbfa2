//! Positions and scales the HTML overlay element over the active module's
//! projected panel, and hides it whenever the panel is not visible.

use wasm_bindgen::JsCast;
use web_sys as web;

use scene_core::{overlay_layout, ActiveModulePanel, ContentMetrics};

use crate::constants::OVERLAY_BASE_WIDTH_PX;

pub struct OverlayElement {
    el: Option<web::HtmlElement>,
}

impl OverlayElement {
    pub fn find(document: &web::Document, element_id: &str) -> Self {
        let el = document
            .get_element_by_id(element_id)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
        if el.is_none() {
            log::warn!("[overlay] missing #{element_id}; module content will not be composited");
        }
        Self { el }
    }

    /// Apply one frame's placement. `None` hides the element entirely; a
    /// panel cut by the near plane must never show a collapsed shape.
    pub fn apply(&self, overlay: Option<&ActiveModulePanel>) {
        let Some(el) = &self.el else { return };
        let style = el.style();
        let Some(overlay) = overlay else {
            let _ = style.set_property("display", "none");
            return;
        };

        // scrollHeight is read live: content height differs per module.
        let content = ContentMetrics {
            base_width: OVERLAY_BASE_WIDTH_PX,
            scroll_height: el.scroll_height() as f32,
        };
        let layout = overlay_layout(&overlay.panel, &content);

        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{:.1}px", layout.left));
        let _ = style.set_property("top", &format!("{:.1}px", layout.top));
        let _ = style.set_property(
            "transform",
            &format!(
                "translate(-50%, -50%) rotateX({:.2}deg) rotateY({:.2}deg) scale({:.4})",
                layout.rotate_x_deg, layout.rotate_y_deg, layout.scale
            ),
        );
        // Transform scale leaves the unscaled layout height in the flow;
        // pull it back so the page below does not gap open.
        let _ = style.set_property("margin-bottom", &format!("{:.1}px", layout.margin_bottom));
    }
}
