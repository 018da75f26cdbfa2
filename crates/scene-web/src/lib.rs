#![cfg(target_arch = "wasm32")]
//! Web front-end: binds the scene core to a Canvas2D surface, the HTML
//! module overlay, and window input, and exposes the JS-facing `SceneApp`
//! handle the site uses to drive pages, selection, and teardown.

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use scene_core::{CardBounds, ModuleManager, ModuleMetadata, ModuleRegistry, Page, SceneConfig};

use crate::constants::{CANVAS_ID, FRAME_IMAGE_ID, OVERLAY_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[scene] module loaded");
    Ok(())
}

// The cards the marketing pages fly to. Positions are fixed for the life of
// a page view; only the page filter changes at runtime.
fn default_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    let modules = [
        ("armory", "The Armory", "swords", "armory-panel", Page::Home, Vec3::new(-3.4, -0.2, 10.5)),
        ("gallery", "Gallery", "frame", "gallery-panel", Page::Home, Vec3::new(0.0, -0.8, 11.5)),
        ("workshop", "Workshop", "anvil", "workshop-panel", Page::Home, Vec3::new(3.4, -0.2, 10.5)),
        ("sessions", "Group Sessions", "banner", "sessions-panel", Page::Experiences, Vec3::new(-2.0, -0.4, 10.8)),
        ("trials", "Open Trials", "torch", "trials-panel", Page::Experiences, Vec3::new(2.0, -0.4, 10.8)),
        ("visit", "Plan Your Visit", "map", "visit-panel", Page::Booking, Vec3::new(-1.8, -0.3, 10.8)),
        ("reserve", "Reserve a Session", "calendar", "reserve-panel", Page::Booking, Vec3::new(1.8, -0.3, 10.8)),
    ];
    for (id, title, icon, content, page, base_position) in modules {
        let module = ModuleMetadata {
            id: id.to_owned(),
            title: title.to_owned(),
            icon: icon.to_owned(),
            content: content.to_owned(),
            page,
            base_position,
        };
        if let Err(e) = registry.register(module) {
            log::error!("[modules] {e}");
        }
    }
    registry
}

/// One scene instance bound to a canvas. Constructing it starts the render
/// and mouse-smoothing loops; `dispose` (or dropping the JS handle) stops
/// them and removes every listener.
#[wasm_bindgen]
pub struct SceneApp {
    ctx: Rc<RefCell<frame::FrameContext>>,
    callbacks: Rc<RefCell<events::SceneCallbacks>>,
    teardown: RefCell<events::Teardown>,
}

#[wasm_bindgen]
impl SceneApp {
    /// Bind to the canvas with the given element id (default
    /// `scene-canvas`) and start rendering.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>) -> Result<SceneApp, JsValue> {
        let id = canvas_id.unwrap_or_else(|| CANVAS_ID.to_owned());
        Self::init(&id).map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Switch the active tab; unknown identifiers are ignored. A page
    /// change hard-resets selection, hover, and zoom.
    pub fn set_page(&self, tab: &str) {
        let Some(page) = Page::parse(tab) else {
            log::warn!("[scene] unknown tab `{tab}`");
            return;
        };
        self.ctx.borrow_mut().manager.set_page(page, Instant::now());
    }

    /// Programmatic selection, e.g. deep links. Same validation as a click.
    pub fn select_module(&self, id: &str) {
        let ctx = &mut *self.ctx.borrow_mut();
        ctx.manager.select_module(id, &ctx.registry, Instant::now());
    }

    /// Close the active module; used by the overlay's close button.
    pub fn deselect(&self) {
        self.ctx.borrow_mut().manager.deselect_module(Instant::now());
    }

    /// Register the collaborator callback fired when a card is clicked.
    pub fn on_module_click(&self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().on_click = Some(callback);
    }

    /// Register the collaborator callback fired when the hovered card
    /// changes (`null` when the cursor leaves all cards).
    pub fn on_module_hover(&self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().on_hover = Some(callback);
    }

    /// Stop both loops and remove every listener. Idempotent; a frame
    /// callback already scheduled becomes a no-op.
    pub fn dispose(&self) {
        self.teardown.borrow_mut().dispose();
    }
}

impl SceneApp {
    fn init(canvas_id: &str) -> anyhow::Result<SceneApp> {
        let document =
            dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
        let canvas = dom::canvas_by_id(&document, canvas_id)?;
        dom::sync_canvas_backing_size(&canvas);
        let ctx2d = dom::context_2d(&canvas)?;

        let frame_image = document
            .get_element_by_id(FRAME_IMAGE_ID)
            .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok());
        let painter = render::Painter::new(ctx2d, frame_image);
        let overlay = overlay::OverlayElement::find(&document, OVERLAY_ID);

        let mut config = SceneConfig::default();
        config.rig.parallax_enabled = !dom::prefers_reduced_motion();

        let now = Instant::now();
        let ctx = Rc::new(RefCell::new(frame::FrameContext {
            manager: ModuleManager::new(Page::Home, now),
            registry: default_registry(),
            config,
            canvas,
            painter,
            overlay,
            mouse: Rc::new(RefCell::new(input::SmoothedMouse::default())),
            shared_bounds: Rc::new(RefCell::new(CardBounds::new())),
        }));

        let disposed = Rc::new(Cell::new(false));
        let callbacks = Rc::new(RefCell::new(events::SceneCallbacks::default()));
        let mut teardown = events::Teardown::new(disposed.clone());
        events::wire(ctx.clone(), callbacks.clone(), &mut teardown);

        let render_raf = frame::start_render_loop(ctx.clone(), disposed.clone());
        let mouse_raf = frame::start_mouse_loop(ctx.borrow().mouse.clone(), disposed);
        teardown.defer(move || {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(render_raf.get());
                let _ = w.cancel_animation_frame(mouse_raf.get());
            }
        });

        log::info!("[scene] started on #{canvas_id}");
        Ok(SceneApp {
            ctx,
            callbacks,
            teardown: RefCell::new(teardown),
        })
    }
}

impl Drop for SceneApp {
    fn drop(&mut self) {
        self.teardown.borrow_mut().dispose();
    }
}
