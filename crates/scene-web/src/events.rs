//! Input wiring and teardown. Listener closures are retained here rather
//! than leaked with `Closure::forget`, so disposing a scene actually
//! removes everything it added to the window and canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use scene_core::{hit_test, ViewState};

use crate::constants::SCROLL_ZONE_PX;
use crate::dom;
use crate::frame::FrameContext;
use crate::input;

/// Collaborator callbacks fired by the hit-test routing.
#[derive(Default)]
pub struct SceneCallbacks {
    pub on_click: Option<js_sys::Function>,
    pub on_hover: Option<js_sys::Function>,
}

/// Everything needed to undo the wiring.
pub struct Teardown {
    disposed: Rc<Cell<bool>>,
    removers: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub fn new(disposed: Rc<Cell<bool>>) -> Self {
        Self {
            disposed,
            removers: Vec::new(),
        }
    }

    pub fn defer(&mut self, remove: impl FnOnce() + 'static) {
        self.removers.push(Box::new(remove));
    }

    /// Idempotent. Flips the disposed flag first so any frame callback that
    /// was already scheduled becomes a no-op, then unhooks every listener.
    pub fn dispose(&mut self) {
        if self.disposed.replace(true) {
            return;
        }
        for remove in self.removers.drain(..) {
            remove();
        }
        log::info!("[scene] disposed");
    }
}

// Attach a listener and park its closure in the teardown for later removal.
fn listen<T: ?Sized + 'static>(
    teardown: &mut Teardown,
    target: &web::EventTarget,
    kind: &'static str,
    closure: Closure<T>,
) {
    let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    let target = target.clone();
    teardown.defer(move || {
        let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    });
}

// Callbacks run with no RefCell borrow held: a collaborator may re-enter
// `SceneApp` synchronously from inside its handler.
fn emit_module_event(callback: Option<js_sys::Function>, id: Option<&str>) {
    if let Some(f) = callback {
        let arg = match id {
            Some(s) => wasm_bindgen::JsValue::from_str(s),
            None => wasm_bindgen::JsValue::NULL,
        };
        if let Err(e) = f.call1(&wasm_bindgen::JsValue::NULL, &arg) {
            log::warn!("[events] module callback failed: {e:?}");
        }
    }
}

fn set_cursor(canvas: &web::HtmlCanvasElement, pointer: bool) {
    let _ = canvas
        .style()
        .set_property("cursor", if pointer { "pointer" } else { "default" });
}

/// Wire pointer, keyboard, and resize handlers for one scene instance.
pub fn wire(
    ctx: Rc<RefCell<FrameContext>>,
    callbacks: Rc<RefCell<SceneCallbacks>>,
    teardown: &mut Teardown,
) {
    let Some(window) = web::window() else {
        log::error!("[events] no window; input wiring skipped");
        return;
    };
    let canvas = ctx.borrow().canvas.clone();
    let mouse = ctx.borrow().mouse.clone();
    let bounds = ctx.borrow().shared_bounds.clone();

    // pointermove: parallax input, plus hover routing while floating
    {
        let ctx_m = ctx.clone();
        let callbacks_m = callbacks.clone();
        let canvas_m = canvas.clone();
        let mouse_m = mouse.clone();
        let bounds_m = bounds.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let Some(window) = web::window() else { return };
            mouse_m.borrow_mut().raw = input::mouse_viewport_uv(&ev, &window);

            let scroll = input::scroll_progress(&window, SCROLL_ZONE_PX);
            let cursor = input::pointer_canvas_px(&ev, &canvas_m);
            let mut changed = None;
            {
                let mut ctx = ctx_m.borrow_mut();
                // Outside the floating view the pointer belongs to the page
                // or the zoomed overlay content; cards take no events.
                if ctx.manager.view_state(scroll) != ViewState::Floating {
                    return;
                }
                let hit = hit_test(cursor, &bounds_m.borrow()).map(str::to_owned);
                if hit.as_deref() != ctx.manager.hovered_module() {
                    changed = Some(hit.clone());
                }
                ctx.manager.hover_module(hit.as_deref(), scroll);
            }
            if let Some(hit) = changed {
                set_cursor(&canvas_m, hit.is_some());
                let cb = callbacks_m.borrow().on_hover.clone();
                emit_module_event(cb, hit.as_deref());
            }
        }) as Box<dyn FnMut(_)>);
        listen(teardown, &window, "pointermove", closure);
    }

    // click: open the card under the cursor while floating
    {
        let ctx_c = ctx.clone();
        let callbacks_c = callbacks.clone();
        let canvas_c = canvas.clone();
        let bounds_c = bounds.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let Some(window) = web::window() else { return };
            let scroll = input::scroll_progress(&window, SCROLL_ZONE_PX);
            let cursor = input::pointer_canvas_px(&ev, &canvas_c);
            let mut selected = None;
            {
                let ctx = &mut *ctx_c.borrow_mut();
                if ctx.manager.view_state(scroll) != ViewState::Floating {
                    return;
                }
                if let Some(id) = hit_test(cursor, &bounds_c.borrow()).map(str::to_owned) {
                    if ctx.manager.select_module(&id, &ctx.registry, Instant::now()) {
                        selected = Some(id);
                    }
                }
            }
            if let Some(id) = selected {
                log::info!("[modules] open `{id}`");
                let cb = callbacks_c.borrow().on_click.clone();
                emit_module_event(cb, Some(&id));
            }
        }) as Box<dyn FnMut(_)>);
        listen(teardown, &canvas, "click", closure);
    }

    // Escape backs out of the zoomed view; the overlay's own close button
    // goes through `SceneApp::deselect`.
    {
        let ctx_k = ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            if ev.key() == "Escape" {
                ctx_k.borrow_mut().manager.deselect_module(Instant::now());
            }
        }) as Box<dyn FnMut(_)>);
        listen(teardown, &window, "keydown", closure);
    }

    // resize: keep the canvas backing store at CSS size * devicePixelRatio
    {
        let canvas_r = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_r);
        }) as Box<dyn FnMut()>);
        listen(teardown, &window, "resize", closure);
    }
}
