//! Cooperative frame loops. One render tick runs to completion (read
//! inputs → camera → project → paint → publish card bounds) before the next
//! animation frame is scheduled; mouse smoothing runs as its own loop. Both
//! are guarded by a shared disposed flag so a callback scheduled before
//! teardown is a no-op afterwards.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use scene_core::{
    render_frame, CardBounds, FrameInput, ModuleManager, ModuleRegistry, SceneConfig, Surface,
};

use crate::constants::{MOUSE_SMOOTHING_ALPHA, SCROLL_ZONE_PX};
use crate::input::{self, SmoothedMouse};
use crate::overlay::OverlayElement;
use crate::render::Painter;

/// Everything one scene instance owns. An explicit value, not module-level
/// state, so independent scenes can coexist.
pub struct FrameContext {
    pub manager: ModuleManager,
    pub registry: ModuleRegistry,
    pub config: SceneConfig,

    pub canvas: web::HtmlCanvasElement,
    pub painter: Painter,
    pub overlay: OverlayElement,

    pub mouse: Rc<RefCell<SmoothedMouse>>,
    /// Bounds of the last completed frame, shared with the pointer
    /// handlers. Only replaced after a tick finishes, so a skipped frame
    /// leaves the previous bounds in place.
    pub shared_bounds: Rc<RefCell<CardBounds>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let Some(window) = web::window() else { return };
        let scroll = input::scroll_progress(&window, SCROLL_ZONE_PX);
        let mouse = self.mouse.borrow().smooth;
        // Surface dimensions are read at call time, never cached, so a
        // resize is self-correcting on the very next frame.
        let surface = Surface {
            width: self.canvas.width() as f32,
            height: self.canvas.height() as f32,
        };
        let frame = render_frame(
            &FrameInput {
                scroll_progress: scroll,
                mouse,
                surface,
                now: Instant::now(),
            },
            &mut self.manager,
            &self.registry,
            &self.config,
        );
        self.painter.paint(&frame, surface);
        self.overlay.apply(frame.overlay.as_ref());
        *self.shared_bounds.borrow_mut() = frame.bounds;
    }
}

/// Start the render loop. Returns the cell holding the most recent
/// animation-frame request id so teardown can cancel the pending one.
pub fn start_render_loop(
    ctx: Rc<RefCell<FrameContext>>,
    disposed: Rc<Cell<bool>>,
) -> Rc<Cell<i32>> {
    let raf_id = Rc::new(Cell::new(0));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_inner = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if disposed.get() {
            return;
        }
        ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                raf_inner.set(id);
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(id);
        }
    }
    raf_id
}

/// Independent smoothing loop: one exponential step toward the raw cursor
/// per animation frame. The camera rig only ever sees the smoothed value.
pub fn start_mouse_loop(
    mouse: Rc<RefCell<SmoothedMouse>>,
    disposed: Rc<Cell<bool>>,
) -> Rc<Cell<i32>> {
    let raf_id = Rc::new(Cell::new(0));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_inner = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if disposed.get() {
            return;
        }
        mouse.borrow_mut().step(MOUSE_SMOOTHING_ALPHA);
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                raf_inner.set(id);
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(id);
        }
    }
    raf_id
}
