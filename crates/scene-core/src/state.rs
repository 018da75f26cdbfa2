//! Module selection state machine: which card is hovered or active, the
//! zoom animation between the floating and zoomed views, and the coarse
//! view mode derived from scroll progress.

use glam::Vec3;
use instant::Instant;
use std::time::Duration;

use crate::camera::{ease_out_cubic, FlyTo};
use crate::constants::{FLOAT_THRESHOLD, ZOOM_ANIM_MS};
use crate::modules::{ModuleRegistry, Page};

/// Coarse view mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Room entrance; no card is interactable.
    Diorama,
    /// Scrolled into the room; cards are hoverable and clickable.
    Floating,
    /// A module is active; the camera is flying toward it or settled.
    Zoomed,
}

/// Scrolling below the threshold always wins, even while a zoom animation
/// is in flight: backing out of the room forcibly exits the zoomed view.
#[inline]
pub fn derive_view_state(scroll_progress: f32, active_module: Option<&str>) -> ViewState {
    if scroll_progress < FLOAT_THRESHOLD {
        ViewState::Diorama
    } else if active_module.is_some() {
        ViewState::Zoomed
    } else {
        ViewState::Floating
    }
}

/// Wall-clock zoom animation toward 0 or 1. Progress is evaluated from
/// elapsed time with a closed-form ease, never from per-tick increments, so
/// frame-rate variance cannot change the duration.
#[derive(Clone, Copy, Debug)]
pub struct ZoomAnimation {
    from: f32,
    target: f32,
    started_at: Instant,
}

impl ZoomAnimation {
    /// An animation already at rest at `value`.
    pub fn settled(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            target: value,
            started_at: now,
        }
    }

    /// Restart toward `target` from the current value. An in-flight
    /// animation toward the opposite end is cancelled and replaced, so the
    /// progress never jumps.
    pub fn retarget(&mut self, target: f32, now: Instant) {
        self.from = self.value_at(now);
        self.target = target;
        self.started_at = now;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let duration = Duration::from_millis(ZOOM_ANIM_MS);
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= duration {
            return self.target;
        }
        let t = elapsed.as_secs_f32() / duration.as_secs_f32();
        self.from + (self.target - self.from) * ease_out_cubic(t)
    }
}

/// The mutable state machine instance. One per scene; an explicit value
/// passed into each tick rather than module-level shared state.
#[derive(Clone, Debug)]
pub struct ModuleManager {
    page: Page,
    active: Option<String>,
    hovered: Option<String>,
    zoom: ZoomAnimation,
    /// Last fly-to target, held through the zoom-out so the camera returns
    /// along the same path after a deselect.
    fly_target: Option<Vec3>,
}

impl ModuleManager {
    pub fn new(page: Page, now: Instant) -> Self {
        Self {
            page,
            active: None,
            hovered: None,
            zoom: ZoomAnimation::settled(0.0, now),
            fly_target: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn active_module(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn hovered_module(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn view_state(&self, scroll_progress: f32) -> ViewState {
        derive_view_state(scroll_progress, self.active.as_deref())
    }

    pub fn zoom_progress(&self, now: Instant) -> f32 {
        self.zoom.value_at(now)
    }

    /// Activate a module card and start the zoom-in animation. Ids missing
    /// from the registry, or registered on another page, are inert.
    pub fn select_module(&mut self, id: &str, registry: &ModuleRegistry, now: Instant) -> bool {
        let Some(meta) = registry.get(id).filter(|m| m.page == self.page) else {
            log::warn!("[modules] select ignored: no module `{id}` on {:?}", self.page);
            return false;
        };
        self.active = Some(meta.id.clone());
        self.fly_target = Some(meta.base_position);
        self.zoom.retarget(1.0, now);
        true
    }

    /// Clear the active module and start the zoom-out animation.
    pub fn deselect_module(&mut self, now: Instant) {
        if self.active.take().is_some() {
            self.zoom.retarget(0.0, now);
        }
    }

    /// Hover routing; effective only while floating. Callers may invoke
    /// this unconditionally, it does not change state in other views.
    pub fn hover_module(&mut self, id: Option<&str>, scroll_progress: f32) {
        if self.view_state(scroll_progress) != ViewState::Floating {
            return;
        }
        self.hovered = id.map(str::to_owned);
    }

    /// Per-frame upkeep: the hover mark only exists in the floating view,
    /// and the fly-to target is released once the zoom-out has settled.
    pub fn sync(&mut self, scroll_progress: f32, now: Instant) {
        if self.view_state(scroll_progress) != ViewState::Floating {
            self.hovered = None;
        }
        if self.active.is_none() && self.zoom.value_at(now) <= 0.0 {
            self.fly_target = None;
        }
    }

    /// Camera rig input for the current selection, while any fly motion
    /// remains.
    pub fn fly(&self, now: Instant) -> Option<FlyTo> {
        let target = self.fly_target?;
        let progress = self.zoom.value_at(now);
        (progress > 0.0).then_some(FlyTo { target, progress })
    }

    /// Page changes are a hard reset, not a transition: selection, hover,
    /// and zoom all return to their initial values with no animation.
    pub fn set_page(&mut self, page: Page, now: Instant) {
        if page == self.page {
            return;
        }
        self.page = page;
        self.active = None;
        self.hovered = None;
        self.fly_target = None;
        self.zoom = ZoomAnimation::settled(0.0, now);
    }
}
