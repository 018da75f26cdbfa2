//! Camera rig: derives the per-frame camera pose from scroll progress, the
//! smoothed mouse position, and an optional fly-to target.
//!
//! The rig is a pure function of its inputs. All motion comes from
//! closed-form easing of those inputs, so it is replay-safe and trivially
//! testable.

use glam::{Vec2, Vec3};

use crate::constants::{
    BASE_PAN, BASE_TILT, ENTRANCE_Y, ENTRANCE_Z, FLY_DAMPING, FLY_STANDOFF, INSIDE_Y, INSIDE_Z,
};

/// Camera pose derived each frame; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Yaw about the camera's Y axis, radians.
    pub pan: f32,
    /// Pitch about the once-yawed X axis, radians.
    pub tilt: f32,
}

/// Request to dolly the camera toward a module card.
#[derive(Clone, Copy, Debug)]
pub struct FlyTo {
    pub target: Vec3,
    /// 0 = at the scroll-driven pose, 1 = settled in front of the target.
    pub progress: f32,
}

/// Rig tuning. `parallax_enabled` is the single capability switch for
/// reduced-motion clients; nothing downstream re-detects the platform.
#[derive(Clone, Copy, Debug)]
pub struct RigConfig {
    pub entrance_y: f32,
    pub entrance_z: f32,
    pub inside_y: f32,
    pub inside_z: f32,
    pub base_pan: f32,
    pub base_tilt: f32,
    pub fly_damping: f32,
    pub fly_standoff: f32,
    pub parallax_enabled: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            entrance_y: ENTRANCE_Y,
            entrance_z: ENTRANCE_Z,
            inside_y: INSIDE_Y,
            inside_z: INSIDE_Z,
            base_pan: BASE_PAN,
            base_tilt: BASE_TILT,
            fly_damping: FLY_DAMPING,
            fly_standoff: FLY_STANDOFF,
            parallax_enabled: true,
        }
    }
}

/// Half-cosine zoom ease: camera motion starts and ends at zero velocity.
#[inline]
pub fn ease_zoom(progress: f32) -> f32 {
    (1.0 - (progress.min(1.0) * std::f32::consts::PI).cos()) / 2.0
}

/// Hermite smoothstep, used by the fly-to blend.
#[inline]
pub fn smoothstep(p: f32) -> f32 {
    p * p * (3.0 - 2.0 * p)
}

/// Ease-out cubic, used by the module zoom animation.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Derive the camera pose for one frame.
pub fn camera_pose(
    scroll_progress: f32,
    mouse: Vec2,
    fly: Option<FlyTo>,
    config: &RigConfig,
) -> CameraPose {
    let ease = ease_zoom(scroll_progress.clamp(0.0, 1.0));
    let mut x = 0.0;
    let y = lerp(config.entrance_y, config.inside_y, ease);
    let mut z = lerp(config.entrance_z, config.inside_z, ease);

    // Parallax sensitivity is zero at the entrance and grows with the zoom,
    // so the very first frames never jitter.
    let mut parallax = if config.parallax_enabled { ease } else { 0.0 };

    if let Some(fly) = fly {
        let p = fly.progress.clamp(0.0, 1.0);
        if p > 0.0 {
            let t = smoothstep(p);
            x = lerp(x, fly.target.x * config.fly_damping, t);
            z = lerp(z, fly.target.z - config.fly_standoff, t);
            // Mouse wobble is fully suppressed once the card is reached.
            parallax *= 1.0 - p;
        }
    }
    // Y stays at the scroll-driven height during a fly-to: the camera
    // dollies forward and sideways, it never cranes up or down.

    let pan = (mouse.x - 0.5) * config.base_pan * parallax * 2.0;
    let tilt = (mouse.y - 0.5) * config.base_tilt * parallax * 2.0;

    CameraPose {
        position: Vec3::new(x, y, z),
        pan,
        tilt,
    }
}
