// Camera rig: easing boundaries, parallax gating, and fly-to blending.

use glam::{Vec2, Vec3};
use scene_core::{
    camera_pose, ease_out_cubic, ease_zoom, smoothstep, FlyTo, RigConfig, BASE_PAN, ENTRANCE_Y,
    ENTRANCE_Z, FLY_DAMPING, FLY_STANDOFF, INSIDE_Y, INSIDE_Z,
};

const EPS: f32 = 1e-5;

#[test]
fn ease_zoom_boundaries() {
    assert!(ease_zoom(0.0).abs() < EPS);
    assert!((ease_zoom(1.0) - 1.0).abs() < EPS);
    // values past 1 are pinned, not extrapolated
    assert!((ease_zoom(1.7) - 1.0).abs() < EPS);
}

#[test]
fn ease_zoom_is_monotonic() {
    let mut prev = ease_zoom(0.0);
    for i in 1..=100 {
        let next = ease_zoom(i as f32 / 100.0);
        assert!(
            next >= prev,
            "ease_zoom decreased between {} and {}",
            (i - 1) as f32 / 100.0,
            i as f32 / 100.0
        );
        prev = next;
    }
}

#[test]
fn easing_helpers_hit_their_endpoints() {
    assert!(smoothstep(0.0).abs() < EPS);
    assert!((smoothstep(1.0) - 1.0).abs() < EPS);
    assert!((smoothstep(0.5) - 0.5).abs() < EPS);
    assert!(ease_out_cubic(0.0).abs() < EPS);
    assert!((ease_out_cubic(1.0) - 1.0).abs() < EPS);
}

#[test]
fn entrance_pose_has_no_parallax() {
    // parallax sensitivity is zero at the entrance, so an off-center mouse
    // cannot jitter the very first frames
    let pose = camera_pose(0.0, Vec2::new(0.95, 0.1), None, &RigConfig::default());
    assert!((pose.position.y - ENTRANCE_Y).abs() < EPS);
    assert!((pose.position.z - ENTRANCE_Z).abs() < EPS);
    assert!(pose.position.x.abs() < EPS);
    assert!(pose.pan.abs() < EPS);
    assert!(pose.tilt.abs() < EPS);
}

#[test]
fn fully_scrolled_pose_reaches_the_inside_of_the_room() {
    let pose = camera_pose(1.0, Vec2::splat(0.5), None, &RigConfig::default());
    assert!((pose.position.y - INSIDE_Y).abs() < EPS);
    assert!((pose.position.z - INSIDE_Z).abs() < EPS);
    // centered mouse means no pan even at full sensitivity
    assert!(pose.pan.abs() < EPS);
}

#[test]
fn parallax_scales_with_mouse_offset_at_full_zoom() {
    let pose = camera_pose(1.0, Vec2::new(1.0, 0.5), None, &RigConfig::default());
    assert!((pose.pan - BASE_PAN).abs() < EPS, "pan = {}", pose.pan);

    let left = camera_pose(1.0, Vec2::new(0.0, 0.5), None, &RigConfig::default());
    assert!((left.pan + BASE_PAN).abs() < EPS);
}

#[test]
fn parallax_flag_disables_mouse_response() {
    let config = RigConfig {
        parallax_enabled: false,
        ..RigConfig::default()
    };
    let pose = camera_pose(1.0, Vec2::new(1.0, 1.0), None, &config);
    assert!(pose.pan.abs() < EPS);
    assert!(pose.tilt.abs() < EPS);
}

#[test]
fn completed_fly_to_parks_in_front_of_the_target() {
    let target = Vec3::new(3.4, -0.2, 10.5);
    let fly = FlyTo {
        target,
        progress: 1.0,
    };
    let pose = camera_pose(1.0, Vec2::new(0.9, 0.9), Some(fly), &RigConfig::default());
    assert!((pose.position.x - target.x * FLY_DAMPING).abs() < EPS);
    assert!((pose.position.z - (target.z - FLY_STANDOFF)).abs() < EPS);
    // Y never blends toward the target: the camera dollies, it does not crane
    assert!((pose.position.y - INSIDE_Y).abs() < EPS);
    // mouse wobble is fully suppressed once the card is reached
    assert!(pose.pan.abs() < EPS);
    assert!(pose.tilt.abs() < EPS);
}

#[test]
fn partial_fly_to_blends_position_and_damps_parallax() {
    let target = Vec3::new(2.0, 0.0, 10.0);
    let fly = FlyTo {
        target,
        progress: 0.5,
    };
    let config = RigConfig::default();
    let pose = camera_pose(1.0, Vec2::new(1.0, 0.5), Some(fly), &config);

    // smoothstep(0.5) = 0.5, blending from x = 0
    let expected_x = target.x * config.fly_damping * 0.5;
    assert!((pose.position.x - expected_x).abs() < EPS, "x = {}", pose.position.x);

    // halfway through the fly, parallax is at half strength
    assert!((pose.pan - BASE_PAN * 0.5).abs() < EPS, "pan = {}", pose.pan);
}

#[test]
fn zero_progress_fly_to_is_inert() {
    let fly = FlyTo {
        target: Vec3::new(5.0, 0.0, 12.0),
        progress: 0.0,
    };
    let with = camera_pose(0.7, Vec2::splat(0.5), Some(fly), &RigConfig::default());
    let without = camera_pose(0.7, Vec2::splat(0.5), None, &RigConfig::default());
    assert_eq!(with, without);
}
