// Hit testing: point-in-quad parity, registration-order determinism, and
// the projected-center round trip through the real camera.

use glam::{Vec2, Vec3};
use scene_core::{
    camera_pose, hit_test, panel_corners, point_in_quad, project, CardBounds, RigConfig,
    CARD_HEIGHT, CARD_WIDTH,
};

fn square(x: f32, y: f32, size: f32) -> [Vec2; 4] {
    [
        Vec2::new(x, y),
        Vec2::new(x + size, y),
        Vec2::new(x + size, y + size),
        Vec2::new(x, y + size),
    ]
}

#[test]
fn point_in_quad_basics() {
    let quad = square(100.0, 100.0, 100.0);
    assert!(point_in_quad(Vec2::new(150.0, 150.0), &quad));
    assert!(!point_in_quad(Vec2::new(50.0, 150.0), &quad));
    assert!(!point_in_quad(Vec2::new(150.0, 250.0), &quad));
}

#[test]
fn point_in_quad_handles_perspective_skew() {
    // a trapezoid like a projected card seen at an angle
    let quad = [
        Vec2::new(120.0, 80.0),
        Vec2::new(300.0, 110.0),
        Vec2::new(290.0, 240.0),
        Vec2::new(130.0, 210.0),
    ];
    assert!(point_in_quad(Vec2::new(210.0, 160.0), &quad));
    assert!(!point_in_quad(Vec2::new(110.0, 160.0), &quad));
    assert!(!point_in_quad(Vec2::new(210.0, 60.0), &quad));
}

#[test]
fn empty_bounds_never_hit() {
    // a click arriving before the first frame completes simply misses
    let bounds = CardBounds::new();
    assert!(bounds.is_empty());
    assert_eq!(hit_test(Vec2::new(400.0, 300.0), &bounds), None);
}

#[test]
fn hit_test_returns_the_containing_card() {
    let mut bounds = CardBounds::new();
    bounds.push("armory", square(100.0, 100.0, 100.0));
    bounds.push("gallery", square(400.0, 100.0, 100.0));

    assert_eq!(hit_test(Vec2::new(150.0, 150.0), &bounds), Some("armory"));
    assert_eq!(hit_test(Vec2::new(450.0, 150.0), &bounds), Some("gallery"));
    assert_eq!(hit_test(Vec2::new(300.0, 500.0), &bounds), None);
}

#[test]
fn overlapping_cards_resolve_in_registration_order() {
    // cards do not overlap in normal operation; when they do, the first
    // registered wins so tests stay deterministic
    let mut bounds = CardBounds::new();
    bounds.push("first", square(100.0, 100.0, 100.0));
    bounds.push("second", square(150.0, 150.0, 100.0));
    assert_eq!(hit_test(Vec2::new(175.0, 175.0), &bounds), Some("first"));
}

#[test]
fn projected_card_center_round_trips_through_the_hit_test() {
    // camera fully scrolled in, centered mouse, card on the back wall side
    let camera = camera_pose(1.0, Vec2::splat(0.5), None, &RigConfig::default());
    let center = Vec3::new(0.0, -0.2, 10.5);
    let (w, h) = (800.0, 600.0);

    let mut bounds = CardBounds::new();
    let mut screen = [Vec2::ZERO; 4];
    for (i, corner) in panel_corners(center, CARD_WIDTH, CARD_HEIGHT).iter().enumerate() {
        screen[i] = project(*corner, w, h, &camera)
            .expect("card corner visible from the inside pose")
            .pos();
    }
    bounds.push("armory", screen);

    let center_px = project(center, w, h, &camera).unwrap().pos();
    assert_eq!(hit_test(center_px, &bounds), Some("armory"));

    // far outside every projected quad
    assert_eq!(hit_test(Vec2::new(5.0, 5.0), &bounds), None);
}
