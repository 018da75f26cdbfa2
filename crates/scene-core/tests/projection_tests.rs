// Projection contract: determinism, near-plane exclusion, segment
// clipping, and panel measurement from adjacent projected corners.

use glam::Vec3;
use scene_core::{project, project_panel, project_segment, CameraPose, NEAR_PLANE};

const EPS: f32 = 1e-4;

fn identity_camera() -> CameraPose {
    CameraPose {
        position: Vec3::ZERO,
        pan: 0.0,
        tilt: 0.0,
    }
}

#[test]
fn project_centers_points_on_the_camera_axis() {
    let cam = identity_camera();
    // 90° vertical FOV on a 600px-high surface gives a focal scale of 300
    let p = project(Vec3::new(0.0, 0.0, 10.0), 800.0, 600.0, &cam).unwrap();
    assert!((p.x - 400.0).abs() < EPS);
    assert!((p.y - 300.0).abs() < EPS);
    assert!((p.depth - 10.0).abs() < EPS);

    let right = project(Vec3::new(1.0, 0.0, 10.0), 800.0, 600.0, &cam).unwrap();
    assert!((right.x - 430.0).abs() < EPS, "x = {}", right.x);
    assert!((right.y - 300.0).abs() < EPS);
}

#[test]
fn project_is_deterministic() {
    let cam = CameraPose {
        position: Vec3::new(0.3, -0.7, 1.5),
        pan: 0.21,
        tilt: -0.08,
    };
    let point = Vec3::new(-2.2, 1.4, 12.0);
    let a = project(point, 1280.0, 720.0, &cam).unwrap();
    let b = project(point, 1280.0, 720.0, &cam).unwrap();
    assert_eq!(a, b);
}

#[test]
fn points_behind_the_camera_do_not_project() {
    let cam = identity_camera();
    assert!(project(Vec3::new(0.0, 0.0, -5.0), 800.0, 600.0, &cam).is_none());
    // exactly on the camera plane is also invisible
    assert!(project(Vec3::new(1.0, 1.0, 0.0), 800.0, 600.0, &cam).is_none());
}

#[test]
fn camera_translation_moves_the_near_plane() {
    let cam = CameraPose {
        position: Vec3::new(0.0, 0.0, 4.0),
        pan: 0.0,
        tilt: 0.0,
    };
    // z = 3 is in front of the origin but behind this camera
    assert!(project(Vec3::new(0.0, 0.0, 3.0), 800.0, 600.0, &cam).is_none());
    assert!(project(Vec3::new(0.0, 0.0, 5.0), 800.0, 600.0, &cam).is_some());
}

#[test]
fn segment_with_both_endpoints_behind_is_invisible() {
    let cam = identity_camera();
    let clipped = project_segment(
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(1.0, 0.0, -0.5),
        800.0,
        600.0,
        &cam,
    );
    assert!(clipped.is_none());
}

#[test]
fn segment_fully_in_front_matches_point_projection() {
    let cam = identity_camera();
    let a = Vec3::new(-1.0, 0.5, 4.0);
    let b = Vec3::new(2.0, -0.5, 9.0);
    let (pa, pb) = project_segment(a, b, 800.0, 600.0, &cam).unwrap();
    assert_eq!(Some(pa), project(a, 800.0, 600.0, &cam));
    assert_eq!(Some(pb), project(b, 800.0, 600.0, &cam));
}

#[test]
fn clipped_endpoint_lands_exactly_on_the_near_plane() {
    let cam = identity_camera();
    let a = Vec3::new(2.0, 1.0, -1.0); // behind
    let b = Vec3::new(0.0, 0.0, 3.0); // in front
    let (pa, pb) = project_segment(a, b, 800.0, 600.0, &cam).unwrap();

    // the clipped endpoint is reported first and sits on the plane
    assert!((pa.depth - NEAR_PLANE).abs() < 1e-5, "depth = {}", pa.depth);
    assert!((pb.depth - 3.0).abs() < EPS);

    // reconstruct camera-space X from the projection and check the clipped
    // point is collinear with the original segment
    let scale = 300.0; // 600 / (2 tan 45°)
    let x = (pa.x - 400.0) / scale * pa.depth;
    let y = (pa.y - 300.0) / scale * pa.depth;
    let t = (pa.depth - a.z) / (b.z - a.z);
    let expected = a + (b - a) * t;
    assert!((x - expected.x).abs() < 1e-3, "x = {x}, expected {}", expected.x);
    assert!((y - expected.y).abs() < 1e-3, "y = {y}, expected {}", expected.y);
}

#[test]
fn panel_measures_projected_extents_between_adjacent_corners() {
    let cam = identity_camera();
    let panel = project_panel(Vec3::new(0.0, 0.0, 10.0), 2.0, 1.0, 800.0, 600.0, &cam).unwrap();
    assert!((panel.x - 400.0).abs() < EPS);
    assert!((panel.y - 300.0).abs() < EPS);
    // 2 units wide at depth 10 with focal scale 300 → 60px
    assert!((panel.width - 60.0).abs() < EPS, "width = {}", panel.width);
    assert!((panel.height - 30.0).abs() < EPS, "height = {}", panel.height);
    assert!((panel.depth - 10.0).abs() < EPS);
    assert!(panel.rotate_x_deg.abs() < EPS);
    assert!(panel.rotate_y_deg.abs() < EPS);
}

#[test]
fn panel_rotation_hints_mirror_the_camera_angles() {
    let cam = CameraPose {
        position: Vec3::ZERO,
        pan: 0.2,
        tilt: -0.1,
    };
    let panel = project_panel(Vec3::new(0.0, 0.0, 10.0), 2.0, 1.0, 800.0, 600.0, &cam).unwrap();
    assert!((panel.rotate_y_deg - (-0.2f32).to_degrees()).abs() < EPS);
    assert!((panel.rotate_x_deg - (-0.1f32).to_degrees()).abs() < EPS);
}

#[test]
fn panel_with_any_corner_behind_is_hidden_entirely() {
    let cam = identity_camera();
    // center behind the camera
    assert!(project_panel(Vec3::new(0.0, 0.0, -1.0), 2.0, 1.0, 800.0, 600.0, &cam).is_none());

    // center barely in front but panned so hard a corner falls behind
    let cam = CameraPose {
        position: Vec3::ZERO,
        pan: std::f32::consts::FRAC_PI_2 * 0.98,
        tilt: 0.0,
    };
    let panel = project_panel(Vec3::new(0.0, 0.0, 0.4), 4.0, 1.0, 800.0, 600.0, &cam);
    assert!(panel.is_none());
}

#[test]
fn projection_reads_surface_dimensions_per_call() {
    // a resize is self-correcting because nothing caches the surface
    let cam = identity_camera();
    let point = Vec3::new(1.0, 1.0, 10.0);
    let big = project(point, 800.0, 600.0, &cam).unwrap();
    let small = project(point, 400.0, 300.0, &cam).unwrap();
    assert!((big.x - 430.0).abs() < EPS);
    assert!((small.x - 215.0).abs() < EPS);
    assert_eq!(
        Some(big),
        project(point, 800.0, 600.0, &cam),
        "same surface, same result"
    );
}
