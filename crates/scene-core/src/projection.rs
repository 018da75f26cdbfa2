//! Manual 3D→2D perspective projection onto a 2D drawing surface.
//!
//! Projection is a partial function: a point at or behind the camera has no
//! screen position, and callers treat `None` as "not visible this frame",
//! never as an error. Surface dimensions are passed on every call so a
//! resize corrects itself on the next frame.

use glam::{Vec2, Vec3};

use crate::camera::CameraPose;
use crate::constants::{FOV_Y_RADIANS, NEAR_PLANE};

/// Screen-space result of projecting a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Camera-space Z of the source point, always positive.
    pub depth: f32,
}

impl ProjectedPoint {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Bounding transform for an axis-aligned 3D rectangle once projected, used
/// to composite an HTML overlay over the card's screen position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPanel {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
}

/// Transform a room-space point into camera space: translate to the camera,
/// undo the yaw about Y, then undo the pitch about the once-yawed X axis.
/// The rotation order matters; swapping it skews the walls near the screen
/// edges.
#[inline]
pub fn to_camera_space(point: Vec3, camera: &CameraPose) -> Vec3 {
    let d = point - camera.position;
    let (sin_p, cos_p) = camera.pan.sin_cos();
    let x = cos_p * d.x - sin_p * d.z;
    let z = sin_p * d.x + cos_p * d.z;
    let (sin_t, cos_t) = camera.tilt.sin_cos();
    let y = cos_t * d.y - sin_t * z;
    let z = sin_t * d.y + cos_t * z;
    Vec3::new(x, y, z)
}

// Height-based focal scale for the fixed vertical field of view.
#[inline]
fn focal_scale(surface_h: f32) -> f32 {
    surface_h / (2.0 * (FOV_Y_RADIANS * 0.5).tan())
}

#[inline]
fn project_camera_space(c: Vec3, surface_w: f32, surface_h: f32) -> Option<ProjectedPoint> {
    if c.z <= 0.0 {
        return None;
    }
    let scale = focal_scale(surface_h);
    Some(ProjectedPoint {
        x: surface_w * 0.5 + (c.x / c.z) * scale,
        y: surface_h * 0.5 + (c.y / c.z) * scale,
        depth: c.z,
    })
}

/// Project a room-space point to surface pixels under `camera`.
#[inline]
pub fn project(
    point: Vec3,
    surface_w: f32,
    surface_h: f32,
    camera: &CameraPose,
) -> Option<ProjectedPoint> {
    project_camera_space(to_camera_space(point, camera), surface_w, surface_h)
}

// Slide the endpoint behind the near plane along the segment until it sits
// exactly on the plane.
#[inline]
fn clip_to_near(behind: Vec3, front: Vec3) -> Vec3 {
    let t = (NEAR_PLANE - behind.z) / (front.z - behind.z);
    let mut clipped = behind + (front - behind) * t;
    clipped.z = NEAR_PLANE;
    clipped
}

/// Project a line segment with near-plane clipping. A segment that crosses
/// behind the viewer must be cut at the plane, otherwise the far endpoint
/// wraps to the wrong side of the screen.
pub fn project_segment(
    a: Vec3,
    b: Vec3,
    surface_w: f32,
    surface_h: f32,
    camera: &CameraPose,
) -> Option<(ProjectedPoint, ProjectedPoint)> {
    let ca = to_camera_space(a, camera);
    let cb = to_camera_space(b, camera);
    let (ca, cb) = match (ca.z > NEAR_PLANE, cb.z > NEAR_PLANE) {
        (true, true) => (ca, cb),
        (true, false) => (ca, clip_to_near(cb, ca)),
        (false, true) => (clip_to_near(ca, cb), cb),
        (false, false) => return None,
    };
    let pa = project_camera_space(ca, surface_w, surface_h)?;
    let pb = project_camera_space(cb, surface_w, surface_h)?;
    Some((pa, pb))
}

/// Room-space corners of an axis-aligned panel at `center`, in order
/// top-left, top-right, bottom-right, bottom-left.
#[inline]
pub fn panel_corners(center: Vec3, width: f32, height: f32) -> [Vec3; 4] {
    let hw = width * 0.5;
    let hh = height * 0.5;
    [
        center + Vec3::new(-hw, -hh, 0.0),
        center + Vec3::new(hw, -hh, 0.0),
        center + Vec3::new(hw, hh, 0.0),
        center + Vec3::new(-hw, hh, 0.0),
    ]
}

/// Project a panel's center and corners into a screen-space bounding
/// transform. Any corner behind the camera hides the whole panel; callers
/// must hide the corresponding overlay entirely rather than show a
/// collapsed shape.
pub fn project_panel(
    center: Vec3,
    width: f32,
    height: f32,
    surface_w: f32,
    surface_h: f32,
    camera: &CameraPose,
) -> Option<ProjectedPanel> {
    let c = project(center, surface_w, surface_h, camera)?;
    let mut screen = [Vec2::ZERO; 4];
    for (i, corner) in panel_corners(center, width, height).iter().enumerate() {
        screen[i] = project(*corner, surface_w, surface_h, camera)?.pos();
    }
    // Perspective foreshortening is asymmetric, so measure projected extents
    // between adjacent corners rather than doubling a half-extent.
    Some(ProjectedPanel {
        x: c.x,
        y: c.y,
        width: screen[0].distance(screen[1]),
        height: screen[0].distance(screen[3]),
        depth: c.depth,
        rotate_x_deg: camera.tilt.to_degrees(),
        rotate_y_deg: (-camera.pan).to_degrees(),
    })
}
