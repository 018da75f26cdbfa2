//! Room, camera, and animation tuning constants.
//!
//! These express intended behavior (distances, thresholds, durations) and
//! keep magic numbers out of the pipeline code.

// Room geometry (room units; X right, Y down, Z into the room)
pub const ROOM_SIZE: f32 = 10.0;
pub const ROOM_Z_NEAR: f32 = 0.0;
pub const ROOM_Z_FAR: f32 = 16.0;
pub const GRID_DIVISIONS: u32 = 10;

// Perspective projection
pub const FOV_Y_RADIANS: f32 = std::f32::consts::FRAC_PI_2; // 90° vertical
pub const NEAR_PLANE: f32 = 0.01; // camera-space z at or below this is clipped

// Camera poses; Y/Z lerp entrance -> inside under the zoom ease, X stays 0
pub const ENTRANCE_Y: f32 = -0.4;
pub const ENTRANCE_Z: f32 = -9.0;
pub const INSIDE_Y: f32 = 0.6;
pub const INSIDE_Z: f32 = 3.2;

// Mouse parallax amplitudes at full zoom (radians)
pub const BASE_PAN: f32 = 0.22;
pub const BASE_TILT: f32 = 0.12;

// Fly-to tuning
pub const FLY_DAMPING: f32 = 0.82; // fraction of the card's X the camera adopts
pub const FLY_STANDOFF: f32 = 4.6; // dolly stop distance in front of the card

// Module view threshold and zoom animation
pub const FLOAT_THRESHOLD: f32 = 0.8; // scroll progress where cards become interactive
pub const ZOOM_ANIM_MS: u64 = 600;

// Interior color ramp (darkens over the back third of the scroll range)
pub const COLOR_RAMP_START: f32 = 0.7;
pub const COLOR_RAMP_SLOPE: f32 = 3.33;

// Picture frame on the back wall
pub const FRAME_WIDTH: f32 = 4.8;
pub const FRAME_HEIGHT: f32 = 3.2;
pub const FRAME_Y: f32 = -0.4;
pub const FRAME_FADE_START: f32 = 0.55; // scroll progress where the frame starts fading
pub const FRAME_FADE_END: f32 = 0.8;

// Module cards (room units)
pub const CARD_WIDTH: f32 = 3.2;
pub const CARD_HEIGHT: f32 = 2.0;
pub const CARD_FADE_START: f32 = 0.6; // card hints fade in as the frame fades out
pub const CARD_FADE_END: f32 = 0.8;
pub const CARD_SHADOW_BLUR: f32 = 24.0;

// Hover brightening of the card hint
pub const HOVER_BRIGHTEN: f32 = 1.4;

// Stroke weights (surface pixels)
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const EDGE_LINE_WIDTH: f32 = 2.5;
