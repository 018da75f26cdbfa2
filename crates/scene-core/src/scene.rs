//! Per-frame scene pipeline: compute the camera, project the room and the
//! module cards, and emit an ordered draw list plus the frame's card
//! bounds.
//!
//! The whole scene is re-derived from current inputs every frame; nothing
//! is cached across frames. The pipeline stages (camera → static geometry →
//! dynamic cards) are plain functions over values, so each stage tests
//! without a real drawing surface.

use glam::{Vec2, Vec3};
use instant::Instant;

use crate::camera::{camera_pose, CameraPose, RigConfig};
use crate::constants::*;
use crate::hit::CardBounds;
use crate::modules::ModuleRegistry;
use crate::projection::{panel_corners, project, project_panel, project_segment, ProjectedPanel};
use crate::state::{ModuleManager, ViewState};

/// Linear-space color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear mix toward `other`.
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Multiply the color channels, leaving alpha alone.
    pub fn shade(self, factor: f32) -> Color {
        Color {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    pub fn with_alpha(self, a: f32) -> Color {
        Color {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

// Interior palette, entrance-bright to scrolled-in-dark
const WALL_BRIGHT: Color = Color::rgb(0.93, 0.91, 0.88);
const WALL_DARK: Color = Color::rgb(0.10, 0.10, 0.13);
const GRID_BRIGHT: Color = Color::rgba(0.25, 0.24, 0.22, 0.35);
const GRID_DARK: Color = Color::rgba(0.62, 0.66, 0.78, 0.28);
const CARD_SHADOW: Color = Color::rgba(0.0, 0.0, 0.0, 0.35);

/// Drawing surface dimensions in backing pixels, read fresh every frame so
/// a resize corrects itself on the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

/// External inputs for one tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub scroll_progress: f32,
    /// Smoothed mouse position, normalized to the viewport.
    pub mouse: Vec2,
    pub surface: Surface,
    pub now: Instant,
}

/// Scene tuning; one value threaded through the pipeline so independent
/// scene instances can coexist.
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub room_size: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub grid_divisions: u32,
    pub card_width: f32,
    pub card_height: f32,
    pub rig: RigConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            room_size: ROOM_SIZE,
            z_near: ROOM_Z_NEAR,
            z_far: ROOM_Z_FAR,
            grid_divisions: GRID_DIVISIONS,
            card_width: CARD_WIDTH,
            card_height: CARD_HEIGHT,
            rig: RigConfig::default(),
        }
    }
}

/// One paint instruction. The painter executes these in order; it holds no
/// scene knowledge of its own.
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// Filled quad from four projected screen corners.
    Quad { corners: [Vec2; 4], color: Color },
    Line {
        a: Vec2,
        b: Vec2,
        width: f32,
        color: Color,
    },
    /// Picture-frame image, drawn axis-aligned at the projected panel rect.
    Image { panel: ProjectedPanel, opacity: f32 },
    /// Soft drop-shadow hint where a module card's HTML overlay will sit.
    CardShadow {
        corners: [Vec2; 4],
        color: Color,
        blur: f32,
    },
}

/// Panel placement for the active module's HTML overlay.
#[derive(Clone, Debug)]
pub struct ActiveModulePanel {
    pub module_id: String,
    pub panel: ProjectedPanel,
}

/// Everything one completed tick produces.
#[derive(Clone, Debug)]
pub struct Frame {
    pub camera: CameraPose,
    pub view: ViewState,
    pub zoom_progress: f32,
    pub background: Color,
    pub commands: Vec<DrawCommand>,
    pub bounds: CardBounds,
    /// `None` hides the overlay entirely (no module active, or its panel
    /// failed to project).
    pub overlay: Option<ActiveModulePanel>,
}

/// 0..1 ramp over the back third of the scroll range; drives the interior
/// bright→dark color interpolation.
#[inline]
pub fn color_progress(scroll_progress: f32) -> f32 {
    ((scroll_progress - COLOR_RAMP_START) * COLOR_RAMP_SLOPE).clamp(0.0, 1.0)
}

/// Picture-frame opacity: fully visible through the early and mid scroll
/// range, fading out once the module cards should dominate.
#[inline]
pub fn frame_opacity(scroll_progress: f32) -> f32 {
    1.0 - ((scroll_progress - FRAME_FADE_START) / (FRAME_FADE_END - FRAME_FADE_START))
        .clamp(0.0, 1.0)
}

/// Card-hint opacity: fades in over the window where the frame fades out.
#[inline]
pub fn card_hint_alpha(scroll_progress: f32) -> f32 {
    ((scroll_progress - CARD_FADE_START) / (CARD_FADE_END - CARD_FADE_START)).clamp(0.0, 1.0)
}

/// Run the whole pipeline for one tick.
pub fn render_frame(
    input: &FrameInput,
    manager: &mut ModuleManager,
    registry: &ModuleRegistry,
    config: &SceneConfig,
) -> Frame {
    manager.sync(input.scroll_progress, input.now);
    let view = manager.view_state(input.scroll_progress);

    let camera = camera_pose(
        input.scroll_progress,
        input.mouse,
        manager.fly(input.now),
        &config.rig,
    );
    let progress = color_progress(input.scroll_progress);

    let mut commands = Vec::with_capacity(160);
    push_room(&mut commands, &camera, input.surface, progress, config);
    push_picture_frame(
        &mut commands,
        &camera,
        input.surface,
        input.scroll_progress,
        config,
    );

    let mut bounds = CardBounds::new();
    push_cards(
        &mut commands,
        &mut bounds,
        manager,
        registry,
        &camera,
        input.surface,
        input.scroll_progress,
        config,
    );

    // The HTML content only exists in the zoomed view; scrolling back out
    // mid-animation hides it along with the rest of the card chrome.
    let overlay = if view == ViewState::Zoomed {
        active_overlay(manager, registry, &camera, input.surface, config)
    } else {
        None
    };

    Frame {
        camera,
        view,
        zoom_progress: manager.zoom_progress(input.now),
        background: WALL_BRIGHT.mix(WALL_DARK, progress),
        commands,
        bounds,
        overlay,
    }
}

// Five faces in back-to-front draw order with a per-face shade factor. The
// near face is behind the camera by construction and is never drawn.
fn room_faces(half: f32, z_near: f32, z_far: f32) -> [([Vec3; 4], f32); 5] {
    let v = Vec3::new;
    [
        // back wall
        (
            [
                v(-half, -half, z_far),
                v(half, -half, z_far),
                v(half, half, z_far),
                v(-half, half, z_far),
            ],
            1.0,
        ),
        // floor (Y is down in screen space)
        (
            [
                v(-half, half, z_far),
                v(half, half, z_far),
                v(half, half, z_near),
                v(-half, half, z_near),
            ],
            0.9,
        ),
        // ceiling
        (
            [
                v(-half, -half, z_far),
                v(half, -half, z_far),
                v(half, -half, z_near),
                v(-half, -half, z_near),
            ],
            0.96,
        ),
        // left wall
        (
            [
                v(-half, -half, z_far),
                v(-half, half, z_far),
                v(-half, half, z_near),
                v(-half, -half, z_near),
            ],
            0.85,
        ),
        // right wall
        (
            [
                v(half, -half, z_far),
                v(half, half, z_far),
                v(half, half, z_near),
                v(half, -half, z_near),
            ],
            0.85,
        ),
    ]
}

fn push_room(
    commands: &mut Vec<DrawCommand>,
    camera: &CameraPose,
    surface: Surface,
    progress: f32,
    config: &SceneConfig,
) {
    let half = config.room_size * 0.5;
    let wall = WALL_BRIGHT.mix(WALL_DARK, progress);
    let grid = GRID_BRIGHT.mix(GRID_DARK, progress);

    for (corners, shade) in room_faces(half, config.z_near, config.z_far) {
        push_face_fill(commands, &corners, wall.shade(shade), camera, surface);
        push_face_grid(
            commands,
            &corners,
            grid,
            config.grid_divisions,
            camera,
            surface,
        );
    }
    push_edges(commands, grid, half, config, camera, surface);
}

// A face fill needs all four corners on screen; a face cut by the near
// plane is simply skipped and the background color stands in for it.
fn push_face_fill(
    commands: &mut Vec<DrawCommand>,
    corners: &[Vec3; 4],
    color: Color,
    camera: &CameraPose,
    surface: Surface,
) {
    let mut screen = [Vec2::ZERO; 4];
    for (i, c) in corners.iter().enumerate() {
        match project(*c, surface.width, surface.height, camera) {
            Some(p) => screen[i] = p.pos(),
            None => return,
        }
    }
    commands.push(DrawCommand::Quad {
        corners: screen,
        color,
    });
}

// Evenly spaced grid in both directions across the face, near-plane
// clipped per segment.
fn push_face_grid(
    commands: &mut Vec<DrawCommand>,
    corners: &[Vec3; 4],
    color: Color,
    divisions: u32,
    camera: &CameraPose,
    surface: Surface,
) {
    let [tl, tr, br, bl] = *corners;
    for i in 0..=divisions {
        let t = i as f32 / divisions as f32;
        push_line(
            commands,
            tl.lerp(bl, t),
            tr.lerp(br, t),
            GRID_LINE_WIDTH,
            color,
            camera,
            surface,
        );
        push_line(
            commands,
            tl.lerp(tr, t),
            bl.lerp(br, t),
            GRID_LINE_WIDTH,
            color,
            camera,
            surface,
        );
    }
}

// The 8 reinforcement lines: back-wall perimeter plus the four long edges
// of the cuboid, at a heavier stroke.
fn push_edges(
    commands: &mut Vec<DrawCommand>,
    color: Color,
    half: f32,
    config: &SceneConfig,
    camera: &CameraPose,
    surface: Surface,
) {
    let v = Vec3::new;
    let (zn, zf) = (config.z_near, config.z_far);
    let edges = [
        (v(-half, -half, zf), v(half, -half, zf)),
        (v(half, -half, zf), v(half, half, zf)),
        (v(half, half, zf), v(-half, half, zf)),
        (v(-half, half, zf), v(-half, -half, zf)),
        (v(-half, -half, zn), v(-half, -half, zf)),
        (v(half, -half, zn), v(half, -half, zf)),
        (v(half, half, zn), v(half, half, zf)),
        (v(-half, half, zn), v(-half, half, zf)),
    ];
    for (a, b) in edges {
        push_line(commands, a, b, EDGE_LINE_WIDTH, color, camera, surface);
    }
}

#[inline]
fn push_line(
    commands: &mut Vec<DrawCommand>,
    a: Vec3,
    b: Vec3,
    width: f32,
    color: Color,
    camera: &CameraPose,
    surface: Surface,
) {
    if let Some((pa, pb)) = project_segment(a, b, surface.width, surface.height, camera) {
        commands.push(DrawCommand::Line {
            a: pa.pos(),
            b: pb.pos(),
            width,
            color,
        });
    }
}

fn push_picture_frame(
    commands: &mut Vec<DrawCommand>,
    camera: &CameraPose,
    surface: Surface,
    scroll_progress: f32,
    config: &SceneConfig,
) {
    let opacity = frame_opacity(scroll_progress);
    if opacity <= 0.0 {
        return;
    }
    // Nudged off the back wall so it never z-fights the fill.
    let center = Vec3::new(0.0, FRAME_Y, config.z_far - 0.05);
    if let Some(panel) = project_panel(
        center,
        FRAME_WIDTH,
        FRAME_HEIGHT,
        surface.width,
        surface.height,
        camera,
    ) {
        commands.push(DrawCommand::Image { panel, opacity });
    }
}

// Card pass: record every visible card's projected corners for the hit
// tester and draw the shadow hint the HTML overlay will sit on. The card
// content itself is DOM, never canvas.
#[allow(clippy::too_many_arguments)]
fn push_cards(
    commands: &mut Vec<DrawCommand>,
    bounds: &mut CardBounds,
    manager: &ModuleManager,
    registry: &ModuleRegistry,
    camera: &CameraPose,
    surface: Surface,
    scroll_progress: f32,
    config: &SceneConfig,
) {
    let alpha = card_hint_alpha(scroll_progress);
    for module in registry.on_page(manager.page()) {
        let corners = panel_corners(module.base_position, config.card_width, config.card_height);
        let mut screen = [Vec2::ZERO; 4];
        let mut visible = true;
        for (i, c) in corners.iter().enumerate() {
            match project(*c, surface.width, surface.height, camera) {
                Some(p) => screen[i] = p.pos(),
                None => {
                    visible = false;
                    break;
                }
            }
        }
        if !visible {
            continue;
        }
        bounds.push(&module.id, screen);

        if alpha > 0.0 {
            let hovered = manager.hovered_module() == Some(module.id.as_str());
            let mut shadow = CARD_SHADOW.with_alpha(CARD_SHADOW.a * alpha);
            if hovered {
                shadow = shadow.with_alpha(shadow.a * HOVER_BRIGHTEN);
            }
            commands.push(DrawCommand::CardShadow {
                corners: screen,
                color: shadow,
                blur: CARD_SHADOW_BLUR,
            });
        }
    }
}

fn active_overlay(
    manager: &ModuleManager,
    registry: &ModuleRegistry,
    camera: &CameraPose,
    surface: Surface,
    config: &SceneConfig,
) -> Option<ActiveModulePanel> {
    let id = manager.active_module()?;
    // An id with no registry entry is inert: nothing drawn, nothing shown.
    let meta = registry.get(id)?;
    let panel = project_panel(
        meta.base_position,
        config.card_width,
        config.card_height,
        surface.width,
        surface.height,
        camera,
    )?;
    Some(ActiveModulePanel {
        module_id: meta.id.clone(),
        panel,
    })
}
