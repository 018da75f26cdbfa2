//! Canvas2D painter. Executes the draw list produced by the core pipeline;
//! immediate mode, the whole surface is repainted every frame.

use glam::Vec2;
use web_sys as web;

use scene_core::{Color, DrawCommand, Frame, ProjectedPanel, Surface};

pub struct Painter {
    ctx: web::CanvasRenderingContext2d,
    /// The picture-frame texture; optional, the room renders without it.
    frame_image: Option<web::HtmlImageElement>,
}

impl Painter {
    pub fn new(
        ctx: web::CanvasRenderingContext2d,
        frame_image: Option<web::HtmlImageElement>,
    ) -> Self {
        if frame_image.is_none() {
            log::info!("[render] no frame image element; back wall stays bare");
        }
        Self { ctx, frame_image }
    }

    pub fn paint(&self, frame: &Frame, surface: Surface) {
        self.ctx.set_fill_style_str(&css_color(frame.background));
        self.ctx
            .fill_rect(0.0, 0.0, surface.width as f64, surface.height as f64);

        for cmd in &frame.commands {
            match cmd {
                DrawCommand::Quad { corners, color } => self.fill_quad(corners, *color),
                DrawCommand::Line { a, b, width, color } => {
                    self.stroke_line(*a, *b, *width, *color)
                }
                DrawCommand::Image { panel, opacity } => self.draw_frame_image(panel, *opacity),
                DrawCommand::CardShadow {
                    corners,
                    color,
                    blur,
                } => self.card_shadow(corners, *color, *blur),
            }
        }
    }

    fn path_quad(&self, corners: &[Vec2; 4]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(corners[0].x as f64, corners[0].y as f64);
        for c in &corners[1..] {
            ctx.line_to(c.x as f64, c.y as f64);
        }
        ctx.close_path();
    }

    fn fill_quad(&self, corners: &[Vec2; 4], color: Color) {
        self.path_quad(corners);
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill();
    }

    fn stroke_line(&self, a: Vec2, b: Vec2, width: f32, color: Color) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
        ctx.set_line_width(width as f64);
        ctx.set_stroke_style_str(&css_color(color));
        ctx.stroke();
    }

    fn draw_frame_image(&self, panel: &ProjectedPanel, opacity: f32) {
        let Some(img) = &self.frame_image else { return };
        if !img.complete() {
            return;
        }
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(opacity as f64);
        let w = panel.width as f64;
        let h = panel.height as f64;
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            panel.x as f64 - w * 0.5,
            panel.y as f64 - h * 0.5,
            w,
            h,
        );
        ctx.restore();
    }

    fn card_shadow(&self, corners: &[Vec2; 4], color: Color, blur: f32) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_shadow_color(&css_color(color));
        ctx.set_shadow_blur(blur as f64);
        self.path_quad(corners);
        ctx.set_fill_style_str(&css_color(color));
        ctx.fill();
        ctx.restore();
    }
}

/// CSS rgba() string for a linear color.
pub fn css_color(c: Color) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        (c.r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (c.g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (c.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        c.a.clamp(0.0, 1.0)
    )
}
