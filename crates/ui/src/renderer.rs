use egui::epaint::Mesh;
use egui::text::{LayoutJob, TextFormat};
use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use warpfolio_protocol::{RenderCommand, TextAlign, ThemeToken};

use crate::theme;

const VIGNETTE_SEGMENTS: usize = 64;

/// Transform state for PushTransform/PopTransform.
#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }

    fn apply(&self, x: f64, y: f64, offset: Pos2) -> Pos2 {
        Pos2::new(
            (x * self.sx + self.tx) as f32 + offset.x,
            (y * self.sy + self.ty) as f32 + offset.y,
        )
    }

    /// Uniform scale for radii and stroke widths.
    fn scale(&self) -> f64 {
        (self.sx.abs() * self.sy.abs()).sqrt()
    }
}

/// Primitive counts for the debug overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    pub drawn: usize,
    pub culled: usize,
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
) -> RenderStats {
    let mut transform_stack: Vec<Transform> = vec![Transform::identity()];
    let mut opacity_stack: Vec<f64> = vec![1.0];
    let mut clip_stack: Vec<Rect> = Vec::new();
    let mut stats = RenderStats::default();

    for cmd in commands {
        let tf = transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::identity());
        let opacity = opacity_stack.last().copied().unwrap_or(1.0);

        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                corner_radius,
            } => {
                let min = tf.apply(rect.x, rect.y, offset);
                let max = tf.apply(rect.x + rect.w, rect.y + rect.h, offset);
                let egui_rect = Rect::from_two_pos(min, max);
                if egui_rect.width() < 0.5 || egui_rect.height() < 0.5 {
                    continue;
                }
                if !painter.clip_rect().intersects(egui_rect) {
                    stats.culled += 1;
                    continue;
                }

                let radius = CornerRadius::same((corner_radius * tf.scale()).clamp(0.0, 255.0) as u8);
                painter.rect_filled(egui_rect, radius, theme::resolve_faded(*color, opacity));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        radius,
                        Stroke::new(1.0, theme::resolve_faded(*bc, opacity)),
                        StrokeKind::Inside,
                    );
                }
                stats.drawn += 1;
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
                alpha,
            } => {
                let c = tf.apply(center.x, center.y, offset);
                let r = (radius * tf.scale()) as f32;
                if r <= 0.0 {
                    continue;
                }
                let bounds = Rect::from_center_size(c, egui::vec2(2.0 * r, 2.0 * r));
                if !painter.clip_rect().intersects(bounds) {
                    stats.culled += 1;
                    continue;
                }
                let a = alpha * opacity;
                if let Some(fill) = fill {
                    painter.circle_filled(c, r, theme::resolve_faded(*fill, a));
                }
                if let Some(stroke) = stroke {
                    painter.circle_stroke(
                        c,
                        r,
                        Stroke::new((stroke_width * tf.scale()) as f32, theme::resolve_faded(*stroke, a)),
                    );
                }
                stats.drawn += 1;
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
                alpha,
            } => {
                let p1 = tf.apply(from.x, from.y, offset);
                let p2 = tf.apply(to.x, to.y, offset);
                if !painter.clip_rect().intersects(Rect::from_two_pos(p1, p2).expand(*width as f32)) {
                    stats.culled += 1;
                    continue;
                }
                painter.line_segment(
                    [p1, p2],
                    Stroke::new(
                        (width * tf.scale()) as f32,
                        theme::resolve_faded(*color, alpha * opacity),
                    ),
                );
                stats.drawn += 1;
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                letter_spacing,
            } => {
                let pos = tf.apply(position.x, position.y, offset);
                let size = (font_size * tf.sy.abs()) as f32;
                if size < 1.0 {
                    continue;
                }
                // egui cannot stretch glyphs; a horizontal stretch spreads them instead.
                let stretch = (tf.sx.abs() - tf.sy.abs()).max(0.0) * font_size * 0.5;
                let text_color = theme::resolve_faded(*color, opacity);
                let mut job = LayoutJob::default();
                job.append(
                    text,
                    0.0,
                    TextFormat {
                        font_id: FontId::proportional(size),
                        color: text_color,
                        extra_letter_spacing: (letter_spacing * tf.sx.abs() + stretch) as f32,
                        ..Default::default()
                    },
                );
                let galley = painter.layout_job(job);
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_BOTTOM,
                    TextAlign::Center => Align2::CENTER_BOTTOM,
                    TextAlign::Right => Align2::RIGHT_BOTTOM,
                };
                let rect = anchor.anchor_size(pos, galley.size());
                painter.galley(rect.min, galley, text_color);
                stats.drawn += 1;
            }

            RenderCommand::DrawVignette {
                center,
                inner_radius,
                outer_radius,
                color,
                strength,
            } => {
                let c = tf.apply(center.x, center.y, offset);
                let inner = (inner_radius * tf.scale()) as f32;
                let outer = (outer_radius * tf.scale()) as f32;
                painter.add(vignette_mesh(c, inner, outer, *color, strength * opacity));
                stats.drawn += 1;
            }

            RenderCommand::SetClip { rect } => {
                let min = tf.apply(rect.x, rect.y, offset);
                let max = tf.apply(rect.x + rect.w, rect.y + rect.h, offset);
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(Rect::from_two_pos(min, max));
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::PushTransform { translate, scale } => {
                let parent = tf;
                transform_stack.push(Transform {
                    tx: parent.tx + translate.x * parent.sx,
                    ty: parent.ty + translate.y * parent.sy,
                    sx: parent.sx * scale.x,
                    sy: parent.sy * scale.y,
                });
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::PushOpacity { alpha } => {
                opacity_stack.push(opacity * alpha.clamp(0.0, 1.0));
            }

            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic; no visual effect in egui
            }
        }
    }

    stats
}

/// Annulus from `inner` (transparent) to `outer` (`strength`), plus a
/// ring beyond `outer` so corners of wide viewports stay dark.
fn vignette_mesh(center: Pos2, inner: f32, outer: f32, token: ThemeToken, strength: f64) -> Mesh {
    let clear = theme::resolve_faded(token, 0.0);
    let dark = theme::resolve_faded(token, strength);
    let far = outer * 4.0;

    let mut mesh = Mesh::default();
    for i in 0..=VIGNETTE_SEGMENTS {
        let angle = std::f32::consts::TAU * i as f32 / VIGNETTE_SEGMENTS as f32;
        let dir = egui::vec2(angle.cos(), angle.sin());
        mesh.colored_vertex(center + dir * inner.max(0.0), clear);
        mesh.colored_vertex(center + dir * outer, dark);
        mesh.colored_vertex(center + dir * far, dark);
    }
    for i in 0..VIGNETTE_SEGMENTS as u32 {
        let (a, b) = (i * 3, (i + 1) * 3);
        mesh.add_triangle(a, a + 1, b);
        mesh.add_triangle(b, a + 1, b + 1);
        mesh.add_triangle(a + 1, a + 2, b + 1);
        mesh.add_triangle(b + 1, a + 2, b + 2);
    }
    mesh
}
