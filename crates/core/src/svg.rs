//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use warpfolio_protocol::{RenderCommand, TextAlign, ThemeToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Group,
    Transform,
    Opacity,
    Clip,
}

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions. Unbalanced
/// push/pop commands are tolerated: stray pops are ignored and anything
/// left open is closed at the end.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::VoidBlack),
    ));

    let mut open: Vec<Open> = Vec::new();
    let mut next_id = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                corner_radius,
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{corner_radius}" fill="{}""#,
                    rect.x,
                    rect.y,
                    rect.w.max(0.0),
                    rect.h.max(0.0),
                    resolve_color(*color),
                ));
                if let Some(border) = border_color {
                    svg.push_str(&format!(r#" stroke="{}""#, resolve_color(*border)));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
                alpha,
            } => {
                let fill = fill.map_or("none", resolve_color);
                svg.push_str(&format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{fill}""#,
                    center.x, center.y, radius,
                ));
                if let Some(stroke) = stroke {
                    svg.push_str(&format!(
                        r#" stroke="{}" stroke-width="{stroke_width}""#,
                        resolve_color(*stroke),
                    ));
                }
                push_opacity_attr(&mut svg, *alpha);
                svg.push_str("/>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                alpha,
            } => {
                svg.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{line_width:.2}" stroke-linecap="round""#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve_color(*color),
                ));
                push_opacity_attr(&mut svg, *alpha);
                svg.push_str("/>");
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                letter_spacing,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" text-anchor="{anchor}""#,
                    position.x,
                    position.y,
                    resolve_color(*color),
                ));
                if *letter_spacing != 0.0 {
                    svg.push_str(&format!(r#" letter-spacing="{letter_spacing}""#));
                }
                svg.push_str(&format!(">{}</text>", escape_xml(text)));
            }
            RenderCommand::DrawVignette {
                center,
                inner_radius,
                outer_radius,
                color,
                strength,
            } => {
                if *outer_radius <= 0.0 {
                    continue;
                }
                let id = next_id;
                next_id += 1;
                let stop = (inner_radius / outer_radius).clamp(0.0, 1.0);
                let c = resolve_color(*color);
                svg.push_str(&format!(
                    r#"<defs><radialGradient id="vignette{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{outer_radius}"><stop offset="{stop}" stop-color="{c}" stop-opacity="0"/><stop offset="1" stop-color="{c}" stop-opacity="{strength}"/></radialGradient></defs><rect width="{width}" height="{height}" fill="url(#vignette{id})"/>"#,
                    center.x, center.y,
                ));
            }
            RenderCommand::SetClip { rect } => {
                let id = next_id;
                next_id += 1;
                svg.push_str(&format!(
                    r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{id})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                open.push(Open::Clip);
            }
            RenderCommand::ClearClip => close(&mut svg, &mut open, Open::Clip),
            RenderCommand::PushTransform { translate, scale } => {
                svg.push_str(&format!(
                    r#"<g transform="translate({} {}) scale({} {})">"#,
                    translate.x, translate.y, scale.x, scale.y,
                ));
                open.push(Open::Transform);
            }
            RenderCommand::PopTransform => close(&mut svg, &mut open, Open::Transform),
            RenderCommand::PushOpacity { alpha } => {
                svg.push_str(&format!(r#"<g opacity="{}">"#, alpha.clamp(0.0, 1.0)));
                open.push(Open::Opacity);
            }
            RenderCommand::PopOpacity => close(&mut svg, &mut open, Open::Opacity),
            RenderCommand::BeginGroup { id, .. } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
                open.push(Open::Group);
            }
            RenderCommand::EndGroup => close(&mut svg, &mut open, Open::Group),
        }
    }

    for _ in open.drain(..) {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

/// Close the innermost element if it matches `kind`.
fn close(svg: &mut String, open: &mut Vec<Open>, kind: Open) {
    if open.last() == Some(&kind) {
        open.pop();
        svg.push_str("</g>");
    }
}

fn push_opacity_attr(svg: &mut String, alpha: f64) {
    if alpha < 1.0 {
        svg.push_str(&format!(r#" opacity="{:.3}""#, alpha.max(0.0)));
    }
}

fn resolve_color(token: ThemeToken) -> &'static str {
    match token {
        ThemeToken::SpaceBackground | ThemeToken::Fog => "#050510",
        ThemeToken::VoidBlack | ThemeToken::EventHorizon => "#000000",
        ThemeToken::StarWhite | ThemeToken::TextPrimary => "#ffffff",
        ThemeToken::StarBlue => "#aaccff",
        ThemeToken::StarWarm => "#ffd9a0",
        ThemeToken::WarpStreak => "#cfefff",
        ThemeToken::PhotonRing => "#ffcc66",
        ThemeToken::AccretionHot => "#ffb347",
        ThemeToken::AccretionCool => "#ff5e3a",
        ThemeToken::PlanetSurface => "#2a4a6a",
        ThemeToken::PlanetGrid | ThemeToken::IndicatorPast => "#3a6a9a",
        ThemeToken::Atmosphere => "#00aaff",
        ThemeToken::AtmosphereOuter => "#0066aa",
        ThemeToken::PlanetRing => "#88aacc",
        ThemeToken::RingGlow | ThemeToken::Primary | ThemeToken::IndicatorFill => "#00ffff",
        ThemeToken::Moon => "#888888",
        ThemeToken::Accent => "#8833ff",
        ThemeToken::TextMuted => "#9ca3af",
        ThemeToken::PanelGlass => "#0b1020",
        ThemeToken::PanelBorder => "#1f2a44",
        ThemeToken::TagBackground => "#0a2a33",
        ThemeToken::Available => "#22c55e",
        ThemeToken::IndicatorTrack => "#2a2a3a",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpfolio_protocol::{Point, Rect};

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::begin_group("scene"),
            RenderCommand::DrawRect {
                rect: Rect::new(10.0, 20.0, 100.0, 18.0),
                color: ThemeToken::PanelGlass,
                border_color: Some(ThemeToken::PanelBorder),
                corner_radius: 12.0,
            },
            RenderCommand::DrawCircle {
                center: Point::new(5.0, 5.0),
                radius: 2.0,
                fill: Some(ThemeToken::StarBlue),
                stroke: None,
                stroke_width: 0.0,
                alpha: 0.5,
            },
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 800.0, 400.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<g id="scene">"#));
        assert!(svg.contains(r#"rx="12""#));
        assert!(svg.contains("#aaccff"));
        assert!(svg.contains(r#"opacity="0.500""#));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::text(
            Point::new(0.0, 0.0),
            "<Tom & Jerry's>",
            ThemeToken::TextPrimary,
            12.0,
            TextAlign::Left,
        )];
        let svg = render_svg(&commands, 400.0, 100.0);
        assert!(svg.contains("&lt;Tom &amp; Jerry&apos;s&gt;"));
    }

    #[test]
    fn vignette_becomes_radial_gradient() {
        let commands = vec![RenderCommand::DrawVignette {
            center: Point::new(400.0, 300.0),
            inner_radius: 250.0,
            outer_radius: 500.0,
            color: ThemeToken::VoidBlack,
            strength: 0.8,
        }];
        let svg = render_svg(&commands, 800.0, 600.0);
        assert!(svg.contains("<radialGradient id=\"vignette0\""));
        assert!(svg.contains(r#"offset="0.5""#));
        assert!(svg.contains(r#"stop-opacity="0.8""#));
    }

    #[test]
    fn unbalanced_stacks_still_close() {
        let commands = vec![
            RenderCommand::PopOpacity,
            RenderCommand::PushOpacity { alpha: 0.5 },
            RenderCommand::PushTransform {
                translate: Point::new(1.0, 2.0),
                scale: Point::new(1.0, 1.0),
            },
        ];
        let svg = render_svg(&commands, 10.0, 10.0);
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }
}
