use warpfolio_protocol::{Label, Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::wrap_words;
use crate::model::content::{self, PROJECTS, Project};
use crate::model::panels::{
    BlackHolePanel, PanelContent, PanelState, PlanetPanel, ProjectReveal, VoidPanel, WarpPanel,
    WelcomePanel,
};

/// Average glyph width as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.55;
const CARD_GAP: f64 = 24.0;
const CARD_HEIGHT: f64 = 170.0;
const CARD_PADDING: f64 = 20.0;

/// Render the content overlay for one section panel. Inactive panels
/// draw nothing.
pub fn render_panel(panel: &PanelState, viewport: &Viewport) -> Vec<RenderCommand> {
    if panel.opacity <= 0.0 || viewport.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(64);
    out.push(RenderCommand::BeginGroup {
        id: format!("panel-{}", panel.section.key()).into(),
        label: Some(panel.section.label().into()),
    });
    match &panel.content {
        PanelContent::Welcome(p) => welcome(&mut out, p, viewport),
        PanelContent::Warp(p) => warp(&mut out, p, viewport),
        PanelContent::BlackHole(p) => black_hole(&mut out, p, viewport),
        PanelContent::Planet(p) => planet(&mut out, p, viewport),
        PanelContent::Void(p) => void(&mut out, p, viewport),
    }
    out.push(RenderCommand::EndGroup);
    out
}

fn text(
    out: &mut Vec<RenderCommand>,
    x: f64,
    y: f64,
    label: impl Into<Label>,
    color: ThemeToken,
    size: f64,
    align: TextAlign,
) {
    out.push(RenderCommand::text(Point::new(x, y), label, color, size, align));
}

fn spaced(
    out: &mut Vec<RenderCommand>,
    x: f64,
    y: f64,
    label: impl Into<Label>,
    color: ThemeToken,
    size: f64,
    letter_spacing: f64,
) {
    out.push(RenderCommand::DrawText {
        position: Point::new(x, y),
        text: label.into(),
        color,
        font_size: size,
        align: TextAlign::Center,
        letter_spacing,
    });
}

/// Wrapped paragraph; returns the y below the last line.
#[allow(clippy::too_many_arguments)]
fn paragraph(
    out: &mut Vec<RenderCommand>,
    x: f64,
    y: f64,
    width: f64,
    body: &str,
    color: ThemeToken,
    size: f64,
    align: TextAlign,
) -> f64 {
    let max_chars = ((width / (size * GLYPH_WIDTH)) as usize).max(8);
    let line_height = size * 1.5;
    let mut y = y;
    for line in wrap_words(body, max_chars) {
        text(out, x, y, line, color, size, align);
        y += line_height;
    }
    y
}

fn with_opacity(out: &mut Vec<RenderCommand>, alpha: f64, draw: impl FnOnce(&mut Vec<RenderCommand>)) {
    if alpha <= 0.0 {
        return;
    }
    let faded = alpha < 1.0;
    if faded {
        out.push(RenderCommand::PushOpacity { alpha });
    }
    draw(out);
    if faded {
        out.push(RenderCommand::PopOpacity);
    }
}

fn translated(out: &mut Vec<RenderCommand>, dx: f64, dy: f64, draw: impl FnOnce(&mut Vec<RenderCommand>)) {
    out.push(RenderCommand::PushTransform {
        translate: Point::new(dx, dy),
        scale: Point::new(1.0, 1.0),
    });
    draw(out);
    out.push(RenderCommand::PopTransform);
}

fn welcome(out: &mut Vec<RenderCommand>, p: &WelcomePanel, vp: &Viewport) {
    let x = vp.width * 0.1;
    let top = vp.height * 0.35;
    with_opacity(out, p.text_opacity, |out| {
        translated(out, p.translate_x, 0.0, |out| {
            text(out, x, top, content::welcome::KICKER.to_uppercase(), ThemeToken::Accent, 14.0, TextAlign::Left);
            text(out, x, top + 48.0, content::welcome::GREETING, ThemeToken::TextMuted, 40.0, TextAlign::Left);
            text(out, x, top + 120.0, content::welcome::TITLE, ThemeToken::TextPrimary, 72.0, TextAlign::Left);
            paragraph(
                out,
                x,
                top + 170.0,
                (vp.width * 0.4).max(240.0),
                content::welcome::BLURB,
                ThemeToken::TextMuted,
                18.0,
                TextAlign::Left,
            );
        });
    });
    text(
        out,
        vp.width / 2.0,
        vp.height - 48.0,
        content::welcome::SCROLL_HINT.to_uppercase(),
        ThemeToken::TextMuted,
        12.0,
        TextAlign::Center,
    );
}

fn warp(out: &mut Vec<RenderCommand>, p: &WarpPanel, vp: &Viewport) {
    let center = vp.center();

    with_opacity(out, p.lines_opacity, |out| {
        for i in 0..12 {
            let y = vp.height * (i as f64 + 0.5) / 12.0;
            let inset = vp.width * 0.05 * ((i % 3) as f64 + 1.0);
            out.push(RenderCommand::DrawLine {
                from: Point::new(inset, y),
                to: Point::new(vp.width - inset, y),
                color: ThemeToken::WarpStreak,
                width: 1.0,
                alpha: 0.4,
            });
        }
    });

    with_opacity(out, p.title_opacity, |out| {
        text(out, center.x, center.y - 90.0, content::warp::KICKER.to_uppercase(), ThemeToken::Accent, 14.0, TextAlign::Center);
        out.push(RenderCommand::PushTransform {
            translate: center,
            scale: Point::new(p.stretch, 1.0),
        });
        text(out, 0.0, 0.0, content::warp::TITLE, ThemeToken::TextPrimary, 96.0, TextAlign::Center);
        out.push(RenderCommand::PopTransform);
    });

    with_opacity(out, p.readout_opacity, |out| {
        let y = center.y + 90.0;
        let third = vp.width / 6.0;
        text(out, center.x - 2.0 * third, y, p.speed_label(), ThemeToken::Primary, 28.0, TextAlign::Center);
        text(out, center.x - 2.0 * third, y + 24.0, content::warp::SPEED_UNIT, ThemeToken::TextMuted, 12.0, TextAlign::Center);
        text(out, center.x, y, p.warp_factor_label(), ThemeToken::Primary, 28.0, TextAlign::Center);
        text(out, center.x, y + 24.0, "Warp Factor", ThemeToken::TextMuted, 12.0, TextAlign::Center);
        text(out, center.x + 2.0 * third, y, p.light_speed_label(), ThemeToken::Primary, 28.0, TextAlign::Center);
        text(out, center.x + 2.0 * third, y + 24.0, content::warp::LIGHT_SPEED_UNIT, ThemeToken::TextMuted, 12.0, TextAlign::Center);
    });

    if let Some(alpha) = p.anomaly {
        with_opacity(out, alpha, |out| {
            text(out, center.x, vp.height - 64.0, content::warp::ANOMALY, ThemeToken::Accent, 14.0, TextAlign::Center);
        });
    }
}

fn black_hole(out: &mut Vec<RenderCommand>, p: &BlackHolePanel, vp: &Viewport) {
    let center = vp.center();

    text(out, center.x, center.y - 120.0, content::black_hole::WARNING.to_uppercase(), ThemeToken::Accent, 13.0, TextAlign::Center);

    out.push(RenderCommand::PushTransform {
        translate: center,
        scale: Point::new(p.scale, p.scale),
    });
    for (radius, alpha) in p.glow_radii.iter().zip([0.12, 0.06]) {
        out.push(RenderCommand::DrawCircle {
            center: Point::new(0.0, -24.0),
            radius: *radius * 2.0,
            fill: Some(ThemeToken::Primary),
            stroke: None,
            stroke_width: 0.0,
            alpha,
        });
    }
    spaced(out, 0.0, 0.0, content::black_hole::TITLE, ThemeToken::TextPrimary, 80.0, p.letter_spacing);
    out.push(RenderCommand::PopTransform);

    with_opacity(out, p.pull_opacity, |out| {
        paragraph(
            out,
            center.x,
            center.y + 60.0,
            (vp.width * 0.5).max(260.0),
            content::black_hole::BLURB,
            ThemeToken::TextMuted,
            18.0,
            TextAlign::Center,
        );
    });

    let y = vp.height - 120.0;
    text(out, center.x, y, p.distance_label(), ThemeToken::Primary, 32.0, TextAlign::Center);
    text(out, center.x, y + 24.0, content::black_hole::DISTANCE_CAPTION.to_uppercase(), ThemeToken::TextMuted, 11.0, TextAlign::Center);

    if let Some(alpha) = p.hint {
        with_opacity(out, alpha, |out| {
            text(out, vp.width - 40.0, vp.height - 40.0, content::black_hole::HINT, ThemeToken::TextMuted, 13.0, TextAlign::Right);
        });
    }
}

fn planet(out: &mut Vec<RenderCommand>, p: &PlanetPanel, vp: &Viewport) {
    let x = vp.width * 0.06;
    let column = (vp.width * 0.5).min(720.0);

    if p.header_visible {
        text(out, x, 80.0, content::planet::KICKER.to_uppercase(), ThemeToken::Accent, 13.0, TextAlign::Left);
        text(out, x, 130.0, content::planet::TITLE, ThemeToken::TextPrimary, 48.0, TextAlign::Left);
        paragraph(out, x, 168.0, column, content::planet::BLURB, ThemeToken::TextMuted, 16.0, TextAlign::Left);
    }

    let card_w = (column - CARD_GAP) / 2.0;
    for (i, (project, reveal)) in PROJECTS.iter().zip(&p.projects).enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let rect = Rect::new(
            x + col * (card_w + CARD_GAP),
            230.0 + row * (CARD_HEIGHT + CARD_GAP),
            card_w,
            CARD_HEIGHT,
        );
        project_card(out, project, reveal, rect);
    }

    if p.cta_visible {
        let y = 230.0 + 2.0 * (CARD_HEIGHT + CARD_GAP) + 12.0;
        out.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, 220.0, 48.0),
            color: ThemeToken::Primary,
            border_color: None,
            corner_radius: 24.0,
        });
        text(out, x + 110.0, y + 30.0, content::planet::CALL_TO_ACTION, ThemeToken::VoidBlack, 15.0, TextAlign::Center);
    }
}

fn project_card(out: &mut Vec<RenderCommand>, project: &Project, reveal: &ProjectReveal, rect: Rect) {
    with_opacity(out, reveal.opacity, |out| {
        translated(out, 0.0, reveal.translate_y, |out| {
            out.push(RenderCommand::DrawRect {
                rect,
                color: ThemeToken::PanelGlass,
                border_color: Some(ThemeToken::PanelBorder),
                corner_radius: 12.0,
            });
            let x = rect.x + CARD_PADDING;
            text(out, x, rect.y + 36.0, project.title, ThemeToken::TextPrimary, 20.0, TextAlign::Left);
            paragraph(
                out,
                x,
                rect.y + 64.0,
                rect.w - 2.0 * CARD_PADDING,
                project.description,
                ThemeToken::TextMuted,
                13.0,
                TextAlign::Left,
            );

            let mut tag_x = x;
            let tag_y = rect.y + rect.h - 36.0;
            for tag in project.tags {
                let w = tag.chars().count() as f64 * 11.0 * GLYPH_WIDTH + 16.0;
                out.push(RenderCommand::DrawRect {
                    rect: Rect::new(tag_x, tag_y, w, 22.0),
                    color: ThemeToken::TagBackground,
                    border_color: None,
                    corner_radius: 11.0,
                });
                text(out, tag_x + w / 2.0, tag_y + 15.0, *tag, ThemeToken::Primary, 11.0, TextAlign::Center);
                tag_x += w + 8.0;
            }
        });
    });
}

fn void(out: &mut Vec<RenderCommand>, p: &VoidPanel, vp: &Viewport) {
    let center = vp.center();
    with_opacity(out, p.fade_in, |out| {
        translated(out, 0.0, p.translate_y, |out| {
            let card = Rect::new(center.x - 320.0, center.y - 200.0, 640.0, 400.0);
            out.push(RenderCommand::DrawRect {
                rect: card,
                color: ThemeToken::PanelGlass,
                border_color: Some(ThemeToken::PanelBorder),
                corner_radius: 16.0,
            });
            text(out, center.x, card.y + 48.0, content::void::STATUS.to_uppercase(), ThemeToken::TextMuted, 12.0, TextAlign::Center);
            text(out, center.x, card.y + 112.0, content::void::HEADLINE, ThemeToken::TextPrimary, 48.0, TextAlign::Center);
            text(
                out,
                center.x,
                card.y + 170.0,
                format!("{}{}", content::void::HEADLINE_LEAD, content::void::HEADLINE_ACCENT),
                ThemeToken::Primary,
                48.0,
                TextAlign::Center,
            );
            paragraph(out, center.x, card.y + 215.0, card.w - 80.0, content::void::BLURB, ThemeToken::TextMuted, 16.0, TextAlign::Center);
            text(out, center.x, card.y + 300.0, content::void::EMAIL, ThemeToken::Accent, 22.0, TextAlign::Center);

            let avail_y = card.y + card.h - 40.0;
            out.push(RenderCommand::DrawCircle {
                center: Point::new(center.x - 80.0, avail_y - 4.0),
                radius: 4.0,
                fill: Some(ThemeToken::Available),
                stroke: None,
                stroke_width: 0.0,
                alpha: 1.0,
            });
            text(out, center.x - 68.0, avail_y, content::void::AVAILABILITY, ThemeToken::TextMuted, 13.0, TextAlign::Left);
        });
    });

    let footer_y = vp.height - 24.0;
    text(out, 24.0, footer_y, content::void::FOOTER, ThemeToken::TextMuted, 11.0, TextAlign::Left);
    text(out, center.x, footer_y, content::void::LOCATION, ThemeToken::TextMuted, 11.0, TextAlign::Center);
    text(out, vp.width - 24.0, footer_y, content::void::OFFLINE, ThemeToken::TextMuted, 11.0, TextAlign::Right);
}

#[cfg(test)]
mod tests {
    use warpfolio_protocol::Section;

    use super::*;

    fn texts(cmds: &[RenderCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    #[test]
    fn inactive_panels_draw_nothing() {
        let panel = PanelState::derive(Section::Warp, 0.5, false);
        assert!(render_panel(&panel, &viewport()).is_empty());
    }

    #[test]
    fn warp_panel_shows_live_readouts() {
        let panel = PanelState::derive(Section::Warp, 0.5, true);
        let labels = texts(&render_panel(&panel, &viewport()));
        assert!(labels.iter().any(|t| t == "149,896"));
        assert!(labels.iter().any(|t| t == "5.0"));
        assert!(!labels.iter().any(|t| t == content::warp::ANOMALY));

        let late = PanelState::derive(Section::Warp, 0.9, true);
        assert!(texts(&render_panel(&late, &viewport()))
            .iter()
            .any(|t| t == content::warp::ANOMALY));
    }

    #[test]
    fn black_hole_title_spreads_out() {
        let panel = PanelState::derive(Section::BlackHole, 1.0, true);
        let cmds = render_panel(&panel, &viewport());
        let spacing = cmds.iter().find_map(|c| match c {
            RenderCommand::DrawText {
                text,
                letter_spacing,
                ..
            } if text == content::black_hole::TITLE => Some(*letter_spacing),
            _ => None,
        });
        assert_eq!(spacing, Some(5.0));
        assert!(texts(&cmds).iter().any(|t| t == "1.0 AU"));
    }

    #[test]
    fn unrevealed_projects_are_skipped() {
        let early = PanelState::derive(Section::Planet, 0.0, true);
        let labels = texts(&render_panel(&early, &viewport()));
        assert!(!labels.iter().any(|t| t == content::planet::TITLE));
        assert!(!labels.iter().any(|t| t == PROJECTS[0].title));

        let done = PanelState::derive(Section::Planet, 1.0, true);
        let labels = texts(&render_panel(&done, &viewport()));
        for project in &PROJECTS {
            assert!(labels.iter().any(|t| t == project.title));
        }
        assert!(labels.iter().any(|t| t == content::planet::CALL_TO_ACTION));
    }

    #[test]
    fn void_contact_card_appears() {
        let panel = PanelState::derive(Section::Void, 0.9, true);
        let labels = texts(&render_panel(&panel, &viewport()));
        assert!(labels.iter().any(|t| t == content::void::EMAIL));
        assert!(labels.iter().any(|t| t == content::void::OFFLINE));
    }

    #[test]
    fn stacks_are_balanced() {
        for section in Section::ALL {
            for p in [0.0, 0.5, 1.0] {
                let cmds = render_panel(&PanelState::derive(section, p, true), &viewport());
                let push = cmds.iter().filter(|c| matches!(c, RenderCommand::PushOpacity { .. })).count();
                let pop = cmds.iter().filter(|c| matches!(c, RenderCommand::PopOpacity)).count();
                let tpush = cmds.iter().filter(|c| matches!(c, RenderCommand::PushTransform { .. })).count();
                let tpop = cmds.iter().filter(|c| matches!(c, RenderCommand::PopTransform)).count();
                assert_eq!(push, pop, "{section} at {p}");
                assert_eq!(tpush, tpop, "{section} at {p}");
            }
        }
    }
}
