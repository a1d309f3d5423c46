use warpfolio_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::model::loading::LoadingGate;

const STAR_RADIUS: f64 = 6.0;
const BAR_WIDTH: f64 = 240.0;
const BAR_HEIGHT: f64 = 2.0;

/// The intro overlay: a pulsing star that zooms toward the viewer, a
/// status line and the fake progress bar.
pub fn render_loading(gate: &LoadingGate, viewport: &Viewport) -> Vec<RenderCommand> {
    if gate.is_complete() || viewport.is_empty() {
        return Vec::new();
    }
    let center = viewport.center();
    let overlay = gate.overlay_opacity();

    let mut out = Vec::with_capacity(12);
    out.push(RenderCommand::begin_group("loading"));

    // The backdrop stays opaque until the page takes over.
    out.push(RenderCommand::DrawRect {
        rect: viewport.bounds(),
        color: ThemeToken::VoidBlack,
        border_color: None,
        corner_radius: 0.0,
    });

    let radius = STAR_RADIUS * gate.star_scale();
    out.push(RenderCommand::DrawCircle {
        center,
        radius: radius * 2.5,
        fill: Some(ThemeToken::StarBlue),
        stroke: None,
        stroke_width: 0.0,
        alpha: 0.2,
    });
    out.push(RenderCommand::DrawCircle {
        center,
        radius,
        fill: Some(ThemeToken::StarWhite),
        stroke: None,
        stroke_width: 0.0,
        alpha: 1.0,
    });

    if overlay > 0.0 {
        out.push(RenderCommand::PushOpacity { alpha: overlay });
        out.push(RenderCommand::text(
            Point::new(center.x, center.y + 64.0),
            gate.status_text().to_uppercase(),
            ThemeToken::TextMuted,
            12.0,
            TextAlign::Center,
        ));
        if let Some(fraction) = gate.bar_fraction() {
            let x = center.x - BAR_WIDTH / 2.0;
            let y = center.y + 84.0;
            out.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, BAR_WIDTH, BAR_HEIGHT),
                color: ThemeToken::IndicatorTrack,
                border_color: None,
                corner_radius: 1.0,
            });
            out.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, BAR_WIDTH * fraction, BAR_HEIGHT),
                color: ThemeToken::Primary,
                border_color: None,
                corner_radius: 1.0,
            });
            out.push(RenderCommand::text(
                Point::new(center.x, y + 24.0),
                format!("{:.0}%", gate.progress().floor()),
                ThemeToken::TextMuted,
                11.0,
                TextAlign::Center,
            ));
        }
        out.push(RenderCommand::PopOpacity);
    }

    out.push(RenderCommand::EndGroup);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::loading::{LoadingPhase, TICK_INTERVAL};

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn star_radius(cmds: &[RenderCommand]) -> Option<f64> {
        cmds.iter().find_map(|c| match c {
            RenderCommand::DrawCircle {
                fill: Some(ThemeToken::StarWhite),
                radius,
                ..
            } => Some(*radius),
            _ => None,
        })
    }

    #[test]
    fn loading_shows_bar_and_status() {
        let gate = LoadingGate::new(1);
        let cmds = render_loading(&gate, &viewport());
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, .. } if text == "INITIALIZING STAR MAP"
        )));
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawRect { color: ThemeToken::Primary, .. }
        )));
    }

    #[test]
    fn star_grows_while_zooming() {
        let mut gate = LoadingGate::new(8);
        while gate.phase() == LoadingPhase::Loading {
            gate.advance(TICK_INTERVAL);
        }
        let before = star_radius(&render_loading(&gate, &viewport()));
        gate.advance(1.0);
        let cmds = render_loading(&gate, &viewport());
        let after = star_radius(&cmds);
        assert!(matches!((before, after), (Some(b), Some(a)) if a > b));
        assert!(!cmds.iter().any(|c| matches!(c, RenderCommand::DrawText { .. })));
    }

    #[test]
    fn nothing_once_complete() {
        let mut gate = LoadingGate::new(2);
        gate.skip();
        assert!(render_loading(&gate, &viewport()).is_empty());
    }
}
