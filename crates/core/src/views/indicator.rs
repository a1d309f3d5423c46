use serde::Serialize;
use warpfolio_protocol::{Point, RenderCommand, ScrollSnapshot, Section, TextAlign, ThemeToken, Viewport};

const RIGHT_MARGIN: f64 = 32.0;
const DOT_RADIUS: f64 = 4.0;
const ACTIVE_DOT_RADIUS: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkState {
    Active,
    Past,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorMark {
    pub section: Section,
    pub state: MarkState,
}

/// One mark per section, in page order.
pub fn marks(snapshot: &ScrollSnapshot) -> [IndicatorMark; 5] {
    Section::ALL.map(|section| IndicatorMark {
        section,
        state: match section.cmp(&snapshot.section) {
            std::cmp::Ordering::Equal => MarkState::Active,
            std::cmp::Ordering::Less => MarkState::Past,
            std::cmp::Ordering::Greater => MarkState::Upcoming,
        },
    })
}

/// Vertical progress rail on the right edge: a track filled to overall
/// progress and a dot per section, labelled at the active one.
pub fn render_indicator(snapshot: &ScrollSnapshot, viewport: &Viewport) -> Vec<RenderCommand> {
    if viewport.is_empty() {
        return Vec::new();
    }
    let x = viewport.width - RIGHT_MARGIN;
    let top = viewport.height * 0.3;
    let bottom = viewport.height * 0.7;
    let span = bottom - top;

    let mut out = Vec::with_capacity(16);
    out.push(RenderCommand::begin_group("indicator"));
    out.push(RenderCommand::DrawLine {
        from: Point::new(x, top),
        to: Point::new(x, bottom),
        color: ThemeToken::IndicatorTrack,
        width: 2.0,
        alpha: 1.0,
    });
    let fill = snapshot.overall_progress.clamp(0.0, 1.0);
    if fill > 0.0 {
        out.push(RenderCommand::DrawLine {
            from: Point::new(x, top),
            to: Point::new(x, top + span * fill),
            color: ThemeToken::IndicatorFill,
            width: 2.0,
            alpha: 1.0,
        });
    }

    let last = (Section::ALL.len() - 1) as f64;
    for mark in marks(snapshot) {
        let y = top + span * mark.section.index() as f64 / last;
        let (radius, token) = match mark.state {
            MarkState::Active => (ACTIVE_DOT_RADIUS, ThemeToken::IndicatorFill),
            MarkState::Past => (DOT_RADIUS, ThemeToken::IndicatorPast),
            MarkState::Upcoming => (DOT_RADIUS, ThemeToken::IndicatorTrack),
        };
        out.push(RenderCommand::DrawCircle {
            center: Point::new(x, y),
            radius,
            fill: Some(token),
            stroke: None,
            stroke_width: 0.0,
            alpha: 1.0,
        });
        if mark.state == MarkState::Active {
            out.push(RenderCommand::text(
                Point::new(x - 16.0, y + 4.0),
                mark.section.label(),
                ThemeToken::TextPrimary,
                11.0,
                TextAlign::Right,
            ));
        }
    }

    out.push(RenderCommand::EndGroup);
    out
}
