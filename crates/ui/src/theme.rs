use warpfolio_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale alpha by `alpha` in [0, 1].
    pub fn faded(self, alpha: f64) -> Self {
        let a = (f64::from(self.a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

pub fn resolve(token: ThemeToken) -> egui::Color32 {
    palette(token).to_color32()
}

/// Token color with an extra alpha multiplier applied.
pub fn resolve_faded(token: ThemeToken, alpha: f64) -> egui::Color32 {
    palette(token).faded(alpha).to_color32()
}

pub fn palette(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        SpaceBackground => ResolvedColor::rgb(0x05, 0x05, 0x10),
        Fog => ResolvedColor::rgb(0x05, 0x05, 0x10),
        VoidBlack => ResolvedColor::rgb(0x00, 0x00, 0x00),

        StarWhite => ResolvedColor::rgb(0xff, 0xff, 0xff),
        StarBlue => ResolvedColor::rgb(0xaa, 0xcc, 0xff),
        StarWarm => ResolvedColor::rgb(0xff, 0xd9, 0xa0),
        WarpStreak => ResolvedColor::rgba(0xcf, 0xef, 0xff, 220),

        EventHorizon => ResolvedColor::rgb(0x00, 0x00, 0x00),
        PhotonRing => ResolvedColor::rgb(0xff, 0xcc, 0x66),
        AccretionHot => ResolvedColor::rgb(0xff, 0xb3, 0x47),
        AccretionCool => ResolvedColor::rgb(0xff, 0x5e, 0x3a),

        PlanetSurface => ResolvedColor::rgb(0x2a, 0x4a, 0x6a),
        PlanetGrid => ResolvedColor::rgb(0x3a, 0x6a, 0x9a),
        Atmosphere => ResolvedColor::rgb(0x00, 0xaa, 0xff),
        AtmosphereOuter => ResolvedColor::rgb(0x00, 0x66, 0xaa),
        PlanetRing => ResolvedColor::rgb(0x88, 0xaa, 0xcc),
        RingGlow => ResolvedColor::rgb(0x00, 0xff, 0xff),
        Moon => ResolvedColor::rgb(0x88, 0x88, 0x88),

        Primary => ResolvedColor::rgb(0x00, 0xff, 0xff),
        Accent => ResolvedColor::rgb(0x88, 0x33, 0xff),
        TextPrimary => ResolvedColor::rgb(0xff, 0xff, 0xff),
        TextMuted => ResolvedColor::rgb(0x9c, 0xa3, 0xaf),
        PanelGlass => ResolvedColor::rgba(0x0b, 0x10, 0x20, 200),
        PanelBorder => ResolvedColor::rgba(0xff, 0xff, 0xff, 30),
        TagBackground => ResolvedColor::rgba(0x00, 0xff, 0xff, 25),
        Available => ResolvedColor::rgb(0x22, 0xc5, 0x5e),

        IndicatorTrack => ResolvedColor::rgba(0xff, 0xff, 0xff, 40),
        IndicatorFill => ResolvedColor::rgb(0x00, 0xff, 0xff),
        IndicatorPast => ResolvedColor::rgb(0x3a, 0x6a, 0x9a),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_BODY: f32 = 13.0;
pub const FONT_CAPTION: f32 = 11.0;

/// Deep-space visuals for the few egui widgets drawn over the scene.
pub fn space_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = resolve(ThemeToken::SpaceBackground);
    v.window_fill = resolve(ThemeToken::PanelGlass);
    v.extreme_bg_color = resolve(ThemeToken::VoidBlack);
    v.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, resolve(ThemeToken::TextMuted));
    v.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, resolve(ThemeToken::PanelBorder));
    v.selection.bg_fill = resolve_faded(ThemeToken::Primary, 0.25);
    v.selection.stroke = egui::Stroke::new(1.0, resolve(ThemeToken::Primary));
    v.hyperlink_color = resolve(ThemeToken::Primary);
    v.window_corner_radius = egui::CornerRadius::same(12);
    v
}

/// Apply the typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::monospace(FONT_CAPTION),
    );
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fading_scales_alpha_only() {
        let c = ResolvedColor::rgb(10, 20, 30).faded(0.5);
        assert_eq!(c, ResolvedColor::rgba(10, 20, 30, 128));
        assert_eq!(ResolvedColor::rgb(1, 2, 3).faded(-1.0).a, 0);
        assert_eq!(ResolvedColor::rgba(1, 2, 3, 100).faded(7.0).a, 100);
    }

    #[test]
    fn horizon_is_pure_black() {
        assert_eq!(palette(ThemeToken::EventHorizon), ResolvedColor::rgb(0, 0, 0));
    }
}
