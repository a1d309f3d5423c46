//! Per-section content panel state, derived from section progress.

use serde::Serialize;
use warpfolio_protocol::{ScrollSnapshot, Section};

use super::content::{self, PROJECTS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomePanel {
    pub text_opacity: f64,
    /// Horizontal slide-in offset in pixels.
    pub translate_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarpPanel {
    pub speed_kms: u32,
    pub warp_factor: f64,
    pub stretch: f64,
    pub lines_opacity: f64,
    pub readout_opacity: f64,
    pub title_opacity: f64,
    pub light_speed_pct: f64,
    /// Opacity of the anomaly warning, present late in the section.
    pub anomaly: Option<f64>,
}

impl WarpPanel {
    pub fn warp_factor_label(&self) -> String {
        format!("{:.1}", self.warp_factor)
    }

    pub fn speed_label(&self) -> String {
        group_thousands(self.speed_kms)
    }

    pub fn light_speed_label(&self) -> String {
        format!("{:.0}%", self.light_speed_pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackHolePanel {
    pub distortion: f64,
    pub pull_opacity: f64,
    /// Clear center of the vignette, in percent.
    pub vignette_inner_pct: f64,
    pub scale: f64,
    /// Inner and outer title glow blur radii in pixels.
    pub glow_radii: [f64; 2],
    pub letter_spacing: f64,
    pub distance_au: f64,
    /// Opacity of the navigation hint, present past the midpoint.
    pub hint: Option<f64>,
}

impl BlackHolePanel {
    pub fn distance_label(&self) -> String {
        format!("{:.1} AU", self.distance_au)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReveal {
    pub opacity: f64,
    /// Upward slide offset in pixels.
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPanel {
    pub header_visible: bool,
    pub projects: [ProjectReveal; PROJECTS.len()],
    pub cta_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidPanel {
    pub fade_in: f64,
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelContent {
    Welcome(WelcomePanel),
    Warp(WarpPanel),
    BlackHole(BlackHolePanel),
    Planet(PlanetPanel),
    Void(VoidPanel),
}

impl PanelContent {
    pub fn derive(section: Section, p: f64) -> Self {
        match section {
            Section::Welcome => PanelContent::Welcome(WelcomePanel {
                text_opacity: ((p - 0.3) / 0.7).max(0.0),
                translate_x: (1.0 - p) * 100.0,
            }),
            Section::Warp => PanelContent::Warp(WarpPanel {
                speed_kms: (p * content::warp::LIGHT_SPEED_KMS).floor() as u32,
                warp_factor: p * 9.9,
                stretch: 1.0 + p * 0.5,
                lines_opacity: p * 0.5,
                readout_opacity: 0.5 + p * 0.5,
                title_opacity: 0.7 + p * 0.3,
                light_speed_pct: p * 100.0,
                anomaly: (p > 0.7).then(|| (p - 0.7) / 0.3),
            }),
            Section::BlackHole => {
                let distortion = p * 10.0;
                PanelContent::BlackHole(BlackHolePanel {
                    distortion,
                    pull_opacity: (p * 1.5).min(1.0),
                    vignette_inner_pct: 60.0 - p * 40.0,
                    scale: 1.0 - p * 0.3,
                    glow_radii: [20.0 + distortion * 3.0, 40.0 + distortion * 5.0],
                    letter_spacing: distortion * 0.5,
                    distance_au: 100.0 - p * 99.0,
                    hint: (p > 0.5).then(|| (p - 0.5) * 2.0),
                })
            }
            Section::Planet => PanelContent::Planet(PlanetPanel {
                header_visible: p > 0.1,
                projects: std::array::from_fn(|i| {
                    let reveal = ((p - i as f64 * 0.2) / 0.3).clamp(0.0, 1.0);
                    ProjectReveal {
                        opacity: reveal,
                        translate_y: (1.0 - reveal) * 50.0,
                    }
                }),
                cta_visible: p > 0.8,
            }),
            Section::Void => {
                let fade_in = ((p - 0.2) / 0.6).clamp(0.0, 1.0);
                PanelContent::Void(VoidPanel {
                    fade_in,
                    translate_y: (1.0 - fade_in) * 30.0,
                })
            }
        }
    }
}

/// A content panel as the page shows it: only the active section's panel
/// is visible, every panel sees the same section progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    pub section: Section,
    pub active: bool,
    pub opacity: f64,
    pub content: PanelContent,
}

impl PanelState {
    pub fn derive(section: Section, progress: f64, active: bool) -> Self {
        Self {
            section,
            active,
            opacity: if active { 1.0 } else { 0.0 },
            content: PanelContent::derive(section, progress),
        }
    }

    /// The panel for the snapshot's current section.
    pub fn active(snapshot: &ScrollSnapshot) -> Self {
        Self::derive(snapshot.section, snapshot.section_progress, true)
    }

    /// Every panel, in page order.
    pub fn all(snapshot: &ScrollSnapshot) -> [PanelState; 5] {
        Section::ALL.map(|section| {
            Self::derive(
                section,
                snapshot.section_progress,
                snapshot.is_active(section),
            )
        })
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_text_waits_for_the_star_zoom() {
        let PanelContent::Welcome(early) = PanelContent::derive(Section::Welcome, 0.2) else {
            unreachable!();
        };
        assert_eq!(early.text_opacity, 0.0);
        assert!((early.translate_x - 80.0).abs() < 1e-9);

        let PanelContent::Welcome(done) = PanelContent::derive(Section::Welcome, 1.0) else {
            unreachable!();
        };
        assert!((done.text_opacity - 1.0).abs() < 1e-12);
        assert_eq!(done.translate_x, 0.0);
    }

    #[test]
    fn warp_readouts() {
        let PanelContent::Warp(half) = PanelContent::derive(Section::Warp, 0.5) else {
            unreachable!();
        };
        assert_eq!(half.speed_kms, 149_896);
        assert_eq!(half.speed_label(), "149,896");
        assert_eq!(half.warp_factor_label(), "5.0");
        assert_eq!(half.light_speed_label(), "50%");
        assert_eq!(half.anomaly, None);

        let PanelContent::Warp(late) = PanelContent::derive(Section::Warp, 0.85) else {
            unreachable!();
        };
        assert!(late.anomaly.is_some_and(|o| (o - 0.5).abs() < 1e-9));
    }

    #[test]
    fn black_hole_distance_shrinks() {
        let PanelContent::BlackHole(start) = PanelContent::derive(Section::BlackHole, 0.0) else {
            unreachable!();
        };
        assert_eq!(start.distance_label(), "100.0 AU");
        assert_eq!(start.hint, None);

        let PanelContent::BlackHole(end) = PanelContent::derive(Section::BlackHole, 1.0) else {
            unreachable!();
        };
        assert_eq!(end.distance_label(), "1.0 AU");
        assert_eq!(end.pull_opacity, 1.0);
        assert_eq!(end.glow_radii, [50.0, 90.0]);
        assert!((end.scale - 0.7).abs() < 1e-12);
        assert_eq!(end.hint, Some(1.0));
    }

    #[test]
    fn projects_reveal_in_sequence() {
        let PanelContent::Planet(panel) = PanelContent::derive(Section::Planet, 0.35) else {
            unreachable!();
        };
        assert!(panel.header_visible);
        assert!(!panel.cta_visible);
        assert_eq!(panel.projects[0].opacity, 1.0);
        assert!((panel.projects[1].opacity - 0.5).abs() < 1e-9);
        assert!((panel.projects[1].translate_y - 25.0).abs() < 1e-9);
        assert_eq!(panel.projects[2].opacity, 0.0);
        assert_eq!(panel.projects[3].translate_y, 50.0);
    }

    #[test]
    fn void_card_fades_in_and_stays_clamped() {
        let PanelContent::Void(early) = PanelContent::derive(Section::Void, 0.1) else {
            unreachable!();
        };
        assert_eq!(early.fade_in, 0.0);
        assert_eq!(early.translate_y, 30.0);

        let PanelContent::Void(past_full) = PanelContent::derive(Section::Void, 0.9) else {
            unreachable!();
        };
        assert_eq!(past_full.fade_in, 1.0);
        assert_eq!(past_full.translate_y, 0.0);

        let PanelContent::Void(end) = PanelContent::derive(Section::Void, 1.0) else {
            unreachable!();
        };
        assert_eq!(end.fade_in, 1.0);
        assert_eq!(end.translate_y, 0.0);
    }

    #[test]
    fn only_active_panel_is_visible() {
        let snap = ScrollSnapshot {
            overall_progress: 0.45,
            section: Section::BlackHole,
            section_progress: 0.5,
        };
        let panels = PanelState::all(&snap);
        let visible: Vec<_> = panels.iter().filter(|p| p.opacity > 0.0).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].section, Section::BlackHole);
        assert_eq!(PanelState::active(&snap), panels[2]);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(299_792), "299,792");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
