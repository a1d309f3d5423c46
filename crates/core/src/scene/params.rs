use serde::Serialize;
use warpfolio_protocol::{ScrollSnapshot, Section};

use crate::scroll::SectionState;

/// Idle starfield drift, in world units per second.
pub const IDLE_STAR_SPEED: f64 = 0.1;

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fog {
    pub near: f64,
    pub far: f64,
}

impl Fog {
    /// 1.0 in front of `near`, 0.0 beyond `far`.
    pub fn visibility(&self, depth: f64) -> f64 {
        if self.far <= self.near {
            return if depth <= self.near { 1.0 } else { 0.0 };
        }
        ((self.far - depth) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

/// Radial darkening applied over the scene while approaching the black hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vignette {
    /// 0 = off, 1 = fully dark at the edges.
    pub strength: f64,
    /// Clear radius as a fraction of the half-diagonal.
    pub inner_radius: f64,
}

impl Vignette {
    pub const OFF: Vignette = Vignette {
        strength: 0.0,
        inner_radius: 1.0,
    };
}

/// Everything the renderable elements need for one frame, derived purely
/// from the current section state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneParameters {
    pub section: Section,
    pub section_progress: f64,
    pub camera_z: f64,
    pub warp_speed: f64,
    pub is_warping: bool,
    pub starfield_speed: f64,
    pub pull_strength: f64,
    pub black_hole_visible: bool,
    pub black_hole_scale: f64,
    pub planet_zoom: f64,
    pub planet_visible: bool,
    pub planet_target_z: f64,
    pub fog: Fog,
    pub scene_opacity: f64,
    pub vignette: Vignette,
}

impl SceneParameters {
    pub fn derive(state: SectionState) -> Self {
        let p = state.progress;
        let section = state.section;

        let (pull_strength, planet_zoom, warp_speed, camera_z) = match section {
            Section::Welcome => (0.0, 0.0, 0.0, 5.0 - p * 2.0),
            Section::Warp => (0.0, 0.0, p, 3.0 - p * 2.0),
            Section::BlackHole => (p, 0.0, 0.0, 1.0 - p * 10.0),
            Section::Planet => (0.0, p, 0.0, -9.0 + p * 5.0),
            Section::Void => (1.0 + p, 0.0, 0.0, -4.0 - p * 20.0),
        };

        let is_warping = section == Section::Warp;

        let fog = if section == Section::Void {
            Fog {
                near: 5.0,
                far: 20.0 + (1.0 - p) * 80.0,
            }
        } else {
            Fog {
                near: 30.0,
                far: 150.0,
            }
        };

        let vignette = if section == Section::BlackHole {
            Vignette {
                strength: (p * 1.5).min(1.0),
                inner_radius: 0.60 - p * 0.40,
            }
        } else {
            Vignette::OFF
        };

        Self {
            section,
            section_progress: p,
            camera_z,
            warp_speed,
            is_warping,
            starfield_speed: if is_warping {
                warp_speed * 2.0
            } else {
                IDLE_STAR_SPEED
            },
            pull_strength,
            black_hole_visible: matches!(
                section,
                Section::BlackHole | Section::Planet | Section::Void
            ),
            black_hole_scale: 1.0 + pull_strength * 0.5,
            planet_zoom,
            planet_visible: section == Section::Planet,
            planet_target_z: -30.0 + planet_zoom * 25.0,
            fog,
            scene_opacity: if section == Section::Void {
                1.0 - p * 0.95
            } else {
                1.0
            },
            vignette,
        }
    }

    pub fn from_snapshot(snapshot: &ScrollSnapshot) -> Self {
        Self::derive(SectionState::new(
            snapshot.section,
            snapshot.section_progress,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::SectionBreakpoints;

    fn at(section: Section, p: f64) -> SceneParameters {
        SceneParameters::derive(SectionState::new(section, p))
    }

    #[test]
    fn table_rows_match_section() {
        let welcome = at(Section::Welcome, 0.5);
        assert_eq!(welcome.camera_z, 4.0);
        assert_eq!(welcome.warp_speed, 0.0);

        let warp = at(Section::Warp, 0.25);
        assert_eq!(warp.warp_speed, 0.25);
        assert_eq!(warp.camera_z, 2.5);
        assert!(warp.is_warping);
        assert_eq!(warp.starfield_speed, 0.5);

        let planet = at(Section::Planet, 0.4);
        assert_eq!(planet.planet_zoom, 0.4);
        assert_eq!(planet.pull_strength, 0.0);
        assert!((planet.camera_z - -7.0).abs() < 1e-12);
        assert!((planet.planet_target_z - -20.0).abs() < 1e-12);
    }

    #[test]
    fn black_hole_midpoint_from_overall_progress() {
        let state = SectionBreakpoints::DEFAULT.resolve(0.45);
        assert_eq!(state.section, Section::BlackHole);
        let params = SceneParameters::derive(state);
        assert!((params.pull_strength - 0.5).abs() < 1e-9);
        assert!((params.camera_z - -4.0).abs() < 1e-9);
        assert!((params.black_hole_scale - 1.25).abs() < 1e-9);
    }

    #[test]
    fn void_midpoint_from_overall_progress() {
        let params = SceneParameters::derive(SectionBreakpoints::DEFAULT.resolve(0.9));
        assert_eq!(params.section, Section::Void);
        assert!((params.pull_strength - 1.5).abs() < 1e-9);
        assert!((params.scene_opacity - 0.525).abs() < 1e-9);
        assert_eq!(params.fog.near, 5.0);
        assert!((params.fog.far - 60.0).abs() < 1e-9);
    }

    #[test]
    fn derive_is_pure() {
        for section in Section::ALL {
            for step in 0..=20 {
                let p = f64::from(step) / 20.0;
                assert_eq!(at(section, p), at(section, p));
            }
        }
    }

    #[test]
    fn visibility_flags_follow_sections() {
        assert!(!at(Section::Warp, 0.9).black_hole_visible);
        assert!(at(Section::BlackHole, 0.0).black_hole_visible);
        assert!(at(Section::Planet, 0.5).black_hole_visible);
        assert!(at(Section::Void, 0.5).black_hole_visible);
        assert!(at(Section::Planet, 0.5).planet_visible);
        assert!(!at(Section::Void, 0.5).planet_visible);
    }

    #[test]
    fn vignette_only_near_black_hole() {
        assert_eq!(at(Section::Warp, 1.0).vignette, Vignette::OFF);
        let v = at(Section::BlackHole, 0.8).vignette;
        assert_eq!(v.strength, 1.0);
        assert!((v.inner_radius - 0.28).abs() < 1e-9);
    }

    #[test]
    fn fog_visibility_is_linear() {
        let fog = Fog {
            near: 30.0,
            far: 150.0,
        };
        assert_eq!(fog.visibility(10.0), 1.0);
        assert!((fog.visibility(90.0) - 0.5).abs() < 1e-12);
        assert_eq!(fog.visibility(400.0), 0.0);
    }
}
