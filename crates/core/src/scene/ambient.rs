use std::f64::consts::PI;

use super::params::SceneParameters;

/// Starfield offset at which the drift wraps back to the origin.
pub const STARFIELD_WRAP: f64 = 50.0;
const STARFIELD_ROLL_SPEED: f64 = 0.01;
/// Rates below are the per-frame increments of a 60 Hz loop, per second.
const BLACK_HOLE_SPIN_SPEED: f64 = 0.002 * 60.0;
const PLANET_SPIN_SPEED: f64 = 0.001 * 60.0;
const RING_SPIN_SPEED: f64 = 0.0005 * 60.0;
const PLANET_EASE_PER_FRAME: f64 = 0.05;
pub const BLACK_HOLE_TILT: f64 = PI * 0.2;
pub const PLANET_BASE_Z: f64 = -30.0;

/// Transient, time-driven visual state.
///
/// This is the only state carried between frames. It animates idle motion
/// (drift, spin, float) and eases the planet toward its scroll-derived
/// target; everything else is recomputed from the scroll snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientMotion {
    pub elapsed: f64,
    pub starfield_z: f64,
    pub starfield_roll: f64,
    pub black_hole_spin: f64,
    pub planet_spin: f64,
    pub ring_spin: f64,
    pub planet_z: f64,
    pub planet_float: f64,
}

impl AmbientMotion {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            starfield_z: 0.0,
            starfield_roll: 0.0,
            black_hole_spin: 0.0,
            planet_spin: 0.0,
            ring_spin: 0.0,
            planet_z: PLANET_BASE_Z,
            planet_float: 0.0,
        }
    }

    /// Advance by `dt` seconds. Invalid or negative steps are ignored.
    pub fn advance(&mut self, dt: f64, params: &SceneParameters) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;

        self.starfield_z += dt * params.starfield_speed;
        if self.starfield_z > STARFIELD_WRAP {
            self.starfield_z = 0.0;
        }
        self.starfield_roll += dt * STARFIELD_ROLL_SPEED;

        self.black_hole_spin += dt * BLACK_HOLE_SPIN_SPEED;
        self.planet_spin += dt * PLANET_SPIN_SPEED;
        self.ring_spin += dt * RING_SPIN_SPEED;

        let ease = 1.0 - (1.0 - PLANET_EASE_PER_FRAME).powf(dt * 60.0);
        self.planet_z += (params.planet_target_z - self.planet_z) * ease;
        self.planet_float = (self.elapsed * 0.5).sin() * 0.5;
    }
}

impl Default for AmbientMotion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use warpfolio_protocol::Section;

    use super::*;
    use crate::scroll::SectionState;

    fn params(section: Section, p: f64) -> SceneParameters {
        SceneParameters::derive(SectionState::new(section, p))
    }

    #[test]
    fn idle_drift_is_slow_and_warp_is_fast() {
        let mut idle = AmbientMotion::new();
        idle.advance(1.0, &params(Section::Welcome, 0.5));
        assert!((idle.starfield_z - 0.1).abs() < 1e-12);

        let mut warp = AmbientMotion::new();
        warp.advance(1.0, &params(Section::Warp, 1.0));
        assert!((warp.starfield_z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn starfield_wraps() {
        let mut motion = AmbientMotion::new();
        motion.starfield_z = STARFIELD_WRAP - 0.1;
        motion.advance(1.0, &params(Section::Warp, 1.0));
        assert_eq!(motion.starfield_z, 0.0);
    }

    #[test]
    fn planet_eases_toward_target_independent_of_frame_rate() {
        let target = params(Section::Planet, 1.0);
        let mut coarse = AmbientMotion::new();
        coarse.advance(0.5, &target);

        let mut fine = AmbientMotion::new();
        for _ in 0..30 {
            fine.advance(1.0 / 60.0, &target);
        }
        assert!((coarse.planet_z - fine.planet_z).abs() < 1e-6);
        assert!(coarse.planet_z > PLANET_BASE_Z && coarse.planet_z < -5.0);
    }

    #[test]
    fn bad_time_steps_are_ignored() {
        let mut motion = AmbientMotion::new();
        let p = params(Section::Welcome, 0.0);
        motion.advance(-1.0, &p);
        motion.advance(f64::NAN, &p);
        motion.advance(0.0, &p);
        assert_eq!(motion, AmbientMotion::new());
    }
}
