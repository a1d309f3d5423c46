use std::f32::consts::{PI, TAU};

use glam::{Mat3, Vec3};

use super::ambient::AmbientMotion;

pub const RADIUS: f32 = 3.0;
pub const GROUP_X: f32 = 15.0;
pub const ATMOSPHERE_SCALE: f32 = 1.15;
pub const OUTER_ATMOSPHERE_SCALE: f32 = 1.3;
pub const RING_INNER: f32 = 4.0;
pub const RING_OUTER: f32 = 6.0;
pub const RING_GLOW_INNER: f32 = 3.8;
pub const RING_GLOW_OUTER: f32 = 6.2;
pub const MOON_OFFSET: Vec3 = Vec3::new(7.0, 2.0, 0.0);
pub const MOON_RADIUS: f32 = 0.5;
const RING_TILT_X: f32 = PI * 0.4;
const RING_TILT_Z: f32 = 0.2;
const LATITUDES: usize = 7;
const MERIDIANS: usize = 12;
const SEGMENTS: usize = 48;

/// Which side of the planet body a ring segment lies on, as seen from the
/// camera. Back segments are drawn before the body, front ones after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
}

/// Model-space wireframe of the planet: latitude circles and meridians on
/// the sphere, plus concentric ring bands in the ring plane.
#[derive(Debug, Clone)]
pub struct PlanetModel {
    pub grid: Vec<Vec<Vec3>>,
    pub rings: Vec<Ring>,
}

#[derive(Debug, Clone)]
pub struct Ring {
    pub radius: f32,
    pub glow: bool,
    pub outline: Vec<Vec3>,
}

impl PlanetModel {
    pub fn build() -> Self {
        let mut grid = Vec::with_capacity(LATITUDES + MERIDIANS);

        for i in 1..=LATITUDES {
            let phi = PI * i as f32 / (LATITUDES + 1) as f32 - PI / 2.0;
            let (y, r) = (RADIUS * phi.sin(), RADIUS * phi.cos());
            grid.push(circle(SEGMENTS, |a| Vec3::new(r * a.cos(), y, r * a.sin())));
        }
        for j in 0..MERIDIANS {
            let theta = TAU * j as f32 / MERIDIANS as f32;
            let line = (0..=SEGMENTS / 2)
                .map(|k| {
                    let phi = PI * k as f32 / (SEGMENTS / 2) as f32 - PI / 2.0;
                    Vec3::new(
                        RADIUS * phi.cos() * theta.cos(),
                        RADIUS * phi.sin(),
                        RADIUS * phi.cos() * theta.sin(),
                    )
                })
                .collect();
            grid.push(line);
        }

        let band = |radius: f32, glow: bool| Ring {
            radius,
            glow,
            outline: circle(SEGMENTS * 2, |a| Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)),
        };
        let rings = vec![
            band(RING_GLOW_INNER, true),
            band(RING_INNER, false),
            band((RING_INNER + RING_OUTER) / 2.0, false),
            band(RING_OUTER, false),
            band(RING_GLOW_OUTER, true),
        ];

        Self { grid, rings }
    }
}

fn circle(segments: usize, point: impl Fn(f32) -> Vec3) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| point(TAU * i as f32 / segments as f32))
        .collect()
}

/// World placement of the planet group for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct PlanetPose {
    pub center: Vec3,
    pub body_rotation: Mat3,
    pub ring_rotation: Mat3,
}

impl PlanetPose {
    pub fn new(ambient: &AmbientMotion) -> Self {
        Self {
            center: Vec3::new(GROUP_X, ambient.planet_float as f32, ambient.planet_z as f32),
            body_rotation: Mat3::from_rotation_y(ambient.planet_spin as f32),
            ring_rotation: Mat3::from_rotation_x(RING_TILT_X)
                * Mat3::from_rotation_z(RING_TILT_Z + ambient.ring_spin as f32),
        }
    }

    pub fn body_to_world(&self, local: Vec3) -> Vec3 {
        self.center + self.body_rotation * local
    }

    pub fn ring_to_world(&self, local: Vec3) -> Vec3 {
        self.center + self.ring_rotation * local
    }

    pub fn moon_center(&self) -> Vec3 {
        self.center + MOON_OFFSET
    }

    /// Grid points on the far hemisphere are hidden by the body.
    pub fn body_facing(&self, local: Vec3) -> Facing {
        facing((self.body_rotation * local).z)
    }

    pub fn ring_facing(&self, local: Vec3) -> Facing {
        facing((self.ring_rotation * local).z)
    }
}

/// The camera looks down −Z, so +Z relative to the center faces it.
fn facing(relative_z: f32) -> Facing {
    if relative_z >= 0.0 {
        Facing::Front
    } else {
        Facing::Back
    }
}
