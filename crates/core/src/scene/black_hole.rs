use std::f32::consts::TAU;

use glam::{Mat3, Vec3};

use super::ambient::{AmbientMotion, BLACK_HOLE_TILT};
use super::assets::{CloudPoint, PointCloud, Tint};

pub const DISK_PARTICLES: usize = 1200;
pub const POSITION: Vec3 = Vec3::new(0.0, 0.0, -50.0);
/// Model-space to world-space scale before the pull-strength zoom.
pub const BASE_SCALE: f32 = 5.0;
pub const HORIZON_RADIUS: f32 = 1.0;
pub const PHOTON_RING_RADIUS: f32 = 1.15;
const DISK_INNER: f32 = 1.3;
const DISK_OUTER: f32 = 4.0;
const HOT_CUTOFF: f32 = 2.2;

/// Accretion disk particles in model space (disk in the XY plane).
///
/// Density falls off with radius: `r = inner + span * u²`.
pub fn generate_disk(count: usize, seed: u64) -> PointCloud {
    let mut rng = fastrand::Rng::with_seed(seed ^ 0x6b68_6f6c_65);
    let points = (0..count)
        .map(|_| {
            let u = rng.f32();
            let r = DISK_INNER + (DISK_OUTER - DISK_INNER) * u * u;
            let angle = rng.f32() * TAU;
            let thickness = (rng.f32() - 0.5) * 0.1 * r;
            CloudPoint {
                position: Vec3::new(r * angle.cos(), r * angle.sin(), thickness),
                size: 0.03 + 0.05 * rng.f32(),
                tint: if r < HOT_CUTOFF { Tint::Hot } else { Tint::Cool },
            }
        })
        .collect();
    PointCloud { points }
}

/// World placement of the black hole for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct BlackHolePose {
    pub rotation: Mat3,
    pub scale: f32,
}

impl BlackHolePose {
    /// Fixed tilt about X, spin about the disk axis, scaled by pull strength.
    pub fn new(ambient: &AmbientMotion, black_hole_scale: f64) -> Self {
        let rotation = Mat3::from_rotation_x(BLACK_HOLE_TILT as f32)
            * Mat3::from_rotation_z(ambient.black_hole_spin as f32);
        Self {
            rotation,
            scale: BASE_SCALE * black_hole_scale as f32,
        }
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        POSITION + self.rotation * (local * self.scale)
    }

    /// World-space radius of a model-space length.
    pub fn world_length(&self, local: f32) -> f32 {
        local * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_particles_sit_between_horizon_and_edge() {
        let disk = generate_disk(DISK_PARTICLES, 11);
        assert_eq!(disk.len(), DISK_PARTICLES);
        for p in &disk.points {
            let planar = p.position.truncate().length();
            assert!(planar >= DISK_INNER - 1e-4 && planar <= DISK_OUTER + 1e-4);
            assert!(planar > HORIZON_RADIUS);
        }
        assert!(disk.points.iter().any(|p| p.tint == Tint::Hot));
        assert!(disk.points.iter().any(|p| p.tint == Tint::Cool));
    }

    #[test]
    fn pose_scales_with_pull() {
        let ambient = AmbientMotion::new();
        let calm = BlackHolePose::new(&ambient, 1.0);
        let pulled = BlackHolePose::new(&ambient, 1.75);
        assert_eq!(calm.world_length(1.0), 5.0);
        assert!((pulled.world_length(1.0) - 8.75).abs() < 1e-5);
        assert_eq!(calm.to_world(Vec3::ZERO), POSITION);
    }
}
