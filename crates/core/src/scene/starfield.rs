use std::f32::consts::TAU;

use glam::Vec3;

use super::assets::{CloudPoint, PointCloud, Tint};

pub const DEFAULT_STAR_COUNT: usize = 2000;
const INNER_RADIUS: f32 = 12.0;
const OUTER_RADIUS: f32 = 140.0;

/// Seeded random stars in a spherical shell around the origin.
///
/// Radius is sampled with a cube-root distribution so the shell is filled
/// uniformly by volume rather than clustering near the center.
pub fn generate(count: usize, seed: u64) -> PointCloud {
    let mut rng = fastrand::Rng::with_seed(seed);
    let inner3 = INNER_RADIUS.powi(3);
    let outer3 = OUTER_RADIUS.powi(3);

    let points = (0..count)
        .map(|_| {
            let direction = random_unit_vector(&mut rng);
            let radius = (inner3 + (outer3 - inner3) * rng.f32()).cbrt();
            let tint = match rng.f32() {
                t if t < 0.7 => Tint::White,
                t if t < 0.9 => Tint::Blue,
                _ => Tint::Warm,
            };
            CloudPoint {
                position: direction * radius,
                size: 0.05 + 0.2 * rng.f32() * rng.f32(),
                tint,
            }
        })
        .collect();

    PointCloud { points }
}

fn random_unit_vector(rng: &mut fastrand::Rng) -> Vec3 {
    let z = rng.f32() * 2.0 - 1.0;
    let theta = rng.f32() * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sky() {
        assert_eq!(generate(64, 42), generate(64, 42));
        assert_ne!(generate(64, 42), generate(64, 43));
    }

    #[test]
    fn stars_stay_inside_the_shell() {
        let cloud = generate(DEFAULT_STAR_COUNT, 9);
        assert_eq!(cloud.len(), DEFAULT_STAR_COUNT);
        for star in &cloud.points {
            let r = star.position.length();
            assert!(r >= INNER_RADIUS - 1e-3 && r <= OUTER_RADIUS + 1e-3, "r={r}");
            assert!(star.size > 0.0);
        }
    }

    #[test]
    fn palette_is_mostly_white() {
        let cloud = generate(1000, 5);
        let white = cloud.points.iter().filter(|s| s.tint == Tint::White).count();
        assert!(white > 550 && white < 850, "white={white}");
    }
}
