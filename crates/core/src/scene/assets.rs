//! Point-cloud assets with procedural fallback.
//!
//! The starfield and the accretion disk can come from an external asset
//! (a JSON point cloud exported from a model). When the asset is missing,
//! malformed, or empty the scene silently uses the procedural generators
//! instead; the visitor never sees an error.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warpfolio_protocol::ThemeToken;

use super::black_hole;
use super::starfield;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Starfield,
    BlackHole,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Starfield => f.write_str("starfield"),
            AssetKind::BlackHole => f.write_str("blackhole"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{0} asset is not available")]
    Unavailable(AssetKind),
    #[error("{kind} asset is not a valid point cloud: {source}")]
    Decode {
        kind: AssetKind,
        source: serde_json::Error,
    },
    #[error("{0} asset contains no points")]
    Empty(AssetKind),
    #[error("{kind} asset point {index} has a non-finite coordinate")]
    NonFinite { kind: AssetKind, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    #[default]
    White,
    Blue,
    Warm,
    Hot,
    Cool,
}

impl Tint {
    pub fn token(self) -> ThemeToken {
        match self {
            Tint::White => ThemeToken::StarWhite,
            Tint::Blue => ThemeToken::StarBlue,
            Tint::Warm => ThemeToken::StarWarm,
            Tint::Hot => ThemeToken::AccretionHot,
            Tint::Cool => ThemeToken::AccretionCool,
        }
    }
}

fn default_point_size() -> f32 {
    0.1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudPoint {
    pub position: Vec3,
    /// Radius in world units.
    #[serde(default = "default_point_size")]
    pub size: f32,
    #[serde(default)]
    pub tint: Tint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    pub points: Vec<CloudPoint>,
}

impl PointCloud {
    /// Decode and validate a JSON point cloud.
    pub fn from_json(kind: AssetKind, data: &[u8]) -> Result<Self, AssetError> {
        let cloud: PointCloud =
            serde_json::from_slice(data).map_err(|source| AssetError::Decode { kind, source })?;
        if cloud.points.is_empty() {
            return Err(AssetError::Empty(kind));
        }
        if let Some(index) = cloud
            .points
            .iter()
            .position(|p| !p.position.is_finite() || !p.size.is_finite())
        {
            return Err(AssetError::NonFinite { kind, index });
        }
        Ok(cloud)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Where scene geometry comes from.
pub trait AssetSource {
    fn fetch(&self, kind: AssetKind) -> Result<PointCloud, AssetError>;
}

/// Never provides anything; the scene is fully procedural.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralOnly;

impl AssetSource for ProceduralOnly {
    fn fetch(&self, kind: AssetKind) -> Result<PointCloud, AssetError> {
        Err(AssetError::Unavailable(kind))
    }
}

/// In-memory JSON blobs, e.g. handed over by the host page after a fetch.
#[derive(Debug, Clone, Default)]
pub struct JsonAssets {
    blobs: HashMap<AssetKind, Vec<u8>>,
}

impl JsonAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: AssetKind, data: impl Into<Vec<u8>>) {
        self.blobs.insert(kind, data.into());
    }
}

impl AssetSource for JsonAssets {
    fn fetch(&self, kind: AssetKind) -> Result<PointCloud, AssetError> {
        let data = self.blobs.get(&kind).ok_or(AssetError::Unavailable(kind))?;
        PointCloud::from_json(kind, data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetOrigin {
    Loaded,
    Procedural,
}

/// Geometry the scene draws from, one cloud per asset kind.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub starfield: PointCloud,
    pub accretion_disk: PointCloud,
    pub starfield_origin: AssetOrigin,
    pub accretion_origin: AssetOrigin,
}

impl SceneAssets {
    /// Fully procedural geometry.
    pub fn procedural(star_count: usize, seed: u64) -> Self {
        Self {
            starfield: starfield::generate(star_count, seed),
            accretion_disk: black_hole::generate_disk(black_hole::DISK_PARTICLES, seed),
            starfield_origin: AssetOrigin::Procedural,
            accretion_origin: AssetOrigin::Procedural,
        }
    }

    /// Load what `source` provides and generate the rest.
    pub fn resolve(source: &dyn AssetSource, star_count: usize, seed: u64) -> Self {
        let (starfield, starfield_origin) = load_or_generate(source, AssetKind::Starfield, || {
            starfield::generate(star_count, seed)
        });
        let (accretion_disk, accretion_origin) =
            load_or_generate(source, AssetKind::BlackHole, || {
                black_hole::generate_disk(black_hole::DISK_PARTICLES, seed)
            });
        Self {
            starfield,
            accretion_disk,
            starfield_origin,
            accretion_origin,
        }
    }

    /// Replace one cloud with a freshly decoded asset. On failure the
    /// current geometry stays in place and the error is returned.
    pub fn replace(&mut self, kind: AssetKind, data: &[u8]) -> Result<(), AssetError> {
        let cloud = PointCloud::from_json(kind, data)?;
        match kind {
            AssetKind::Starfield => {
                self.starfield = cloud;
                self.starfield_origin = AssetOrigin::Loaded;
            }
            AssetKind::BlackHole => {
                self.accretion_disk = cloud;
                self.accretion_origin = AssetOrigin::Loaded;
            }
        }
        Ok(())
    }
}

fn load_or_generate(
    source: &dyn AssetSource,
    kind: AssetKind,
    generate: impl FnOnce() -> PointCloud,
) -> (PointCloud, AssetOrigin) {
    match source.fetch(kind) {
        Ok(cloud) if !cloud.is_empty() => {
            log::debug!("using loaded {kind} asset ({} points)", cloud.len());
            (cloud, AssetOrigin::Loaded)
        }
        Ok(_) => {
            log::warn!("{kind} asset is empty, using procedural geometry");
            (generate(), AssetOrigin::Procedural)
        }
        Err(AssetError::Unavailable(_)) => (generate(), AssetOrigin::Procedural),
        Err(e) => {
            log::warn!("{e}; using procedural geometry");
            (generate(), AssetOrigin::Procedural)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STARS: &str = r#"{"points":[
        {"position":[0,0,-10],"size":0.2,"tint":"blue"},
        {"position":[1,2,-30]}
    ]}"#;

    #[test]
    fn decodes_point_cloud_with_defaults() {
        let cloud = PointCloud::from_json(AssetKind::Starfield, TWO_STARS.as_bytes())
            .expect("decode point cloud");
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points[0].tint, Tint::Blue);
        assert_eq!(cloud.points[1].tint, Tint::White);
        assert_eq!(cloud.points[1].size, 0.1);
        assert_eq!(cloud.points[1].position, Vec3::new(1.0, 2.0, -30.0));
    }

    #[test]
    fn rejects_bad_clouds() {
        assert!(matches!(
            PointCloud::from_json(AssetKind::BlackHole, b"not json"),
            Err(AssetError::Decode { .. })
        ));
        assert!(matches!(
            PointCloud::from_json(AssetKind::BlackHole, br#"{"points":[]}"#),
            Err(AssetError::Empty(AssetKind::BlackHole))
        ));
    }

    #[test]
    fn missing_assets_fall_back_to_procedural() {
        let assets = SceneAssets::resolve(&ProceduralOnly, 300, 7);
        assert_eq!(assets.starfield_origin, AssetOrigin::Procedural);
        assert_eq!(assets.accretion_origin, AssetOrigin::Procedural);
        assert_eq!(assets.starfield.len(), 300);
        assert!(!assets.accretion_disk.is_empty());
    }

    #[test]
    fn broken_asset_falls_back_silently_and_good_one_loads() {
        let mut source = JsonAssets::new();
        source.insert(AssetKind::Starfield, TWO_STARS);
        source.insert(AssetKind::BlackHole, "{\"points\": [");

        let assets = SceneAssets::resolve(&source, 100, 1);
        assert_eq!(assets.starfield_origin, AssetOrigin::Loaded);
        assert_eq!(assets.starfield.len(), 2);
        assert_eq!(assets.accretion_origin, AssetOrigin::Procedural);
    }

    #[test]
    fn failed_replace_keeps_current_geometry() {
        let mut assets = SceneAssets::procedural(50, 3);
        assert!(assets.replace(AssetKind::Starfield, b"[]").is_err());
        assert_eq!(assets.starfield.len(), 50);
        assert_eq!(assets.starfield_origin, AssetOrigin::Procedural);

        assert!(assets.replace(AssetKind::Starfield, TWO_STARS.as_bytes()).is_ok());
        assert_eq!(assets.starfield_origin, AssetOrigin::Loaded);
    }
}
