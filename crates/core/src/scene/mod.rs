//! Scene parameters, idle motion, camera and procedural geometry.

pub mod ambient;
pub mod assets;
pub mod black_hole;
pub mod camera;
pub mod params;
pub mod planet;
pub mod starfield;

pub use ambient::AmbientMotion;
pub use assets::{
    AssetError, AssetKind, AssetOrigin, AssetSource, JsonAssets, PointCloud, ProceduralOnly,
    SceneAssets,
};
pub use camera::{Projected, SceneCamera};
pub use params::{Fog, SceneParameters, Vignette};
