pub mod model;
pub mod scene;
pub mod scroll;
pub mod svg;
pub mod views;

use thiserror::Error;

pub use model::{Experience, ExperienceOptions, GateEvent, LoadingPhase, PanelState};
pub use scene::{AssetKind, SceneParameters};
pub use scroll::{ScrollState, ScrollTracker, SectionBreakpoints};

#[derive(Debug, Error)]
pub enum Error {
    #[error("breakpoints: {0}")]
    Breakpoints(#[from] scroll::BreakpointError),
    #[error("asset: {0}")]
    Asset(#[from] scene::AssetError),
    #[error("options: {0}")]
    Options(#[from] model::OptionsError),
}
