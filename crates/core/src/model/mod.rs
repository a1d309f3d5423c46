pub mod content;
pub mod experience;
pub mod loading;
pub mod options;
pub mod panels;

pub use experience::Experience;
pub use loading::{GateEvent, LoadingGate, LoadingPhase};
pub use options::{ExperienceOptions, OptionsError};
pub use panels::{PanelContent, PanelState};
