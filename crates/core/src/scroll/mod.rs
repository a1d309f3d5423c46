//! Scroll position → normalized progress → section.

pub mod sections;
pub mod tracker;

pub use sections::{BreakpointError, SectionBounds, SectionBreakpoints, SectionState};
pub use tracker::{ScrollState, ScrollTracker, SubscriptionId};
