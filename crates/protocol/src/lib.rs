pub mod commands;
pub mod scroll;
pub mod theme;
pub mod types;

pub use commands::{Label, RenderCommand, TextAlign};
pub use scroll::{ScrollSnapshot, Section};
pub use theme::ThemeToken;
pub use types::{Point, Rect, Viewport};
