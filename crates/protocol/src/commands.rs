use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// Text carried by a command. Static copy is borrowed, formatted readouts
/// are owned.
pub type Label = Cow<'static, str>;

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for every frame. Renderers consume
/// this list sequentially; each command carries all the data it needs.
/// `alpha` values are multiplied with the active opacity stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally outlined.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        corner_radius: f64,
    },

    /// Draw a circle. A `None` fill draws the outline only.
    DrawCircle {
        center: Point,
        radius: f64,
        fill: Option<ThemeToken>,
        stroke: Option<ThemeToken>,
        stroke_width: f64,
        alpha: f64,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
        alpha: f64,
    },

    /// Draw a text string anchored at a position.
    DrawText {
        position: Point,
        text: Label,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        /// Extra horizontal spacing between glyphs, in pixels.
        letter_spacing: f64,
    },

    /// Darken everything outside `inner_radius`, reaching `strength` at
    /// `outer_radius` and beyond.
    DrawVignette {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        color: ThemeToken,
        strength: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push an affine transform (applied to all subsequent commands until
    /// the matching `PopTransform`). A point maps to `translate + scale * p`,
    /// then through the enclosing transform.
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Multiply the alpha of all subsequent commands until the matching
    /// `PopOpacity`.
    PushOpacity { alpha: f64 },

    /// Pop the most recent opacity.
    PopOpacity,

    /// Begin a logical group (e.g. a scene layer or a panel). Renderers may
    /// use this for batching or accessibility.
    BeginGroup { id: Label, label: Option<Label> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl RenderCommand {
    /// Plain text at a position, no letter spacing.
    pub fn text(
        position: Point,
        text: impl Into<Label>,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    ) -> Self {
        RenderCommand::DrawText {
            position,
            text: text.into(),
            color,
            font_size,
            align,
            letter_spacing: 0.0,
        }
    }

    pub fn begin_group(id: &'static str) -> Self {
        RenderCommand::BeginGroup {
            id: Cow::Borrowed(id),
            label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_to_tagged_json() {
        let cmd = RenderCommand::text(
            Point::new(1.0, 2.0),
            "WARP",
            ThemeToken::Primary,
            48.0,
            TextAlign::Center,
        );
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.starts_with("{\"DrawText\""));
        assert!(json.contains("\"WARP\""));

        let back: RenderCommand =
            serde_json::from_str(&json).unwrap_or(RenderCommand::EndGroup);
        assert_eq!(back, cmd);
    }

    #[test]
    fn owned_labels_survive_deserialization() {
        let json = r#"{"BeginGroup":{"id":"scene","label":"Deep \"space\""}}"#;
        let cmd: RenderCommand = serde_json::from_str(json).expect("deserialize");
        match cmd {
            RenderCommand::BeginGroup { id, label } => {
                assert_eq!(id, "scene");
                assert_eq!(label.as_deref(), Some("Deep \"space\""));
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }
}
