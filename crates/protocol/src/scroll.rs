use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five fixed narrative segments of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Welcome,
    Warp,
    BlackHole,
    Planet,
    Void,
}

impl Section {
    /// All sections in scroll order.
    pub const ALL: [Section; 5] = [
        Section::Welcome,
        Section::Warp,
        Section::BlackHole,
        Section::Planet,
        Section::Void,
    ];

    /// Position in scroll order, starting at 0.
    pub fn index(self) -> usize {
        match self {
            Section::Welcome => 0,
            Section::Warp => 1,
            Section::BlackHole => 2,
            Section::Planet => 3,
            Section::Void => 4,
        }
    }

    /// Stable identifier, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Section::Welcome => "welcome",
            Section::Warp => "warp",
            Section::BlackHole => "blackhole",
            Section::Planet => "planet",
            Section::Void => "void",
        }
    }

    /// Human-facing name shown by the progress indicator.
    pub fn label(self) -> &'static str {
        match self {
            Section::Welcome => "Welcome",
            Section::Warp => "Warp Speed",
            Section::BlackHole => "Black Hole",
            Section::Planet => "Projects",
            Section::Void => "The End",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The value every visual component reads: overall progress plus the
/// resolved section and how far into it the page is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSnapshot {
    /// Normalized page progress in [0, 1].
    pub overall_progress: f64,
    pub section: Section,
    /// Progress within `section`, in [0, 1].
    pub section_progress: f64,
}

impl ScrollSnapshot {
    /// The snapshot of an unscrolled page.
    pub const TOP: ScrollSnapshot = ScrollSnapshot {
        overall_progress: 0.0,
        section: Section::Welcome,
        section_progress: 0.0,
    };

    pub fn is_active(&self, section: Section) -> bool {
        self.section == section
    }
}

impl Default for ScrollSnapshot {
    fn default() -> Self {
        Self::TOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_form_matches_key() {
        let json = serde_json::to_string(&Section::BlackHole).expect("serialize");
        assert_eq!(json, "\"blackhole\"");
    }

    #[test]
    fn snapshot_uses_camel_case_fields() {
        let json = serde_json::to_string(&ScrollSnapshot::TOP).expect("serialize");
        assert!(json.contains("\"overallProgress\":0.0"));
        assert!(json.contains("\"sectionProgress\":0.0"));
        assert!(json.contains("\"section\":\"welcome\""));
    }

    #[test]
    fn indices_follow_scroll_order() {
        for (i, section) in Section::ALL.iter().enumerate() {
            assert_eq!(section.index(), i);
        }
    }
}
