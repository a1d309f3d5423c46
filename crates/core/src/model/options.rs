use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::starfield::DEFAULT_STAR_COUNT;

pub const MAX_STAR_COUNT: usize = 50_000;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("star count {0} is outside 1..={MAX_STAR_COUNT}")]
    StarCount(usize),
}

/// Host-tunable knobs. Everything else about the experience is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceOptions {
    pub star_count: usize,
    /// Seeds the starfield, the accretion disk and the loading counter.
    pub seed: u64,
    pub show_indicator: bool,
    pub skip_intro: bool,
}

impl Default for ExperienceOptions {
    fn default() -> Self {
        Self {
            star_count: DEFAULT_STAR_COUNT,
            seed: 0x5741_5250,
            show_indicator: true,
            skip_intro: false,
        }
    }
}

impl ExperienceOptions {
    /// Parse and validate options. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(1..=MAX_STAR_COUNT).contains(&self.star_count) {
            return Err(OptionsError::StarCount(self.star_count));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let parsed = ExperienceOptions::from_json("{}");
        assert!(matches!(parsed, Ok(ref o) if *o == ExperienceOptions::default()));
    }

    #[test]
    fn camel_case_fields() {
        let options = ExperienceOptions::from_json(r#"{"starCount": 500, "skipIntro": true}"#)
            .expect("valid options");
        assert_eq!(options.star_count, 500);
        assert!(options.skip_intro);
        assert!(options.show_indicator);
    }

    #[test]
    fn star_count_bounds() {
        assert!(matches!(
            ExperienceOptions::from_json(r#"{"starCount": 0}"#),
            Err(OptionsError::StarCount(0))
        ));
        assert!(matches!(
            ExperienceOptions::from_json(r#"{"starCount": 50001}"#),
            Err(OptionsError::StarCount(50_001))
        ));
        assert!(matches!(
            ExperienceOptions::from_json("[1, 2"),
            Err(OptionsError::Json(_))
        ));
    }
}
