use thiserror::Error;
use warpfolio_protocol::Section;

#[derive(Debug, Error, PartialEq)]
pub enum BreakpointError {
    #[error("boundary {index} is not a finite number")]
    NotFinite { index: usize },
    #[error("boundary {index} ({value}) must lie strictly inside (0, 1)")]
    OutOfRange { index: usize, value: f64 },
    #[error("boundary {index} ({value}) is not above the previous boundary ({previous})")]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

/// `[start, end)` of one section in overall-progress space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub start: f64,
    pub end: f64,
}

impl SectionBounds {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// A section plus how far the page is through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionState {
    pub section: Section,
    /// Progress within `section`, always in [0, 1].
    pub progress: f64,
}

impl SectionState {
    pub fn new(section: Section, progress: f64) -> Self {
        Self {
            section,
            progress: clamp_unit(progress),
        }
    }
}

/// Contiguous partition of [0, 1] into the five sections, in scroll order.
///
/// `edges[0] == 0`, `edges[5] == 1`, section `i` covers
/// `[edges[i], edges[i + 1])` and the last section is also closed at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBreakpoints {
    edges: [f64; 6],
}

impl SectionBreakpoints {
    /// welcome [0, .15) warp [.15, .35) blackhole [.35, .55) planet [.55, .8) void [.8, 1]
    pub const DEFAULT: SectionBreakpoints = SectionBreakpoints {
        edges: [0.0, 0.15, 0.35, 0.55, 0.8, 1.0],
    };

    /// Build a table from the four interior boundaries.
    pub fn new(interior: [f64; 4]) -> Result<Self, BreakpointError> {
        let mut previous = 0.0;
        for (i, &value) in interior.iter().enumerate() {
            let index = i + 1;
            if !value.is_finite() {
                return Err(BreakpointError::NotFinite { index });
            }
            if value <= 0.0 || value >= 1.0 {
                return Err(BreakpointError::OutOfRange { index, value });
            }
            if value <= previous {
                return Err(BreakpointError::NotIncreasing {
                    index,
                    previous,
                    value,
                });
            }
            previous = value;
        }
        let [a, b, c, d] = interior;
        Ok(Self {
            edges: [0.0, a, b, c, d, 1.0],
        })
    }

    pub fn bounds(&self, section: Section) -> SectionBounds {
        let i = section.index();
        SectionBounds {
            start: self.edges[i],
            end: self.edges[i + 1],
        }
    }

    /// Map overall progress to a section and the progress within it.
    ///
    /// A value sitting exactly on a boundary belongs to the later section;
    /// `1.0` belongs to the last one. Out-of-range input is clamped, NaN is
    /// treated as 0.
    pub fn resolve(&self, progress: f64) -> SectionState {
        let p = clamp_unit(progress);
        let section = Section::ALL
            .into_iter()
            .find(|s| p < self.edges[s.index() + 1])
            .unwrap_or(Section::Void);
        let bounds = self.bounds(section);
        SectionState::new(section, (p - bounds.start) / bounds.span())
    }
}

impl Default for SectionBreakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(p: f64) -> SectionState {
        SectionBreakpoints::DEFAULT.resolve(p)
    }

    #[test]
    fn boundary_belongs_to_later_section() {
        let s = resolve(0.15);
        assert_eq!(s.section, Section::Warp);
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn just_below_boundary_stays_in_earlier_section() {
        let s = resolve(0.149999);
        assert_eq!(s.section, Section::Welcome);
        assert!((s.progress - 0.99999).abs() < 1e-4);
    }

    #[test]
    fn end_of_page_is_void_complete() {
        let s = resolve(1.0);
        assert_eq!(s.section, Section::Void);
        assert_eq!(s.progress, 1.0);
    }

    #[test]
    fn start_of_page_is_welcome() {
        let s = resolve(0.0);
        assert_eq!(s.section, Section::Welcome);
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn every_progress_value_selects_one_section_in_range() {
        for step in 0..=10_000 {
            let p = f64::from(step) / 10_000.0;
            let s = resolve(p);
            let b = SectionBreakpoints::DEFAULT.bounds(s.section);
            assert!((0.0..=1.0).contains(&s.progress), "p={p}");
            assert!(p >= b.start && (p < b.end || (p == 1.0 && s.section == Section::Void)));
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(resolve(-0.5), resolve(0.0));
        assert_eq!(resolve(1.7), resolve(1.0));
        assert_eq!(resolve(f64::NAN), resolve(0.0));
    }

    #[test]
    fn default_table_is_contiguous() {
        let table = SectionBreakpoints::DEFAULT;
        assert_eq!(table.bounds(Section::Welcome).start, 0.0);
        assert_eq!(table.bounds(Section::Void).end, 1.0);
        for pair in Section::ALL.windows(2) {
            assert_eq!(table.bounds(pair[0]).end, table.bounds(pair[1]).start);
        }
        assert_eq!(SectionBreakpoints::new([0.15, 0.35, 0.55, 0.8]), Ok(table));
    }

    #[test]
    fn rejects_invalid_tables() {
        assert_eq!(
            SectionBreakpoints::new([0.0, 0.35, 0.55, 0.8]),
            Err(BreakpointError::OutOfRange { index: 1, value: 0.0 })
        );
        assert_eq!(
            SectionBreakpoints::new([0.2, 0.2, 0.55, 0.8]),
            Err(BreakpointError::NotIncreasing {
                index: 2,
                previous: 0.2,
                value: 0.2
            })
        );
        assert_eq!(
            SectionBreakpoints::new([0.2, 0.3, f64::INFINITY, 0.8]),
            Err(BreakpointError::NotFinite { index: 3 })
        );
    }
}
