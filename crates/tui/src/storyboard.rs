use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use warpfolio_core::svg::render_svg;
use warpfolio_core::{Experience, ScrollState};
use warpfolio_protocol::Viewport;

use crate::renderer::PAGE_VIEWPORTS;

/// Storyboard frames are rendered at this size.
const FRAME_WIDTH: f64 = 1280.0;
const FRAME_HEIGHT: f64 = 800.0;
const FRAME_DT: f64 = 1.0 / 60.0;

/// Evenly spaced progress values from 0 to 1 inclusive.
pub fn sample_progress(frames: usize) -> Vec<f64> {
    match frames {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Render one SVG per sampled progress value into `dir`.
pub fn export(experience: &mut Experience, dir: &Path, frames: usize) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating storyboard directory {}", dir.display()))?;
    experience.skip_intro();

    let viewport = Viewport::new(FRAME_WIDTH, FRAME_HEIGHT);
    let document = FRAME_HEIGHT * PAGE_VIEWPORTS;
    let mut written = Vec::with_capacity(frames);
    for (i, p) in sample_progress(frames).into_iter().enumerate() {
        let snap = experience.on_scroll(ScrollState::new(
            p * (document - FRAME_HEIGHT),
            document,
            FRAME_HEIGHT,
        ));
        experience.tick(FRAME_DT);

        let svg = render_svg(&experience.render(&viewport), viewport.width, viewport.height);
        let path = dir.join(format!("frame-{i:03}-{}.svg", snap.section.key()));
        std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} ({} {:.2})", path.display(), snap.section.key(), p);
        written.push(path);
    }
    Ok(written)
}
