mod renderer;
mod storyboard;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use warpfolio_core::{Experience, ExperienceOptions};

#[derive(Parser, Debug)]
#[command(name = "warpfolio")]
#[command(about = "Scroll through the warpfolio scene in the terminal, or export it as SVG frames")]
struct Args {
    /// Seed for the starfield and the intro progress.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of stars in the procedural starfield.
    #[arg(long)]
    stars: Option<usize>,

    /// Start with the intro already complete.
    #[arg(long)]
    skip_intro: bool,

    /// Write a storyboard of SVG frames into this directory and exit.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Number of storyboard frames.
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,
}

impl Args {
    fn options(&self) -> ExperienceOptions {
        let defaults = ExperienceOptions::default();
        ExperienceOptions {
            seed: self.seed.unwrap_or(defaults.seed),
            star_count: self.stars.unwrap_or(defaults.star_count),
            skip_intro: self.skip_intro,
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut experience = Experience::new(args.options())?;

    if let Some(dir) = &args.svg {
        let frames = usize::try_from(args.frames)?;
        let written = storyboard::export(&mut experience, dir, frames)?;
        eprintln!("wrote {} frames to {}", written.len(), dir.display());
        return Ok(());
    }

    renderer::render_tui(&mut experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("warpfolio").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]).expect("no flags is valid");
        assert_eq!(args.options(), ExperienceOptions::default());
        assert_eq!(args.svg, None);
        assert_eq!(args.frames, 12);
    }

    #[test]
    fn flags_fill_options() {
        let args = parse(&["--seed", "7", "--stars", "300", "--skip-intro", "--svg", "out", "--frames", "4"])
            .expect("flags are valid");
        let options = args.options();
        assert_eq!(options.seed, 7);
        assert_eq!(options.star_count, 300);
        assert!(options.skip_intro);
        assert!(options.show_indicator);
        assert_eq!(args.svg, Some(PathBuf::from("out")));
        assert_eq!(args.frames, 4);
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(parse(&["--stars"]).is_err());
        assert!(parse(&["--stars", "many"]).is_err());
        assert!(parse(&["--frames", "0"]).is_err());
        assert!(parse(&["--nebula"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
