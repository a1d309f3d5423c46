//! Integration test: run a visitor from the intro gate to the bottom of the
//! page and check the scene, panels and draw lists along the way.

use std::cell::RefCell;
use std::rc::Rc;

use warpfolio_core::model::panels::PanelContent;
use warpfolio_core::scene::{AssetOrigin, JsonAssets};
use warpfolio_core::svg::render_svg;
use warpfolio_core::{
    AssetKind, Error, Experience, ExperienceOptions, GateEvent, LoadingPhase, ScrollState,
    SectionBreakpoints,
};
use warpfolio_protocol::{RenderCommand, Section, Viewport};

const FRAME: f64 = 1.0 / 60.0;
const DOCUMENT: f64 = 8000.0;
const WINDOW: f64 = 800.0;

fn scroll_to(exp: &mut Experience, progress: f64) {
    exp.on_scroll(ScrollState::new(progress * (DOCUMENT - WINDOW), DOCUMENT, WINDOW));
}

#[test]
fn full_journey() {
    let mut exp = Experience::new(ExperienceOptions {
        star_count: 500,
        seed: 11,
        ..ExperienceOptions::default()
    })
    .expect("default options are valid");

    // Intro: the gate completes exactly once, and only then does the page show.
    let mut events = Vec::new();
    for _ in 0..(60 * 10) {
        if let Some(e) = exp.tick(FRAME) {
            events.push(e);
        }
    }
    assert_eq!(events, vec![GateEvent::ZoomStarted, GateEvent::Completed]);
    assert_eq!(exp.loading_phase(), LoadingPhase::Complete);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    exp.subscribe(move |snap| {
        let mut seen = sink.borrow_mut();
        if seen.last() != Some(&snap.section) {
            seen.push(snap.section);
        }
    });

    let viewport = Viewport::new(1280.0, 800.0);
    for step in 0..=100 {
        scroll_to(&mut exp, f64::from(step) / 100.0);
        exp.tick(FRAME);

        let snap = exp.snapshot();
        assert!((0.0..=1.0).contains(&snap.section_progress));
        let cmds = exp.render(&viewport);
        assert!(!cmds.is_empty());
        assert!(!cmds.iter().any(|c| matches!(
            c,
            RenderCommand::BeginGroup { id, .. } if id == "loading"
        )));
    }

    assert_eq!(*seen.borrow(), Section::ALL.to_vec());
    assert_eq!(exp.snapshot().section, Section::Void);
    assert_eq!(exp.snapshot().section_progress, 1.0);
}

#[test]
fn reference_scenarios() {
    let mut exp = Experience::new(ExperienceOptions {
        skip_intro: true,
        star_count: 100,
        ..ExperienceOptions::default()
    })
    .expect("options are valid");

    scroll_to(&mut exp, 0.45);
    let params = exp.parameters();
    assert_eq!(params.section, Section::BlackHole);
    assert!((params.pull_strength - 0.5).abs() < 1e-9);
    assert!((params.camera_z - -4.0).abs() < 1e-9);
    match exp.panel().content {
        PanelContent::BlackHole(panel) => assert!((panel.distance_au - 50.5).abs() < 1e-9),
        other => panic!("expected black hole panel, got {other:?}"),
    }

    scroll_to(&mut exp, 0.9);
    let params = exp.parameters();
    assert_eq!(params.section, Section::Void);
    assert!((params.pull_strength - 1.5).abs() < 1e-9);
    assert!((params.scene_opacity - 0.525).abs() < 1e-9);
}

#[test]
fn loaded_assets_replace_procedural_geometry() {
    let mut source = JsonAssets::new();
    source.insert(
        AssetKind::Starfield,
        r#"{"points":[{"position":[0,0,-20]},{"position":[3,1,-40],"tint":"warm"}]}"#,
    );
    let mut exp = Experience::with_assets(
        ExperienceOptions {
            skip_intro: true,
            ..ExperienceOptions::default()
        },
        &source,
    )
    .expect("options are valid");
    assert_eq!(exp.assets().starfield_origin, AssetOrigin::Loaded);
    assert_eq!(exp.assets().starfield.len(), 2);
    assert_eq!(exp.assets().accretion_origin, AssetOrigin::Procedural);

    let err: Error = exp
        .load_asset(AssetKind::BlackHole, b"{\"points\":[]}")
        .expect_err("empty clouds are rejected")
        .into();
    assert!(err.to_string().starts_with("asset:"));
    assert_eq!(exp.assets().accretion_origin, AssetOrigin::Procedural);
}

#[test]
fn custom_breakpoints_are_validated() {
    assert!(SectionBreakpoints::new([0.1, 0.3, 0.5, 0.7]).is_ok());
    let err: Error = SectionBreakpoints::new([0.3, 0.2, 0.5, 0.7])
        .expect_err("decreasing boundaries")
        .into();
    assert!(err.to_string().starts_with("breakpoints:"));
}

#[test]
fn storyboard_frames_export_as_svg() {
    let mut exp = Experience::new(ExperienceOptions {
        skip_intro: true,
        star_count: 200,
        ..ExperienceOptions::default()
    })
    .expect("options are valid");
    let viewport = Viewport::new(640.0, 400.0);
    for section in Section::ALL {
        let bounds = SectionBreakpoints::DEFAULT.bounds(section);
        scroll_to(&mut exp, (bounds.start + bounds.end) / 2.0);
        exp.tick(FRAME);
        let svg = render_svg(&exp.render(&viewport), viewport.width, viewport.height);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(&format!("panel-{}", section.key())));
    }
}
