use warpfolio_protocol::{RenderCommand, ScrollSnapshot, Viewport};

use super::loading::{GateEvent, LoadingGate, LoadingPhase};
use super::options::{ExperienceOptions, OptionsError};
use super::panels::PanelState;
use crate::scene::planet::PlanetModel;
use crate::scene::{
    AmbientMotion, AssetError, AssetKind, AssetSource, ProceduralOnly, SceneAssets,
    SceneParameters,
};
use crate::scroll::{ScrollState, ScrollTracker, SubscriptionId};
use crate::views::{indicator, loading, panels, scene};

/// One visitor's run through the page.
///
/// Owns every piece of state the page has: the scroll store, the intro
/// gate, idle motion and scene geometry. Hosts feed it scroll samples and
/// frame ticks and ask it for draw lists.
pub struct Experience {
    options: ExperienceOptions,
    tracker: ScrollTracker,
    gate: LoadingGate,
    ambient: AmbientMotion,
    assets: SceneAssets,
    planet: PlanetModel,
}

impl Experience {
    pub fn new(options: ExperienceOptions) -> Result<Self, OptionsError> {
        Self::with_assets(options, &ProceduralOnly)
    }

    /// Build the experience, loading geometry from `source` where it can.
    pub fn with_assets(
        options: ExperienceOptions,
        source: &dyn AssetSource,
    ) -> Result<Self, OptionsError> {
        options.validate()?;
        let assets = SceneAssets::resolve(source, options.star_count, options.seed);
        let mut gate = LoadingGate::new(options.seed);
        if options.skip_intro {
            gate.skip();
        }
        log::info!(
            "experience ready: {} stars, {} disk particles",
            assets.starfield.len(),
            assets.accretion_disk.len()
        );
        Ok(Self {
            options,
            tracker: ScrollTracker::new(),
            gate,
            ambient: AmbientMotion::new(),
            assets,
            planet: PlanetModel::build(),
        })
    }

    pub fn on_scroll(&mut self, state: ScrollState) -> ScrollSnapshot {
        self.tracker.update(state)
    }

    /// Advance idle motion and the intro gate by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Option<GateEvent> {
        let params = self.parameters();
        self.ambient.advance(dt, &params);
        let event = self.gate.advance(dt);
        if event == Some(GateEvent::Completed) {
            log::info!("intro complete");
        }
        event
    }

    pub fn skip_intro(&mut self) -> Option<GateEvent> {
        self.gate.skip()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.tracker.snapshot()
    }

    pub fn parameters(&self) -> SceneParameters {
        SceneParameters::from_snapshot(&self.tracker.snapshot())
    }

    /// The panel of the current section.
    pub fn panel(&self) -> PanelState {
        PanelState::active(&self.tracker.snapshot())
    }

    pub fn loading_phase(&self) -> LoadingPhase {
        self.gate.phase()
    }

    pub fn gate(&self) -> &LoadingGate {
        &self.gate
    }

    pub fn assets(&self) -> &SceneAssets {
        &self.assets
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&ScrollSnapshot) + 'static,
    ) -> SubscriptionId {
        self.tracker.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.tracker.unsubscribe(id)
    }

    /// Swap in externally loaded geometry. On failure the current geometry
    /// is kept and the error returned for the host to log.
    pub fn load_asset(&mut self, kind: AssetKind, data: &[u8]) -> Result<(), AssetError> {
        match self.assets.replace(kind, data) {
            Ok(()) => {
                log::info!("loaded {kind} asset");
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}; keeping current geometry");
                Err(e)
            }
        }
    }

    /// The full draw list for one frame: the page faded in by the gate,
    /// with the intro overlay on top until it completes.
    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        let content = self.gate.content_opacity();

        if content > 0.0 {
            let snapshot = self.tracker.snapshot();
            let params = SceneParameters::from_snapshot(&snapshot);
            let frame = scene::SceneFrame {
                params: &params,
                ambient: &self.ambient,
                assets: &self.assets,
                planet: &self.planet,
            };

            let faded = content < 1.0;
            if faded {
                commands.push(RenderCommand::PushOpacity { alpha: content });
            }
            commands.extend(scene::render_scene(&frame, viewport));
            commands.extend(panels::render_panel(&PanelState::active(&snapshot), viewport));
            if self.options.show_indicator {
                commands.extend(indicator::render_indicator(&snapshot, viewport));
            }
            if faded {
                commands.push(RenderCommand::PopOpacity);
            }
        }

        if !self.gate.is_complete() {
            commands.extend(loading::render_loading(&self.gate, viewport));
        }
        commands
    }
}

impl std::fmt::Debug for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experience")
            .field("options", &self.options)
            .field("snapshot", &self.tracker.snapshot())
            .field("phase", &self.gate.phase())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use warpfolio_protocol::Section;

    use super::*;

    fn small() -> ExperienceOptions {
        ExperienceOptions {
            star_count: 200,
            ..ExperienceOptions::default()
        }
    }

    fn ready() -> Experience {
        let mut exp = Experience::new(ExperienceOptions {
            skip_intro: true,
            ..small()
        })
        .expect("skip-intro options are valid");
        exp.tick(1.0 / 60.0);
        exp
    }

    #[test]
    fn rejects_invalid_options() {
        let bad = ExperienceOptions {
            star_count: 0,
            ..ExperienceOptions::default()
        };
        assert!(matches!(Experience::new(bad), Err(OptionsError::StarCount(0))));
    }

    #[test]
    fn skipping_opens_the_gate_once() {
        let mut exp = Experience::new(small()).expect("default options are valid");
        assert!(!exp.gate().is_complete());
        assert_eq!(exp.skip_intro(), Some(GateEvent::Completed));
        assert!(exp.gate().is_complete());
        assert_eq!(exp.gate().progress(), 100.0);
        assert_eq!(exp.skip_intro(), None);
    }

    #[test]
    fn only_the_overlay_renders_while_loading() {
        let exp = Experience::new(small()).expect("default options are valid");
        let cmds = exp.render(&Viewport::new(800.0, 600.0));
        assert!(!cmds.is_empty());
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::BeginGroup { id, .. } if id == "loading"
        )));
        assert!(!cmds.iter().any(|c| matches!(
            c,
            RenderCommand::BeginGroup { id, .. } if id == "scene"
        )));
    }

    #[test]
    fn scrolling_moves_scene_and_panel() {
        let mut exp = ready();
        let snap = exp.on_scroll(ScrollState::new(450.0, 1100.0, 100.0));
        assert_eq!(snap.section, Section::BlackHole);
        assert!((exp.parameters().pull_strength - 0.5).abs() < 1e-9);
        assert_eq!(exp.panel().section, Section::BlackHole);

        let cmds = exp.render(&Viewport::new(800.0, 600.0));
        assert!(cmds.iter().any(|c| matches!(c, RenderCommand::DrawVignette { .. })));
    }

    #[test]
    fn subscribers_see_scroll_updates() {
        let mut exp = ready();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = exp.subscribe(move |s| sink.borrow_mut().push(s.section));
        exp.on_scroll(ScrollState::new(900.0, 1100.0, 100.0));
        assert!(exp.unsubscribe(id));
        exp.on_scroll(ScrollState::new(0.0, 1100.0, 100.0));
        assert_eq!(*seen.borrow(), vec![Section::Void]);
    }

    #[test]
    fn indicator_can_be_hidden() {
        let mut exp = Experience::new(ExperienceOptions {
            show_indicator: false,
            skip_intro: true,
            ..small()
        })
        .expect("options are valid");
        exp.tick(0.1);
        let cmds = exp.render(&Viewport::new(800.0, 600.0));
        assert!(!cmds.iter().any(|c| matches!(
            c,
            RenderCommand::BeginGroup { id, .. } if id == "indicator"
        )));
    }

    #[test]
    fn bad_asset_keeps_procedural_geometry() {
        let mut exp = ready();
        assert!(exp.load_asset(AssetKind::Starfield, b"{}").is_err());
        assert_eq!(exp.assets().starfield.len(), 200);
    }
}
