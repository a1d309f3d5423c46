use warpfolio_core::scroll::SubscriptionId;
use warpfolio_core::{AssetKind, Experience, ExperienceOptions, GateEvent, LoadingPhase, ScrollState};
use warpfolio_protocol::Viewport;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_json(value: &impl serde::Serialize) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(js_err)
}

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn parse_options(json: Option<&str>) -> Result<ExperienceOptions, warpfolio_core::Error> {
    match json {
        Some(json) if !json.trim().is_empty() => Ok(ExperienceOptions::from_json(json)?),
        _ => Ok(ExperienceOptions::default()),
    }
}

fn parse_asset_kind(kind: &str) -> Option<AssetKind> {
    match kind {
        "starfield" => Some(AssetKind::Starfield),
        "blackhole" | "black-hole" => Some(AssetKind::BlackHole),
        _ => None,
    }
}

fn event_name(event: GateEvent) -> &'static str {
    match event {
        GateEvent::ZoomStarted => "zoomStarted",
        GateEvent::Completed => "completed",
    }
}

fn phase_name(phase: LoadingPhase) -> &'static str {
    match phase {
        LoadingPhase::Loading => "loading",
        LoadingPhase::Zooming => "zooming",
        LoadingPhase::Complete => "complete",
    }
}

/// The page engine as seen from JavaScript. The host page forwards scroll
/// events and animation frames and paints the returned draw lists.
#[wasm_bindgen]
pub struct Portfolio {
    experience: Experience,
    subscriptions: Vec<Option<SubscriptionId>>,
}

#[wasm_bindgen]
impl Portfolio {
    /// Create the engine. `options_json` may be omitted or partial; missing
    /// fields take their defaults.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(options_json: Option<String>) -> Result<Portfolio, JsError> {
        let options = parse_options(options_json.as_deref()).map_err(js_err)?;
        let experience = Experience::new(options).map_err(js_err)?;
        Ok(Self {
            experience,
            subscriptions: Vec::new(),
        })
    }

    /// Feed a scroll sample; returns the snapshot as JSON.
    pub fn on_scroll(
        &mut self,
        offset: f64,
        document_height: f64,
        viewport_height: f64,
    ) -> Result<String, JsError> {
        let snapshot = self
            .experience
            .on_scroll(ScrollState::new(offset, document_height, viewport_height));
        to_json(&snapshot)
    }

    /// Advance by `dt` seconds. Returns `"zoomStarted"` or `"completed"`
    /// when the intro gate changes phase.
    pub fn tick(&mut self, dt: f64) -> Option<String> {
        self.experience
            .tick(dt)
            .map(|event| event_name(event).to_owned())
    }

    pub fn skip_intro(&mut self) -> bool {
        self.experience.skip_intro().is_some()
    }

    pub fn snapshot(&self) -> Result<String, JsError> {
        to_json(&self.experience.snapshot())
    }

    pub fn scene_parameters(&self) -> Result<String, JsError> {
        to_json(&self.experience.parameters())
    }

    pub fn panel(&self) -> Result<String, JsError> {
        to_json(&self.experience.panel())
    }

    /// Render the current frame, returning render commands as JSON.
    pub fn render(&self, width: f64, height: f64, dpr: f64) -> Result<String, JsError> {
        let viewport = Viewport {
            dpr,
            ..Viewport::new(width, height)
        };
        to_json(&self.experience.render(&viewport))
    }

    /// Hand over a fetched point-cloud asset (`"starfield"` or
    /// `"blackhole"`). A bad asset leaves the current geometry in place.
    pub fn load_asset(&mut self, kind: &str, data: &[u8]) -> Result<(), JsError> {
        let kind = parse_asset_kind(kind)
            .ok_or_else(|| JsError::new(&format!("unknown asset kind: {kind}")))?;
        self.experience.load_asset(kind, data).map_err(js_err)
    }

    /// Call `callback(snapshotJson)` on every scroll update. Returns a
    /// handle for [`unsubscribe`](Self::unsubscribe).
    ///
    /// The callback runs inside `on_scroll` while this object is borrowed.
    /// It must read state from its snapshot argument and must not call
    /// back into the same `Portfolio`; such a call throws and is only
    /// logged as a warning.
    pub fn subscribe(&mut self, callback: js_sys::Function) -> usize {
        let id = self.experience.subscribe(move |snapshot| {
            let json = match serde_json::to_string(snapshot) {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("failed to encode snapshot: {e}");
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("scroll subscriber threw: {e:?}");
            }
        });
        self.subscriptions.push(Some(id));
        self.subscriptions.len() - 1
    }

    pub fn unsubscribe(&mut self, handle: usize) -> bool {
        match self.subscriptions.get_mut(handle).and_then(Option::take) {
            Some(id) => self.experience.unsubscribe(id),
            None => false,
        }
    }

    pub fn loading_phase(&self) -> String {
        phase_name(self.experience.loading_phase()).to_owned()
    }

    pub fn loading_progress(&self) -> f64 {
        self.experience.gate().progress()
    }

    pub fn is_loaded(&self) -> bool {
        self.experience.loading_phase() == LoadingPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_when_missing_or_blank() {
        assert!(matches!(parse_options(None), Ok(o) if o == ExperienceOptions::default()));
        assert!(matches!(parse_options(Some("  ")), Ok(o) if o == ExperienceOptions::default()));
        assert!(matches!(
            parse_options(Some(r#"{"seed": 3}"#)),
            Ok(o) if o.seed == 3
        ));
    }

    #[test]
    fn invalid_options_surface_as_errors() {
        let err = parse_options(Some(r#"{"starCount": 0}"#));
        assert!(matches!(err, Err(warpfolio_core::Error::Options(_))));
    }

    #[test]
    fn asset_kind_names() {
        assert_eq!(parse_asset_kind("starfield"), Some(AssetKind::Starfield));
        assert_eq!(parse_asset_kind("blackhole"), Some(AssetKind::BlackHole));
        assert_eq!(parse_asset_kind("planet"), None);
    }

    #[test]
    fn phase_and_event_names() {
        assert_eq!(phase_name(LoadingPhase::Zooming), "zooming");
        assert_eq!(event_name(GateEvent::Completed), "completed");
    }
}
