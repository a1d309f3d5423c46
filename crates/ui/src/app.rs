use eframe::egui;
use warpfolio_core::model::OptionsError;
use warpfolio_core::{AssetKind, Experience, ExperienceOptions, ScrollState};
use warpfolio_protocol::{ThemeToken, Viewport};

use crate::renderer::{self, RenderStats};
use crate::theme;

/// The simulated document is this many viewports tall.
const PAGE_VIEWPORTS: f64 = 10.0;
const ARROW_STEP: f64 = 0.1;
const PAGE_STEP: f64 = 0.9;

/// A scroll request from the keyboard, in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScrollStep {
    By(f64),
    Top,
    Bottom,
}

fn key_step(key: egui::Key) -> Option<ScrollStep> {
    match key {
        egui::Key::ArrowDown => Some(ScrollStep::By(ARROW_STEP)),
        egui::Key::ArrowUp => Some(ScrollStep::By(-ARROW_STEP)),
        egui::Key::PageDown | egui::Key::Space => Some(ScrollStep::By(PAGE_STEP)),
        egui::Key::PageUp => Some(ScrollStep::By(-PAGE_STEP)),
        egui::Key::Home => Some(ScrollStep::Top),
        egui::Key::End => Some(ScrollStep::Bottom),
        _ => None,
    }
}

/// Largest offset reachable on a page `PAGE_VIEWPORTS` tall.
fn max_offset(viewport_height: f64) -> f64 {
    ((PAGE_VIEWPORTS - 1.0) * viewport_height).max(0.0)
}

fn clamp_offset(offset: f64, viewport_height: f64) -> f64 {
    offset.clamp(0.0, max_offset(viewport_height))
}

fn apply_step(offset: f64, step: ScrollStep, viewport_height: f64) -> f64 {
    let target = match step {
        ScrollStep::By(viewports) => offset + viewports * viewport_height,
        ScrollStep::Top => 0.0,
        ScrollStep::Bottom => max_offset(viewport_height),
    };
    clamp_offset(target, viewport_height)
}

type PendingAssets = std::sync::Arc<std::sync::Mutex<Vec<(AssetKind, Vec<u8>)>>>;

/// Main application state.
pub struct PortfolioApp {
    experience: Experience,
    /// Simulated document scroll offset in points.
    scroll_offset: f64,
    /// Viewport height seen last frame; offsets are rescaled on resize.
    viewport_height: f64,
    /// Asset bytes delivered by async fetches.
    pending_assets: PendingAssets,
    show_stats: bool,
    last_stats: RenderStats,
    error: Option<String>,
}

impl PortfolioApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        options: ExperienceOptions,
    ) -> Result<Self, OptionsError> {
        cc.egui_ctx.set_visuals(theme::space_visuals());
        theme::apply_typography(&cc.egui_ctx);

        let experience = Experience::new(options)?;

        let pending_assets = PendingAssets::default();

        #[cfg(target_arch = "wasm32")]
        for kind in [AssetKind::Starfield, AssetKind::BlackHole] {
            let pending = pending_assets.clone();
            let ctx = cc.egui_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let url = format!("/assets/{kind}.json");
                match Self::fetch_bytes(&url).await {
                    Ok(bytes) => {
                        log::info!("fetched {kind} asset ({} bytes)", bytes.len());
                        if let Ok(mut lock) = pending.lock() {
                            lock.push((kind, bytes));
                        }
                        ctx.request_repaint();
                    }
                    Err(e) => log::warn!("{kind} asset unavailable ({e}), keeping procedural"),
                }
            });
        }

        Ok(Self {
            experience,
            scroll_offset: 0.0,
            viewport_height: 0.0,
            pending_assets,
            show_stats: false,
            last_stats: RenderStats::default(),
            error: None,
        })
    }

    fn drain_assets(&mut self) {
        let pending = {
            let mut lock = self
                .pending_assets
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *lock)
        };
        for (kind, bytes) in pending {
            if let Err(e) = self.experience.load_asset(kind, &bytes) {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Keep the same scroll fraction when the window is resized.
    fn resize(&mut self, viewport_height: f64) {
        if self.viewport_height > 0.0 && viewport_height != self.viewport_height {
            self.scroll_offset *= viewport_height / self.viewport_height;
        }
        self.viewport_height = viewport_height;
        self.scroll_offset = clamp_offset(self.scroll_offset, viewport_height);
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let vh = self.viewport_height;
        let mut offset = self.scroll_offset;

        if response.dragged() {
            offset -= f64::from(response.drag_delta().y);
        }
        let wheel = ui.input(|i| i.smooth_scroll_delta.y);
        if wheel != 0.0 {
            offset -= f64::from(wheel);
        }
        offset = clamp_offset(offset, vh);

        let steps: Vec<ScrollStep> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => key_step(*key),
                    _ => None,
                })
                .collect()
        });
        for step in steps {
            offset = apply_step(offset, step, vh);
        }

        if ui.input(|i| i.key_pressed(egui::Key::F3)) {
            self.show_stats = !self.show_stats;
        }
        self.scroll_offset = offset;
    }

    #[cfg(target_arch = "wasm32")]
    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window = web_sys::window().ok_or("no window")?;
        let resp_value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| format!("{e:?}"))?;
        let resp: web_sys::Response = resp_value.dyn_into().map_err(|_| "not a Response")?;
        if !resp.ok() {
            return Err(format!("HTTP {}", resp.status()));
        }
        let buf = JsFuture::from(resp.array_buffer().map_err(|e| format!("{e:?}"))?)
            .await
            .map_err(|e| format!("{e:?}"))?;
        Ok(js_sys::Uint8Array::new(&buf).to_vec())
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_assets();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(available, egui::Sense::click_and_drag());
                self.resize(f64::from(available.height()));

                if self.experience.gate().is_complete() {
                    self.handle_input(ui, &response);
                } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    self.experience.skip_intro();
                }

                let vh = self.viewport_height;
                self.experience.on_scroll(ScrollState::new(
                    self.scroll_offset,
                    vh * PAGE_VIEWPORTS,
                    vh,
                ));
                let dt = ui.input(|i| f64::from(i.stable_dt));
                if let Some(event) = self.experience.tick(dt) {
                    log::debug!("intro gate: {event:?}");
                }

                let viewport = Viewport {
                    dpr: f64::from(ctx.pixels_per_point()),
                    ..Viewport::new(f64::from(available.width()), vh)
                };
                let commands = self.experience.render(&viewport);
                let mut painter = ui.painter_at(available);
                self.last_stats = renderer::render_commands(&mut painter, &commands, available.min);

                if self.show_stats {
                    let snap = self.experience.snapshot();
                    let text = format!(
                        "{} {:.3} ({:.2})  drawn {} culled {}",
                        snap.section.label(),
                        snap.overall_progress,
                        snap.section_progress,
                        self.last_stats.drawn,
                        self.last_stats.culled,
                    );
                    painter.text(
                        available.left_top() + egui::vec2(8.0, 8.0),
                        egui::Align2::LEFT_TOP,
                        text,
                        egui::FontId::monospace(theme::FONT_CAPTION),
                        theme::resolve(ThemeToken::TextMuted),
                    );
                }

                if let Some(err) = &self.error {
                    painter.text(
                        available.left_bottom() + egui::vec2(8.0, -8.0),
                        egui::Align2::LEFT_BOTTOM,
                        err,
                        egui::FontId::proportional(theme::FONT_BODY),
                        theme::resolve(ThemeToken::AccretionCool),
                    );
                }
            });

        // Ambient motion never stops.
        ctx.request_repaint();
    }
}
