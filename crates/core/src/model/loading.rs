use std::f64::consts::PI;

use serde::Serialize;

/// Seconds between synthetic progress increments.
pub const TICK_INTERVAL: f64 = 0.1;
/// Upper bound (exclusive) of one increment, in percent.
pub const MAX_INCREMENT: f64 = 15.0;
/// How long the star zoom holds before the page is revealed.
pub const ZOOM_DURATION: f64 = 2.0;
/// The overlay fades out over the start of the zoom.
pub const OVERLAY_FADE: f64 = 0.5;
/// The page fades in after the gate completes.
pub const CONTENT_FADE: f64 = 1.0;
const ZOOM_SCALE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingPhase {
    Loading,
    Zooming,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GateEvent {
    ZoomStarted,
    /// Emitted exactly once per gate.
    Completed,
}

/// Fixed-duration cosmetic intro: a fake progress bar, a star zoom, then
/// the page. There is no failure state and no retry.
#[derive(Debug, Clone)]
pub struct LoadingGate {
    phase: LoadingPhase,
    progress: f64,
    tick_accum: f64,
    phase_elapsed: f64,
    elapsed: f64,
    rng: fastrand::Rng,
}

impl LoadingGate {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: LoadingPhase::Loading,
            progress: 0.0,
            tick_accum: 0.0,
            phase_elapsed: 0.0,
            elapsed: 0.0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Synthetic progress in percent, pinned at 100 once reached.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.phase == LoadingPhase::Complete
    }

    /// Advance the gate by `dt` seconds of frame time.
    ///
    /// A long step runs every tick that fits into it and may cross both
    /// transitions at once; the returned event is then the later one.
    pub fn advance(&mut self, dt: f64) -> Option<GateEvent> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        self.elapsed += dt;
        let mut event = None;
        let mut remaining = dt;

        if self.phase == LoadingPhase::Loading {
            self.tick_accum += remaining;
            remaining = 0.0;
            while self.tick_accum >= TICK_INTERVAL {
                self.tick_accum -= TICK_INTERVAL;
                self.progress += self.rng.f64() * MAX_INCREMENT;
                if self.progress >= 100.0 {
                    self.progress = 100.0;
                    remaining = self.tick_accum;
                    self.tick_accum = 0.0;
                    self.enter(LoadingPhase::Zooming);
                    event = Some(GateEvent::ZoomStarted);
                    break;
                }
            }
        }

        match self.phase {
            LoadingPhase::Loading => {}
            LoadingPhase::Zooming => {
                self.phase_elapsed += remaining;
                if self.phase_elapsed >= ZOOM_DURATION {
                    let overshoot = self.phase_elapsed - ZOOM_DURATION;
                    self.enter(LoadingPhase::Complete);
                    self.phase_elapsed = overshoot;
                    event = Some(GateEvent::Completed);
                }
            }
            LoadingPhase::Complete => self.phase_elapsed += remaining,
        }
        event
    }

    /// Jump straight to the revealed page. Returns `Completed` unless the
    /// gate had already completed.
    pub fn skip(&mut self) -> Option<GateEvent> {
        if self.is_complete() {
            return None;
        }
        self.progress = 100.0;
        self.enter(LoadingPhase::Complete);
        self.phase_elapsed = CONTENT_FADE;
        Some(GateEvent::Completed)
    }

    fn enter(&mut self, phase: LoadingPhase) {
        log::debug!("loading gate {:?} -> {phase:?}", self.phase);
        self.phase = phase;
        self.phase_elapsed = 0.0;
    }

    /// Opacity of the loading overlay.
    pub fn overlay_opacity(&self) -> f64 {
        match self.phase {
            LoadingPhase::Loading => 1.0,
            LoadingPhase::Zooming => (1.0 - self.phase_elapsed / OVERLAY_FADE).max(0.0),
            LoadingPhase::Complete => 0.0,
        }
    }

    /// Opacity of the page behind the overlay.
    pub fn content_opacity(&self) -> f64 {
        match self.phase {
            LoadingPhase::Complete => (self.phase_elapsed / CONTENT_FADE).min(1.0),
            _ => 0.0,
        }
    }

    /// Scale of the intro star: a gentle pulse while loading, an ease-in
    /// zoom toward the viewer afterwards.
    pub fn star_scale(&self) -> f64 {
        match self.phase {
            LoadingPhase::Loading => 1.0 + 0.2 * ((self.elapsed * PI).sin() * 0.5 + 0.5),
            LoadingPhase::Zooming => {
                let t = (self.phase_elapsed / ZOOM_DURATION).min(1.0);
                1.0 + (ZOOM_SCALE - 1.0) * t * t
            }
            LoadingPhase::Complete => ZOOM_SCALE,
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self.phase {
            LoadingPhase::Loading => "Initializing Star Map",
            _ => "Launching...",
        }
    }

    /// Fill of the progress bar in [0, 1]; the bar only shows while loading.
    pub fn bar_fraction(&self) -> Option<f64> {
        (self.phase == LoadingPhase::Loading).then(|| self.progress.min(100.0) / 100.0)
    }
}
