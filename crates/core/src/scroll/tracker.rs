use warpfolio_protocol::ScrollSnapshot;

use super::sections::SectionBreakpoints;

/// Raw page extents sampled from the scroll source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Vertical scroll offset in pixels.
    pub offset: f64,
    /// Full document height in pixels.
    pub document_height: f64,
    /// Visible viewport height in pixels.
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn new(offset: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            document_height,
            viewport_height,
        }
    }

    /// Pixels the page can actually scroll.
    pub fn scrollable_height(&self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// Normalized progress in [0, 1].
    ///
    /// A page with no scrollable range (or garbage extents) reports 0.
    pub fn progress(&self) -> f64 {
        let range = self.scrollable_height();
        if !range.is_finite() || range <= 0.0 || !self.offset.is_finite() {
            return 0.0;
        }
        (self.offset / range).clamp(0.0, 1.0)
    }
}

/// Handle returned by [`ScrollTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ScrollSnapshot)>;

/// Observable store for the page's scroll position.
///
/// The scroll listener is the single writer (`update` takes `&mut self`);
/// render components read the latest snapshot or subscribe to changes.
/// Only the newest sample matters, so coalesced or dropped scroll events
/// need no special handling.
pub struct ScrollTracker {
    breakpoints: SectionBreakpoints,
    snapshot: ScrollSnapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::with_breakpoints(SectionBreakpoints::DEFAULT)
    }

    pub fn with_breakpoints(breakpoints: SectionBreakpoints) -> Self {
        Self {
            breakpoints,
            snapshot: ScrollSnapshot::TOP,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Record a new scroll sample, recompute the snapshot and notify
    /// every subscriber synchronously.
    pub fn update(&mut self, state: ScrollState) -> ScrollSnapshot {
        let overall = state.progress();
        let resolved = self.breakpoints.resolve(overall);
        let snapshot = ScrollSnapshot {
            overall_progress: overall,
            section: resolved.section,
            section_progress: resolved.progress,
        };

        if snapshot.section != self.snapshot.section {
            log::debug!(
                "section {} -> {} at progress {overall:.3}",
                self.snapshot.section,
                snapshot.section
            );
        }

        self.snapshot = snapshot;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
        snapshot
    }

    /// The latest snapshot; [`ScrollSnapshot::TOP`] before the first sample.
    pub fn snapshot(&self) -> ScrollSnapshot {
        self.snapshot
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ScrollSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
